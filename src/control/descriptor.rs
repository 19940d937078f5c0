// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity metadata shown by the host.

use serde::Serialize;

use crate::config::ZinguoConfig;
use crate::types::ControlKey;

/// Static description of a base switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlDescriptor {
    /// Display name, without the device suffix.
    pub name: &'static str,
    /// The control the switch drives.
    pub key: ControlKey,
    /// Icon hint.
    pub icon: &'static str,
}

impl ControlDescriptor {
    /// The five base switches, in setup order.
    pub const BASE: [Self; 5] = [
        Self::new("Light", ControlKey::Light, "mdi:lightbulb"),
        Self::new("Fan", ControlKey::Wind, "mdi:fan"),
        Self::new("Ventilation", ControlKey::Ventilation, "mdi:air-filter"),
        Self::new("Warming 1", ControlKey::Warming1, "mdi:radiator"),
        Self::new("Warming 2", ControlKey::Warming2, "mdi:radiator"),
    ];

    /// Creates a descriptor.
    #[must_use]
    pub const fn new(name: &'static str, key: ControlKey, icon: &'static str) -> Self {
        Self { name, key, icon }
    }

    /// Returns the descriptor of a base switch.
    #[must_use]
    pub fn for_key(key: ControlKey) -> Self {
        match key {
            ControlKey::Light => Self::BASE[0],
            ControlKey::Wind => Self::BASE[1],
            ControlKey::Ventilation => Self::BASE[2],
            ControlKey::Warming1 => Self::BASE[3],
            ControlKey::Warming2 => Self::BASE[4],
        }
    }
}

/// Physical unit an entity belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// `(domain, device id)` pair identifying the unit.
    pub identifiers: (String, String),
    /// Display name of the unit.
    pub name: String,
}

impl DeviceInfo {
    /// Creates the device info of a heater.
    #[must_use]
    pub fn new(device_id: &str, config: &ZinguoConfig) -> Self {
        Self {
            identifiers: (ZinguoConfig::DOMAIN.to_string(), device_id.to_string()),
            name: config.device_name().to_string(),
        }
    }
}

/// Metadata of one control entity.
///
/// # Examples
///
/// ```
/// use zinguo_lib::ZinguoConfig;
/// use zinguo_lib::control::EntityInfo;
///
/// let info = EntityInfo::new(
///     "AA:BB:CC:DD:EE:01",
///     "Light",
///     "lightSwitch",
///     "mdi:lightbulb",
///     &ZinguoConfig::default(),
/// );
/// assert_eq!(info.name, "Light (E:01)");
/// assert_eq!(info.unique_id, "zinguo_AA:BB:CC:DD:EE:01_lightSwitch");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityInfo {
    /// Display name, suffixed with the end of the device id.
    pub name: String,
    /// Stable identifier.
    pub unique_id: String,
    /// Icon hint.
    pub icon: &'static str,
    /// Owning unit.
    pub device: DeviceInfo,
}

impl EntityInfo {
    /// Unique id suffix of the all-off control.
    pub const ALL_OFF_SUFFIX: &'static str = "all_off";
    /// Unique id suffix of the protection control.
    pub const PROTECTION_SUFFIX: &'static str = "protection";

    /// Builds entity metadata.
    #[must_use]
    pub fn new(
        device_id: &str,
        name: &str,
        suffix: &str,
        icon: &'static str,
        config: &ZinguoConfig,
    ) -> Self {
        Self {
            name: format!("{name} ({})", short_id(device_id)),
            unique_id: format!("{}_{device_id}_{suffix}", config.unique_id_prefix()),
            icon,
            device: DeviceInfo::new(device_id, config),
        }
    }

    /// Builds the metadata of a base switch.
    #[must_use]
    pub fn for_switch(device_id: &str, descriptor: &ControlDescriptor, config: &ZinguoConfig) -> Self {
        Self::new(
            device_id,
            descriptor.name,
            descriptor.key.as_str(),
            descriptor.icon,
            config,
        )
    }
}

/// Last four characters of a device id.
fn short_id(device_id: &str) -> &str {
    let start = device_id
        .char_indices()
        .rev()
        .nth(3)
        .map_or(0, |(index, _)| index);
    &device_id[start..]
}
