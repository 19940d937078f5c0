// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device state tracking.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{ControlKey, ProtectionConfig, StateCode};

use super::StateChange;

/// State of one Zinguo heater as reported by the cloud.
///
/// Every base control is optional because the state is unknown until the
/// first refresh; readers treat a missing code as off. Fields the library
/// does not model (temperature readings, firmware info) are kept in an
/// opaque map so that a predicted state carries them over unchanged.
///
/// # Examples
///
/// ```
/// use zinguo_lib::state::DeviceState;
/// use zinguo_lib::types::ControlKey;
///
/// let json = r#"{"lightSwitch": 1, "windSwitch": "2", "temperature": 24}"#;
/// let state: DeviceState = serde_json::from_str(json).unwrap();
///
/// assert!(state.is_on(ControlKey::Light));
/// assert!(!state.is_on(ControlKey::Wind));
/// assert!(!state.is_on(ControlKey::Warming1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    light_switch: Option<StateCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wind_switch: Option<StateCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ventilation_switch: Option<StateCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    warming_switch1: Option<StateCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    warming_switch2: Option<StateCode>,
    /// Thermal protection settings.
    #[serde(rename = "blackSetting", default, skip_serializing_if = "Option::is_none")]
    protection: Option<ProtectionConfig>,
    /// Fields reported by the device that are not modelled.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl DeviceState {
    /// Creates a new empty device state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state with every base control reported off.
    #[must_use]
    pub fn all_off() -> Self {
        let mut state = Self::new();
        for key in ControlKey::ALL {
            state.set_code(key, StateCode::OFF);
        }
        state
    }

    // ========== Base Controls ==========

    /// Returns the raw code reported for a control.
    #[must_use]
    pub fn code(&self, key: ControlKey) -> Option<&StateCode> {
        match key {
            ControlKey::Light => self.light_switch.as_ref(),
            ControlKey::Wind => self.wind_switch.as_ref(),
            ControlKey::Ventilation => self.ventilation_switch.as_ref(),
            ControlKey::Warming1 => self.warming_switch1.as_ref(),
            ControlKey::Warming2 => self.warming_switch2.as_ref(),
        }
    }

    /// Returns `true` if the control's code is `1`.
    ///
    /// A missing code is off.
    #[must_use]
    pub fn is_on(&self, key: ControlKey) -> bool {
        self.code(key).is_some_and(StateCode::is_on)
    }

    /// Sets the code for a control.
    pub fn set_code(&mut self, key: ControlKey, code: StateCode) {
        *self.slot_mut(key) = Some(code);
    }

    /// Clears the code for a control.
    pub fn clear_code(&mut self, key: ControlKey) {
        *self.slot_mut(key) = None;
    }

    /// Returns `true` if all five base codes are known.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        ControlKey::ALL.into_iter().all(|key| self.code(key).is_some())
    }

    /// Returns `true` if the heating/fan interlock holds.
    ///
    /// Either heating element on requires the fan on. The device itself may
    /// briefly report states that violate this; predicted states never do.
    #[must_use]
    pub fn interlocks_hold(&self) -> bool {
        let heating = self.is_on(ControlKey::Warming1) || self.is_on(ControlKey::Warming2);
        !heating || self.is_on(ControlKey::Wind)
    }

    fn slot_mut(&mut self, key: ControlKey) -> &mut Option<StateCode> {
        match key {
            ControlKey::Light => &mut self.light_switch,
            ControlKey::Wind => &mut self.wind_switch,
            ControlKey::Ventilation => &mut self.ventilation_switch,
            ControlKey::Warming1 => &mut self.warming_switch1,
            ControlKey::Warming2 => &mut self.warming_switch2,
        }
    }

    // ========== Protection ==========

    /// Returns the thermal protection settings, if reported.
    #[must_use]
    pub fn protection(&self) -> Option<ProtectionConfig> {
        self.protection
    }

    /// Sets the thermal protection settings.
    pub fn set_protection(&mut self, config: ProtectionConfig) {
        self.protection = Some(config);
    }

    /// Returns `true` if thermal protection is enabled.
    #[must_use]
    pub fn is_protection_on(&self) -> bool {
        self.protection.is_some_and(|config| config.status)
    }

    // ========== Unmodelled fields ==========

    /// Returns a field the library does not model.
    #[must_use]
    pub fn extra(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    // ========== State Changes ==========

    /// Applies a state change, interlocks included.
    ///
    /// Returns `true` if the state actually changed.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Switch { key, on } => {
                let mut changed = self.switch(*key, *on);
                if *on && key.is_warming() {
                    changed |= self.switch(ControlKey::Wind, true);
                } else if !*on && *key == ControlKey::Wind {
                    changed |= self.switch(ControlKey::Warming1, false);
                    changed |= self.switch(ControlKey::Warming2, false);
                }
                changed
            }
            StateChange::AllOff => ControlKey::ALL
                .into_iter()
                .fold(false, |changed, key| self.switch(key, false) | changed),
            StateChange::Protection(config) => {
                if self.protection.as_ref() == Some(config) {
                    false
                } else {
                    self.protection = Some(*config);
                    true
                }
            }
        }
    }

    /// Returns a copy of this state with the change applied.
    #[must_use]
    pub fn predict(&self, change: &StateChange) -> Self {
        let mut next = self.clone();
        next.apply(change);
        next
    }

    /// Writes the canonical code for `on`. Returns `true` if the stored
    /// code differed, so a string `"1"` normalized to `1` counts as a change.
    fn switch(&mut self, key: ControlKey, on: bool) -> bool {
        let code = StateCode::from_on(on);
        let slot = self.slot_mut(key);
        if slot.as_ref() == Some(&code) {
            false
        } else {
            *slot = Some(code);
            true
        }
    }
}
