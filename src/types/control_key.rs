// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Base control keys of a Zinguo heater.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// One of the five toggleable base functions of a heater.
///
/// The string form is the key used both in the device state reported by the
/// cloud and in outbound control payloads.
///
/// # Examples
///
/// ```
/// use zinguo_lib::types::ControlKey;
///
/// assert_eq!(ControlKey::Wind.as_str(), "windSwitch");
/// assert_eq!("warmingSwitch1".parse::<ControlKey>().unwrap(), ControlKey::Warming1);
/// assert!(ControlKey::Warming2.is_warming());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ControlKey {
    /// Lighting.
    #[serde(rename = "lightSwitch")]
    Light,
    /// Fan ("wind"). Required by either heating element.
    #[serde(rename = "windSwitch")]
    Wind,
    /// Ventilation.
    #[serde(rename = "ventilationSwitch")]
    Ventilation,
    /// First heating element.
    #[serde(rename = "warmingSwitch1")]
    Warming1,
    /// Second heating element.
    #[serde(rename = "warmingSwitch2")]
    Warming2,
}

impl ControlKey {
    /// All base keys, in the order the heater app presents them.
    pub const ALL: [Self; 5] = [
        Self::Light,
        Self::Wind,
        Self::Ventilation,
        Self::Warming1,
        Self::Warming2,
    ];

    /// Returns the protocol key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "lightSwitch",
            Self::Wind => "windSwitch",
            Self::Ventilation => "ventilationSwitch",
            Self::Warming1 => "warmingSwitch1",
            Self::Warming2 => "warmingSwitch2",
        }
    }

    /// Returns `true` for either heating element.
    #[must_use]
    pub const fn is_warming(&self) -> bool {
        matches!(self, Self::Warming1 | Self::Warming2)
    }
}

impl fmt::Display for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseError::InvalidValue {
                field: "control key".to_string(),
                message: format!("unknown key {s:?}"),
            })
    }
}
