// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound control payloads.

use serde::{Deserialize, Serialize};

use crate::types::ControlKey;

/// Trigger value for a switch field in a control payload.
///
/// The cloud treats a control command as "press this button": the device
/// flips the triggered function, so the same payload turns a control on or
/// off depending on its current state.
const TRIGGER: u8 = 1;

/// A control command as sent to the cloud.
///
/// # Examples
///
/// ```
/// use zinguo_lib::api::ControlPayload;
/// use zinguo_lib::types::ControlKey;
///
/// let payload = ControlPayload::switch("AA:BB:CC:DD:EE:01", ControlKey::Light, "user@example.com");
/// let json = serde_json::to_value(&payload).unwrap();
///
/// assert_eq!(json["lightSwitch"], 1);
/// assert_eq!(json["windSwitch"], 0);
/// assert_eq!(json["masterUser"], "user@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlPayload {
    /// Triggers one base control.
    Switch(SwitchPayload),
    /// Turns every base control off.
    AllOff(AllOffPayload),
}

impl ControlPayload {
    /// Builds the payload triggering `key`.
    #[must_use]
    pub fn switch(mac: impl Into<String>, key: ControlKey, account: impl Into<String>) -> Self {
        Self::Switch(SwitchPayload::trigger(mac, key, account))
    }

    /// Builds the all-off payload.
    #[must_use]
    pub fn all_off(mac: impl Into<String>, account: impl Into<String>) -> Self {
        Self::AllOff(AllOffPayload {
            mac: mac.into(),
            turn_off_all: TRIGGER,
            master_user: account.into(),
        })
    }

    /// Returns the target device id.
    #[must_use]
    pub fn mac(&self) -> &str {
        match self {
            Self::Switch(payload) => &payload.mac,
            Self::AllOff(payload) => &payload.mac,
        }
    }
}

/// Payload triggering a single base control.
///
/// Every switch field is `0` except the triggered one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchPayload {
    /// Target device id.
    pub mac: String,
    /// First heating element.
    pub warming_switch1: u8,
    /// Second heating element.
    pub warming_switch2: u8,
    /// Lighting.
    pub light_switch: u8,
    /// Fan.
    pub wind_switch: u8,
    /// Ventilation.
    pub ventilation_switch: u8,
    /// All-off trigger, always `0` here.
    pub turn_off_all: u8,
    /// Parameter-setting mode flag, always `false` for control commands.
    #[serde(rename = "setParamter")]
    pub set_parameter: bool,
    /// Scheduled-action flag, always `false` for control commands.
    pub action: bool,
    /// Account the command is issued for.
    pub master_user: String,
}

impl SwitchPayload {
    /// Builds the payload triggering `key`.
    #[must_use]
    pub fn trigger(mac: impl Into<String>, key: ControlKey, account: impl Into<String>) -> Self {
        let mut payload = Self {
            mac: mac.into(),
            warming_switch1: 0,
            warming_switch2: 0,
            light_switch: 0,
            wind_switch: 0,
            ventilation_switch: 0,
            turn_off_all: 0,
            set_parameter: false,
            action: false,
            master_user: account.into(),
        };
        *payload.field_mut(key) = TRIGGER;
        payload
    }

    /// Returns the key this payload triggers, if exactly one is set.
    #[must_use]
    pub fn triggered(&self) -> Option<ControlKey> {
        let mut set = ControlKey::ALL
            .into_iter()
            .filter(|key| self.field(*key) == TRIGGER);
        match (set.next(), set.next()) {
            (Some(key), None) => Some(key),
            _ => None,
        }
    }

    fn field(&self, key: ControlKey) -> u8 {
        match key {
            ControlKey::Light => self.light_switch,
            ControlKey::Wind => self.wind_switch,
            ControlKey::Ventilation => self.ventilation_switch,
            ControlKey::Warming1 => self.warming_switch1,
            ControlKey::Warming2 => self.warming_switch2,
        }
    }

    fn field_mut(&mut self, key: ControlKey) -> &mut u8 {
        match key {
            ControlKey::Light => &mut self.light_switch,
            ControlKey::Wind => &mut self.wind_switch,
            ControlKey::Ventilation => &mut self.ventilation_switch,
            ControlKey::Warming1 => &mut self.warming_switch1,
            ControlKey::Warming2 => &mut self.warming_switch2,
        }
    }
}

/// Payload turning every base control off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllOffPayload {
    /// Target device id.
    pub mac: String,
    /// All-off trigger, always `1`.
    pub turn_off_all: u8,
    /// Account the command is issued for.
    pub master_user: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MAC: &str = "AA:BB:CC:DD:EE:01";

    #[test]
    fn switch_payload_matches_wire_format() {
        let payload = ControlPayload::switch(MAC, ControlKey::Warming1, "alice");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "mac": MAC,
                "warmingSwitch1": 1,
                "warmingSwitch2": 0,
                "lightSwitch": 0,
                "windSwitch": 0,
                "ventilationSwitch": 0,
                "turnOffAll": 0,
                "setParamter": false,
                "action": false,
                "masterUser": "alice"
            })
        );
    }

    #[test]
    fn all_off_payload_matches_wire_format() {
        let payload = ControlPayload::all_off(MAC, "alice");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"mac": MAC, "turnOffAll": 1, "masterUser": "alice"})
        );
        assert_eq!(payload.mac(), MAC);
    }

    #[test]
    fn each_key_triggers_its_own_field() {
        for key in ControlKey::ALL {
            let payload = SwitchPayload::trigger(MAC, key, "alice");
            assert_eq!(payload.triggered(), Some(key));
            let json = serde_json::to_value(&payload).unwrap();
            assert_eq!(json[key.as_str()], 1);
        }
    }

    #[test]
    fn deserializes_back_into_the_right_variant() {
        let all_off: ControlPayload =
            serde_json::from_value(json!({"mac": MAC, "turnOffAll": 1, "masterUser": "alice"}))
                .unwrap();
        assert!(matches!(all_off, ControlPayload::AllOff(_)));

        let switch = serde_json::to_value(ControlPayload::switch(MAC, ControlKey::Light, "alice"))
            .unwrap();
        let switch: ControlPayload = serde_json::from_value(switch).unwrap();
        assert!(matches!(switch, ControlPayload::Switch(_)));
    }
}
