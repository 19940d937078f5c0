// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point-in-time view of every known heater.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{DeviceState, StateChange};

/// Device states keyed by device id (the heater's MAC address).
///
/// A snapshot is a value: the [`StateStore`](crate::store::StateStore)
/// publishes it behind an `Arc` and replaces it wholesale, so observers
/// holding an older snapshot never see it change. Updates go through
/// [`with_change`](Self::with_change), which returns a new snapshot.
///
/// # Examples
///
/// ```
/// use zinguo_lib::state::{DeviceSnapshot, DeviceState, StateChange};
/// use zinguo_lib::types::ControlKey;
///
/// let before = DeviceSnapshot::from_iter([("AA:BB:CC:DD:EE:01".to_string(), DeviceState::all_off())]);
/// let after = before
///     .with_change("AA:BB:CC:DD:EE:01", &StateChange::switch_on(ControlKey::Light))
///     .unwrap();
///
/// assert!(!before.get("AA:BB:CC:DD:EE:01").unwrap().is_on(ControlKey::Light));
/// assert!(after.get("AA:BB:CC:DD:EE:01").unwrap().is_on(ControlKey::Light));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceSnapshot {
    devices: BTreeMap<String, DeviceState>,
}

impl DeviceSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state of a device.
    #[must_use]
    pub fn get(&self, device_id: &str) -> Option<&DeviceState> {
        self.devices.get(device_id)
    }

    /// Returns `true` if the device is present.
    #[must_use]
    pub fn contains(&self, device_id: &str) -> bool {
        self.devices.contains_key(device_id)
    }

    /// Returns the device ids in sorted order.
    pub fn device_ids(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(String::as_str)
    }

    /// Iterates over `(device id, state)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeviceState)> {
        self.devices.iter().map(|(id, state)| (id.as_str(), state))
    }

    /// Returns the number of devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if no device is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Inserts or replaces a device state while building a snapshot.
    pub fn insert(&mut self, device_id: impl Into<String>, state: DeviceState) {
        self.devices.insert(device_id.into(), state);
    }

    /// Returns a copy of this snapshot with one device state replaced.
    #[must_use]
    pub fn with_device(&self, device_id: impl Into<String>, state: DeviceState) -> Self {
        let mut next = self.clone();
        next.insert(device_id, state);
        next
    }

    /// Returns a copy of this snapshot with `change` applied to one device.
    ///
    /// Returns `None` when the device is not in the snapshot.
    #[must_use]
    pub fn with_change(&self, device_id: &str, change: &StateChange) -> Option<Self> {
        self.get(device_id)
            .map(|state| self.with_device(device_id, state.predict(change)))
    }
}

impl FromIterator<(String, DeviceState)> for DeviceSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, DeviceState)>>(iter: I) -> Self {
        Self {
            devices: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ControlKey;

    const MAC: &str = "AA:BB:CC:DD:EE:01";

    #[test]
    fn empty_snapshot() {
        let snapshot = DeviceSnapshot::new();
        assert!(snapshot.is_empty());
        assert!(snapshot.get(MAC).is_none());
    }

    #[test]
    fn device_ids_are_sorted() {
        let snapshot = DeviceSnapshot::from_iter([
            ("B0:00:00:00:00:02".to_string(), DeviceState::new()),
            ("A0:00:00:00:00:01".to_string(), DeviceState::new()),
        ]);
        let ids: Vec<_> = snapshot.device_ids().collect();
        assert_eq!(ids, vec!["A0:00:00:00:00:01", "B0:00:00:00:00:02"]);
    }

    #[test]
    fn with_change_does_not_touch_other_devices() {
        let other = "AA:BB:CC:DD:EE:02";
        let snapshot = DeviceSnapshot::from_iter([
            (MAC.to_string(), DeviceState::all_off()),
            (other.to_string(), DeviceState::all_off()),
        ]);

        let next = snapshot
            .with_change(MAC, &StateChange::AllOff)
            .and_then(|next| next.with_change(MAC, &StateChange::switch_on(ControlKey::Light)))
            .unwrap();

        assert!(next.get(MAC).unwrap().is_on(ControlKey::Light));
        assert_eq!(next.get(other), snapshot.get(other));
    }

    #[test]
    fn with_change_on_unknown_device_is_none() {
        let snapshot = DeviceSnapshot::from_iter([(MAC.to_string(), DeviceState::all_off())]);
        let next = snapshot.with_change("AA:BB:CC:DD:EE:02", &StateChange::AllOff);
        assert!(next.is_none());
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn deserializes_from_device_map() {
        let json = serde_json::json!({
            MAC: {"lightSwitch": 1, "windSwitch": 2}
        });
        let snapshot: DeviceSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.get(MAC).unwrap().is_on(ControlKey::Light));
    }
}
