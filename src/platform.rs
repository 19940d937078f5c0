// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity setup for the host platform.

use std::sync::Arc;

use crate::api::{DeviceApi, StateFetcher};
use crate::control::{AllOffControl, ControlDescriptor, ControlEntity, ProtectionControl, SwitchControl};
use crate::store::StateStore;

/// Number of control entities created per heater.
pub const CONTROLS_PER_DEVICE: usize = ControlDescriptor::BASE.len() + 2;

/// Builds every control entity for every heater in the current snapshot.
///
/// Per heater, in order: the five base switches, the all-off control and
/// the protection control. Heaters are visited in device id order. An empty
/// snapshot yields no entities, so the store should be refreshed first.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use zinguo_lib::control::Control;
/// use zinguo_lib::{StateStore, ZinguoConfig, platform};
/// # use zinguo_lib::api::{DeviceApi, StateFetcher};
///
/// # async fn example(api: impl DeviceApi, fetcher: impl StateFetcher) -> zinguo_lib::Result<()> {
/// let store = StateStore::new(fetcher, ZinguoConfig::default());
/// store.refresh().await?;
///
/// for control in platform::build_controls(&store, &Arc::new(api)) {
///     println!("{} on={}", control.info().name, control.is_on());
/// }
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn build_controls<A: DeviceApi, F: StateFetcher>(
    store: &StateStore<F>,
    api: &Arc<A>,
) -> Vec<ControlEntity<A, F>> {
    let snapshot = store.current();
    if snapshot.is_empty() {
        tracing::debug!("No device data yet, no controls created");
        return Vec::new();
    }

    let mut controls = Vec::with_capacity(snapshot.len() * CONTROLS_PER_DEVICE);
    for device_id in snapshot.device_ids() {
        for descriptor in &ControlDescriptor::BASE {
            controls.push(
                SwitchControl::new(device_id, descriptor, store.clone(), Arc::clone(api)).into(),
            );
        }
        controls.push(AllOffControl::new(device_id, store.clone(), Arc::clone(api)).into());
        controls.push(ProtectionControl::new(device_id, store.clone(), Arc::clone(api)).into());
    }

    tracing::debug!(
        devices = snapshot.len(),
        controls = controls.len(),
        "Created control entities"
    );
    controls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZinguoConfig;
    use crate::control::Control;
    use crate::control::test_support::{FakeApi, FakeFetcher, MAC};
    use crate::state::{DeviceSnapshot, DeviceState};

    #[test]
    fn empty_snapshot_builds_nothing() {
        let store = StateStore::new(FakeFetcher::new(DeviceSnapshot::new()), ZinguoConfig::default());
        assert!(build_controls(&store, &Arc::new(FakeApi::new())).is_empty());
    }

    #[test]
    fn seven_controls_per_device_in_order() {
        let snapshot = DeviceSnapshot::from_iter([
            ("11:22:33:44:55:66".to_string(), DeviceState::all_off()),
            (MAC.to_string(), DeviceState::all_off()),
        ]);
        let store = StateStore::new(FakeFetcher::new(DeviceSnapshot::new()), ZinguoConfig::default());
        store.replace(snapshot);

        let controls = build_controls(&store, &Arc::new(FakeApi::new()));
        assert_eq!(controls.len(), 14);

        let suffixes: Vec<_> = controls[..CONTROLS_PER_DEVICE]
            .iter()
            .map(|control| {
                let unique_id = &control.info().unique_id;
                unique_id.rsplit('_').next().unwrap_or_default().to_string()
            })
            .collect();
        assert_eq!(
            suffixes,
            [
                "lightSwitch",
                "windSwitch",
                "ventilationSwitch",
                "warmingSwitch1",
                "warmingSwitch2",
                "off",
                "protection"
            ]
        );

        assert!(controls[..CONTROLS_PER_DEVICE]
            .iter()
            .all(|control| control.device_id() == "11:22:33:44:55:66"));
        assert!(matches!(controls[12], ControlEntity::AllOff(_)));
        assert!(matches!(controls[13], ControlEntity::Protection(_)));
        assert_eq!(controls[7].device_id(), MAC);
    }
}
