// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermal protection control.

use std::sync::Arc;

use crate::api::{DeviceApi, StateFetcher};
use crate::state::StateChange;
use crate::store::StateStore;
use crate::types::ProtectionConfig;

use super::{Control, ControlOutcome, EntityInfo};

/// Enables or disables the thermal protection of a heater.
///
/// The run and pause times reported by the heater are sent back unchanged;
/// only `status` is replaced. A heater that never reported protection
/// settings gets the configured defaults.
///
/// No confirmation refresh is scheduled: the written settings stay until
/// the next periodic refresh.
pub struct ProtectionControl<A: DeviceApi, F: StateFetcher> {
    device_id: String,
    store: StateStore<F>,
    api: Arc<A>,
    info: EntityInfo,
}

impl<A: DeviceApi, F: StateFetcher> ProtectionControl<A, F> {
    /// Display name, without the device suffix.
    pub const NAME: &'static str = "Thermal Protection";
    /// Icon hint.
    pub const ICON: &'static str = "mdi:shield-check";

    /// Creates the protection control of one heater.
    #[must_use]
    pub fn new(device_id: impl Into<String>, store: StateStore<F>, api: Arc<A>) -> Self {
        let device_id = device_id.into();
        let info = EntityInfo::new(
            &device_id,
            Self::NAME,
            EntityInfo::PROTECTION_SUFFIX,
            Self::ICON,
            store.config(),
        );
        Self {
            device_id,
            store,
            api,
            info,
        }
    }

    /// Returns the settings that [`set_status`](Self::set_status) would
    /// send for `status`.
    #[must_use]
    pub fn target_config(&self, status: bool) -> ProtectionConfig {
        let current = self
            .store
            .current()
            .get(&self.device_id)
            .and_then(crate::state::DeviceState::protection);

        match current {
            Some(config) => config.with_status(status),
            None => {
                tracing::debug!(device_id = %self.device_id, "No protection settings reported, using defaults");
                self.store.config().default_protection(status).with_status(status)
            }
        }
    }

    /// Sends new protection settings with `status` replaced.
    pub async fn set_status(&self, status: bool) -> ControlOutcome {
        let config = self.target_config(status);
        tracing::debug!(device_id = %self.device_id, ?config, "Sending protection settings");

        if let Err(e) = self.api.set_protection(&self.device_id, &config).await {
            tracing::error!(
                device_id = %self.device_id,
                operation = "set_protection",
                status,
                error = %e,
                "Protection command failed"
            );
            return ControlOutcome::Failed;
        }

        if let Err(e) = self
            .store
            .update_device(&self.device_id, &StateChange::protection(config))
        {
            tracing::warn!(device_id = %self.device_id, error = %e, "Prediction skipped");
        }
        ControlOutcome::Applied
    }
}

impl<A: DeviceApi, F: StateFetcher> Control for ProtectionControl<A, F> {
    fn info(&self) -> &EntityInfo {
        &self.info
    }

    fn device_id(&self) -> &str {
        &self.device_id
    }

    fn is_on(&self) -> bool {
        self.store
            .current()
            .get(&self.device_id)
            .is_some_and(crate::state::DeviceState::is_protection_on)
    }

    async fn turn_on(&self) -> ControlOutcome {
        self.set_status(true).await
    }

    async fn turn_off(&self) -> ControlOutcome {
        self.set_status(false).await
    }
}

impl<A: DeviceApi, F: StateFetcher> std::fmt::Debug for ProtectionControl<A, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtectionControl")
            .field("device_id", &self.device_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZinguoConfig;
    use crate::control::test_support::{FakeApi, FakeFetcher, MAC};
    use crate::state::{DeviceSnapshot, DeviceState};

    fn protection_with(state: DeviceState) -> (ProtectionControl<FakeApi, FakeFetcher>, Arc<FakeApi>) {
        let snapshot = DeviceSnapshot::from_iter([(MAC.to_string(), state)]);
        let store = StateStore::new(FakeFetcher::new(snapshot.clone()), ZinguoConfig::default());
        store.replace(snapshot);
        let api = Arc::new(FakeApi::new());
        (ProtectionControl::new(MAC, store, Arc::clone(&api)), api)
    }

    #[tokio::test]
    async fn defaults_when_never_reported() {
        let (control, api) = protection_with(DeviceState::all_off());
        assert!(!control.is_on());

        assert_eq!(control.turn_on().await, ControlOutcome::Applied);

        let expected = ProtectionConfig::new(true, 5, 5);
        assert_eq!(api.protections(), vec![(MAC.to_string(), expected)]);
        assert_eq!(control.store.device(MAC).unwrap().protection(), Some(expected));
        assert!(control.is_on());
    }

    #[tokio::test]
    async fn keeps_reported_times() {
        let mut state = DeviceState::all_off();
        state.set_protection(ProtectionConfig::new(true, 20, 10));
        let (control, api) = protection_with(state);
        assert!(control.is_on());

        assert_eq!(control.turn_off().await, ControlOutcome::Applied);

        assert_eq!(api.protections()[0].1, ProtectionConfig::new(false, 20, 10));
        assert!(!control.is_on());
    }

    #[tokio::test]
    async fn no_confirmation_refresh() {
        let (control, _) = protection_with(DeviceState::all_off());
        control.turn_on().await;
        assert_eq!(control.store.pending_jobs(), 0);
    }

    #[tokio::test]
    async fn failure_keeps_snapshot() {
        let (control, api) = protection_with(DeviceState::all_off());
        api.fail_next();

        assert_eq!(control.turn_on().await, ControlOutcome::Failed);
        assert!(control.store.device(MAC).unwrap().protection().is_none());
    }

    #[test]
    fn target_config_uses_configured_defaults() {
        let config = ZinguoConfig::new().with_default_protection_times(15, 10);
        let store = StateStore::new(FakeFetcher::new(DeviceSnapshot::new()), config);
        let control = ProtectionControl::new(MAC, store, Arc::new(FakeApi::new()));

        assert_eq!(control.target_config(false), ProtectionConfig::new(false, 15, 10));
        assert_eq!(control.info().unique_id, "zinguo_AA:BB:CC:DD:EE:01_protection");
    }
}
