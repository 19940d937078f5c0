// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Base toggle control.

use std::sync::Arc;

use crate::api::{ControlPayload, DeviceApi, StateFetcher};
use crate::state::StateChange;
use crate::store::StateStore;
use crate::types::ControlKey;

use super::{Control, ControlDescriptor, ControlOutcome, EntityInfo};

/// Toggle for one base control of one heater.
///
/// The on/off state is read from the store on every call. Turning the
/// control on or off sends a trigger command, publishes the predicted state
/// (interlocks included) and schedules a confirmation refresh.
pub struct SwitchControl<A: DeviceApi, F: StateFetcher> {
    device_id: String,
    key: ControlKey,
    store: StateStore<F>,
    api: Arc<A>,
    info: EntityInfo,
}

impl<A: DeviceApi, F: StateFetcher> SwitchControl<A, F> {
    /// Creates the control described by `descriptor` for one heater.
    #[must_use]
    pub fn new(
        device_id: impl Into<String>,
        descriptor: &ControlDescriptor,
        store: StateStore<F>,
        api: Arc<A>,
    ) -> Self {
        let device_id = device_id.into();
        let info = EntityInfo::for_switch(&device_id, descriptor, store.config());
        Self {
            device_id,
            key: descriptor.key,
            store,
            api,
            info,
        }
    }

    /// Returns the control this switch drives.
    #[must_use]
    pub fn key(&self) -> ControlKey {
        self.key
    }

    async fn set(&self, on: bool) -> ControlOutcome {
        let operation = if on { "turn_on" } else { "turn_off" };

        self.store.request_refresh();
        if self.is_on() == on {
            tracing::debug!(device_id = %self.device_id, key = %self.key, operation, "Already in requested state");
            return ControlOutcome::Unchanged;
        }

        let payload = ControlPayload::switch(&self.device_id, self.key, self.api.account());
        tracing::debug!(device_id = %self.device_id, key = %self.key, operation, "Sending switch command");

        if let Err(e) = self.api.send_control(&payload).await {
            tracing::error!(
                device_id = %self.device_id,
                key = %self.key,
                operation,
                error = %e,
                "Switch command failed"
            );
            return ControlOutcome::Failed;
        }

        if let Err(e) = self
            .store
            .update_device(&self.device_id, &StateChange::Switch { key: self.key, on })
        {
            tracing::warn!(device_id = %self.device_id, key = %self.key, error = %e, "Prediction skipped");
        }
        self.store.schedule_confirmation();
        ControlOutcome::Applied
    }
}

impl<A: DeviceApi, F: StateFetcher> Control for SwitchControl<A, F> {
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
            .is_some_and(|state| state.is_on(self.key))
    }

    async fn turn_on(&self) -> ControlOutcome {
        self.set(true).await
    }

    async fn turn_off(&self) -> ControlOutcome {
        self.set(false).await
    }
}

impl<A: DeviceApi, F: StateFetcher> std::fmt::Debug for SwitchControl<A, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwitchControl")
            .field("device_id", &self.device_id)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZinguoConfig;
    use crate::control::test_support::{FakeApi, FakeFetcher, MAC};
    use crate::state::{DeviceSnapshot, DeviceState};
    use crate::types::StateCode;

    fn control(key: ControlKey, state: DeviceState) -> (SwitchControl<FakeApi, FakeFetcher>, Arc<FakeApi>) {
        let snapshot = DeviceSnapshot::from_iter([(MAC.to_string(), state)]);
        let store = StateStore::new(FakeFetcher::new(snapshot.clone()), ZinguoConfig::default());
        store.replace(snapshot);
        let api = Arc::new(FakeApi::new());
        let control = SwitchControl::new(MAC, &ControlDescriptor::for_key(key), store, Arc::clone(&api));
        (control, api)
    }

    #[tokio::test]
    async fn is_on_reads_store() {
        let mut state = DeviceState::all_off();
        state.set_code(ControlKey::Light, StateCode::Text("1".to_string()));
        let (light, _) = control(ControlKey::Light, state.clone());
        let (fan, _) = control(ControlKey::Wind, state);

        assert!(light.is_on());
        assert!(!fan.is_on());
    }

    #[tokio::test]
    async fn unknown_device_is_off() {
        let (control, _) = control(ControlKey::Light, DeviceState::all_off());
        let other = SwitchControl::new(
            "11:22:33:44:55:66",
            &ControlDescriptor::for_key(ControlKey::Light),
            control.store.clone(),
            Arc::new(FakeApi::new()),
        );
        assert!(!other.is_on());
    }

    #[tokio::test]
    async fn turn_on_unknown_device_skips_prediction() {
        let (control, _) = control(ControlKey::Light, DeviceState::all_off());
        let api = Arc::new(FakeApi::new());
        let other = SwitchControl::new(
            "11:22:33:44:55:66",
            &ControlDescriptor::for_key(ControlKey::Light),
            control.store.clone(),
            Arc::clone(&api),
        );

        assert_eq!(other.turn_on().await, ControlOutcome::Applied);
        assert_eq!(api.controls().len(), 1);
        assert!(control.store.device("11:22:33:44:55:66").is_none());
        assert_eq!(control.store.current().len(), 1);
        assert_eq!(control.store.pending_jobs(), 1);
    }

    #[tokio::test]
    async fn turn_on_predicts_interlocks() {
        let (control, api) = control(ControlKey::Warming2, DeviceState::all_off());

        assert_eq!(control.turn_on().await, ControlOutcome::Applied);

        let sent = api.controls();
        assert_eq!(sent.len(), 1);
        match &sent[0] {
            ControlPayload::Switch(payload) => {
                assert_eq!(payload.triggered(), Some(ControlKey::Warming2));
            }
            ControlPayload::AllOff(_) => panic!("expected a switch payload"),
        }

        let state = control.store.device(MAC).unwrap();
        assert!(state.is_on(ControlKey::Warming2));
        assert!(state.is_on(ControlKey::Wind));
        assert!(state.interlocks_hold());
        assert_eq!(control.store.pending_jobs(), 1);
    }

    #[tokio::test]
    async fn turn_off_already_off_sends_nothing() {
        let (control, api) = control(ControlKey::Light, DeviceState::all_off());
        let before = control.store.current();

        assert_eq!(control.turn_off().await, ControlOutcome::Unchanged);
        assert!(api.controls().is_empty());
        assert!(Arc::ptr_eq(&before, &control.store.current()));
        assert_eq!(control.store.pending_jobs(), 0);
    }

    #[tokio::test]
    async fn failed_send_leaves_snapshot() {
        let (control, api) = control(ControlKey::Light, DeviceState::all_off());
        api.fail_next();
        let before = control.store.current();

        assert_eq!(control.turn_on().await, ControlOutcome::Failed);
        assert!(Arc::ptr_eq(&before, &control.store.current()));
        assert_eq!(control.store.pending_jobs(), 0);
    }

    #[tokio::test]
    async fn entity_info() {
        let (control, _) = control(ControlKey::Ventilation, DeviceState::all_off());
        assert_eq!(control.info().unique_id, "zinguo_AA:BB:CC:DD:EE:01_ventilationSwitch");
        assert_eq!(control.info().icon, "mdi:air-filter");
        assert_eq!(control.device_id(), MAC);
        assert_eq!(control.key(), ControlKey::Ventilation);
    }
}
