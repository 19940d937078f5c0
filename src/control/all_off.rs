// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Momentary all-off control.

use std::sync::Arc;

use crate::api::{ControlPayload, DeviceApi, StateFetcher};
use crate::state::StateChange;
use crate::store::StateStore;

use super::{Control, ControlOutcome, EntityInfo};

/// Turns every base control of a heater off.
///
/// Always reported off. Turning it on sends the all-off command whatever
/// the current state; turning it off does nothing.
pub struct AllOffControl<A: DeviceApi, F: StateFetcher> {
    device_id: String,
    store: StateStore<F>,
    api: Arc<A>,
    info: EntityInfo,
}

impl<A: DeviceApi, F: StateFetcher> AllOffControl<A, F> {
    /// Display name, without the device suffix.
    pub const NAME: &'static str = "All Off";
    /// Icon hint.
    pub const ICON: &'static str = "mdi:power-off";

    /// Creates the all-off control of one heater.
    #[must_use]
    pub fn new(device_id: impl Into<String>, store: StateStore<F>, api: Arc<A>) -> Self {
        let device_id = device_id.into();
        let info = EntityInfo::new(
            &device_id,
            Self::NAME,
            EntityInfo::ALL_OFF_SUFFIX,
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
}

impl<A: DeviceApi, F: StateFetcher> Control for AllOffControl<A, F> {
    fn info(&self) -> &EntityInfo {
        &self.info
    }

    fn device_id(&self) -> &str {
        &self.device_id
    }

    fn is_on(&self) -> bool {
        false
    }

    async fn turn_on(&self) -> ControlOutcome {
        let payload = ControlPayload::all_off(&self.device_id, self.api.account());
        tracing::debug!(device_id = %self.device_id, "Sending all-off command");

        if let Err(e) = self.api.send_control(&payload).await {
            tracing::error!(
                device_id = %self.device_id,
                operation = "all_off",
                error = %e,
                "All-off command failed"
            );
            return ControlOutcome::Failed;
        }

        tracing::info!(device_id = %self.device_id, "All controls turned off");
        if let Err(e) = self.store.update_device(&self.device_id, &StateChange::AllOff) {
            tracing::warn!(device_id = %self.device_id, error = %e, "Prediction skipped");
        }
        self.store.schedule_confirmation();
        ControlOutcome::Applied
    }

    async fn turn_off(&self) -> ControlOutcome {
        ControlOutcome::Ignored
    }
}

impl<A: DeviceApi, F: StateFetcher> std::fmt::Debug for AllOffControl<A, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllOffControl")
            .field("device_id", &self.device_id)
            .finish_non_exhaustive()
    }
}
