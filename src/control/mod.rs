// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Toggle controls exposed to the host.
//!
//! Every heater gets seven controls:
//!
//! - five [`SwitchControl`]s, one per base control,
//! - an [`AllOffControl`] that turns all of them off, and
//! - a [`ProtectionControl`] for the thermal protection mode.
//!
//! Controls hold no state of their own. They derive their status from the
//! [`StateStore`](crate::store::StateStore) snapshot and write predicted
//! state back into it after a successful command.
//!
//! Command failures are logged and reported as [`ControlOutcome::Failed`];
//! they never reach the caller as errors.

mod all_off;
mod descriptor;
mod protection;
mod switch;

pub use all_off::AllOffControl;
pub use descriptor::{ControlDescriptor, DeviceInfo, EntityInfo};
pub use protection::ProtectionControl;
pub use switch::SwitchControl;

use crate::api::{DeviceApi, StateFetcher};

/// What a control operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOutcome {
    /// The command was sent and the predicted state published.
    Applied,
    /// The control was already in the requested state; nothing was sent.
    Unchanged,
    /// The command failed; the snapshot is untouched.
    Failed,
    /// The operation has no effect on this control.
    Ignored,
}

impl ControlOutcome {
    /// Returns `true` if a command was sent successfully.
    #[must_use]
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Common interface of every control entity.
#[allow(async_fn_in_trait)]
pub trait Control {
    /// Returns the entity metadata.
    fn info(&self) -> &EntityInfo;

    /// Returns the heater this control belongs to.
    fn device_id(&self) -> &str;

    /// Returns the on/off state derived from the latest snapshot.
    fn is_on(&self) -> bool;

    /// Requests the on state.
    async fn turn_on(&self) -> ControlOutcome;

    /// Requests the off state.
    async fn turn_off(&self) -> ControlOutcome;
}

/// Any control entity, so the host can hold them uniformly.
#[derive(Debug)]
pub enum ControlEntity<A: DeviceApi, F: StateFetcher> {
    /// A base toggle.
    Switch(SwitchControl<A, F>),
    /// The all-off control.
    AllOff(AllOffControl<A, F>),
    /// The thermal protection control.
    Protection(ProtectionControl<A, F>),
}

impl<A: DeviceApi, F: StateFetcher> Control for ControlEntity<A, F> {
    fn info(&self) -> &EntityInfo {
        match self {
            Self::Switch(control) => control.info(),
            Self::AllOff(control) => control.info(),
            Self::Protection(control) => control.info(),
        }
    }

    fn device_id(&self) -> &str {
        match self {
            Self::Switch(control) => control.device_id(),
            Self::AllOff(control) => control.device_id(),
            Self::Protection(control) => control.device_id(),
        }
    }

    fn is_on(&self) -> bool {
        match self {
            Self::Switch(control) => control.is_on(),
            Self::AllOff(control) => control.is_on(),
            Self::Protection(control) => control.is_on(),
        }
    }

    async fn turn_on(&self) -> ControlOutcome {
        match self {
            Self::Switch(control) => control.turn_on().await,
            Self::AllOff(control) => control.turn_on().await,
            Self::Protection(control) => control.turn_on().await,
        }
    }

    async fn turn_off(&self) -> ControlOutcome {
        match self {
            Self::Switch(control) => control.turn_off().await,
            Self::AllOff(control) => control.turn_off().await,
            Self::Protection(control) => control.turn_off().await,
        }
    }
}

impl<A: DeviceApi, F: StateFetcher> From<SwitchControl<A, F>> for ControlEntity<A, F> {
    fn from(control: SwitchControl<A, F>) -> Self {
        Self::Switch(control)
    }
}

impl<A: DeviceApi, F: StateFetcher> From<AllOffControl<A, F>> for ControlEntity<A, F> {
    fn from(control: AllOffControl<A, F>) -> Self {
        Self::AllOff(control)
    }
}

impl<A: DeviceApi, F: StateFetcher> From<ProtectionControl<A, F>> for ControlEntity<A, F> {
    fn from(control: ProtectionControl<A, F>) -> Self {
        Self::Protection(control)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicBool, Ordering};

    use parking_lot::Mutex;

    use crate::api::{ControlPayload, DeviceApi, StateFetcher};
    use crate::error::{CommandError, FetchError};
    use crate::state::DeviceSnapshot;
    use crate::types::ProtectionConfig;

    pub const MAC: &str = "AA:BB:CC:DD:EE:01";

    /// Records every command; fails once after `fail_next`.
    #[derive(Default)]
    pub struct FakeApi {
        controls: Mutex<Vec<ControlPayload>>,
        protections: Mutex<Vec<(String, ProtectionConfig)>>,
        fail: AtomicBool,
    }

    impl FakeApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_next(&self) {
            self.fail.store(true, Ordering::SeqCst);
        }

        pub fn controls(&self) -> Vec<ControlPayload> {
            self.controls.lock().clone()
        }

        pub fn protections(&self) -> Vec<(String, ProtectionConfig)> {
            self.protections.lock().clone()
        }

        fn check(&self) -> Result<(), CommandError> {
            if self.fail.swap(false, Ordering::SeqCst) {
                Err(CommandError::Transport("connection reset".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl DeviceApi for FakeApi {
        fn account(&self) -> &str {
            "user@example.com"
        }

        async fn send_control(&self, payload: &ControlPayload) -> Result<(), CommandError> {
            self.check()?;
            self.controls.lock().push(payload.clone());
            Ok(())
        }

        async fn set_protection(
            &self,
            device_id: &str,
            config: &ProtectionConfig,
        ) -> Result<(), CommandError> {
            self.check()?;
            self.protections
                .lock()
                .push((device_id.to_string(), *config));
            Ok(())
        }
    }

    /// Always returns the same snapshot.
    pub struct FakeFetcher {
        snapshot: DeviceSnapshot,
    }

    impl FakeFetcher {
        pub fn new(snapshot: DeviceSnapshot) -> Self {
            Self { snapshot }
        }
    }

    impl StateFetcher for FakeFetcher {
        async fn fetch_snapshot(&self) -> Result<DeviceSnapshot, FetchError> {
            Ok(self.snapshot.clone())
        }
    }
}
