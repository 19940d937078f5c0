// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State store event types.

use std::sync::Arc;

use crate::state::{DeviceSnapshot, StateChange};

/// Why a snapshot was published.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOrigin {
    /// Authoritative state fetched from the cloud.
    Refresh,
    /// Locally predicted state after a successful command.
    Prediction {
        /// The device the command targeted.
        device_id: String,
        /// The predicted change.
        change: StateChange,
    },
    /// Snapshot supplied directly through
    /// [`StateStore::replace`](crate::store::StateStore::replace).
    Replace,
}

/// Events emitted by the [`StateStore`](crate::store::StateStore).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use zinguo_lib::event::{StoreEvent, UpdateOrigin};
/// use zinguo_lib::state::DeviceSnapshot;
///
/// let event = StoreEvent::SnapshotReplaced {
///     origin: UpdateOrigin::Refresh,
///     snapshot: Arc::new(DeviceSnapshot::new()),
/// };
/// assert!(event.is_snapshot());
/// ```
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A new snapshot was published.
    SnapshotReplaced {
        /// Why it was published.
        origin: UpdateOrigin,
        /// The published snapshot.
        snapshot: Arc<DeviceSnapshot>,
    },

    /// An authoritative refresh failed; the previous snapshot is kept.
    RefreshFailed {
        /// Description of the failure.
        error: String,
    },
}

impl StoreEvent {
    /// Creates a snapshot event.
    #[must_use]
    pub fn replaced(origin: UpdateOrigin, snapshot: Arc<DeviceSnapshot>) -> Self {
        Self::SnapshotReplaced { origin, snapshot }
    }

    /// Creates a refresh failure event.
    #[must_use]
    pub fn refresh_failed(error: impl Into<String>) -> Self {
        Self::RefreshFailed {
            error: error.into(),
        }
    }

    /// Returns `true` if this event carries a new snapshot.
    #[must_use]
    pub fn is_snapshot(&self) -> bool {
        matches!(self, Self::SnapshotReplaced { .. })
    }

    /// Returns `true` if this is a refresh failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::RefreshFailed { .. })
    }

    /// Returns the published snapshot, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<&Arc<DeviceSnapshot>> {
        match self {
            Self::SnapshotReplaced { snapshot, .. } => Some(snapshot),
            Self::RefreshFailed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ControlKey;

    #[test]
    fn classification() {
        let replaced = StoreEvent::replaced(
            UpdateOrigin::Prediction {
                device_id: "AA:BB:CC:DD:EE:01".to_string(),
                change: StateChange::switch_on(ControlKey::Light),
            },
            Arc::new(DeviceSnapshot::new()),
        );
        assert!(replaced.is_snapshot());
        assert!(!replaced.is_failure());
        assert!(replaced.snapshot().is_some());

        let failed = StoreEvent::refresh_failed("timeout");
        assert!(failed.is_failure());
        assert!(failed.snapshot().is_none());
    }
}
