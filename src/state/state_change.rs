// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! State changes describe the transition a successful command is expected to
//! cause. Applying one to a [`DeviceState`](super::DeviceState) yields the
//! locally predicted state, interlocks included, that is published until the
//! authoritative refresh lands.
//!
//! # Change Types
//!
//! - [`StateChange::Switch`] - One base control turned on or off
//! - [`StateChange::AllOff`] - Every base control turned off
//! - [`StateChange::Protection`] - Thermal protection settings replaced
//!
//! # Examples
//!
//! ```
//! use zinguo_lib::state::{DeviceState, StateChange};
//! use zinguo_lib::types::ControlKey;
//!
//! let mut state = DeviceState::all_off();
//!
//! // Heating drags the fan along
//! assert!(state.apply(&StateChange::switch_on(ControlKey::Warming1)));
//! assert!(state.is_on(ControlKey::Wind));
//!
//! // Applying the same change again reports no change
//! assert!(!state.apply(&StateChange::switch_on(ControlKey::Warming1)));
//! ```

use crate::types::{ControlKey, ProtectionConfig};

/// Represents a predicted change in device state.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StateChange {
    /// A base control was switched.
    ///
    /// Interlocks apply: switching a heating element on also switches the
    /// fan on, and switching the fan off also switches both heating
    /// elements off.
    Switch {
        /// The control that was switched.
        key: ControlKey,
        /// The requested direction.
        on: bool,
    },

    /// Every base control was switched off.
    AllOff,

    /// Thermal protection settings were replaced.
    Protection(ProtectionConfig),
}

impl StateChange {
    /// Creates a change switching `key` on.
    #[must_use]
    pub fn switch_on(key: ControlKey) -> Self {
        Self::Switch { key, on: true }
    }

    /// Creates a change switching `key` off.
    #[must_use]
    pub fn switch_off(key: ControlKey) -> Self {
        Self::Switch { key, on: false }
    }

    /// Creates a protection settings change.
    #[must_use]
    pub fn protection(config: ProtectionConfig) -> Self {
        Self::Protection(config)
    }
}
