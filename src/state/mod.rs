// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state management types.
//!
//! [`DeviceState`] holds what one heater reported, [`DeviceSnapshot`] maps
//! every heater of the account to its state, and [`StateChange`] describes
//! the transition a command is expected to cause.
//!
//! # Examples
//!
//! ```
//! use zinguo_lib::state::{DeviceState, StateChange};
//! use zinguo_lib::types::ControlKey;
//!
//! let mut state = DeviceState::all_off();
//!
//! state.apply(&StateChange::switch_on(ControlKey::Warming1));
//!
//! assert!(state.is_on(ControlKey::Warming1));
//! assert!(state.is_on(ControlKey::Wind));
//! ```

mod device_state;
mod snapshot;
mod state_change;

pub use device_state::DeviceState;
pub use snapshot::DeviceSnapshot;
pub use state_change::StateChange;
