// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device snapshot store.
//!
//! The [`StateStore`] holds the latest known state of every heater. Controls
//! read it to render their status and write locally predicted state into it
//! after a successful command; a delayed [`RefreshJob`] then replaces the
//! prediction with the authoritative state fetched from the cloud.

mod refresh_job;
mod refresh_status;
mod state_store;

pub use refresh_job::{JobId, RefreshJob};
pub use refresh_status::RefreshStatus;
pub use state_store::StateStore;
