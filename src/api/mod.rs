// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collaborator interfaces to the Zinguo cloud.
//!
//! The library does not talk to the network itself. The host provides:
//!
//! - a [`DeviceApi`] that delivers control and protection commands, and
//! - a [`StateFetcher`] that reads the authoritative state of every heater.
//!
//! Both are usually backed by the same authenticated cloud session.
//!
//! # Examples
//!
//! ```
//! use zinguo_lib::api::{ControlPayload, DeviceApi, StateFetcher};
//! use zinguo_lib::error::{CommandError, FetchError};
//! use zinguo_lib::state::DeviceSnapshot;
//! use zinguo_lib::types::ProtectionConfig;
//!
//! struct Offline;
//!
//! impl DeviceApi for Offline {
//!     fn account(&self) -> &str {
//!         "user@example.com"
//!     }
//!
//!     async fn send_control(&self, _payload: &ControlPayload) -> Result<(), CommandError> {
//!         Err(CommandError::Transport("offline".to_string()))
//!     }
//!
//!     async fn set_protection(
//!         &self,
//!         _device_id: &str,
//!         _config: &ProtectionConfig,
//!     ) -> Result<(), CommandError> {
//!         Err(CommandError::Transport("offline".to_string()))
//!     }
//! }
//!
//! impl StateFetcher for Offline {
//!     async fn fetch_snapshot(&self) -> Result<DeviceSnapshot, FetchError> {
//!         Err(FetchError::Transport("offline".to_string()))
//!     }
//! }
//! ```

mod payload;

pub use payload::{AllOffPayload, ControlPayload, SwitchPayload};

use std::future::Future;

use crate::error::{CommandError, FetchError};
use crate::state::DeviceSnapshot;
use crate::types::ProtectionConfig;

/// Sends commands to heaters.
pub trait DeviceApi: Send + Sync + 'static {
    /// Returns the account every command is issued for.
    fn account(&self) -> &str;

    /// Sends a control command.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` if the command is rejected or cannot be
    /// delivered.
    fn send_control(
        &self,
        payload: &ControlPayload,
    ) -> impl Future<Output = Result<(), CommandError>> + Send;

    /// Replaces the thermal protection settings of a heater.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` if the command is rejected or cannot be
    /// delivered.
    fn set_protection(
        &self,
        device_id: &str,
        config: &ProtectionConfig,
    ) -> impl Future<Output = Result<(), CommandError>> + Send;
}

/// Reads the authoritative state of every heater of the account.
pub trait StateFetcher: Send + Sync + 'static {
    /// Fetches a full snapshot.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the state cannot be read or decoded.
    fn fetch_snapshot(&self) -> impl Future<Output = Result<DeviceSnapshot, FetchError>> + Send;
}
