// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermal protection settings.

use serde::{Deserialize, Serialize};

/// Thermal protection configuration of a heater.
///
/// When enabled, the heater runs its heating elements for `open_time`
/// minutes and then pauses them for `pause_time` minutes.
///
/// # Examples
///
/// ```
/// use zinguo_lib::types::ProtectionConfig;
///
/// let config: ProtectionConfig =
///     serde_json::from_str(r#"{"status": true, "openTime": 10, "pauseTime": 5}"#).unwrap();
/// assert!(config.status);
/// assert_eq!(config.open_time, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionConfig {
    /// Whether protection is enabled.
    pub status: bool,
    /// Heating run time, in minutes.
    pub open_time: u32,
    /// Heating pause time, in minutes.
    pub pause_time: u32,
}

impl ProtectionConfig {
    /// Default run and pause time, in minutes.
    pub const DEFAULT_MINUTES: u32 = 5;

    /// Creates a configuration.
    #[must_use]
    pub const fn new(status: bool, open_time: u32, pause_time: u32) -> Self {
        Self {
            status,
            open_time,
            pause_time,
        }
    }

    /// Returns a copy with `status` replaced.
    #[must_use]
    pub const fn with_status(self, status: bool) -> Self {
        Self { status, ..self }
    }
}
