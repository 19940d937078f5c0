// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::event::DEFAULT_CHANNEL_CAPACITY;
use crate::types::ProtectionConfig;

/// Settings shared by the state store and every control.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use zinguo_lib::ZinguoConfig;
///
/// // Defaults: 3 s confirmation, 30 s polling, "zinguo" id prefix
/// let config = ZinguoConfig::new();
/// assert_eq!(config.confirm_delay(), Duration::from_secs(3));
///
/// // Custom settings
/// let config = ZinguoConfig::new()
///     .with_poll_interval(Duration::from_secs(60))
///     .with_unique_id_prefix("bath")
///     .with_device_name("Upstairs Heater");
/// assert_eq!(config.unique_id_prefix(), "bath");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZinguoConfig {
    confirm_delay: Duration,
    poll_interval: Duration,
    unique_id_prefix: String,
    device_name: String,
    default_open_time: u32,
    default_pause_time: u32,
    event_capacity: usize,
}

impl ZinguoConfig {
    /// Integration domain, used in device identifiers.
    pub const DOMAIN: &'static str = "zinguo";
    /// Delay before the confirmation refresh that follows a command.
    pub const DEFAULT_CONFIRM_DELAY: Duration = Duration::from_secs(3);
    /// Interval between periodic refreshes.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
    /// Display name of a heater in the host's device registry.
    pub const DEFAULT_DEVICE_NAME: &'static str = "Zinguo Bath Heater";

    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the confirmation refresh delay.
    #[must_use]
    pub fn with_confirm_delay(mut self, delay: Duration) -> Self {
        self.confirm_delay = delay;
        self
    }

    /// Sets the periodic refresh interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the prefix of entity unique ids.
    #[must_use]
    pub fn with_unique_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.unique_id_prefix = prefix.into();
        self
    }

    /// Sets the device display name.
    #[must_use]
    pub fn with_device_name(mut self, name: impl Into<String>) -> Self {
        self.device_name = name.into();
        self
    }

    /// Sets the protection run and pause times used when a heater has
    /// never reported protection settings.
    #[must_use]
    pub fn with_default_protection_times(mut self, open_time: u32, pause_time: u32) -> Self {
        self.default_open_time = open_time;
        self.default_pause_time = pause_time;
        self
    }

    /// Sets the event bus capacity.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Returns the confirmation refresh delay.
    #[must_use]
    pub fn confirm_delay(&self) -> Duration {
        self.confirm_delay
    }

    /// Returns the periodic refresh interval.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the prefix of entity unique ids.
    #[must_use]
    pub fn unique_id_prefix(&self) -> &str {
        &self.unique_id_prefix
    }

    /// Returns the device display name.
    #[must_use]
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Returns the event bus capacity.
    #[must_use]
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    /// Returns the protection settings assumed before the heater reports
    /// any, with `status` set opposite to `target`.
    #[must_use]
    pub fn default_protection(&self, target: bool) -> ProtectionConfig {
        ProtectionConfig::new(!target, self.default_open_time, self.default_pause_time)
    }
}

impl Default for ZinguoConfig {
    fn default() -> Self {
        Self {
            confirm_delay: Self::DEFAULT_CONFIRM_DELAY,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            unique_id_prefix: Self::DOMAIN.to_string(),
            device_name: Self::DEFAULT_DEVICE_NAME.to_string(),
            default_open_time: ProtectionConfig::DEFAULT_MINUTES,
            default_pause_time: ProtectionConfig::DEFAULT_MINUTES,
            event_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}
