// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for snapshot changes.
//!
//! The [`StateStore`](crate::store::StateStore) publishes a [`StoreEvent`]
//! on its [`EventBus`] every time a snapshot is replaced and every time an
//! authoritative refresh fails.
//!
//! # Examples
//!
//! ```
//! use zinguo_lib::event::{EventBus, StoreEvent};
//!
//! let bus = EventBus::new();
//!
//! // Subscribe to events
//! let mut rx = bus.subscribe();
//!
//! // Publish an event
//! bus.publish(StoreEvent::refresh_failed("cloud unreachable"));
//! ```

mod event_bus;
mod store_event;

pub use event_bus::EventBus;
pub(crate) use event_bus::DEFAULT_CHANNEL_CAPACITY;
pub use store_event::{StoreEvent, UpdateOrigin};
