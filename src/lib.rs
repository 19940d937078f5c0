// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zinguo Lib - toggle controls for Zinguo bathroom heaters.
//!
//! This library exposes the controls of a cloud-connected Zinguo heater
//! (light, fan, ventilation, two heating elements, all-off and thermal
//! protection) to a home-automation host.
//!
//! # Features
//!
//! - **Shared state**: one [`StateStore`] snapshot per account, replaced
//!   atomically and broadcast to every observer
//! - **Optimistic updates**: controls publish the predicted state as soon
//!   as a command succeeds
//! - **Interlocks**: heating implies the fan, fan off stops heating
//! - **Confirmation**: the authoritative state is fetched 3 s after every
//!   command and overwrites the prediction
//!
//! The network side is provided by the host through the
//! [`DeviceApi`](api::DeviceApi) and [`StateFetcher`](api::StateFetcher)
//! traits.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use zinguo_lib::control::Control;
//! use zinguo_lib::{StateStore, ZinguoConfig, platform};
//! # use zinguo_lib::api::{DeviceApi, StateFetcher};
//!
//! # async fn example(api: impl DeviceApi, fetcher: impl StateFetcher) -> zinguo_lib::Result<()> {
//! let store = StateStore::new(fetcher, ZinguoConfig::default());
//! store.refresh().await?;
//! store.start_polling();
//!
//! let controls = platform::build_controls(&store, &Arc::new(api));
//!
//! // Turn on the first heating element; the fan follows
//! if let Some(warming) = controls
//!     .iter()
//!     .find(|control| control.info().unique_id.ends_with("warmingSwitch1"))
//! {
//!     warming.turn_on().await;
//! }
//!
//! store.shutdown();
//! # Ok(())
//! # }
//! ```

pub mod api;
mod config;
pub mod control;
pub mod error;
pub mod event;
pub mod platform;
pub mod state;
pub mod store;
pub mod types;

pub use config::ZinguoConfig;
pub use control::{Control, ControlEntity, ControlOutcome};
pub use error::{CommandError, Error, FetchError, ParseError, Result};
pub use state::{DeviceSnapshot, DeviceState, StateChange};
pub use store::{JobId, RefreshJob, RefreshStatus, StateStore};
pub use types::{ControlKey, ProtectionConfig, StateCode};
