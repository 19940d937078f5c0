// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the state model, payloads and controls.
//!
//! - [`ControlKey`]: the five base switches of a heater
//! - [`StateCode`]: the `1`/`2` on/off code reported for each switch
//! - [`ProtectionConfig`]: thermal protection settings

mod control_key;
mod protection;
mod state_code;

pub use control_key::ControlKey;
pub use protection::ProtectionConfig;
pub use state_code::StateCode;
