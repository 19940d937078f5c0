// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Zinguo library.
//!
//! Collaborator failures are split by direction: [`CommandError`] for
//! commands sent to a heater, [`FetchError`] for reads of the authoritative
//! state. Controls never surface either to the host; they log and leave the
//! snapshot untouched. The [`StateStore`](crate::store::StateStore) returns
//! them from its awaited refresh path only.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Sending a command to the heater failed.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Fetching the authoritative device state failed.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A device payload could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The device is not present in the current snapshot.
    #[error("device not found: {0}")]
    DeviceNotFound(String),
}

/// Errors raised by a [`DeviceApi`](crate::api::DeviceApi) when sending a
/// control or protection command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The cloud service or device rejected the command.
    #[error("command rejected ({code}): {message}")]
    Rejected {
        /// Status code reported by the remote side.
        code: i64,
        /// Message reported by the remote side.
        message: String,
    },

    /// The command could not be delivered.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The command did not complete in time.
    #[error("command timed out after {0} ms")]
    Timeout(u64),
}

/// Errors raised by a [`StateFetcher`](crate::api::StateFetcher).
#[derive(Debug, Error)]
pub enum FetchError {
    /// The remote state could not be read.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The read did not complete in time.
    #[error("fetch timed out after {0} ms")]
    Timeout(u64),

    /// The remote state was read but could not be decoded.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors related to decoding device payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON decoding failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field held a value outside what the protocol allows.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The offending field.
        field: String,
        /// Description of the failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
