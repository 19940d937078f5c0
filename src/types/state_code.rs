// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch state codes as reported by the heater.

use std::fmt;

use serde::{Deserialize, Serialize};

/// State code of a base control.
///
/// The heater reports `1` for on and `2` for off. Some firmware revisions
/// send the code as a string, so the raw form is kept as received and
/// re-serialized unchanged.
///
/// # Examples
///
/// ```
/// use zinguo_lib::types::StateCode;
///
/// assert!(StateCode::ON.is_on());
/// assert!(!StateCode::OFF.is_on());
///
/// let code: StateCode = serde_json::from_str(r#""1""#).unwrap();
/// assert!(code.is_on());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateCode {
    /// Integer code.
    Int(i64),
    /// Code sent as a string.
    Text(String),
}

impl StateCode {
    /// The "on" code.
    pub const ON: Self = Self::Int(1);
    /// The "off" code.
    pub const OFF: Self = Self::Int(2);

    /// Returns `true` if the code is `1`, as an integer or as `"1"`.
    #[must_use]
    pub fn is_on(&self) -> bool {
        match self {
            Self::Int(code) => *code == 1,
            Self::Text(code) => code == "1",
        }
    }

    /// Returns the code for the given on/off direction.
    #[must_use]
    pub const fn from_on(on: bool) -> Self {
        if on { Self::ON } else { Self::OFF }
    }
}

impl From<bool> for StateCode {
    fn from(on: bool) -> Self {
        Self::from_on(on)
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(code) => write!(f, "{code}"),
            Self::Text(code) => f.write_str(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_one_is_on() {
        assert!(StateCode::Int(1).is_on());
    }

    #[test]
    fn string_one_is_on() {
        assert!(StateCode::Text("1".to_string()).is_on());
    }

    #[test]
    fn other_codes_are_off() {
        assert!(!StateCode::Int(2).is_on());
        assert!(!StateCode::Int(0).is_on());
        assert!(!StateCode::Text("2".to_string()).is_on());
        assert!(!StateCode::Text("on".to_string()).is_on());
    }

    #[test]
    fn deserializes_both_forms() {
        let int: StateCode = serde_json::from_str("2").unwrap();
        let text: StateCode = serde_json::from_str(r#""1""#).unwrap();
        assert_eq!(int, StateCode::OFF);
        assert_eq!(text, StateCode::Text("1".to_string()));
    }

    #[test]
    fn serializes_as_received() {
        let text = StateCode::Text("1".to_string());
        assert_eq!(serde_json::to_string(&text).unwrap(), r#""1""#);
        assert_eq!(serde_json::to_string(&StateCode::ON).unwrap(), "1");
    }

    #[test]
    fn from_bool() {
        assert_eq!(StateCode::from(true), StateCode::ON);
        assert_eq!(StateCode::from(false), StateCode::OFF);
    }
}
