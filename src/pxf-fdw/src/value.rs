// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! On-demand coercion of option values.
//!
//! Option values arrive as opaque strings and are parsed only where a
//! recognized option requires it. Coercion failures are reported through
//! [`OptionError::InvalidOptionValue`] unless the caller has a more
//! specific error to raise.

use anyhow::bail;

use crate::error::OptionError;
use crate::options::RawOption;

pub trait TryFromValue: Sized {
    fn try_from_value(v: &str) -> Result<Self, anyhow::Error>;
}

impl TryFromValue for i64 {
    fn try_from_value(v: &str) -> Result<Self, anyhow::Error> {
        match v.trim().parse() {
            Ok(n) => Ok(n),
            Err(_) => bail!("requires an integer value"),
        }
    }
}

impl TryFromValue for bool {
    /// Accepts the spellings `defGetBoolean` accepts: 1/0, on/off, and any
    /// unambiguous prefix of true/false/yes/no, case-insensitively.
    fn try_from_value(v: &str) -> Result<Self, anyhow::Error> {
        let v = v.to_ascii_lowercase();
        let parsed = match v.as_str() {
            "1" | "on" => Some(true),
            "0" => Some(false),
            _ if !v.is_empty() && "true".starts_with(&v) => Some(true),
            _ if !v.is_empty() && "yes".starts_with(&v) => Some(true),
            _ if !v.is_empty() && "false".starts_with(&v) => Some(false),
            _ if !v.is_empty() && "no".starts_with(&v) => Some(false),
            // "o" alone is ambiguous between on and off.
            _ if v.len() > 1 && "off".starts_with(&v) => Some(false),
            _ => None,
        };
        match parsed {
            Some(b) => Ok(b),
            None => bail!("requires a Boolean value"),
        }
    }
}

/// Parses an option's value, wrapping any failure in an error naming the
/// option.
pub fn parse_option<T: TryFromValue>(opt: &RawOption) -> Result<T, OptionError> {
    T::try_from_value(&opt.value).map_err(|e| OptionError::InvalidOptionValue {
        option: opt.name.clone(),
        reason: format!("option \"{}\" {}", opt.name, e),
    })
}
