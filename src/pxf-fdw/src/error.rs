// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Errors raised during option validation and resolution.

use std::error::Error;
use std::fmt;

use itertools::Itertools;

use crate::catalog::{CatalogLevel, Oid};
use crate::options::{self, RejectLimitKind};

/// An error raised while validating or resolving PXF options.
///
/// Every variant carries a machine-checkable SQLSTATE, available from
/// [`OptionError::code`]. Validation fails fast: the first error wins and
/// no aggregation across options is attempted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionError {
    /// A PXF option was declared at a level other than its one legal level.
    WrongCatalogLevel {
        option: String,
        /// The level at which the option is legal.
        level: CatalogLevel,
    },
    /// A name forwarded to COPY-option validation that neither catalog
    /// recognizes at the declaring level.
    InvalidOptionName { option: String, level: CatalogLevel },
    /// A `wire_format` value outside the two recognized encodings.
    InvalidWireFormat { value: String },
    /// A `reject_limit` value that is not a positive integer.
    InvalidRejectLimit { value: String },
    /// A `reject_limit` value outside the bounds for its kind.
    RejectLimitOutOfRange { limit: i64, kind: RejectLimitKind },
    /// A `reject_limit_type` value other than `rows` or `percent`.
    InvalidRejectLimitKind { value: String },
    /// No `protocol` option on a foreign-data wrapper.
    MissingProtocol,
    /// No `resource` option on a foreign table.
    MissingResource,
    /// An option supplied more than once within one delegated COPY set.
    ConflictingOption { option: String },
    /// An option whose value failed on-demand coercion.
    InvalidOptionValue { option: String, reason: String },
    /// A merged `pxf_port` outside (0, 65535).
    InvalidPort { value: String },
    /// A catalog lookup that found no row.
    UnknownCatalogEntry { level: CatalogLevel, oid: Oid },
}

impl OptionError {
    /// The SQLSTATE for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::WrongCatalogLevel { .. } | Self::InvalidOptionName { .. } => "HV00D",
            Self::InvalidWireFormat { .. } => "HV024",
            Self::InvalidRejectLimit { .. }
            | Self::RejectLimitOutOfRange { .. }
            | Self::InvalidRejectLimitKind { .. } => "HV00A",
            Self::MissingProtocol | Self::MissingResource => "HV002",
            Self::ConflictingOption { .. } | Self::InvalidOptionValue { .. } => "42601",
            Self::InvalidPort { .. } => "XX000",
            Self::UnknownCatalogEntry { .. } => "42704",
        }
    }

    pub fn detail(&self) -> Option<String> {
        match self {
            Self::InvalidOptionValue { reason, .. } => Some(reason.clone()),
            _ => None,
        }
    }

    pub fn hint(&self) -> Option<String> {
        match self {
            Self::InvalidOptionName { level, .. } => {
                let legal = options::legal_copy_option_names(*level);
                if legal.is_empty() {
                    Some("There are no valid options in this context.".into())
                } else {
                    Some(format!(
                        "Valid options in this context are: {}",
                        legal.iter().join(", ")
                    ))
                }
            }
            Self::ConflictingOption { option } => Some(format!(
                "option \"{}\" supplied more than once for a column",
                option
            )),
            _ => None,
        }
    }
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::WrongCatalogLevel { option, level } => write!(
                f,
                "the {} option can only be defined at the {} level",
                option, level
            ),
            Self::InvalidOptionName { option, .. } => {
                write!(f, "invalid option \"{}\"", option)
            }
            Self::InvalidWireFormat { value } => write!(
                f,
                "invalid wire_format value '{}', only '{}' and '{}' are supported",
                value,
                options::WIRE_FORMAT_TEXT,
                options::WIRE_FORMAT_GPDB_WRITABLE,
            ),
            Self::InvalidRejectLimit { value } => write!(
                f,
                "invalid reject_limit value '{}', should be a positive integer",
                value
            ),
            Self::RejectLimitOutOfRange { limit, kind } => match kind {
                RejectLimitKind::Rows => write!(
                    f,
                    "invalid (ROWS) reject_limit value '{}', valid values are 2 or larger",
                    limit
                ),
                RejectLimitKind::Percent => write!(
                    f,
                    "invalid (PERCENT) reject_limit value '{}', valid values are 1 to 100",
                    limit
                ),
            },
            Self::InvalidRejectLimitKind { value } => write!(
                f,
                "invalid reject_limit_type value '{}', only 'rows' and 'percent' are supported",
                value
            ),
            Self::MissingProtocol => write!(
                f,
                "the protocol option must be defined for PXF foreign-data wrappers"
            ),
            Self::MissingResource => write!(
                f,
                "the resource option must be defined at the foreign table level"
            ),
            Self::ConflictingOption { .. } => write!(f, "conflicting or redundant options"),
            Self::InvalidOptionValue { option, .. } => {
                write!(f, "invalid value for option \"{}\"", option)
            }
            Self::InvalidPort { value } => write!(f, "invalid port number: {}", value),
            Self::UnknownCatalogEntry { level, oid } => {
                write!(f, "{} with OID {} does not exist", level, oid)
            }
        }
    }
}

impl Error for OptionError {}
