// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Per-level validation of PXF options.
//!
//! Invoked when a user creates or alters a foreign-data wrapper, server,
//! user mapping, foreign table, or column that uses PXF, with that one
//! object's raw option list. Validation has no side effects on catalog
//! state; it either returns or raises the first error encountered.

use crate::catalog::CatalogLevel;
use crate::copy::{self, CopyFormatDelegate};
use crate::error::OptionError;
use crate::options::{
    self, RawOption, RejectLimitKind, OPTION_FORMAT, OPTION_PROTOCOL, OPTION_REJECT_LIMIT,
    OPTION_REJECT_LIMIT_TYPE, OPTION_RESOURCE, OPTION_WIRE_FORMAT, WIRE_FORMAT_GPDB_WRITABLE,
    WIRE_FORMAT_TEXT,
};
use crate::value::TryFromValue;

/// Validates the options declared on one catalog object.
///
/// Each option must be legal at `level`. The PXF options are checked
/// semantically here; options belonging to the COPY catalog are collected
/// and handed to [`copy::validate_copy_options`], with `delegate` seeing
/// whatever that step does not consume itself. Names in neither catalog
/// fall through without error.
pub fn validate_options(
    options_list: &[RawOption],
    level: CatalogLevel,
    delegate: &dyn CopyFormatDelegate,
) -> Result<(), OptionError> {
    let mut protocol: Option<&str> = None;
    let mut resource: Option<&str> = None;
    let mut reject_limit: Option<i64> = None;
    let mut reject_limit_kind = RejectLimitKind::Rows;
    let mut copy_options: Vec<RawOption> = Vec::new();

    for opt in options_list {
        options::validate_option_level(&opt.name, level)?;

        match opt.name.as_str() {
            OPTION_PROTOCOL => protocol = Some(&opt.value),
            OPTION_RESOURCE => resource = Some(&opt.value),
            OPTION_WIRE_FORMAT => {
                if opt.value != WIRE_FORMAT_TEXT && opt.value != WIRE_FORMAT_GPDB_WRITABLE {
                    return Err(OptionError::InvalidWireFormat {
                        value: opt.value.clone(),
                    });
                }
            }
            OPTION_FORMAT => {
                // The PXF format names the file format on the external
                // system (Parquet, Avro, text, CSV, ...). Only text and CSV
                // are meaningful to COPY, so only those are forwarded.
                if options::is_copy_delegated_format(&opt.value) {
                    copy_options.push(opt.clone());
                }
            }
            OPTION_REJECT_LIMIT => {
                let limit = i64::try_from_value(&opt.value)
                    .ok()
                    .filter(|limit| *limit >= 1)
                    .ok_or_else(|| OptionError::InvalidRejectLimit {
                        value: opt.value.clone(),
                    })?;
                reject_limit = Some(limit);
            }
            OPTION_REJECT_LIMIT_TYPE => {
                reject_limit_kind = RejectLimitKind::from_value(&opt.value).ok_or_else(|| {
                    OptionError::InvalidRejectLimitKind {
                        value: opt.value.clone(),
                    }
                })?;
            }
            name if options::is_copy_option(name) => copy_options.push(opt.clone()),
            _ => {}
        }
    }

    if level == CatalogLevel::ForeignDataWrapper && protocol.unwrap_or("").is_empty() {
        return Err(OptionError::MissingProtocol);
    }

    if level == CatalogLevel::ForeignTable && resource.unwrap_or("").is_empty() {
        return Err(OptionError::MissingResource);
    }

    // The limit's bounds depend on the kind, which may have been declared
    // after the limit itself.
    if let Some(limit) = reject_limit {
        let valid = match reject_limit_kind {
            RejectLimitKind::Rows => limit >= 2,
            RejectLimitKind::Percent => (1..=100).contains(&limit),
        };
        if !valid {
            return Err(OptionError::RejectLimitOutOfRange {
                limit,
                kind: reject_limit_kind,
            });
        }
    }

    copy::validate_copy_options(&copy_options, level, delegate)
}
