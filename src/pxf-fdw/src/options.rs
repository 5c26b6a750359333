// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The PXF option catalogs.
//!
//! Two fully enumerated catalogs drive option dispatch. The PXF catalog
//! binds each connector option to the single catalog level at which it may
//! be declared. The COPY catalog is a separate namespace for the options
//! that are forwarded to the row-format delegate; it may reuse a literal
//! name (`format`) with its own level binding. Adding an option is a
//! one-line data change in the appropriate table.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogLevel;
use crate::error::OptionError;

pub const OPTION_PROTOCOL: &str = "protocol";
pub const OPTION_RESOURCE: &str = "resource";
pub const OPTION_FORMAT: &str = "format";
pub const OPTION_WIRE_FORMAT: &str = "wire_format";
pub const OPTION_REJECT_LIMIT: &str = "reject_limit";
pub const OPTION_REJECT_LIMIT_TYPE: &str = "reject_limit_type";
pub const OPTION_PXF_HOST: &str = "pxf_host";
pub const OPTION_PXF_PORT: &str = "pxf_port";
pub const OPTION_PXF_PROTOCOL: &str = "pxf_protocol";

pub const OPTION_FORCE_NOT_NULL: &str = "force_not_null";
pub const OPTION_FORCE_NULL: &str = "force_null";

pub const FORMAT_TEXT: &str = "text";
pub const FORMAT_CSV: &str = "csv";
pub const FORMAT_RC: &str = "rc";

/// The two recognized wire encodings for data in flight between PXF and the
/// external system. Values of the `wire_format` option are compared against
/// these exactly.
pub const WIRE_FORMAT_TEXT: &str = "TEXT";
pub const WIRE_FORMAT_GPDB_WRITABLE: &str = "GPDBWritable";

/// One option as it appears in a catalog row: a name and an opaque string
/// value. Numeric and boolean options are parsed on demand.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RawOption {
    pub name: String,
    pub value: String,
}

impl RawOption {
    pub fn new<N, V>(name: N, value: V) -> RawOption
    where
        N: Into<String>,
        V: Into<String>,
    {
        RawOption {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Whether a reject limit counts rows or a percentage of rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectLimitKind {
    #[default]
    Rows,
    Percent,
}

impl RejectLimitKind {
    /// Parses the value of a `reject_limit_type` option, case-insensitively.
    pub fn from_value(value: &str) -> Option<RejectLimitKind> {
        if value.eq_ignore_ascii_case("rows") {
            Some(RejectLimitKind::Rows)
        } else if value.eq_ignore_ascii_case("percent") {
            Some(RejectLimitKind::Percent)
        } else {
            None
        }
    }
}

impl fmt::Display for RejectLimitKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            RejectLimitKind::Rows => "ROWS",
            RejectLimitKind::Percent => "PERCENT",
        })
    }
}

const PXF_OPTIONS: &[(&str, CatalogLevel)] = &[
    (OPTION_PROTOCOL, CatalogLevel::ForeignDataWrapper),
    (OPTION_RESOURCE, CatalogLevel::ForeignTable),
    (OPTION_FORMAT, CatalogLevel::ForeignTable),
    (OPTION_WIRE_FORMAT, CatalogLevel::ForeignTable),
    (OPTION_REJECT_LIMIT, CatalogLevel::ForeignTable),
    (OPTION_REJECT_LIMIT_TYPE, CatalogLevel::ForeignTable),
];

// The COPY options PXF supports, based on the options of COPY FROM.
// force_not_null and force_null are boolean options attached to a column
// rather than to the table. force_quote is absent because it applies only
// to COPY TO.
const COPY_OPTIONS: &[(&str, CatalogLevel)] = &[
    (OPTION_FORMAT, CatalogLevel::ForeignTable),
    ("header", CatalogLevel::ForeignTable),
    ("delimiter", CatalogLevel::ForeignTable),
    ("quote", CatalogLevel::ForeignTable),
    ("escape", CatalogLevel::ForeignTable),
    ("null", CatalogLevel::ForeignTable),
    ("encoding", CatalogLevel::ForeignTable),
    ("newline", CatalogLevel::ForeignTable),
    ("fill_missing_fields", CatalogLevel::ForeignTable),
    (OPTION_FORCE_NOT_NULL, CatalogLevel::Column),
    (OPTION_FORCE_NULL, CatalogLevel::Column),
];

static PXF_OPTION_LEVELS: LazyLock<BTreeMap<&'static str, CatalogLevel>> =
    LazyLock::new(|| PXF_OPTIONS.iter().copied().collect());

static COPY_OPTION_LEVELS: LazyLock<BTreeMap<&'static str, CatalogLevel>> =
    LazyLock::new(|| COPY_OPTIONS.iter().copied().collect());

/// Returns the one catalog level at which the named PXF option may be
/// declared, or `None` if the name is not a PXF option.
pub fn pxf_option_level(name: &str) -> Option<CatalogLevel> {
    PXF_OPTION_LEVELS.get(name).copied()
}

/// Confirms that `name`, if it is a PXF option, was declared at its one
/// legal catalog level. Names the PXF catalog does not recognize fall
/// through to COPY-option classification and are not an error here.
pub fn validate_option_level(name: &str, level: CatalogLevel) -> Result<(), OptionError> {
    match pxf_option_level(name) {
        Some(legal) if legal != level => Err(OptionError::WrongCatalogLevel {
            option: name.to_string(),
            level: legal,
        }),
        _ => Ok(()),
    }
}

/// Reports whether `name` is a COPY option at any catalog level.
pub fn is_copy_option(name: &str) -> bool {
    COPY_OPTION_LEVELS.contains_key(name)
}

/// Reports whether `name` is a COPY option legal at `level`.
pub fn is_valid_copy_option(name: &str, level: CatalogLevel) -> bool {
    COPY_OPTION_LEVELS.get(name) == Some(&level)
}

/// The COPY option names legal at `level`, in sorted order. Error hints are
/// formatted over this list.
pub fn legal_copy_option_names(level: CatalogLevel) -> Vec<&'static str> {
    COPY_OPTION_LEVELS
        .iter()
        .filter(|(_, l)| **l == level)
        .map(|(name, _)| *name)
        .collect()
}

/// Reports whether a `format` value names one of the two formats that COPY
/// itself understands. Only these are forwarded to the row-format delegate;
/// any other format (Parquet, Avro, ...) is metadata for the external
/// system and never reaches COPY.
pub fn is_copy_delegated_format(format: &str) -> bool {
    format.eq_ignore_ascii_case(FORMAT_TEXT) || format.eq_ignore_ascii_case(FORMAT_CSV)
}

/// Reports whether a `format` value belongs to the row-based family, which
/// defaults to the text wire encoding. The family is the enumerated set
/// {text, csv, rc}, matched against the token before an optional `:`
/// qualifier so that `text:multi` is row-based.
pub fn is_row_based_format(format: &str) -> bool {
    let token = format.split(':').next().unwrap_or(format);
    [FORMAT_TEXT, FORMAT_CSV, FORMAT_RC]
        .iter()
        .any(|f| token.eq_ignore_ascii_case(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_levels() {
        for (name, level) in PXF_OPTIONS {
            assert_eq!(pxf_option_level(name), Some(*level), "option = {}", name);
            assert_eq!(validate_option_level(name, *level), Ok(()));
        }
        assert_eq!(pxf_option_level("pxf_host"), None);
        assert_eq!(pxf_option_level("delimiter"), None);

        let err = validate_option_level(OPTION_PROTOCOL, CatalogLevel::ForeignTable).unwrap_err();
        assert_eq!(
            err,
            OptionError::WrongCatalogLevel {
                option: "protocol".into(),
                level: CatalogLevel::ForeignDataWrapper,
            }
        );
        let err = validate_option_level(OPTION_RESOURCE, CatalogLevel::ForeignServer).unwrap_err();
        assert_eq!(
            err.to_string(),
            "the resource option can only be defined at the foreign table level"
        );

        // Unrecognized names fall through at every level.
        for level in [
            CatalogLevel::ForeignDataWrapper,
            CatalogLevel::ForeignServer,
            CatalogLevel::UserMapping,
            CatalogLevel::ForeignTable,
            CatalogLevel::Column,
        ] {
            assert_eq!(validate_option_level("no_such_option", level), Ok(()));
        }
    }

    #[test]
    fn test_copy_option_classification() {
        assert!(is_copy_option("delimiter"));
        assert!(is_copy_option("force_not_null"));
        assert!(!is_copy_option("resource"));

        assert!(is_valid_copy_option("delimiter", CatalogLevel::ForeignTable));
        assert!(!is_valid_copy_option("delimiter", CatalogLevel::Column));
        assert!(is_valid_copy_option("force_null", CatalogLevel::Column));
        assert!(!is_valid_copy_option("force_null", CatalogLevel::ForeignTable));
    }

    #[test]
    fn test_legal_copy_option_names_sorted() {
        assert_eq!(
            legal_copy_option_names(CatalogLevel::ForeignTable),
            vec![
                "delimiter",
                "encoding",
                "escape",
                "fill_missing_fields",
                "format",
                "header",
                "newline",
                "null",
                "quote",
            ]
        );
        assert_eq!(
            legal_copy_option_names(CatalogLevel::Column),
            vec!["force_not_null", "force_null"]
        );
        assert!(legal_copy_option_names(CatalogLevel::ForeignServer).is_empty());
    }

    #[test]
    fn test_format_families() {
        for format in ["text", "TEXT", "csv", "CSV", "Csv"] {
            assert!(is_copy_delegated_format(format), "format = {}", format);
        }
        for format in ["rc", "parquet", "avro", "text:multi"] {
            assert!(!is_copy_delegated_format(format), "format = {}", format);
        }

        for format in ["text", "TEXT", "csv", "rc", "RC", "text:multi", "Text:Multi"] {
            assert!(is_row_based_format(format), "format = {}", format);
        }
        for format in ["parquet", "avro", "orc", "plaintext", "context"] {
            assert!(!is_row_based_format(format), "format = {}", format);
        }
    }

    #[test]
    fn test_reject_limit_kind() {
        assert_eq!(RejectLimitKind::from_value("rows"), Some(RejectLimitKind::Rows));
        assert_eq!(RejectLimitKind::from_value("ROWS"), Some(RejectLimitKind::Rows));
        assert_eq!(
            RejectLimitKind::from_value("Percent"),
            Some(RejectLimitKind::Percent)
        );
        assert_eq!(RejectLimitKind::from_value("row"), None);
        assert_eq!(RejectLimitKind::from_value(""), None);
    }
}
