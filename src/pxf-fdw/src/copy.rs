// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Validation of the COPY options forwarded to the row-format layer.
//!
//! The validator partitions each level's options and hands the COPY subset
//! to [`validate_copy_options`], which enforces what this crate can decide
//! on its own: every name must be a COPY option legal at the declaring
//! level, and the per-column `force_not_null` and `force_null` flags must
//! be legal booleans supplied at most once each. Whatever remains is passed
//! to an external [`CopyFormatDelegate`] for format- and encoding-specific
//! checks; its errors propagate unchanged.

use crate::catalog::CatalogLevel;
use crate::error::OptionError;
use crate::options::{self, RawOption, OPTION_FORCE_NOT_NULL, OPTION_FORCE_NULL};
use crate::value;

/// The external row-format option validator, e.g. the COPY FROM option
/// machinery.
pub trait CopyFormatDelegate {
    fn validate(&self, options: &[RawOption], level: CatalogLevel) -> Result<(), OptionError>;
}

/// Validates a delegated COPY option set for one catalog level.
pub fn validate_copy_options(
    options_list: &[RawOption],
    level: CatalogLevel,
    delegate: &dyn CopyFormatDelegate,
) -> Result<(), OptionError> {
    let mut force_not_null = false;
    let mut force_null = false;
    let mut delegated = Vec::new();

    for opt in options_list {
        if !options::is_valid_copy_option(&opt.name, level) {
            return Err(OptionError::InvalidOptionName {
                option: opt.name.clone(),
                level,
            });
        }

        // The force flags are consumed here rather than delegated; the
        // row-format layer retrieves them per column later.
        if opt.name == OPTION_FORCE_NOT_NULL {
            if force_not_null {
                return Err(OptionError::ConflictingOption {
                    option: opt.name.clone(),
                });
            }
            force_not_null = true;
            let _ = value::parse_option::<bool>(opt)?;
        } else if opt.name == OPTION_FORCE_NULL {
            if force_null {
                return Err(OptionError::ConflictingOption {
                    option: opt.name.clone(),
                });
            }
            force_null = true;
            let _ = value::parse_option::<bool>(opt)?;
        } else {
            delegated.push(opt.clone());
        }
    }

    delegate.validate(&delegated, level)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Accepts everything and records what it was handed.
    #[derive(Default)]
    struct Recording {
        seen: RefCell<Vec<(Vec<RawOption>, CatalogLevel)>>,
    }

    impl CopyFormatDelegate for Recording {
        fn validate(&self, options: &[RawOption], level: CatalogLevel) -> Result<(), OptionError> {
            self.seen.borrow_mut().push((options.to_vec(), level));
            Ok(())
        }
    }

    struct RejectAll;

    impl CopyFormatDelegate for RejectAll {
        fn validate(&self, _: &[RawOption], _: CatalogLevel) -> Result<(), OptionError> {
            Err(OptionError::InvalidOptionValue {
                option: "encoding".into(),
                reason: "unsupported encoding".into(),
            })
        }
    }

    #[test]
    fn test_invalid_name_rejected() {
        let delegate = Recording::default();
        let err = validate_copy_options(
            &[RawOption::new("compression", "gzip")],
            CatalogLevel::ForeignTable,
            &delegate,
        )
        .unwrap_err();
        assert_eq!(
            err,
            OptionError::InvalidOptionName {
                option: "compression".into(),
                level: CatalogLevel::ForeignTable,
            }
        );
        assert!(delegate.seen.borrow().is_empty());

        // A table-level option is not legal at the column level.
        let err = validate_copy_options(
            &[RawOption::new("delimiter", "|")],
            CatalogLevel::Column,
            &delegate,
        )
        .unwrap_err();
        assert_eq!(err.code(), "HV00D");
    }

    #[test]
    fn test_force_flags() {
        let delegate = Recording::default();

        // One of each is fine, and neither reaches the delegate.
        validate_copy_options(
            &[
                RawOption::new("force_not_null", "true"),
                RawOption::new("force_null", "off"),
            ],
            CatalogLevel::Column,
            &delegate,
        )
        .unwrap();
        assert_eq!(delegate.seen.borrow().as_slice(), &[(vec![], CatalogLevel::Column)]);

        // Two of the same flag conflict.
        let err = validate_copy_options(
            &[
                RawOption::new("force_not_null", "true"),
                RawOption::new("force_not_null", "false"),
            ],
            CatalogLevel::Column,
            &delegate,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "conflicting or redundant options");
        assert_eq!(
            err.hint().unwrap(),
            "option \"force_not_null\" supplied more than once for a column"
        );
        assert_eq!(err.code(), "42601");

        // The flag value must be a legal boolean.
        let err = validate_copy_options(
            &[RawOption::new("force_null", "sometimes")],
            CatalogLevel::Column,
            &delegate,
        )
        .unwrap_err();
        assert_eq!(err.code(), "42601");
    }

    #[test]
    fn test_remainder_delegated() {
        let delegate = Recording::default();
        validate_copy_options(
            &[
                RawOption::new("format", "csv"),
                RawOption::new("delimiter", "|"),
                RawOption::new("header", "true"),
            ],
            CatalogLevel::ForeignTable,
            &delegate,
        )
        .unwrap();
        let seen = delegate.seen.borrow();
        assert_eq!(
            seen.as_slice(),
            &[(
                vec![
                    RawOption::new("format", "csv"),
                    RawOption::new("delimiter", "|"),
                    RawOption::new("header", "true"),
                ],
                CatalogLevel::ForeignTable,
            )]
        );
    }

    #[test]
    fn test_delegate_error_propagates() {
        let err = validate_copy_options(
            &[RawOption::new("encoding", "latin1")],
            CatalogLevel::ForeignTable,
            &RejectAll,
        )
        .unwrap_err();
        assert_eq!(err.detail().unwrap(), "unsupported encoding");
    }
}
