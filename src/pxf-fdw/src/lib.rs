// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Option handling for PXF foreign data wrappers.
//!
//! PXF options are declared at four nested catalog levels: the wrapper,
//! the server, the per-user mapping, and the foreign table (plus boolean
//! flags on individual columns). This crate answers two questions about
//! them and nothing else:
//!
//!   * At definition time, is one level's option list legal? See
//!     [`validate_options`].
//!   * At access time, what is the complete, defaulted configuration for
//!     one table, merged across all four levels? See [`resolve_options`].
//!
//! Catalog storage and the row-format (COPY) option machinery are external
//! collaborators, reached through the [`catalog::OptionCatalog`] and
//! [`copy::CopyFormatDelegate`] traits. No I/O against the external system
//! happens here; resolution produces an immutable [`PxfConfig`] snapshot
//! and the caller takes it from there.

pub mod catalog;
pub mod copy;
pub mod error;
pub mod options;
pub mod resolve;
pub mod validate;

mod value;

pub use crate::error::OptionError;
pub use crate::resolve::{resolve_options, PxfConfig, PxfDefaults};
pub use crate::validate::validate_options;
