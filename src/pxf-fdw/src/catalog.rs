// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Interfaces to the system catalog.
//!
//! Option validation and resolution never read catalog storage directly.
//! Callers hand the validator one level's raw option list, and hand the
//! resolver an [`OptionCatalog`] implementation that fetches the rows for
//! each of the four levels attached to a foreign table. Storage, locking,
//! and per-level uniqueness of option names are the catalog's problem, not
//! ours; we assume a consistent snapshot for the duration of one call.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OptionError;
use crate::options::RawOption;

/// The OID of a catalog object.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Oid(pub u32);

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The OID of a role, used to look up user mappings.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoleId(pub u32);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The catalog scope at which an option is declared.
///
/// An option of the same name declared at two different levels is two
/// distinct options, not one option overridden.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CatalogLevel {
    ForeignDataWrapper,
    ForeignServer,
    UserMapping,
    ForeignTable,
    Column,
}

impl fmt::Display for CatalogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            CatalogLevel::ForeignDataWrapper => "foreign-data wrapper",
            CatalogLevel::ForeignServer => "server",
            CatalogLevel::UserMapping => "user mapping",
            CatalogLevel::ForeignTable => "foreign table",
            CatalogLevel::Column => "column",
        })
    }
}

/// Where statements against a foreign table execute in an MPP deployment.
///
/// Carried on the wrapper row (the `mpp_execute` attribute) and copied into
/// the resolved configuration verbatim.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum ExecLocation {
    #[default]
    Any,
    Coordinator,
    AllSegments,
}

impl fmt::Display for ExecLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ExecLocation::Any => "any",
            ExecLocation::Coordinator => "coordinator",
            ExecLocation::AllSegments => "all segments",
        })
    }
}

/// A foreign table catalog row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignTable {
    pub server_id: Oid,
    pub options: Vec<RawOption>,
}

/// A foreign server catalog row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignServer {
    pub name: String,
    pub wrapper_id: Oid,
    pub options: Vec<RawOption>,
}

/// A user mapping catalog row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMapping {
    pub options: Vec<RawOption>,
}

/// A foreign-data wrapper catalog row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignDataWrapper {
    pub exec_location: ExecLocation,
    pub options: Vec<RawOption>,
}

/// A catalog that can produce the rows the resolver merges.
///
/// Each method returns the row's option list in declaration order, already
/// deduplicated within the level by the catalog's unique-option-name
/// constraint. Deduplication across levels is the resolver's job.
pub trait OptionCatalog {
    fn foreign_table(&self, id: Oid) -> Result<ForeignTable, OptionError>;

    fn foreign_server(&self, id: Oid) -> Result<ForeignServer, OptionError>;

    /// Returns the mapping for `user` on `server_id`, or an empty mapping if
    /// the user has none.
    fn user_mapping(&self, user: RoleId, server_id: Oid) -> Result<UserMapping, OptionError>;

    fn foreign_data_wrapper(&self, id: Oid) -> Result<ForeignDataWrapper, OptionError>;
}
