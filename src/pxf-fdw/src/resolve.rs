// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Resolution of the options attached to a PXF foreign table.
//!
//! At access time the four option lists attached to a table (foreign
//! table, user mapping, server, wrapper) are merged into one immutable
//! [`PxfConfig`]. Each list was validated when its object was defined, so
//! the merge does not repeat level checks; the port is the one value
//! re-checked here, because user mapping options are never level-validated.
//!
//! The concatenation order is the precedence order: a generic option
//! declared on the foreign table shadows one of the same name declared on
//! the user mapping, which shadows the server, which shadows the wrapper.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{ExecLocation, Oid, OptionCatalog, RoleId};
use crate::error::OptionError;
use crate::options::{
    self, RawOption, RejectLimitKind, OPTION_FORMAT, OPTION_PROTOCOL, OPTION_PXF_HOST,
    OPTION_PXF_PORT, OPTION_PXF_PROTOCOL, OPTION_REJECT_LIMIT, OPTION_REJECT_LIMIT_TYPE,
    OPTION_RESOURCE, OPTION_WIRE_FORMAT, WIRE_FORMAT_GPDB_WRITABLE, WIRE_FORMAT_TEXT,
};
use crate::value::TryFromValue;

pub const DEFAULT_PXF_HOST: &str = "localhost";
pub const DEFAULT_PXF_PORT: u16 = 5888;
pub const DEFAULT_PXF_PROTOCOL: &str = "http";

/// Fallbacks for the connector-identity options, injected into
/// [`resolve_options`] rather than read from ambient state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PxfDefaults {
    pub host: String,
    pub port: u16,
    pub protocol: String,
}

impl Default for PxfDefaults {
    fn default() -> PxfDefaults {
        PxfDefaults {
            host: DEFAULT_PXF_HOST.into(),
            port: DEFAULT_PXF_PORT,
            protocol: DEFAULT_PXF_PROTOCOL.into(),
        }
    }
}

/// The fully resolved configuration for one access to a PXF foreign table.
///
/// Owned by the caller that requested resolution; nothing here outlives the
/// access, and no caching happens on this side of the interface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PxfConfig {
    /// The connector protocol, from the wrapper level.
    pub protocol: String,
    /// The external resource path, from the table level.
    pub resource: String,
    /// `protocol`, or `protocol:format` when a format was declared.
    pub profile: String,
    /// The external file format, if declared.
    pub format: Option<String>,
    /// The wire encoding, defaulted from the format family when absent.
    pub wire_format: String,
    /// Tolerated malformed input rows before the access aborts.
    pub reject_limit: Option<i64>,
    pub reject_limit_kind: RejectLimitKind,
    /// COPY options across all levels, first occurrence per name winning.
    pub copy_options: Vec<RawOption>,
    /// Unrecognized options passed through to the external system, first
    /// occurrence per name winning.
    pub options: Vec<RawOption>,
    /// The name of the foreign server.
    pub server: String,
    pub exec_location: ExecLocation,
    pub host: String,
    pub port: u16,
    /// The scheme used to reach the PXF agent (`pxf_protocol`).
    pub pxf_protocol: String,
}

/// Resolves the merged option configuration for one foreign table.
///
/// Fetches the rows in dependency order (table, server, user mapping,
/// wrapper), merges their option lists, and applies derivations and
/// defaults so the result is total. A malformed `pxf_port` is the only
/// fatal condition; everything else was rejected at definition time.
pub fn resolve_options(
    catalog: &dyn OptionCatalog,
    user: RoleId,
    table_id: Oid,
    defaults: &PxfDefaults,
) -> Result<PxfConfig, OptionError> {
    let table = catalog.foreign_table(table_id)?;
    let server = catalog.foreign_server(table.server_id)?;
    let user_mapping = catalog.user_mapping(user, table.server_id)?;
    let wrapper = catalog.foreign_data_wrapper(server.wrapper_id)?;

    let mut merged = Vec::new();
    merged.extend(table.options);
    merged.extend(user_mapping.options);
    merged.extend(server.options);
    merged.extend(wrapper.options);

    let mut protocol = String::new();
    let mut resource = String::new();
    let mut format: Option<String> = None;
    let mut wire_format: Option<String> = None;
    let mut reject_limit: Option<i64> = None;
    let mut reject_limit_kind = RejectLimitKind::Rows;
    let mut host: Option<String> = None;
    let mut port: Option<u16> = None;
    let mut pxf_protocol: Option<String> = None;
    let mut copy_options: Vec<RawOption> = Vec::new();
    let mut copy_option_names = BTreeSet::new();
    let mut other_options: Vec<RawOption> = Vec::new();
    let mut other_option_names = BTreeSet::new();

    for opt in merged {
        match opt.name.as_str() {
            OPTION_PXF_HOST => host = Some(opt.value),
            OPTION_PXF_PORT => {
                let parsed = i64::try_from_value(&opt.value)
                    .ok()
                    .filter(|p| (1..65535).contains(p));
                match parsed {
                    Some(p) => port = Some(u16::try_from(p).expect("checked range")),
                    None => return Err(OptionError::InvalidPort { value: opt.value }),
                }
            }
            OPTION_PXF_PROTOCOL => pxf_protocol = Some(opt.value),
            OPTION_PROTOCOL => protocol = opt.value,
            OPTION_RESOURCE => resource = opt.value,
            OPTION_REJECT_LIMIT => {
                // Already validated at definition time; an unparsable value
                // here is left unset rather than misread as zero.
                if let Ok(limit) = i64::try_from_value(&opt.value) {
                    reject_limit = Some(limit);
                }
            }
            OPTION_REJECT_LIMIT_TYPE => {
                reject_limit_kind =
                    RejectLimitKind::from_value(&opt.value).unwrap_or(RejectLimitKind::Percent);
            }
            OPTION_FORMAT => {
                if options::is_copy_delegated_format(&opt.value)
                    && copy_option_names.insert(opt.name.clone())
                {
                    copy_options.push(opt.clone());
                }
                format = Some(opt.value);
            }
            OPTION_WIRE_FORMAT => wire_format = Some(opt.value),
            name if options::is_copy_option(name) => {
                if copy_option_names.insert(opt.name.clone()) {
                    copy_options.push(opt.clone());
                }
            }
            _ => {
                if other_option_names.insert(opt.name.clone()) {
                    other_options.push(opt.clone());
                }
            }
        }
    }

    // The profile corresponds to protocol[:format].
    let profile = match &format {
        Some(format) => format!("{}:{}", protocol, format),
        None => protocol.clone(),
    };

    let wire_format = wire_format.unwrap_or_else(|| default_wire_format(format.as_deref()).into());

    let config = PxfConfig {
        protocol,
        resource,
        profile,
        format,
        wire_format,
        reject_limit,
        reject_limit_kind,
        copy_options,
        options: other_options,
        server: server.name,
        exec_location: wrapper.exec_location,
        host: host.unwrap_or_else(|| defaults.host.clone()),
        port: port.unwrap_or(defaults.port),
        pxf_protocol: pxf_protocol.unwrap_or_else(|| defaults.protocol.clone()),
    };

    debug!(
        profile = %config.profile,
        server = %config.server,
        host = %config.host,
        port = config.port,
        "resolved PXF options for table {}", table_id,
    );

    Ok(config)
}

/// The wire encoding implied by a format when `wire_format` is not
/// declared. Row-based formats travel as text; everything else, including
/// an undeclared format, travels as GPDBWritable.
fn default_wire_format(format: Option<&str>) -> &'static str {
    match format {
        Some(format) if options::is_row_based_format(format) => WIRE_FORMAT_TEXT,
        _ => WIRE_FORMAT_GPDB_WRITABLE,
    }
}
