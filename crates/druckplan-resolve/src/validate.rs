// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Parameter validation and defaulting.
//
// Covers the first two stages of a resolution run: Unvalidated → Validated
// (reject impossible parameter combinations) and Validated → Defaulted
// (fill unset lists from the OS default tables).  Any failure aborts the
// run before a single resource is emitted.

use tracing::debug;

use druckplan_core::error::{DruckplanError, Result};
use druckplan_core::params::ModuleParams;
use druckplan_core::types::{Ensure, OsIdentity};

use crate::defaults;

/// Paper size keywords `paperconfig -p` accepts.
///
/// Checked at resolution time rather than deferred to the executor; a typo
/// here would otherwise surface only as a failed exec on the target host.
const PAPERCONFIG_SIZES: &[&str] = &[
    "a3", "a4", "a5", "b5", "letter", "legal", "executive", "note",
];

/// Parameters after validation and defaulting, ready for graph construction.
///
/// Unlike [`ModuleParams`], the package and service lists here are always
/// concrete: the unset-vs-empty distinction has been resolved against the
/// OS defaults or rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveParams {
    pub package_names: Vec<String>,
    pub services: Vec<String>,
    pub package_ensure: Ensure,
    pub package_manage: bool,
    pub purge_unmanaged_queues: bool,
    pub default_queue: Option<String>,
    pub papersize: Option<String>,
}

/// Validate caller parameters against the OS identity and fill in defaults.
///
/// # Errors
///
/// Returns [`DruckplanError::MissingRequiredParameter`] when `package_names`
/// or `services` is unset and the OS family has no built-in defaults, and
/// [`DruckplanError::UnsupportedPaperSize`] for a papersize keyword
/// `paperconfig` would reject.
pub fn validate(identity: &OsIdentity, params: &ModuleParams) -> Result<EffectiveParams> {
    let os_defaults = defaults::lookup(identity);

    let package_names = match (&params.package_names, &os_defaults) {
        (Some(names), _) => names.clone(),
        (None, Some(d)) => d.package_names.clone(),
        (None, None) => {
            return Err(DruckplanError::MissingRequiredParameter {
                name: "package_names",
            });
        }
    };

    let services = match (&params.services, &os_defaults) {
        (Some(names), _) => names.clone(),
        (None, Some(d)) => d.services.clone(),
        (None, None) => {
            return Err(DruckplanError::MissingRequiredParameter { name: "services" });
        }
    };

    if let Some(size) = &params.papersize {
        if !PAPERCONFIG_SIZES.contains(&size.as_str()) {
            return Err(DruckplanError::UnsupportedPaperSize(size.clone()));
        }
    }

    debug!(
        packages = package_names.len(),
        services = services.len(),
        defaulted = params.package_names.is_none() || params.services.is_none(),
        "parameters validated"
    );

    Ok(EffectiveParams {
        package_names,
        services,
        package_ensure: params.package_ensure.clone(),
        package_manage: params.package_manage,
        purge_unmanaged_queues: params.purge_unmanaged_queues,
        default_queue: params.default_queue.clone(),
        papersize: params.papersize.clone(),
    })
}
