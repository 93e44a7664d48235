// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The resolution pipeline: Unvalidated → Validated → Defaulted → GraphBuilt.
//
// One call consumes one (identity, parameters) pair and produces one fresh
// state.  The computation is pure and synchronous; callers may run any
// number of resolutions concurrently without coordination.

use tracing::{info, instrument};

use druckplan_core::error::Result;
use druckplan_core::params::ModuleParams;
use druckplan_core::types::{OsIdentity, QueueSpec, ResolvedState};

use crate::{graph, validate};

/// Resolve the desired print-subsystem state for one target system.
///
/// `declared_queues` are the externally-declared queue resources; the
/// resolver reads their names for default-queue wiring and passes them
/// through to the executor, but never creates or destroys queues itself.
///
/// # Errors
///
/// Fails fast on invalid parameters (see [`validate::validate`]); no
/// partial graph is ever returned.
#[instrument(skip(params, declared_queues), fields(family = %identity.family, distribution = %identity.distribution))]
pub fn resolve(
    identity: &OsIdentity,
    params: &ModuleParams,
    declared_queues: &[QueueSpec],
) -> Result<ResolvedState> {
    let effective = validate::validate(identity, params)?;
    let state = graph::build(&effective, declared_queues);

    info!(
        packages = state.packages.len(),
        services = state.services.len(),
        commands = state.commands.len(),
        edges = state.edges.len(),
        purge = state.queue_purge.purge,
        "resolution complete"
    );
    Ok(state)
}
