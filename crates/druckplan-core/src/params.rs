// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Caller-supplied module parameters.

use serde::{Deserialize, Serialize};

use crate::types::Ensure;

/// Parameters for one resolution run.
///
/// `package_names` and `services` distinguish "unset" (`None`, fall back to
/// the OS defaults) from "explicitly empty" (`Some(vec![])`, manage
/// nothing).  Collapsing the two would silently turn a missing-parameter
/// error on unsupported platforms into a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleParams {
    /// Packages to manage; `None` selects the OS-family defaults.
    pub package_names: Option<Vec<String>>,
    /// Services to manage; `None` selects the OS-family defaults.
    pub services: Option<Vec<String>>,
    /// Target state applied to every managed package.
    pub package_ensure: Ensure,
    /// When false, no package resources are emitted at all.
    pub package_manage: bool,
    /// Whether queues not explicitly declared are removed on apply.
    pub purge_unmanaged_queues: bool,
    /// Name of the queue to activate as the system default.
    pub default_queue: Option<String>,
    /// System default paper size (a `paperconfig` size keyword).
    pub papersize: Option<String>,
}

impl Default for ModuleParams {
    fn default() -> Self {
        Self {
            package_names: None,
            services: None,
            package_ensure: Ensure::Present,
            package_manage: true,
            purge_unmanaged_queues: false,
            default_queue: None,
            papersize: None,
        }
    }
}
