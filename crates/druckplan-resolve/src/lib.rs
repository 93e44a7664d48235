// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Druckplan Resolve — parameter validation, OS default resolution, and
// resource-graph construction.  This crate turns the domain types defined
// in `druckplan-core` into a concrete, ordered resource graph for an
// external executor.

pub mod defaults;
pub mod graph;
pub mod plan;
pub mod queue;
pub mod resolver;
pub mod validate;

pub use plan::{apply_layers, apply_order};
pub use resolver::resolve;
pub use validate::EffectiveParams;
