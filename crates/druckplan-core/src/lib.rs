// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Druckplan — core types, parameters, and error definitions shared across
// all crates.

pub mod error;
pub mod params;
pub mod types;

pub use error::DruckplanError;
pub use params::ModuleParams;
pub use types::*;
