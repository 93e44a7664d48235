// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Druckplan.

use thiserror::Error;

/// Top-level error type for all Druckplan operations.
///
/// Every resolution-time error is fatal to its run: no partial graph is
/// ever returned.
#[derive(Debug, Error)]
pub enum DruckplanError {
    /// A required parameter is unset and the operating system is not covered
    /// by the default resolver.
    #[error("required parameter '{name}' is not set and no default exists for this operating system")]
    MissingRequiredParameter { name: &'static str },

    /// A papersize value `paperconfig` would reject.
    #[error("unsupported paper size: {0}")]
    UnsupportedPaperSize(String),

    /// The resource graph handed to apply planning contains a cycle.
    #[error("dependency cycle involving {0}")]
    DependencyCycle(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DruckplanError {
    /// Name of the offending parameter, when the error concerns one.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Self::MissingRequiredParameter { name } => Some(name),
            _ => None,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DruckplanError>;
