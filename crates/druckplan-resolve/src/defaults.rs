// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OS-family default resolution.
//
// The base state is identical everywhere CUPS ships: one `cups` package and
// one `cups` service.  What differs per platform is which IPP support
// package (if any) must be installed alongside.  Those differences live in
// a single rule table so adding a platform means adding a row, not another
// branch.

use druckplan_core::types::{OsFamily, OsIdentity};

/// Default package and service sets for a recognised operating system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsDefaults {
    pub package_names: Vec<String>,
    pub services: Vec<String>,
}

/// A conditional package addition gated on distribution and release.
///
/// `distribution: None` matches every distribution of the family.
/// `min_version: None` applies the package at any release; otherwise a
/// release strictly below the threshold omits the package entirely.
#[derive(Debug)]
struct PackageGate {
    family: OsFamily,
    distribution: Option<&'static str>,
    min_version: Option<f64>,
    package: &'static str,
}

impl PackageGate {
    fn matches(&self, identity: &OsIdentity) -> bool {
        if self.family != identity.family {
            return false;
        }
        if let Some(dist) = self.distribution {
            if !dist.eq_ignore_ascii_case(&identity.distribution) {
                return false;
            }
        }
        match self.min_version {
            Some(threshold) => identity.major_version >= threshold,
            None => true,
        }
    }
}

const BASE_PACKAGES: &[&str] = &["cups"];
const BASE_SERVICES: &[&str] = &["cups"];

/// Platforms whose stock CUPS lacks the IPP Everywhere helper tools.
const PACKAGE_GATES: &[PackageGate] = &[
    PackageGate {
        family: OsFamily::Debian,
        distribution: Some("Debian"),
        min_version: Some(9.0),
        package: "cups-ipp-utils",
    },
    PackageGate {
        family: OsFamily::Debian,
        distribution: Some("Ubuntu"),
        min_version: Some(15.10),
        package: "cups-ipp-utils",
    },
    PackageGate {
        family: OsFamily::Debian,
        distribution: Some("LinuxMint"),
        min_version: Some(18.0),
        package: "cups-ipp-utils",
    },
    PackageGate {
        family: OsFamily::RedHat,
        distribution: None,
        min_version: None,
        package: "cups-ipptool",
    },
];

/// Whether the default resolver has built-in knowledge of this family.
pub fn recognises(family: OsFamily) -> bool {
    !matches!(family, OsFamily::Unknown)
}

/// Compute the default package and service lists for the given identity.
///
/// Returns `None` for unrecognised families — the caller must then insist
/// on explicit `package_names`/`services` parameters instead of silently
/// managing nothing.
pub fn lookup(identity: &OsIdentity) -> Option<OsDefaults> {
    if !recognises(identity.family) {
        return None;
    }

    let mut package_names: Vec<String> = BASE_PACKAGES.iter().map(|p| (*p).to_string()).collect();
    for gate in PACKAGE_GATES {
        if gate.matches(identity) {
            package_names.push(gate.package.to_string());
        }
    }

    Some(OsDefaults {
        package_names,
        services: BASE_SERVICES.iter().map(|s| (*s).to_string()).collect(),
    })
}
