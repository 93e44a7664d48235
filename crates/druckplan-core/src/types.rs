// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Druckplan state resolver.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Operating system family as reported by the fact provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsFamily {
    Debian,
    RedHat,
    Suse,
    /// Any family the resolver has no built-in defaults for.
    Unknown,
}

impl OsFamily {
    /// Parse an `osfamily` fact string. Anything unrecognised maps to
    /// [`OsFamily::Unknown`] rather than failing; whether that is acceptable
    /// depends on the parameters supplied alongside it.
    pub fn from_fact(fact: &str) -> Self {
        match fact.to_ascii_lowercase().as_str() {
            "debian" => Self::Debian,
            "redhat" => Self::RedHat,
            "suse" => Self::Suse,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Debian => "Debian",
            Self::RedHat => "RedHat",
            Self::Suse => "Suse",
            Self::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

/// Identity of the target operating system, supplied once per resolution run.
///
/// `major_version` is compared as a float so that release strings like
/// "15.10" order correctly against gate thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsIdentity {
    pub family: OsFamily,
    pub distribution: String,
    pub major_version: f64,
}

impl OsIdentity {
    pub fn new(family: OsFamily, distribution: impl Into<String>, major_version: f64) -> Self {
        Self {
            family,
            distribution: distribution.into(),
            major_version,
        }
    }

    /// Identity where only the family fact is available (some fact providers
    /// omit distribution and release on minimal systems).
    pub fn family_only(family: OsFamily) -> Self {
        Self {
            family,
            distribution: String::new(),
            major_version: 0.0,
        }
    }

    /// Build an identity from raw fact strings.
    ///
    /// A release fact that does not parse as a number is treated as 0.0,
    /// which keeps it below every version gate.
    pub fn from_facts(family: &str, distribution: &str, major_release: &str) -> Self {
        Self {
            family: OsFamily::from_fact(family),
            distribution: distribution.to_string(),
            major_version: major_release.parse().unwrap_or(0.0),
        }
    }
}

/// Target state for a managed package.
///
/// Serialises as a bare string (`"present"`, `"absent"`, or a version
/// literal) so parameter files read the same as the package manager CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ensure {
    Present,
    Absent,
    /// Pin to a specific package version string.
    Version(String),
}

impl From<String> for Ensure {
    fn from(value: String) -> Self {
        match value.as_str() {
            "present" => Self::Present,
            "absent" => Self::Absent,
            _ => Self::Version(value),
        }
    }
}

impl From<Ensure> for String {
    fn from(value: Ensure) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for Ensure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present => write!(f, "present"),
            Self::Absent => write!(f, "absent"),
            Self::Version(v) => write!(f, "{v}"),
        }
    }
}

/// A package the executor should install or remove.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageResource {
    pub name: String,
    pub ensure: Ensure,
}

/// A service the executor should keep in the given run state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResource {
    pub name: String,
    pub running: bool,
    pub enabled: bool,
}

/// An auxiliary command the executor runs when its dependencies are met.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResource {
    /// Stable resource name (used in edges and executor reporting).
    pub name: String,
    /// The command line to execute.
    pub command: String,
}

/// Whether queue resources not explicitly declared are removed on apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuePurgePolicy {
    pub purge: bool,
}

/// Sub-configuration unit carrying the system default paper size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PapersizeUnit {
    pub papersize: String,
}

/// Target state for an externally-declared printer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueEnsure {
    Printer,
    Class,
    Absent,
}

/// A printer queue declared outside this resolver.
///
/// The resolver never creates or destroys queues; it only reads their names
/// for default-queue wiring and passes the declarations through to the
/// executor alongside the purge policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueSpec {
    pub name: String,
    pub ensure: QueueEnsure,
    pub model: Option<String>,
    pub uri: Option<String>,
}

/// Node identity within the resource graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceRef {
    Package(String),
    Service(String),
    Command(String),
    Queue(String),
    /// The single papersize sub-configuration unit of a run.
    Papersize,
}

impl std::fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Package(name) => write!(f, "package[{name}]"),
            Self::Service(name) => write!(f, "service[{name}]"),
            Self::Command(name) => write!(f, "command[{name}]"),
            Self::Queue(name) => write!(f, "queue[{name}]"),
            Self::Papersize => write!(f, "papersize"),
        }
    }
}

/// Ordering constraint between two resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// `to` must be applied successfully before `from`.
    Requires,
    /// Applying `from` triggers a restart/reload of `to` afterwards.
    Notifies,
}

/// A directed dependency edge in the resource graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub from: ResourceRef,
    pub to: ResourceRef,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn requires(from: ResourceRef, to: ResourceRef) -> Self {
        Self {
            from,
            to,
            kind: EdgeKind::Requires,
        }
    }

    pub fn notifies(from: ResourceRef, to: ResourceRef) -> Self {
        Self {
            from,
            to,
            kind: EdgeKind::Notifies,
        }
    }
}

/// The complete output of one resolution run.
///
/// Never mutated after construction; a new input produces a fresh state.
/// All collections are in deterministic order so that resolving the same
/// input twice yields structurally identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedState {
    pub packages: Vec<PackageResource>,
    pub services: Vec<ServiceResource>,
    pub commands: Vec<CommandResource>,
    /// Externally-declared queues, passed through for the executor.
    pub queues: Vec<QueueSpec>,
    pub queue_purge: QueuePurgePolicy,
    pub papersize: Option<PapersizeUnit>,
    pub edges: Vec<Edge>,
}

impl ResolvedState {
    /// Look up a package resource by name.
    pub fn package(&self, name: &str) -> Option<&PackageResource> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Look up a service resource by name.
    pub fn service(&self, name: &str) -> Option<&ServiceResource> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Look up a command resource by name.
    pub fn command(&self, name: &str) -> Option<&CommandResource> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Whether the graph contains the given edge.
    pub fn has_edge(&self, from: &ResourceRef, to: &ResourceRef, kind: EdgeKind) -> bool {
        self.edges
            .iter()
            .any(|e| e.kind == kind && &e.from == from && &e.to == to)
    }

    /// All graph nodes declared by this state, in deterministic order.
    ///
    /// Edges may additionally reference queue names absent from this list;
    /// those are dangling references the executor reports at apply time.
    pub fn resource_refs(&self) -> Vec<ResourceRef> {
        let mut refs: Vec<ResourceRef> = self
            .packages
            .iter()
            .map(|p| ResourceRef::Package(p.name.clone()))
            .chain(
                self.services
                    .iter()
                    .map(|s| ResourceRef::Service(s.name.clone())),
            )
            .chain(
                self.commands
                    .iter()
                    .map(|c| ResourceRef::Command(c.name.clone())),
            )
            .chain(self.queues.iter().map(|q| ResourceRef::Queue(q.name.clone())))
            .collect();
        if self.papersize.is_some() {
            refs.push(ResourceRef::Papersize);
        }
        refs.sort();
        refs
    }

    /// Serialise the state for handoff to an out-of-process executor.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
