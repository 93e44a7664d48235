// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Queue purge policy, default-queue activation, and papersize wiring.
//
// Queues themselves are declared outside the resolver; this module only
// decides whether undeclared queues get purged, which queue becomes the
// system default, and how a papersize change is ordered relative to the
// primary cups package and service.

use tracing::debug;

use druckplan_core::types::{
    CommandResource, Edge, PackageResource, PapersizeUnit, QueuePurgePolicy, ResourceRef,
    ServiceResource,
};

use crate::validate::EffectiveParams;

/// The package/service pair papersize changes are ordered against.
const PRIMARY_RESOURCE: &str = "cups";

/// Queue-related resources produced by one resolution run.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueOutputs {
    pub queue_purge: QueuePurgePolicy,
    pub papersize: Option<PapersizeUnit>,
    pub commands: Vec<CommandResource>,
    pub edges: Vec<Edge>,
}

/// Resolve the queue purge policy and auxiliary commands.
///
/// The default-queue command gets a `requires` edge to the named queue
/// without checking that the queue was actually declared — a dangling
/// reference is deliberately left for the executor to report at apply time.
pub fn resolve_queues(
    params: &EffectiveParams,
    packages: &[PackageResource],
    services: &[ServiceResource],
) -> QueueOutputs {
    let mut commands = Vec::new();
    let mut edges = Vec::new();

    if let Some(queue_name) = &params.default_queue {
        let command = CommandResource {
            name: format!("lpadmin-d-{queue_name}"),
            command: format!("lpadmin -E -d '{queue_name}'"),
        };
        edges.push(Edge::requires(
            ResourceRef::Command(command.name.clone()),
            ResourceRef::Queue(queue_name.clone()),
        ));
        debug!(queue = %queue_name, "default queue activation command emitted");
        commands.push(command);
    }

    let papersize = params.papersize.as_ref().map(|size| {
        let command = CommandResource {
            name: format!("paperconfig -p {size}"),
            command: format!("paperconfig -p {size}"),
        };

        // The papersize unit and its command wait for the primary cups
        // package and trigger a cups reload, but only when those resources
        // were actually emitted by this run.
        if packages.iter().any(|p| p.name == PRIMARY_RESOURCE) {
            let pkg = ResourceRef::Package(PRIMARY_RESOURCE.to_string());
            edges.push(Edge::requires(ResourceRef::Papersize, pkg.clone()));
            edges.push(Edge::requires(
                ResourceRef::Command(command.name.clone()),
                pkg,
            ));
        }
        if services.iter().any(|s| s.name == PRIMARY_RESOURCE) {
            let svc = ResourceRef::Service(PRIMARY_RESOURCE.to_string());
            edges.push(Edge::notifies(ResourceRef::Papersize, svc.clone()));
            edges.push(Edge::notifies(
                ResourceRef::Command(command.name.clone()),
                svc,
            ));
        }

        debug!(papersize = %size, "papersize unit emitted");
        commands.push(command);
        PapersizeUnit {
            papersize: size.clone(),
        }
    });

    QueueOutputs {
        queue_purge: QueuePurgePolicy {
            purge: params.purge_unmanaged_queues,
        },
        papersize,
        commands,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use druckplan_core::types::{EdgeKind, Ensure};

    fn params() -> EffectiveParams {
        EffectiveParams {
            package_names: vec!["cups".into()],
            services: vec!["cups".into()],
            package_ensure: Ensure::Present,
            package_manage: true,
            purge_unmanaged_queues: false,
            default_queue: None,
            papersize: None,
        }
    }

    fn cups_package() -> PackageResource {
        PackageResource {
            name: "cups".into(),
            ensure: Ensure::Present,
        }
    }

    fn cups_service() -> ServiceResource {
        ServiceResource {
            name: "cups".into(),
            running: true,
            enabled: true,
        }
    }

    #[test]
    fn purge_policy_is_always_emitted() {
        let off = resolve_queues(&params(), &[], &[]);
        assert!(!off.queue_purge.purge);

        let on = resolve_queues(
            &EffectiveParams {
                purge_unmanaged_queues: true,
                ..params()
            },
            &[],
            &[],
        );
        assert!(on.queue_purge.purge);
    }

    #[test]
    fn no_commands_without_default_queue_or_papersize() {
        let outputs = resolve_queues(&params(), &[cups_package()], &[cups_service()]);
        assert!(outputs.commands.is_empty());
        assert!(outputs.edges.is_empty());
        assert_eq!(outputs.papersize, None);
    }

    #[test]
    fn default_queue_emits_command_requiring_the_queue() {
        let outputs = resolve_queues(
            &EffectiveParams {
                default_queue: Some("Office".into()),
                ..params()
            },
            &[cups_package()],
            &[cups_service()],
        );

        let command = &outputs.commands[0];
        assert_eq!(command.name, "lpadmin-d-Office");
        assert_eq!(command.command, "lpadmin -E -d 'Office'");
        assert!(outputs.edges.contains(&Edge::requires(
            ResourceRef::Command("lpadmin-d-Office".into()),
            ResourceRef::Queue("Office".into()),
        )));
    }

    #[test]
    fn papersize_wires_against_primary_package_and_service() {
        let outputs = resolve_queues(
            &EffectiveParams {
                papersize: Some("a4".into()),
                ..params()
            },
            &[cups_package()],
            &[cups_service()],
        );

        assert_eq!(
            outputs.papersize,
            Some(PapersizeUnit {
                papersize: "a4".into()
            })
        );
        assert_eq!(outputs.commands.len(), 1);
        assert_eq!(outputs.commands[0].command, "paperconfig -p a4");

        let pkg = ResourceRef::Package("cups".into());
        let svc = ResourceRef::Service("cups".into());
        assert!(outputs
            .edges
            .contains(&Edge::requires(ResourceRef::Papersize, pkg.clone())));
        assert!(outputs
            .edges
            .contains(&Edge::notifies(ResourceRef::Papersize, svc.clone())));
        assert!(outputs.edges.contains(&Edge::requires(
            ResourceRef::Command("paperconfig -p a4".into()),
            pkg,
        )));
        assert!(outputs.edges.contains(&Edge::notifies(
            ResourceRef::Command("paperconfig -p a4".into()),
            svc,
        )));
    }

    #[test]
    fn papersize_edges_skip_unemitted_primary_resources() {
        // package_manage=false runs emit no packages; the papersize unit
        // must not then reference a nonexistent package resource.
        let outputs = resolve_queues(
            &EffectiveParams {
                papersize: Some("a4".into()),
                ..params()
            },
            &[],
            &[cups_service()],
        );

        assert!(outputs
            .edges
            .iter()
            .all(|e| e.kind != EdgeKind::Requires
                || !matches!(e.to, ResourceRef::Package(_))));
        // The notifies edges to the service survive.
        assert!(outputs
            .edges
            .contains(&Edge::notifies(ResourceRef::Papersize, ResourceRef::Service("cups".into()))));
    }
}
