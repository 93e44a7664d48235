// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Resource graph construction.
//
// Turns validated parameters into the final resource set plus ordering
// edges.  The graph is a DAG by construction: packages depend on nothing,
// services and commands depend on packages, and notifies edges only point
// at services.

use tracing::debug;

use druckplan_core::types::{
    Edge, PackageResource, QueueSpec, ResolvedState, ResourceRef, ServiceResource,
};

use crate::queue;
use crate::validate::EffectiveParams;

/// Assemble the resolved state for one run.
///
/// `declared_queues` are the externally-declared queue resources; they are
/// passed through untouched so the executor receives one coherent graph.
pub fn build(params: &EffectiveParams, declared_queues: &[QueueSpec]) -> ResolvedState {
    let packages = build_packages(params);
    let (services, mut edges) = build_services(params, &packages);

    let queue_outputs = queue::resolve_queues(params, &packages, &services);
    edges.extend(queue_outputs.edges);
    edges.sort();
    edges.dedup();

    ResolvedState {
        packages,
        services,
        commands: queue_outputs.commands,
        queues: declared_queues.to_vec(),
        queue_purge: queue_outputs.queue_purge,
        papersize: queue_outputs.papersize,
        edges,
    }
}

/// One package resource per configured name, all with the same target state.
///
/// `package_manage = false` suppresses package resources entirely; the
/// names stay configured but nothing is emitted for them.
fn build_packages(params: &EffectiveParams) -> Vec<PackageResource> {
    if !params.package_manage {
        debug!("package management disabled; no package resources emitted");
        return Vec::new();
    }

    params
        .package_names
        .iter()
        .map(|name| PackageResource {
            name: name.clone(),
            ensure: params.package_ensure.clone(),
        })
        .collect()
}

/// One running, enabled service per configured name, each waiting on every
/// emitted package (cartesian, not name-matched: a service cannot start
/// before any part of the print stack is installed).
fn build_services(
    params: &EffectiveParams,
    packages: &[PackageResource],
) -> (Vec<ServiceResource>, Vec<Edge>) {
    let services: Vec<ServiceResource> = params
        .services
        .iter()
        .map(|name| ServiceResource {
            name: name.clone(),
            running: true,
            enabled: true,
        })
        .collect();

    let mut edges = Vec::with_capacity(services.len() * packages.len());
    for service in &services {
        for package in packages {
            edges.push(Edge::requires(
                ResourceRef::Service(service.name.clone()),
                ResourceRef::Package(package.name.clone()),
            ));
        }
    }

    (services, edges)
}
