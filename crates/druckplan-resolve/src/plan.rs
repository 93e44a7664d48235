// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Topological apply planning over a resolved state.
//
// The executor is free to traverse the edge list itself; this module offers
// a ready-made ordering using Kahn's algorithm.  Each layer contains
// resources whose predecessors were all placed in earlier layers, so an
// executor may apply a layer's resources in parallel.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use druckplan_core::error::{DruckplanError, Result};
use druckplan_core::types::{EdgeKind, ResolvedState, ResourceRef};

/// Compute apply layers for the state's resource graph.
///
/// A `requires` edge orders the dependency before the dependent; a
/// `notifies` edge orders the notifier before the notified resource.
/// Edges referencing resources absent from the state (dangling queue
/// references) are ignored here — they fail at apply time, not plan time.
///
/// # Errors
///
/// Returns [`DruckplanError::DependencyCycle`] if the graph contains a
/// cycle.  States built by [`crate::resolve`] never do; this guards states
/// assembled by hand.
pub fn apply_layers(state: &ResolvedState) -> Result<Vec<Vec<ResourceRef>>> {
    let nodes: HashSet<ResourceRef> = state.resource_refs().into_iter().collect();

    let mut adjacency: HashMap<ResourceRef, Vec<ResourceRef>> = HashMap::new();
    let mut in_degree: HashMap<ResourceRef, usize> = HashMap::new();

    for edge in &state.edges {
        // Predecessor applies first.
        let (before, after) = match edge.kind {
            EdgeKind::Requires => (&edge.to, &edge.from),
            EdgeKind::Notifies => (&edge.from, &edge.to),
        };
        if !nodes.contains(before) || !nodes.contains(after) {
            debug!(from = %edge.from, to = %edge.to, "skipping edge with undeclared endpoint");
            continue;
        }
        adjacency
            .entry(before.clone())
            .or_default()
            .push(after.clone());
        *in_degree.entry(after.clone()).or_default() += 1;
    }

    let mut ready: Vec<ResourceRef> = nodes
        .iter()
        .filter(|n| in_degree.get(*n).copied().unwrap_or(0) == 0)
        .cloned()
        .collect();
    ready.sort();
    let mut queue = VecDeque::from(ready);

    let mut layers = Vec::new();
    let mut placed = 0usize;

    while !queue.is_empty() {
        let mut layer = Vec::new();
        let mut next = Vec::new();

        while let Some(node) = queue.pop_front() {
            if let Some(successors) = adjacency.get(&node) {
                for succ in successors {
                    let degree = in_degree
                        .get_mut(succ)
                        .ok_or_else(|| DruckplanError::DependencyCycle(succ.to_string()))?;
                    *degree -= 1;
                    if *degree == 0 {
                        next.push(succ.clone());
                    }
                }
            }
            layer.push(node);
        }

        placed += layer.len();
        layer.sort();
        layers.push(layer);

        next.sort();
        queue = VecDeque::from(next);
    }

    if placed < nodes.len() {
        let stuck = nodes
            .iter()
            .filter(|n| in_degree.get(*n).copied().unwrap_or(0) > 0)
            .min()
            .cloned()
            .map(|n| n.to_string())
            .unwrap_or_default();
        return Err(DruckplanError::DependencyCycle(stuck));
    }

    debug!(layers = layers.len(), resources = placed, "apply plan computed");
    Ok(layers)
}

/// Flatten [`apply_layers`] into a single serial apply order.
pub fn apply_order(state: &ResolvedState) -> Result<Vec<ResourceRef>> {
    Ok(apply_layers(state)?.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use druckplan_core::types::{
        Edge, Ensure, PackageResource, QueuePurgePolicy, ServiceResource,
    };

    fn state_with(
        packages: &[&str],
        services: &[&str],
        edges: Vec<Edge>,
    ) -> ResolvedState {
        ResolvedState {
            packages: packages
                .iter()
                .map(|name| PackageResource {
                    name: (*name).into(),
                    ensure: Ensure::Present,
                })
                .collect(),
            services: services
                .iter()
                .map(|name| ServiceResource {
                    name: (*name).into(),
                    running: true,
                    enabled: true,
                })
                .collect(),
            commands: vec![],
            queues: vec![],
            queue_purge: QueuePurgePolicy { purge: false },
            papersize: None,
            edges,
        }
    }

    #[test]
    fn packages_precede_dependent_services() {
        let edges = vec![Edge::requires(
            ResourceRef::Service("cups".into()),
            ResourceRef::Package("cups".into()),
        )];
        let state = state_with(&["cups"], &["cups"], edges);

        let order = apply_order(&state).expect("acyclic");
        let pkg = order
            .iter()
            .position(|r| matches!(r, ResourceRef::Package(_)))
            .unwrap();
        let svc = order
            .iter()
            .position(|r| matches!(r, ResourceRef::Service(_)))
            .unwrap();
        assert!(pkg < svc);
    }

    #[test]
    fn layers_group_independent_resources() {
        let edges = vec![
            Edge::requires(
                ResourceRef::Service("cupsd".into()),
                ResourceRef::Package("cups".into()),
            ),
            Edge::requires(
                ResourceRef::Service("cupsd".into()),
                ResourceRef::Package("cups-ipp-utils".into()),
            ),
        ];
        let state = state_with(&["cups", "cups-ipp-utils"], &["cupsd"], edges);

        let layers = apply_layers(&state).expect("acyclic");
        assert_eq!(layers.len(), 2);
        assert_eq!(
            layers[0],
            vec![
                ResourceRef::Package("cups".into()),
                ResourceRef::Package("cups-ipp-utils".into()),
            ]
        );
        assert_eq!(layers[1], vec![ResourceRef::Service("cupsd".into())]);
    }

    #[test]
    fn notifies_orders_notifier_before_notified() {
        let edges = vec![Edge::notifies(
            ResourceRef::Service("a".into()),
            ResourceRef::Service("b".into()),
        )];
        let state = state_with(&[], &["a", "b"], edges);

        let order = apply_order(&state).expect("acyclic");
        assert_eq!(
            order,
            vec![
                ResourceRef::Service("a".into()),
                ResourceRef::Service("b".into()),
            ]
        );
    }

    #[test]
    fn dangling_queue_edges_are_ignored() {
        // A default-queue command referencing an undeclared queue still
        // plans; the executor reports the missing queue at apply time.
        let mut state = state_with(&["cups"], &[], vec![]);
        state.commands.push(druckplan_core::types::CommandResource {
            name: "lpadmin-d-Office".into(),
            command: "lpadmin -E -d 'Office'".into(),
        });
        state.edges.push(Edge::requires(
            ResourceRef::Command("lpadmin-d-Office".into()),
            ResourceRef::Queue("Office".into()),
        ));

        let order = apply_order(&state).expect("plans despite dangling edge");
        assert!(order.contains(&ResourceRef::Command("lpadmin-d-Office".into())));
    }

    #[test]
    fn cycles_are_reported() {
        let edges = vec![
            Edge::requires(
                ResourceRef::Service("a".into()),
                ResourceRef::Service("b".into()),
            ),
            Edge::requires(
                ResourceRef::Service("b".into()),
                ResourceRef::Service("a".into()),
            ),
        ];
        let state = state_with(&[], &["a", "b"], edges);

        let err = apply_order(&state).unwrap_err();
        assert!(matches!(err, DruckplanError::DependencyCycle(_)));
    }

    #[test]
    fn plan_is_deterministic() {
        let edges = vec![
            Edge::requires(
                ResourceRef::Service("cupsd".into()),
                ResourceRef::Package("cups".into()),
            ),
        ];
        let state = state_with(&["cups", "zeta", "alpha"], &["cupsd"], edges);

        let first = apply_order(&state).expect("acyclic");
        let second = apply_order(&state).expect("acyclic");
        assert_eq!(first, second);
    }
}
