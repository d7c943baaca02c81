// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collapses cycles in the dependency graph into strongly connected components, producing an
//! acyclic component graph that the acyclic smallest-cut variant can then operate on.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::Directed;
use std::collections::BTreeSet;

/// One strongly connected component.
///
/// `proxy` is the first id Tarjan pushed into the component; it doubles as the component's
/// identity and its ordering key in the condensed graph.
#[derive(Clone, Debug)]
pub struct Component {
    pub proxy: usize,
    pub nodes: Vec<usize>,
}

/// The strongly connected components of `(n, edges)`, plus the acyclic graph obtained by
/// collapsing each component to a single node.
#[derive(Debug)]
pub struct Sccs {
    components: Vec<Component>,
    id_to_component: Vec<usize>,
    /// `component_edges[c]` is the sorted set of component indices `c` has an edge to. Always
    /// acyclic: self-loops and duplicate targets are removed during construction.
    component_edges: Vec<BTreeSet<usize>>,
}

impl Sccs {
    /// Runs Tarjan's algorithm (iteratively -- `petgraph::algo::tarjan_scc` never recurses, so
    /// this is safe on graphs deep enough to blow a call stack) over `(n, edges)`.
    pub fn new(n: usize, edges: &[BTreeSet<usize>]) -> Self {
        let mut g: Graph<(), (), Directed, u32> = Graph::with_capacity(n, 0);
        for _ in 0..n {
            g.add_node(());
        }
        for (from, succs) in edges.iter().enumerate() {
            for &to in succs {
                g.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
            }
        }

        let sccs = tarjan_scc(&g);
        let mut components: Vec<Component> = sccs
            .into_iter()
            .map(|scc| {
                let nodes: Vec<usize> = scc.into_iter().map(|ix| ix.index()).collect();
                let proxy = nodes[0];
                Component { proxy, nodes }
            })
            .collect();
        // `proxy` is the component's identity and ordering key: sorting by it here, rather than
        // leaving components in Tarjan's arbitrary output order, is what makes `component_edges`
        // and `id_to_component` (both indexed by position in `components`) keyed by proxy order.
        components.sort_by_key(|c| c.proxy);

        let mut id_to_component = vec![0usize; n];
        for (component_idx, component) in components.iter().enumerate() {
            for &node in &component.nodes {
                id_to_component[node] = component_idx;
            }
        }

        let mut component_edges = vec![BTreeSet::new(); components.len()];
        for (from, succs) in edges.iter().enumerate() {
            let from_component = id_to_component[from];
            for &to in succs {
                let to_component = id_to_component[to];
                if to_component != from_component {
                    component_edges[from_component].insert(to_component);
                }
            }
        }

        Self {
            components,
            id_to_component,
            component_edges,
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The component index containing vertex id `id`.
    pub fn component_of(&self, id: usize) -> usize {
        self.id_to_component[id]
    }

    /// The sorted set of component indices that component `c` has an edge to. Guaranteed
    /// acyclic.
    pub fn component_edges(&self) -> &[BTreeSet<usize>] {
        &self.component_edges
    }

    pub fn num_components(&self) -> usize {
        self.components.len()
    }
}
