// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assigns dense integer ids to vertices and builds the compact adjacency representation the
//! rest of the crate operates on.

use crate::ast::{Member, Program};
use crate::edges;
use crate::errors::Error;
use crate::vertex::{def_vertex, Vertex};
use indexmap::IndexSet;
use std::collections::BTreeSet;

/// The default selector: every `Method`, `Function` and `Predicate` is "important", i.e. carries
/// a proof obligation that must end up in exactly one output sub-program.
pub fn default_isolate(member: &Member) -> bool {
    matches!(
        member,
        Member::Method(_) | Member::Function(_) | Member::Predicate(_)
    )
}

/// A flat, densely-id'd view of a program's dependency graph.
///
/// Every vertex that appears anywhere -- as the source or target of an edge -- gets exactly one
/// `usize` id, numbered `0..N` in first-encounter order. `edges()[i]` is the sorted set of
/// successor ids of node `i`, which keeps the merge-heavy downstream algorithms (smallest-cut,
/// the greedy merger) to simple linear passes.
#[derive(Debug)]
pub struct GraphIndex {
    vertices: IndexSet<Vertex>,
    edges: Vec<BTreeSet<usize>>,
    important_nodes: Vec<usize>,
}

impl GraphIndex {
    /// Builds a `GraphIndex` from `program`, selecting important members with `isolate`.
    ///
    /// Returns [`Error::UnsupportedMember`] as soon as a plugin/extension member is found.
    pub fn build(program: &Program, isolate: &dyn Fn(&Member) -> bool) -> Result<Self, Error> {
        let raw_edges = edges::extract(program)?;

        let mut builder = GraphIndexBuilder::new();
        for (from, to) in raw_edges {
            builder.add_edge(from, to);
        }

        for member in &program.members {
            if isolate(member) {
                let id = builder.intern(def_vertex(member)?);
                builder.important_nodes.push(id);
            }
        }

        Ok(builder.finish())
    }

    /// The number of distinct vertices in the graph.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The sorted successor set of node `id`.
    pub fn successors(&self, id: usize) -> &BTreeSet<usize> {
        &self.edges[id]
    }

    /// The full adjacency array, indexed by node id.
    pub fn edges(&self) -> &[BTreeSet<usize>] {
        &self.edges
    }

    /// The dense id assigned to `vertex`, if it appears in the graph.
    pub fn id_of(&self, vertex: &Vertex) -> Option<usize> {
        self.vertices.get_index_of(vertex)
    }

    /// The vertex assigned to `id`. Panics if `id` is out of range, which would indicate an
    /// internal bug (every id returned by this module is always in range).
    pub fn to_vertex(&self, id: usize) -> &Vertex {
        self.vertices
            .get_index(id)
            .expect("vertex id must be in range")
    }

    /// The (possibly duplicated) ids of every member selected by the `isolate` predicate passed
    /// to [`GraphIndex::build`].
    pub fn important_nodes(&self) -> &[usize] {
        &self.important_nodes
    }
}

/// Helper used only during construction; not exposed.
struct GraphIndexBuilder {
    vertices: IndexSet<Vertex>,
    edges: Vec<BTreeSet<usize>>,
    important_nodes: Vec<usize>,
}

impl GraphIndexBuilder {
    fn new() -> Self {
        Self {
            vertices: IndexSet::new(),
            edges: Vec::new(),
            important_nodes: Vec::new(),
        }
    }

    /// Interns a vertex, assigning it a fresh id on first sight, and grows `edges` to match.
    fn intern(&mut self, vertex: Vertex) -> usize {
        let (id, inserted) = self.vertices.insert_full(vertex);
        if inserted {
            self.edges.push(BTreeSet::new());
        }
        id
    }

    fn add_edge(&mut self, from: Vertex, to: Vertex) {
        let from_id = self.intern(from);
        let to_id = self.intern(to);
        self.edges[from_id].insert(to_id);
    }

    fn finish(self) -> GraphIndex {
        GraphIndex {
            vertices: self.vertices,
            edges: self.edges,
            important_nodes: self.important_nodes,
        }
    }
}
