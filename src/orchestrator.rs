// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The public entry point: ties the dependency-graph builder, SCC condensation, smallest-cut and
//! greedy merger together into a single `chop` call.

use crate::ast::{Member, Program};
use crate::errors::Error;
use crate::graph_index::GraphIndex;
use crate::merger::{self, WeightedSet};
use crate::penalty::{ContravariantSumLift, Penalty};
use crate::scc::Sccs;
use crate::smallest_cut::{acyclic_smallest_cut, cyclic_smallest_cut};
use crate::vertex::Vertex;
use std::collections::BTreeSet;
use std::time::Instant;

/// Timing and size information about a completed [`chop`] call, useful for a host to tune its
/// bound or penalty weights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    /// The number of sub-programs returned.
    pub max_number_of_parts: usize,
    /// Time spent collapsing cycles into SCCs, in seconds. `None` when the ≤2-important-node
    /// fast path skipped SCC condensation entirely.
    pub time_scc: Option<f64>,
    /// Time spent computing the initial (pre-merge) smallest cuts, in seconds.
    pub time_cutting: f64,
    /// Time spent in the greedy merger, in seconds.
    pub time_merging: f64,
}

/// Which smallest-cut variant produced the pre-merge sub-programs, and what their ids mean.
enum Regime {
    /// ≤2 important nodes: ids are raw vertex ids from [`GraphIndex`].
    Direct,
    /// >2 important nodes: ids are component ids into the carried [`Sccs`].
    Condensed(Sccs),
}

/// Partitions `program` into sub-programs such that every member selected by `isolate` ends up in
/// exactly one output, together with its full transitive dependency closure.
///
/// `bound` caps the number of sub-programs returned; `Some(0)` is rejected as
/// [`Error::InvalidBound`]. `penalty` drives which vertices are cheap to duplicate across
/// sub-programs and which merges are forced (see [`crate::penalty`]).
pub fn chop(
    program: &Program,
    isolate: &dyn Fn(&Member) -> bool,
    bound: Option<usize>,
    penalty: &impl Penalty<Vertex>,
) -> Result<(Vec<Program>, Metrics), Error> {
    if bound == Some(0) {
        return Err(Error::InvalidBound(0));
    }

    let graph_index = GraphIndex::build(program, isolate)?;
    log::debug!(
        "built dependency graph with {} vertices, {} important nodes",
        graph_index.len(),
        graph_index.important_nodes().len()
    );

    if graph_index.important_nodes().is_empty() {
        return Ok((
            Vec::new(),
            Metrics {
                max_number_of_parts: 0,
                time_scc: None,
                time_cutting: 0.0,
                time_merging: 0.0,
            },
        ));
    }

    // In the condensed regime the merger operates on component ids, not raw vertex ids, via
    // `ContravariantSumLift` -- a component's price is the sum of the prices of the vertices it
    // collapsed. `cut_vertex_ids` always tracks the underlying vertex ids regardless of regime,
    // since the post-merge safety check needs to reason about vertex coverage either way.
    let (pre_merge, cut_vertex_ids, regime, time_scc, time_cutting) = if graph_index
        .important_nodes()
        .len()
        <= 2
    {
        log::debug!("using the cyclic smallest-cut fast path (at most two important nodes)");
        let start = Instant::now();
        let cuts = cyclic_smallest_cut(
            graph_index.len(),
            graph_index.edges(),
            graph_index.important_nodes(),
        );
        let time_cutting = start.elapsed().as_secs_f64();

        let pre_merge: Vec<WeightedSet> = cuts
            .iter()
            .map(|ids| WeightedSet::new(ids, |id| penalty.price(graph_index.to_vertex(id))))
            .collect();
        let cut_vertex_ids: Vec<Vec<usize>> = cuts.iter().map(|s| s.iter().copied().collect()).collect();
        (pre_merge, cut_vertex_ids, Regime::Direct, None, time_cutting)
    } else {
        log::debug!("collapsing cycles into strongly connected components");
        let scc_start = Instant::now();
        let sccs = Sccs::new(graph_index.len(), graph_index.edges());
        let time_scc = scc_start.elapsed().as_secs_f64();
        log::debug!(
            "condensed {} vertices into {} components",
            graph_index.len(),
            sccs.num_components()
        );

        let roots: Vec<usize> = graph_index
            .important_nodes()
            .iter()
            .map(|&id| sccs.component_of(id))
            .collect();

        let cut_start = Instant::now();
        let component_cuts =
            acyclic_smallest_cut(sccs.num_components(), sccs.component_edges(), &roots);
        let time_cutting = cut_start.elapsed().as_secs_f64();

        let lift = ContravariantSumLift::new(
            |component_id: &usize| -> Vec<Vertex> {
                sccs.components()[*component_id]
                    .nodes
                    .iter()
                    .map(|&id| graph_index.to_vertex(id).clone())
                    .collect()
            },
            penalty,
        );
        let pre_merge: Vec<WeightedSet> = component_cuts
            .iter()
            .map(|ids| WeightedSet::new(ids, |component_id| lift.price(&component_id)))
            .collect();
        let cut_vertex_ids: Vec<Vec<usize>> = component_cuts
            .iter()
            .map(|ids| {
                ids.iter()
                    .flat_map(|&c| sccs.components()[c].nodes.iter().copied())
                    .collect()
            })
            .collect();
        (
            pre_merge,
            cut_vertex_ids,
            Regime::Condensed(sccs),
            Some(time_scc),
            time_cutting,
        )
    };

    log::debug!("computed {} pre-merge sub-programs", pre_merge.len());

    let merge_start = Instant::now();
    let merged = merger::merge(pre_merge, bound, |l, r, s| penalty.merge_penalty(l, r, s));
    let time_merging = merge_start.elapsed().as_secs_f64();
    log::debug!("merged down to {} sub-programs", merged.len());

    let final_vertex_ids: Vec<BTreeSet<usize>> = match &regime {
        Regime::Direct => merged.into_iter().map(|s| s.into_ids().into_iter().collect()).collect(),
        Regime::Condensed(sccs) => merged
            .into_iter()
            .map(|s| {
                s.into_ids()
                    .into_iter()
                    .flat_map(|component_id| sccs.components()[component_id].nodes.iter().copied())
                    .collect()
            })
            .collect(),
    };

    verify_safety(&graph_index, &cut_vertex_ids, &final_vertex_ids)?;

    let mut programs = Vec::with_capacity(final_vertex_ids.len());
    for ids in &final_vertex_ids {
        let vertices: BTreeSet<Vertex> = ids.iter().map(|&id| graph_index.to_vertex(id).clone()).collect();
        programs.push(crate::reconstruct::reconstruct(program, &vertices)?);
    }

    Ok((
        programs,
        Metrics {
            max_number_of_parts: final_vertex_ids.len(),
            time_scc,
            time_cutting,
            time_merging,
        },
    ))
}

/// Checks the invariant the whole pipeline must uphold: every vertex selected by
/// any pre-merge cut survives in some final sub-program, and every important node is covered.
/// A violation here means the merger or a smallest-cut variant has a bug.
fn verify_safety(
    graph_index: &GraphIndex,
    pre_merge: &[Vec<usize>],
    final_sets: &[BTreeSet<usize>],
) -> Result<(), Error> {
    let pre_merge_union: BTreeSet<usize> = pre_merge.iter().flatten().copied().collect();
    let final_union: BTreeSet<usize> = final_sets.iter().flatten().copied().collect();

    if pre_merge_union != final_union {
        return Err(Error::InternalError(
            "merged sub-programs do not cover exactly the pre-merge vertex set".to_string(),
        ));
    }

    for &important in graph_index.important_nodes() {
        if !final_sets.iter().any(|set| set.contains(&important)) {
            return Err(Error::InternalError(format!(
                "important vertex {:?} is missing from every output sub-program",
                graph_index.to_vertex(important)
            )));
        }
    }

    Ok(())
}

/// Convenience wrapper used when the caller doesn't need a custom `Penalty`.
pub fn chop_with_default_weights(
    program: &Program,
    isolate: &dyn Fn(&Member) -> bool,
    bound: Option<usize>,
) -> Result<(Vec<Program>, Metrics), Error> {
    let penalty = crate::penalty::DefaultPenalty::new();
    chop(program, isolate, bound, &penalty)
}
