// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The two smallest-cut variants: given a graph and a set of selected ("important") nodes,
//! compute the minimal set of sub-programs covering them -- one reachable set per *root*, a
//! selected node not reachable from any other selected node.
//!
//! Both variants use an explicit stack rather than recursion, since the dependency graphs this
//! crate operates on can be deeper than the default call-stack allows (mutual recursion through
//! specifications is common).

use crate::sorted_set::SortedSet;
use fixedbitset::FixedBitSet;
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum NodeState {
    NotVisited,
    Finalized(usize),
}

/// Acyclic smallest-cut: used on the SCC-condensed component graph (or on any graph already
/// known to be a DAG).
///
/// Implements a two-push iterative postorder DFS: a node is pushed once to descend into its
/// successors, then re-pushed underneath them so that by the time it's popped a second time,
/// every successor has already been finalized.
pub fn acyclic_smallest_cut(
    n: usize,
    edges: &[BTreeSet<usize>],
    roots: &[usize],
) -> Vec<SortedSet<usize>> {
    let mut state = vec![NodeState::NotVisited; n];
    let mut reachable: Vec<Option<BTreeSet<usize>>> = vec![None; n];
    let mut not_root = FixedBitSet::with_capacity(n);
    let mut seen_starts = HashSet::new();
    let mut order = Vec::new();

    for &start in roots {
        if seen_starts.insert(start) {
            order.push(start);
        }

        if let NodeState::Finalized(owner) = state[start] {
            if owner != start {
                not_root.put(start);
            }
            continue;
        }

        let mut discovered = FixedBitSet::with_capacity(n);
        let mut stack = vec![start];
        while let Some(&node) = stack.last() {
            if let NodeState::Finalized(owner) = state[node] {
                if owner != start {
                    not_root.put(node);
                }
                stack.pop();
                continue;
            }

            if !discovered.put(node) {
                for &succ in &edges[node] {
                    match state[succ] {
                        NodeState::Finalized(owner) => {
                            if owner != start {
                                not_root.put(succ);
                            }
                        }
                        NodeState::NotVisited => {
                            if !discovered.contains(succ) {
                                stack.push(succ);
                            }
                        }
                    }
                }
            } else {
                stack.pop();
                let mut acc = BTreeSet::new();
                acc.insert(node);
                for &succ in &edges[node] {
                    if let Some(succ_reachable) = &reachable[succ] {
                        acc.extend(succ_reachable.iter().copied());
                    }
                }
                reachable[node] = Some(acc);
                state[node] = NodeState::Finalized(start);
            }
        }
    }

    order
        .into_iter()
        .filter(|id| !not_root.contains(*id))
        .map(|id| {
            let set = reachable[id].take().expect("root must be finalized");
            SortedSet::new(set.into_iter().collect::<Vec<_>>())
        })
        .collect()
}

/// Cyclic smallest-cut: used directly on the raw vertex graph when there are at most two
/// important nodes, skipping the SCC setup cost entirely.
///
/// Does not memoize reachable sets across starts -- doing so would be unsound in the presence of
/// cycles not yet collapsed by an SCC pass.
pub fn cyclic_smallest_cut(
    n: usize,
    edges: &[BTreeSet<usize>],
    roots: &[usize],
) -> Vec<SortedSet<usize>> {
    let mut global_visited = FixedBitSet::with_capacity(n);
    let mut not_root = FixedBitSet::with_capacity(n);
    let mut done_starts = HashSet::new();
    let mut order = Vec::new();
    let mut reachable_of_start: HashMap<usize, SortedSet<usize>> = HashMap::new();

    for &start in roots {
        if !done_starts.insert(start) {
            continue;
        }
        order.push(start);

        let mut local_visited = FixedBitSet::with_capacity(n);
        let mut acc = BTreeSet::new();
        let mut stack = vec![start];
        local_visited.put(start);
        while let Some(node) = stack.pop() {
            acc.insert(node);
            if global_visited.put(node) {
                not_root.put(node);
            }
            for &succ in &edges[node] {
                if !local_visited.put(succ) {
                    stack.push(succ);
                }
            }
        }
        reachable_of_start.insert(start, SortedSet::new(acc.into_iter().collect::<Vec<_>>()));
    }

    order
        .into_iter()
        .filter(|id| !not_root.contains(*id))
        .map(|id| {
            reachable_of_start
                .remove(&id)
                .expect("every surviving root has a computed reachable set")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges_of(pairs: &[(usize, usize)], n: usize) -> Vec<BTreeSet<usize>> {
        let mut edges = vec![BTreeSet::new(); n];
        for &(from, to) in pairs {
            edges[from].insert(to);
        }
        edges
    }

    #[test]
    fn acyclic_two_independent_roots() {
        // 0 -> 2, 1 -> 3; roots 0 and 1 are both independent.
        let edges = edges_of(&[(0, 2), (1, 3)], 4);
        let result = acyclic_smallest_cut(4, &edges, &[0, 1]);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].as_slice(), &[0, 2]);
        assert_eq!(result[1].as_slice(), &[1, 3]);
    }

    #[test]
    fn acyclic_root_reachable_from_another_is_dropped() {
        // 0 -> 1, so 1 is not a root even though it's selected.
        let edges = edges_of(&[(0, 1)], 2);
        let result = acyclic_smallest_cut(2, &edges, &[0, 1]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].as_slice(), &[0, 1]);
    }

    #[test]
    fn acyclic_duplicate_starts_yield_single_output() {
        let edges = edges_of(&[(0, 1)], 2);
        let result = acyclic_smallest_cut(2, &edges, &[0, 0, 0]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].as_slice(), &[0, 1]);
    }

    #[test]
    fn cyclic_two_independent_roots() {
        let edges = edges_of(&[(0, 2), (1, 3)], 4);
        let result = cyclic_smallest_cut(4, &edges, &[0, 1]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn cyclic_first_visited_wins_on_mutual_reachability() {
        // 0 <-> 1: mutually reachable. First-visited (0) wins as the sole root.
        let edges = edges_of(&[(0, 1), (1, 0)], 2);
        let result = cyclic_smallest_cut(2, &edges, &[0, 1]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].as_slice(), &[0, 1]);
    }
}
