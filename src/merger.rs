// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The greedy, priority-queue-driven merger: repeatedly combines the two sub-programs with the
//! lowest merge penalty until the requested upper bound is reached, with any merge of penalty
//! `<= 0` forced through regardless of the bound.

use crate::sorted_set::SortedSet;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

/// A sub-program represented as an ascending list of `(id, weight)` pairs. `weight` is whatever
/// a [`crate::penalty::Penalty::price`] assigned to that id -- the merger itself is agnostic to
/// what `id` means (a vertex id or an SCC component index).
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedSet {
    items: Vec<(usize, u64)>,
}

impl WeightedSet {
    /// Builds a `WeightedSet` from a sorted set of ids, pricing each with `price`.
    pub fn new(ids: &SortedSet<usize>, price: impl Fn(usize) -> u64) -> Self {
        let items = ids.iter().map(|&id| (id, price(id))).collect();
        Self { items }
    }

    pub fn ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().map(|&(id, _)| id)
    }

    pub fn into_ids(self) -> Vec<usize> {
        self.items.into_iter().map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Merges two ascending `(id, weight)` lists in one linear pass, returning the merged list plus
/// the exclusive/shared weight totals the merge penalty is computed from.
///
/// Shared ids take the left side's weight in the merged output -- the shared *sum* fed to the
/// penalty function is computed separately and doesn't affect which weight survives.
fn merge_weighted(left: &WeightedSet, right: &WeightedSet) -> (WeightedSet, u64, u64, u64) {
    let mut merged = Vec::with_capacity(left.items.len() + right.items.len());
    let mut left_exclusive = 0u64;
    let mut right_exclusive = 0u64;
    let mut shared = 0u64;

    let mut i = 0;
    let mut j = 0;
    while i < left.items.len() && j < right.items.len() {
        let (lid, lweight) = left.items[i];
        let (rid, rweight) = right.items[j];
        match lid.cmp(&rid) {
            Ordering::Less => {
                left_exclusive += lweight;
                merged.push((lid, lweight));
                i += 1;
            }
            Ordering::Greater => {
                right_exclusive += rweight;
                merged.push((rid, rweight));
                j += 1;
            }
            Ordering::Equal => {
                shared += lweight;
                merged.push((lid, lweight));
                i += 1;
                j += 1;
            }
        }
    }
    for &(lid, lweight) in &left.items[i..] {
        left_exclusive += lweight;
        merged.push((lid, lweight));
    }
    for &(rid, rweight) in &right.items[j..] {
        right_exclusive += rweight;
        merged.push((rid, rweight));
    }

    (WeightedSet { items: merged }, left_exclusive, right_exclusive, shared)
}

fn penalty_and_merge(
    left: &WeightedSet,
    right: &WeightedSet,
    merge_penalty: &impl Fn(u64, u64, u64) -> i64,
) -> (i64, WeightedSet) {
    let (merged, left_exclusive, right_exclusive, shared) = merge_weighted(left, right);
    (merge_penalty(left_exclusive, right_exclusive, shared), merged)
}

/// One candidate merge sitting in the priority queue.
struct HeapEntry {
    price: i64,
    /// Insertion order, used only to break ties -- the earliest-inserted candidate wins, which
    /// is what makes the merger's output deterministic for a fixed input order.
    seq: u64,
    left: usize,
    right: usize,
    merged: WeightedSet,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.price == other.price && self.seq == other.seq
    }
}
impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // `BinaryHeap` is a max-heap; reverse the natural order on `price` (and, for ties, on
        // `seq`) so the smallest price / earliest insertion pops first.
        other.price.cmp(&self.price).then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Greedily merges `initial` sub-programs down to at most `bound` (forced merges aside), always
/// picking the pair with lowest `merge_penalty` first.
///
/// `bound = None` means unbounded: only forced (penalty `<= 0`) merges occur.
pub fn merge(
    initial: Vec<WeightedSet>,
    bound: Option<usize>,
    merge_penalty: impl Fn(u64, u64, u64) -> i64,
) -> Vec<WeightedSet> {
    let bound = bound.unwrap_or(usize::MAX);

    // A `BTreeMap` (rather than a `HashMap`) keeps iteration order deterministic, which the
    // merger's output-order guarantee depends on.
    let mut sets: BTreeMap<usize, WeightedSet> = initial.into_iter().enumerate().collect();
    let mut counter = sets.len();
    let mut seq = 0u64;
    let mut heap: BinaryHeap<HeapEntry> = BinaryHeap::new();

    let keys: Vec<usize> = sets.keys().copied().collect();
    for (i, &a) in keys.iter().enumerate() {
        for &b in &keys[i + 1..] {
            let (price, merged) = penalty_and_merge(&sets[&a], &sets[&b], &merge_penalty);
            heap.push(HeapEntry {
                price,
                seq,
                left: a,
                right: b,
                merged,
            });
            seq += 1;
        }
    }

    loop {
        // Drop entries whose key pair is no longer alive (one or both sides already merged
        // away) without bulk-cleaning the queue -- cheaper than tombstoning given it can hold
        // O(k^2) entries.
        while let Some(top) = heap.peek() {
            if sets.contains_key(&top.left) && sets.contains_key(&top.right) {
                break;
            }
            heap.pop();
        }

        let should_continue = match heap.peek() {
            Some(top) => top.price <= 0 || sets.len() > bound,
            None => false,
        };
        if !should_continue {
            break;
        }

        let entry = heap.pop().expect("peek above guarantees an entry");
        log::trace!(
            "merging sets {} and {} (penalty {}, {} sets remaining)",
            entry.left,
            entry.right,
            entry.price,
            sets.len()
        );
        if entry.price <= 0 && sets.len() <= bound {
            log::warn!(
                "forcing merge of sets {} and {} with non-positive penalty {} past the requested bound",
                entry.left,
                entry.right,
                entry.price
            );
        }

        sets.remove(&entry.left);
        sets.remove(&entry.right);
        let new_key = counter;
        counter += 1;
        sets.insert(new_key, entry.merged);

        for (&k, rep) in sets.iter() {
            if k == new_key {
                continue;
            }
            let (price, merged) = penalty_and_merge(rep, &sets[&new_key], &merge_penalty);
            heap.push(HeapEntry {
                price,
                seq,
                left: k,
                right: new_key,
                merged,
            });
            seq += 1;
        }
    }

    sets.into_values().collect()
}
