// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The penalty model: how expensive a single vertex is, and how expensive it is to merge two
//! sub-programs together.
//!
//! The merger (see [`crate::merger`]) is generic over `T` so the same greedy-merge code path
//! works whether `T` is a raw [`crate::vertex::Vertex`] (the ≤2-important-node regime) or an SCC
//! [`crate::scc::Component`] (the general regime). [`ContravariantLift`] and
//! [`ContravariantSumLift`] are what let a single [`Penalty<Vertex>`] implementation serve both.

use crate::vertex::Vertex;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Scores individual items and pairs of merged exclusive/shared weight.
pub trait Penalty<T> {
    /// The non-negative weight of a single item.
    fn price(&self, item: &T) -> u64;

    /// The scalar cost of merging two sub-programs with the given exclusive and shared weight
    /// totals. A result `<= 0` forces the merge regardless of the size bound.
    fn merge_penalty(&self, left_exclusive: u64, right_exclusive: u64, shared: u64) -> i64;
}

/// Per-kind vertex weights plus the merge threshold, in a form a host can load from TOML instead
/// of hardcoding.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct PenaltyWeights {
    pub method: u64,
    pub method_spec: u64,
    pub function: u64,
    pub predicate_body: u64,
    pub predicate_sig: u64,
    pub field: u64,
    pub domain_type: u64,
    pub domain_function: u64,
    pub domain_axiom: u64,
    pub always: u64,
    /// The divisor in the default `mergePenalty` formula: `(l + r) * floor((threshold + shared)
    /// / threshold)`.
    pub threshold: u64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        PenaltyWeights {
            method: 0,
            method_spec: 0,
            function: 20,
            predicate_body: 10,
            predicate_sig: 2,
            field: 1,
            domain_type: 1,
            domain_function: 1,
            domain_axiom: 5,
            always: 0,
            threshold: 50,
        }
    }
}

impl PenaltyWeights {
    fn weight_of(&self, vertex: &Vertex) -> u64 {
        match vertex {
            Vertex::Method(_) => self.method,
            Vertex::MethodSpec(_) => self.method_spec,
            Vertex::Function(_) => self.function,
            Vertex::PredicateBody(_) => self.predicate_body,
            Vertex::PredicateSig(_) => self.predicate_sig,
            Vertex::Field(_) => self.field,
            Vertex::DomainType(..) => self.domain_type,
            Vertex::DomainFunction(_) => self.domain_function,
            Vertex::DomainAxiom { .. } => self.domain_axiom,
            Vertex::Always => self.always,
        }
    }
}

/// The default penalty function: `price` is a fixed per-kind table, and
/// `mergePenalty(l, r, s) = (l + r) * floor((threshold + s) / threshold)`.
#[derive(Clone, Debug, Default)]
pub struct DefaultPenalty {
    weights: PenaltyWeights,
}

impl DefaultPenalty {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_weights(weights: PenaltyWeights) -> Self {
        Self { weights }
    }
}

impl Penalty<Vertex> for DefaultPenalty {
    fn price(&self, item: &Vertex) -> u64 {
        self.weights.weight_of(item)
    }

    fn merge_penalty(&self, left_exclusive: u64, right_exclusive: u64, shared: u64) -> i64 {
        let threshold = self.weights.threshold.max(1);
        // `(threshold + shared) / threshold` truncates towards zero, i.e. floors for these
        // non-negative operands.
        let multiplier = (threshold + shared) / threshold;
        ((left_exclusive + right_exclusive) * multiplier) as i64
    }
}

/// Wraps another `Penalty` so that a merge is never free: `mergePenalty` is clamped to be at
/// least 1, forbidding zero-cost (and hence unforced) merges.
#[derive(Clone, Debug)]
pub struct StrictPenalty<P> {
    inner: P,
}

impl<P> StrictPenalty<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<T, P: Penalty<T>> Penalty<T> for StrictPenalty<P> {
    fn price(&self, item: &T) -> u64 {
        self.inner.price(item)
    }

    fn merge_penalty(&self, left_exclusive: u64, right_exclusive: u64, shared: u64) -> i64 {
        self.inner
            .merge_penalty(left_exclusive, right_exclusive, shared)
            .max(1)
    }
}

impl<T, P: Penalty<T> + ?Sized> Penalty<T> for &P {
    fn price(&self, item: &T) -> u64 {
        (**self).price(item)
    }

    fn merge_penalty(&self, left_exclusive: u64, right_exclusive: u64, shared: u64) -> i64 {
        (**self).merge_penalty(left_exclusive, right_exclusive, shared)
    }
}

/// Lifts a `Penalty<T>` to a `Penalty<S>` by mapping each `S` to a single `T` before pricing it.
pub struct ContravariantLift<S, T, F, P> {
    f: F,
    inner: P,
    _marker: PhantomData<fn(&S) -> T>,
}

impl<S, T, F, P> ContravariantLift<S, T, F, P>
where
    F: Fn(&S) -> T,
    P: Penalty<T>,
{
    pub fn new(f: F, inner: P) -> Self {
        Self {
            f,
            inner,
            _marker: PhantomData,
        }
    }
}

impl<S, T, F, P> Penalty<S> for ContravariantLift<S, T, F, P>
where
    F: Fn(&S) -> T,
    P: Penalty<T>,
{
    fn price(&self, item: &S) -> u64 {
        self.inner.price(&(self.f)(item))
    }

    fn merge_penalty(&self, left_exclusive: u64, right_exclusive: u64, shared: u64) -> i64 {
        self.inner
            .merge_penalty(left_exclusive, right_exclusive, shared)
    }
}

/// Lifts a `Penalty<T>` to a `Penalty<S>` by mapping each `S` to a collection of `T`s and summing
/// their prices. This is what lets the merger price an SCC [`crate::scc::Component`] as the sum
/// of the prices of the vertices it collapsed.
pub struct ContravariantSumLift<S, T, F, P> {
    f: F,
    inner: P,
    _marker: PhantomData<fn(&S) -> Vec<T>>,
}

impl<S, T, F, P> ContravariantSumLift<S, T, F, P>
where
    F: Fn(&S) -> Vec<T>,
    P: Penalty<T>,
{
    pub fn new(f: F, inner: P) -> Self {
        Self {
            f,
            inner,
            _marker: PhantomData,
        }
    }
}

impl<S, T, F, P> Penalty<S> for ContravariantSumLift<S, T, F, P>
where
    F: Fn(&S) -> Vec<T>,
    P: Penalty<T>,
{
    fn price(&self, item: &S) -> u64 {
        (self.f)(item).iter().map(|t| self.inner.price(t)).sum()
    }

    fn merge_penalty(&self, left_exclusive: u64, right_exclusive: u64, shared: u64) -> i64 {
        self.inner
            .merge_penalty(left_exclusive, right_exclusive, shared)
    }
}
