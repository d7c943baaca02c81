// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! `chopper` partitions a whole verification-language program into a set of smaller,
//! independently verifiable sub-programs.
//!
//! Given a program and a predicate selecting its "important" members (the ones carrying a proof
//! obligation -- typically every method, function and predicate), [`chop`] returns a list of
//! sub-programs such that:
//!
//! * every important member appears in exactly one sub-program, together with the full
//!   transitive closure of everything it depends on;
//! * the number of sub-programs never exceeds a caller-supplied bound, except where honoring the
//!   bound would require merging two sub-programs that share nothing (a "free" merge always
//!   happens regardless of the bound).
//!
//! ```
//! use chopper::{chop, DefaultPenalty, Program};
//!
//! let program = Program::default();
//! let penalty = DefaultPenalty::new();
//! let (parts, metrics) = chop(&program, &chopper::default_isolate, None, &penalty).unwrap();
//! assert!(parts.is_empty());
//! assert_eq!(metrics.max_number_of_parts, 0);
//! ```

pub mod ast;
pub mod config;
pub mod edges;
pub mod errors;
pub mod graph_index;
pub mod merger;
pub mod orchestrator;
pub mod penalty;
pub mod reconstruct;
pub mod scc;
pub mod smallest_cut;
pub mod sorted_set;
pub mod vertex;

#[cfg(test)]
mod unit_tests;

pub use ast::{
    BinOp, Domain, DomainAxiom, DomainFunc, Exp, Field, Function, LocalVarDecl, Member, Method,
    PluginMember, Predicate, Program, ProgramInfo, Stmt, Type, UnOp,
};
pub use config::ChopConfig;
pub use errors::Error;
pub use graph_index::{default_isolate, GraphIndex};
pub use merger::WeightedSet;
pub use orchestrator::{chop, chop_with_default_weights, Metrics};
pub use penalty::{
    ContravariantLift, ContravariantSumLift, DefaultPenalty, Penalty, PenaltyWeights,
    StrictPenalty,
};
pub use scc::{Component, Sccs};
pub use sorted_set::SortedSet;
pub use vertex::Vertex;
