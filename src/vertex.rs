// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The closed set of dependency-graph vertex kinds, and the rules by which a member decomposes
//! into a *definition* vertex and a *use* vertex.
//!
//! See the crate-level docs for why this split exists: a caller of a method or a predicate only
//! ever needs the *use* vertex (the specification), while verifying the body of a member needs
//! the *definition* vertex of everything it touches.

use crate::ast::{Member, Type};
use crate::errors::Error;

/// A single node of the dependency graph.
///
/// `Always` is a sentinel: every other vertex has an edge to it, so anything reachable *from*
/// `Always` is forced into every sub-program that contains at least one root (see
/// [`crate::edges::extract`] and the axiom-with-no-references rule).
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Vertex {
    Method(String),
    MethodSpec(String),
    Function(String),
    PredicateSig(String),
    PredicateBody(String),
    Field(String),
    DomainType(String, Vec<Type>),
    DomainFunction(String),
    DomainAxiom { axiom_id: String, domain: String },
    Always,
}

impl Vertex {
    /// A short tag for diagnostics and logging; avoids formatting the (possibly large) domain
    /// type-argument list just to say what kind of vertex this is.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Vertex::Method(_) => "Method",
            Vertex::MethodSpec(_) => "MethodSpec",
            Vertex::Function(_) => "Function",
            Vertex::PredicateSig(_) => "PredicateSig",
            Vertex::PredicateBody(_) => "PredicateBody",
            Vertex::Field(_) => "Field",
            Vertex::DomainType(..) => "DomainType",
            Vertex::DomainFunction(_) => "DomainFunction",
            Vertex::DomainAxiom { .. } => "DomainAxiom",
            Vertex::Always => "Always",
        }
    }
}

/// Returns the *definition* vertex of `member`: the vertex that carries a full body, if the
/// member has one.
///
/// * A method with a body decomposes into a `Method` definition vertex.
/// * A method without a body has no body to define; its definition vertex is its `MethodSpec`.
/// * A predicate with a body decomposes into a `PredicateBody` definition vertex.
/// * A predicate without a body: its definition vertex is its `PredicateSig`.
/// * Functions, fields and domain members have a single vertex that serves as both def and use;
///   see [`use_vertex`].
pub fn def_vertex(member: &Member) -> Result<Vertex, Error> {
    Ok(match member {
        Member::Method(m) => {
            if m.body.is_some() {
                Vertex::Method(m.name.clone())
            } else {
                Vertex::MethodSpec(m.name.clone())
            }
        }
        Member::Function(f) => Vertex::Function(f.name.clone()),
        Member::Predicate(p) => {
            if p.body.is_some() {
                Vertex::PredicateBody(p.name.clone())
            } else {
                Vertex::PredicateSig(p.name.clone())
            }
        }
        Member::Field(f) => Vertex::Field(f.name.clone()),
        // Domains decompose into several vertices (one per function/axiom/type instantiation);
        // there is no single definition vertex for the declaration as a whole. Callers that need
        // per-domain-member vertices should go through `edges::extract` instead.
        Member::Domain(d) => Vertex::DomainType(d.name.clone(), Vec::new()),
        Member::Plugin(p) => {
            return Err(Error::UnsupportedMember(p.node_name.clone()));
        }
    })
}

/// Returns the *use* vertex of `member`: the vertex a caller depends on when it only needs the
/// specification, not the implementation.
///
/// For methods and predicates this is distinct from the definition vertex whenever a body is
/// present; otherwise def and use coincide.
pub fn use_vertex(member: &Member) -> Result<Vertex, Error> {
    Ok(match member {
        Member::Method(m) => Vertex::MethodSpec(m.name.clone()),
        Member::Function(f) => Vertex::Function(f.name.clone()),
        Member::Predicate(p) => Vertex::PredicateSig(p.name.clone()),
        Member::Field(f) => Vertex::Field(f.name.clone()),
        Member::Domain(d) => Vertex::DomainType(d.name.clone(), Vec::new()),
        Member::Plugin(p) => {
            return Err(Error::UnsupportedMember(p.node_name.clone()));
        }
    })
}
