// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns a selected set of vertices back into a concrete [`Program`]: the inverse of
//! [`crate::vertex::def_vertex`]/[`crate::vertex::use_vertex`] plus [`crate::edges::extract`].
//!
//! A method or predicate whose definition vertex is absent but whose use vertex is present is
//! reconstructed as a stub (signature only, `body: None`) -- that's what lets a sub-program call
//! into a method it doesn't need to re-verify.

use crate::ast::{Domain, DomainAxiom, DomainFunc, Member, Method, Predicate, Program};
use crate::errors::Error;
use crate::vertex::Vertex;
use std::collections::BTreeSet;

/// Rebuilds a [`Program`] containing exactly the members (or stubs) implied by `selected`.
///
/// `original` is consulted for full member bodies and for [`crate::ast::ProgramInfo`]; `selected`
/// must consist of vertices that actually occur in `original`'s dependency graph, or
/// [`Error::MissingReference`] is returned.
pub fn reconstruct(original: &Program, selected: &BTreeSet<Vertex>) -> Result<Program, Error> {
    validate(original, selected)?;

    let mut members = Vec::with_capacity(selected.len());
    for member in &original.members {
        match member {
            Member::Method(m) => {
                if selected.contains(&Vertex::Method(m.name.clone())) {
                    members.push(Member::Method(m.clone()));
                } else if selected.contains(&Vertex::MethodSpec(m.name.clone())) {
                    members.push(Member::Method(Method {
                        body: None,
                        ..m.clone()
                    }));
                }
            }
            Member::Function(f) => {
                if selected.contains(&Vertex::Function(f.name.clone())) {
                    members.push(Member::Function(f.clone()));
                }
            }
            Member::Predicate(p) => {
                if selected.contains(&Vertex::PredicateBody(p.name.clone())) {
                    members.push(Member::Predicate(p.clone()));
                } else if selected.contains(&Vertex::PredicateSig(p.name.clone())) {
                    members.push(Member::Predicate(Predicate {
                        body: None,
                        ..p.clone()
                    }));
                }
            }
            Member::Field(f) => {
                if selected.contains(&Vertex::Field(f.name.clone())) {
                    members.push(Member::Field(f.clone()));
                }
            }
            Member::Domain(d) => {
                if let Some(reconstructed) = reconstruct_domain(d, selected) {
                    members.push(Member::Domain(reconstructed));
                }
            }
            Member::Plugin(p) => {
                return Err(Error::UnsupportedMember(p.node_name.clone()));
            }
        }
    }

    Ok(Program {
        members,
        info: original.info.clone(),
    })
}

fn reconstruct_domain(d: &Domain, selected: &BTreeSet<Vertex>) -> Option<Domain> {
    let functions: Vec<DomainFunc> = d
        .functions
        .iter()
        .filter(|f| selected.contains(&Vertex::DomainFunction(f.name.clone())))
        .cloned()
        .collect();
    let axioms: Vec<DomainAxiom> = d
        .axioms
        .iter()
        .filter(|a| {
            selected.contains(&Vertex::DomainAxiom {
                axiom_id: a.id.clone(),
                domain: d.name.clone(),
            })
        })
        .cloned()
        .collect();
    let type_referenced = selected
        .iter()
        .any(|v| matches!(v, Vertex::DomainType(name, _) if name == &d.name));

    if functions.is_empty() && axioms.is_empty() && !type_referenced {
        None
    } else {
        Some(Domain {
            name: d.name.clone(),
            type_params: d.type_params.clone(),
            functions,
            axioms,
        })
    }
}

/// Checks that every vertex in `selected` actually names something declared in `original`,
/// catching a mismatched vertex set (e.g. one produced against a different program) before it
/// silently reconstructs an empty or partial member.
fn validate(original: &Program, selected: &BTreeSet<Vertex>) -> Result<(), Error> {
    let mut methods = BTreeSet::new();
    let mut functions = BTreeSet::new();
    let mut predicates = BTreeSet::new();
    let mut fields = BTreeSet::new();
    let mut domains = BTreeSet::new();
    let mut domain_functions = BTreeSet::new();
    let mut domain_axioms = BTreeSet::new();

    for member in &original.members {
        match member {
            Member::Method(m) => {
                methods.insert(m.name.clone());
            }
            Member::Function(f) => {
                functions.insert(f.name.clone());
            }
            Member::Predicate(p) => {
                predicates.insert(p.name.clone());
            }
            Member::Field(f) => {
                fields.insert(f.name.clone());
            }
            Member::Domain(d) => {
                domains.insert(d.name.clone());
                for f in &d.functions {
                    domain_functions.insert(f.name.clone());
                }
                for a in &d.axioms {
                    domain_axioms.insert((a.id.clone(), d.name.clone()));
                }
            }
            Member::Plugin(_) => {}
        }
    }

    for vertex in selected {
        let known = match vertex {
            Vertex::Method(n) | Vertex::MethodSpec(n) => methods.contains(n),
            Vertex::Function(n) => functions.contains(n),
            Vertex::PredicateSig(n) | Vertex::PredicateBody(n) => predicates.contains(n),
            Vertex::Field(n) => fields.contains(n),
            Vertex::DomainType(n, _) => domains.contains(n),
            Vertex::DomainFunction(n) => domain_functions.contains(n),
            Vertex::DomainAxiom { axiom_id, domain } => {
                domain_axioms.contains(&(axiom_id.clone(), domain.clone()))
            }
            Vertex::Always => true,
        };
        if !known {
            return Err(Error::MissingReference(format!(
                "{} ({})",
                describe(vertex),
                vertex.kind_name()
            )));
        }
    }

    Ok(())
}

fn describe(vertex: &Vertex) -> String {
    match vertex {
        Vertex::Method(n)
        | Vertex::MethodSpec(n)
        | Vertex::Function(n)
        | Vertex::PredicateSig(n)
        | Vertex::PredicateBody(n)
        | Vertex::Field(n)
        | Vertex::DomainFunction(n) => n.clone(),
        Vertex::DomainType(n, _) => n.clone(),
        Vertex::DomainAxiom { axiom_id, domain } => format!("{}::{}", domain, axiom_id),
        Vertex::Always => "<always>".to_string(),
    }
}
