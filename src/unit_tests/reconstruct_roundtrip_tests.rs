// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Higher-level reconstruction tests that go through [`crate::edges::extract`] to derive a
//! selection, rather than hand-picking a handful of vertices as the inline tests in
//! `reconstruct.rs` do.

use crate::ast::{Member, Program};
use crate::edges::extract;
use crate::errors::Error;
use crate::reconstruct::reconstruct;
use crate::unit_tests::fixtures::*;
use crate::vertex::Vertex;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

fn every_vertex(program: &Program) -> BTreeSet<Vertex> {
    let mut selected = BTreeSet::new();
    for (from, to) in extract(program).unwrap() {
        selected.insert(from);
        selected.insert(to);
    }
    selected
}

#[test]
fn selecting_every_vertex_reconstructs_the_original_program_exactly() {
    let program = program(vec![
        method_using_field("A", "fa"),
        field("fa"),
        method_calling("B", "fb", "C"),
        field("fb"),
        method_with_pre_field("C", "fc"),
        field("fc"),
        function_calling("f", "g"),
        function_calling("g", "f"),
        method_folding("D", "P"),
        trivial_predicate("P"),
        domain_with_empty_axiom("Dom", "ax1"),
    ]);

    let selected = every_vertex(&program);
    let result = reconstruct(&program, &selected).unwrap();

    assert_eq!(result, program);
}

#[test]
fn selecting_only_method_specs_reconstructs_every_method_as_a_stub() {
    let program = program(vec![
        method_using_field("A", "fa"),
        field("fa"),
        method_using_field("B", "fb"),
        field("fb"),
    ]);

    let mut selected = BTreeSet::new();
    selected.insert(Vertex::MethodSpec("A".to_string()));
    selected.insert(Vertex::MethodSpec("B".to_string()));

    let result = reconstruct(&program, &selected).unwrap();

    assert_eq!(result.members.len(), 2);
    for member in &result.members {
        match member {
            Member::Method(m) => assert!(m.body.is_none(), "{} should be a stub", m.name),
            other => panic!("expected a method, got {other:?}"),
        }
    }
}

#[test]
fn an_unreferenced_axiom_is_dropped_when_nothing_selects_its_domain() {
    let program = program(vec![domain_with_empty_axiom("Dom", "ax1")]);

    let result = reconstruct(&program, &BTreeSet::new()).unwrap();

    assert!(result.members.is_empty());
}

#[test]
fn selecting_the_domain_axiom_vertex_keeps_just_that_axiom() {
    let program = program(vec![domain_with_empty_axiom("Dom", "ax1")]);

    let mut selected = BTreeSet::new();
    selected.insert(Vertex::DomainAxiom {
        axiom_id: "ax1".to_string(),
        domain: "Dom".to_string(),
    });

    let result = reconstruct(&program, &selected).unwrap();

    assert_eq!(result.members.len(), 1);
    match &result.members[0] {
        Member::Domain(d) => {
            assert_eq!(d.axioms.len(), 1);
            assert!(d.functions.is_empty());
        }
        other => panic!("expected a domain, got {other:?}"),
    }
}

#[test]
fn a_vertex_naming_an_axiom_that_does_not_exist_is_rejected() {
    let program = program(vec![domain_with_empty_axiom("Dom", "ax1")]);

    let mut selected = BTreeSet::new();
    selected.insert(Vertex::DomainAxiom {
        axiom_id: "does-not-exist".to_string(),
        domain: "Dom".to_string(),
    });

    assert!(matches!(
        reconstruct(&program, &selected),
        Err(Error::MissingReference(_))
    ));
}
