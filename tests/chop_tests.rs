// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Black-box integration tests driving `chopper`'s public API only.

use chopper::{
    chop, default_isolate, ChopConfig, DomainAxiom, Exp, Field, Function, LocalVarDecl, Member,
    Method, Predicate, Program, ProgramInfo, Stmt, Type,
};
use std::collections::BTreeMap;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn method(name: &str, body: Option<Stmt>) -> Member {
    Member::Method(Method {
        name: name.to_string(),
        formal_args: vec![],
        formal_returns: vec![],
        pres: vec![],
        posts: vec![],
        body,
    })
}

fn field_access(name: &str) -> Exp {
    Exp::FieldAccess(Box::new(Exp::LocalVar("this".to_string(), Type::Ref)), name.to_string())
}

#[test]
fn chop_with_config_loaded_from_toml_respects_the_configured_bound() {
    init_logging();
    let program = Program {
        members: vec![
            Member::Method(Method {
                name: "A".to_string(),
                formal_args: vec![],
                formal_returns: vec![],
                pres: vec![],
                posts: vec![field_access("fa")],
                body: Some(Stmt::Seq(vec![])),
            }),
            Member::Field(Field { name: "fa".to_string(), typ: Type::Int }),
            Member::Method(Method {
                name: "B".to_string(),
                formal_args: vec![],
                formal_returns: vec![],
                pres: vec![],
                posts: vec![field_access("fb")],
                body: Some(Stmt::Seq(vec![])),
            }),
            Member::Field(Field { name: "fb".to_string(), typ: Type::Int }),
        ],
        info: ProgramInfo { metadata: BTreeMap::new() },
    };

    let config = ChopConfig::from_toml_str(
        r#"
        bound = 1

        [penalty_weights]
        field = 1
        threshold = 50
        "#,
    )
    .unwrap();

    let penalty = chopper::DefaultPenalty::from_weights(config.penalty_weights);
    let (parts, metrics) = chop(&program, &default_isolate, config.bound, &penalty).unwrap();

    assert_eq!(parts.len(), 1);
    assert_eq!(metrics.max_number_of_parts, 1);
}

#[test]
fn program_info_survives_the_round_trip_unchanged() {
    init_logging();
    let mut metadata = BTreeMap::new();
    metadata.insert("source_file".to_string(), "prog.vpr".to_string());

    let program = Program {
        members: vec![method("A", Some(Stmt::Seq(vec![])))],
        info: ProgramInfo { metadata },
    };

    let penalty = chopper::DefaultPenalty::new();
    let (parts, _metrics) = chop(&program, &default_isolate, None, &penalty).unwrap();

    assert_eq!(parts.len(), 1);
    assert_eq!(
        parts[0].info.metadata.get("source_file"),
        Some(&"prog.vpr".to_string())
    );
}

#[test]
fn a_function_with_no_dependencies_yields_a_single_untouched_sub_program() {
    init_logging();
    let program = Program {
        members: vec![Member::Function(Function {
            name: "f".to_string(),
            formal_args: vec![LocalVarDecl { name: "x".to_string(), typ: Type::Int }],
            ret_type: Type::Int,
            pres: vec![],
            posts: vec![],
            body: Some(Exp::IntLit(0)),
        })],
        info: ProgramInfo::default(),
    };

    let penalty = chopper::DefaultPenalty::new();
    let (parts, metrics) = chop(&program, &default_isolate, None, &penalty).unwrap();

    assert_eq!(parts.len(), 1);
    assert_eq!(metrics.max_number_of_parts, 1);
    assert_eq!(parts[0].members.len(), 1);
}

#[test]
fn predicate_signature_only_use_does_not_pull_in_the_body() {
    init_logging();
    let program = Program {
        members: vec![
            method(
                "A",
                Some(Stmt::Seq(vec![Stmt::Assert(Exp::PredicateAccess(
                    "P".to_string(),
                    vec![],
                ))])),
            ),
            Member::Predicate(Predicate {
                name: "P".to_string(),
                formal_args: vec![],
                body: Some(Exp::TrueLit),
            }),
        ],
        info: ProgramInfo::default(),
    };

    let penalty = chopper::DefaultPenalty::new();
    let (parts, _metrics) = chop(&program, &default_isolate, None, &penalty).unwrap();

    // P is important in its own right, so its full body must surface in exactly one part...
    let full_bodies = parts
        .iter()
        .flat_map(|part| part.members.iter())
        .filter(|m| matches!(m, Member::Predicate(p) if p.name == "P" && p.body.is_some()))
        .count();
    assert_eq!(full_bodies, 1);

    // ...but A's own sub-program only ever needed the signature, never the body.
    let a_part = parts
        .iter()
        .find(|part| part.members.iter().any(|m| matches!(m, Member::Method(meth) if meth.name == "A")))
        .expect("A must appear in some sub-program");
    let predicate_in_a_part = a_part.members.iter().find_map(|m| match m {
        Member::Predicate(p) if p.name == "P" => Some(p),
        _ => None,
    });
    if let Some(p) = predicate_in_a_part {
        assert!(p.body.is_none(), "A only referenced P's signature");
    }
}

#[test]
fn an_axiom_referencing_a_function_pulls_the_function_in_too() {
    init_logging();
    let program = Program {
        members: vec![
            Member::Function(Function {
                name: "f".to_string(),
                formal_args: vec![],
                ret_type: Type::Int,
                pres: vec![],
                posts: vec![],
                body: Some(Exp::IntLit(1)),
            }),
            Member::Domain(chopper::Domain {
                name: "D".to_string(),
                type_params: vec![],
                functions: vec![],
                axioms: vec![DomainAxiom {
                    id: "ax1".to_string(),
                    exp: Exp::FuncApp("f".to_string(), vec![]),
                }],
            }),
        ],
        info: ProgramInfo::default(),
    };

    let penalty = chopper::DefaultPenalty::new();
    let (parts, _metrics) = chop(&program, &default_isolate, None, &penalty).unwrap();

    assert_eq!(parts.len(), 1);
    assert!(parts[0].members.iter().any(|m| matches!(m, Member::Function(f) if f.name == "f")));
    assert!(parts[0]
        .members
        .iter()
        .any(|m| matches!(m, Member::Domain(d) if d.name == "D" && !d.axioms.is_empty())));
}

#[test]
fn chopping_an_already_single_part_output_with_bound_one_is_idempotent() {
    init_logging();
    let program = Program {
        members: vec![
            method(
                "A",
                Some(Stmt::Seq(vec![Stmt::MethodCall("B".to_string(), vec![], vec![])])),
            ),
            method("B", Some(Stmt::Seq(vec![]))),
        ],
        info: ProgramInfo::default(),
    };

    let penalty = chopper::DefaultPenalty::new();
    let (first_pass, _metrics) = chop(&program, &default_isolate, Some(1), &penalty).unwrap();
    assert_eq!(first_pass.len(), 1);

    let (second_pass, _metrics) =
        chop(&first_pass[0], &default_isolate, Some(1), &penalty).unwrap();
    assert_eq!(second_pass.len(), 1);
    assert_eq!(second_pass[0], first_pass[0]);
}
