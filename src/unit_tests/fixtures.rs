// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Small builders for hand-rolled test programs, kept deliberately minimal -- these are not a
//! parser, just enough AST construction to exercise the vertex/edge/cut/merge pipeline.

use crate::ast::*;

pub fn program(members: Vec<Member>) -> Program {
    Program {
        members,
        info: ProgramInfo::default(),
    }
}

pub fn field(name: &str) -> Member {
    Member::Field(Field {
        name: name.to_string(),
        typ: Type::Int,
    })
}

fn access(field_name: &str) -> Exp {
    Exp::FieldAccess(
        Box::new(Exp::LocalVar("this".to_string(), Type::Ref)),
        field_name.to_string(),
    )
}

/// A method with an empty body that reads `field_name` in its postcondition, plus a matching
/// field declaration the caller is expected to add separately.
pub fn method_using_field(name: &str, field_name: &str) -> Member {
    Member::Method(Method {
        name: name.to_string(),
        formal_args: vec![],
        formal_returns: vec![],
        pres: vec![],
        posts: vec![access(field_name)],
        body: Some(Stmt::Seq(vec![])),
    })
}

/// A method `name` that requires `acc(field_name)` and calls `target` in its body.
pub fn method_calling(name: &str, field_name: &str, target: &str) -> Member {
    Member::Method(Method {
        name: name.to_string(),
        formal_args: vec![],
        formal_returns: vec![],
        pres: vec![access(field_name)],
        posts: vec![],
        body: Some(Stmt::Seq(vec![Stmt::MethodCall(
            target.to_string(),
            vec![],
            vec![],
        )])),
    })
}

/// A method `name` that requires `acc(field_name)` but has a trivial body and makes no calls.
pub fn method_with_pre_field(name: &str, field_name: &str) -> Member {
    Member::Method(Method {
        name: name.to_string(),
        formal_args: vec![],
        formal_returns: vec![],
        pres: vec![access(field_name)],
        posts: vec![],
        body: Some(Stmt::Seq(vec![])),
    })
}

/// A method whose body folds `predicate_name`.
pub fn method_folding(name: &str, predicate_name: &str) -> Member {
    Member::Method(Method {
        name: name.to_string(),
        formal_args: vec![],
        formal_returns: vec![],
        pres: vec![],
        posts: vec![],
        body: Some(Stmt::Seq(vec![Stmt::Fold(predicate_name.to_string(), vec![])])),
    })
}

pub fn trivial_predicate(name: &str) -> Member {
    Member::Predicate(Predicate {
        name: name.to_string(),
        formal_args: vec![],
        body: Some(Exp::TrueLit),
    })
}

/// `function name() returns f() + 1` -- self-recursive.
pub fn self_recursive_function(name: &str) -> Member {
    Member::Function(Function {
        name: name.to_string(),
        formal_args: vec![],
        ret_type: Type::Int,
        pres: vec![],
        posts: vec![],
        body: Some(Exp::BinExp(
            Box::new(Exp::FuncApp(name.to_string(), vec![])),
            BinOp::Add,
            Box::new(Exp::IntLit(1)),
        )),
    })
}

/// `function name() requires callee() == 0`.
pub fn function_requiring(name: &str, callee: &str) -> Member {
    Member::Function(Function {
        name: name.to_string(),
        formal_args: vec![],
        ret_type: Type::Int,
        pres: vec![Exp::BinExp(
            Box::new(Exp::FuncApp(callee.to_string(), vec![])),
            BinOp::Eq,
            Box::new(Exp::IntLit(0)),
        )],
        posts: vec![],
        body: None,
    })
}

/// `function name() returns callee() + 1`.
pub fn function_calling(name: &str, callee: &str) -> Member {
    Member::Function(Function {
        name: name.to_string(),
        formal_args: vec![],
        ret_type: Type::Int,
        pres: vec![],
        posts: vec![],
        body: Some(Exp::BinExp(
            Box::new(Exp::FuncApp(callee.to_string(), vec![])),
            BinOp::Add,
            Box::new(Exp::IntLit(1)),
        )),
    })
}

/// A domain with a single axiom whose expression references nothing at all.
pub fn domain_with_empty_axiom(name: &str, axiom_id: &str) -> Member {
    Member::Domain(Domain {
        name: name.to_string(),
        type_params: vec![],
        functions: vec![],
        axioms: vec![DomainAxiom {
            id: axiom_id.to_string(),
            exp: Exp::TrueLit,
        }],
    })
}

/// A standalone method with no dependencies at all, for bound/merge tests.
pub fn isolated_method(name: &str) -> Member {
    Member::Method(Method {
        name: name.to_string(),
        formal_args: vec![],
        formal_returns: vec![],
        pres: vec![],
        posts: vec![],
        body: Some(Stmt::Seq(vec![])),
    })
}
