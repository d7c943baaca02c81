// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Walks each member's AST subtree and emits the directed dependency edges that drive the rest
//! of this crate: `u -> v` means "if `u` is included in a sub-program, `v` must be included too".

use crate::ast::{DomainAxiom, DomainFunc, Exp, LocalVarDecl, Member, Program, Stmt, Type};
use crate::errors::Error;
use crate::vertex::{def_vertex, use_vertex, Vertex};

/// One dependency edge, `from -> to`.
pub type Edge = (Vertex, Vertex);

/// Extracts every dependency edge in `program`, across every member.
///
/// Returns `Err` as soon as a [`crate::ast::Member::Plugin`] is encountered -- plugin/extension
/// member kinds are rejected rather than silently ignored, since guessing at their dependencies
/// would risk an unsound (incomplete) graph.
pub fn extract(program: &Program) -> Result<Vec<Edge>, Error> {
    let mut edges = Vec::new();
    for member in &program.members {
        extract_member(member, &mut edges)?;
    }
    Ok(edges)
}

fn extract_member(member: &Member, edges: &mut Vec<Edge>) -> Result<(), Error> {
    let def = def_vertex(member)?;
    let use_v = use_vertex(member)?;

    // Always edges: every member contributes both its vertices to the `Always` sentinel's
    // reachable set, which is what lets an empty-reference domain axiom be force-included.
    edges.push((def.clone(), Vertex::Always));
    edges.push((use_v.clone(), Vertex::Always));

    match member {
        Member::Method(m) => {
            let mut body_refs = Vec::new();
            for decl in m.formal_args.iter().chain(m.formal_returns.iter()) {
                usages_local_var_decl(decl, &mut body_refs);
            }
            for pre in &m.pres {
                usages_exp(pre, &mut body_refs);
            }
            for post in &m.posts {
                usages_exp(post, &mut body_refs);
            }

            // The use vertex only pulls in what a caller can observe: the specification and the
            // formal argument/return declarations, never the body.
            for v in &body_refs {
                edges.push((use_v.clone(), v.clone()));
            }

            if let Some(body) = &m.body {
                usages_stmt(body, &mut body_refs);
            }
            for v in body_refs {
                edges.push((def.clone(), v));
            }
        }
        Member::Function(f) => {
            let mut refs = Vec::new();
            for decl in &f.formal_args {
                usages_local_var_decl(decl, &mut refs);
            }
            usages_type(&f.ret_type, &mut refs);
            for pre in &f.pres {
                usages_exp(pre, &mut refs);
            }
            for post in &f.posts {
                usages_exp(post, &mut refs);
            }
            if let Some(body) = &f.body {
                usages_exp(body, &mut refs);
            }
            for v in refs {
                edges.push((def.clone(), v));
            }
        }
        Member::Predicate(p) => {
            // Including the definition pulls in the signature.
            edges.push((def.clone(), use_v.clone()));

            let mut arg_refs = Vec::new();
            for decl in &p.formal_args {
                usages_local_var_decl(decl, &mut arg_refs);
            }
            for v in arg_refs {
                edges.push((use_v.clone(), v));
            }

            if let Some(body) = &p.body {
                let mut body_refs = Vec::new();
                usages_exp(body, &mut body_refs);
                for v in body_refs {
                    edges.push((def.clone(), v));
                }
            }
        }
        Member::Field(_) => {
            // No outgoing edges beyond Always.
        }
        Member::Domain(d) => {
            extract_domain(d, edges);
        }
        // `def_vertex`/`use_vertex` above already return early for plugin members.
        Member::Plugin(_) => unreachable!(),
    }

    Ok(())
}

fn extract_domain(d: &crate::ast::Domain, edges: &mut Vec<Edge>) {
    for func in &d.functions {
        let func_vertex = Vertex::DomainFunction(func.name.clone());
        edges.push((func_vertex.clone(), Vertex::Always));
        let mut refs = Vec::new();
        domain_func_usages(func, &mut refs);
        for v in refs {
            edges.push((func_vertex.clone(), v));
        }
    }

    for axiom in &d.axioms {
        let axiom_vertex = Vertex::DomainAxiom {
            axiom_id: axiom.id.clone(),
            domain: d.name.clone(),
        };
        edges.push((axiom_vertex.clone(), Vertex::Always));

        let refs = axiom_usages(axiom);
        if refs.is_empty() {
            edges.push((Vertex::Always, axiom_vertex));
        } else {
            for v in refs {
                edges.push((v.clone(), axiom_vertex.clone()));
                edges.push((axiom_vertex.clone(), v));
            }
        }
    }
}

fn domain_func_usages(func: &DomainFunc, out: &mut Vec<Vertex>) {
    for decl in &func.formal_args {
        usages_local_var_decl(decl, out);
    }
    usages_type(&func.ret_type, out);
}

fn axiom_usages(axiom: &DomainAxiom) -> Vec<Vertex> {
    let mut refs = Vec::new();
    usages_exp(&axiom.exp, &mut refs);
    refs
}

fn usages_local_var_decl(decl: &LocalVarDecl, out: &mut Vec<Vertex>) {
    usages_type(&decl.typ, out);
}

/// Descends into a type node, emitting a [`Vertex::DomainType`] for every domain type
/// encountered, including type arguments of generic domains, recursively.
fn usages_type(typ: &Type, out: &mut Vec<Vertex>) {
    if let Type::Domain(name, args) = typ {
        out.push(Vertex::DomainType(name.clone(), args.clone()));
        for arg in args {
            usages_type(arg, out);
        }
    }
}

fn usages_stmt(stmt: &Stmt, out: &mut Vec<Vertex>) {
    match stmt {
        Stmt::Seq(stmts) => {
            for s in stmts {
                usages_stmt(s, out);
            }
        }
        Stmt::MethodCall(name, args, _targets) => {
            out.push(Vertex::MethodSpec(name.clone()));
            for arg in args {
                usages_exp(arg, out);
            }
        }
        Stmt::Fold(name, args) | Stmt::Unfold(name, args) => {
            out.push(Vertex::PredicateBody(name.clone()));
            for arg in args {
                usages_exp(arg, out);
            }
        }
        Stmt::Inhale(e) | Stmt::Exhale(e) | Stmt::Assert(e) | Stmt::Assume(e) => {
            usages_exp(e, out);
        }
        Stmt::FieldAssign(receiver, field, rhs) => {
            usages_exp(receiver, out);
            out.push(Vertex::Field(field.clone()));
            usages_exp(rhs, out);
        }
        Stmt::LocalVarAssign(_name, rhs) => {
            usages_exp(rhs, out);
        }
        Stmt::If(cond, then_branch, else_branch) => {
            usages_exp(cond, out);
            usages_stmt(then_branch, out);
            usages_stmt(else_branch, out);
        }
        Stmt::While(cond, invariants, body) => {
            usages_exp(cond, out);
            for inv in invariants {
                usages_exp(inv, out);
            }
            usages_stmt(body, out);
        }
        Stmt::NewStmt(_var, fields) => {
            for field in fields {
                out.push(Vertex::Field(field.clone()));
            }
        }
    }
}

fn usages_exp(exp: &Exp, out: &mut Vec<Vertex>) {
    match exp {
        Exp::TrueLit | Exp::FalseLit | Exp::IntLit(_) => {}
        Exp::LocalVar(_name, typ) => usages_type(typ, out),
        Exp::FieldAccess(receiver, field) => {
            usages_exp(receiver, out);
            out.push(Vertex::Field(field.clone()));
        }
        Exp::FuncApp(name, args) => {
            out.push(Vertex::Function(name.clone()));
            for arg in args {
                usages_exp(arg, out);
            }
        }
        Exp::DomainFuncApp(name, args, type_args) => {
            out.push(Vertex::DomainFunction(name.clone()));
            for arg in args {
                usages_exp(arg, out);
            }
            for typ in type_args {
                usages_type(typ, out);
            }
        }
        Exp::PredicateAccess(name, args) => {
            out.push(Vertex::PredicateSig(name.clone()));
            for arg in args {
                usages_exp(arg, out);
            }
        }
        Exp::Unfolding(name, args, body) => {
            out.push(Vertex::PredicateBody(name.clone()));
            for arg in args {
                usages_exp(arg, out);
            }
            usages_exp(body, out);
        }
        Exp::BinExp(lhs, _op, rhs) => {
            usages_exp(lhs, out);
            usages_exp(rhs, out);
        }
        Exp::UnExp(_op, e) => usages_exp(e, out),
        Exp::CondExp(cond, then_exp, else_exp) => {
            usages_exp(cond, out);
            usages_exp(then_exp, out);
            usages_exp(else_exp, out);
        }
        Exp::Old(e) => usages_exp(e, out),
        Exp::Let(decl, bound, body) => {
            usages_local_var_decl(decl, out);
            usages_exp(bound, out);
            usages_exp(body, out);
        }
    }
}
