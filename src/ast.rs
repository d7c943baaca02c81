// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A minimal AST for the verification-language programs that [`crate::chop`] operates on.
//!
//! Parsing and type-checking such a program is out of scope for this crate -- callers are
//! expected to hand in an already-checked [`Program`]. The types here exist so the rest of the
//! crate (the vertex model, the edge extractor, the reconstructor) has something concrete to work
//! against.

use std::collections::BTreeMap;

/// A whole program: a flat list of top-level members plus whatever metadata the frontend wants
/// to carry through unchanged.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Program {
    /// Top-level declarations, in source order.
    pub members: Vec<Member>,
    /// Opaque metadata from the frontend (file name, source positions, etc). Reconstructed
    /// sub-programs carry this along unchanged.
    pub info: ProgramInfo,
}

/// Program-level metadata that has no bearing on dependency analysis but must be preserved by
/// the reconstructor.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProgramInfo {
    /// Arbitrary key/value metadata (e.g. `"source_file" -> "prog.vpr"`).
    pub metadata: BTreeMap<String, String>,
}

/// A top-level declaration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Member {
    Method(Method),
    Function(Function),
    Predicate(Predicate),
    Field(Field),
    Domain(Domain),
    /// A member belonging to a plugin/extension member kind. Always rejected during graph
    /// construction; see [`crate::errors::Error::UnsupportedMember`].
    Plugin(PluginMember),
}

impl Member {
    /// The member's declared name, used to key it for lookups during reconstruction.
    pub fn name(&self) -> &str {
        match self {
            Member::Method(m) => &m.name,
            Member::Function(f) => &f.name,
            Member::Predicate(p) => &p.name,
            Member::Field(f) => &f.name,
            Member::Domain(d) => &d.name,
            Member::Plugin(p) => &p.node_name,
        }
    }
}

/// A member kind this crate does not know how to decompose into vertices. Carried through only
/// so that [`crate::vertex::def_vertex`] can report a precise diagnostic before rejecting it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PluginMember {
    pub node_name: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocalVarDecl {
    pub name: String,
    pub typ: Type,
}

/// Types as they appear in formal argument/return declarations and in expressions.
///
/// `Domain` types are the only ones that participate in the dependency graph (as
/// [`crate::vertex::Vertex::DomainType`] vertices); type arguments are walked recursively so a
/// domain nested inside another domain's type argument still contributes a vertex.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Type {
    Bool,
    Int,
    Perm,
    Ref,
    TypeVar(String),
    Domain(String, Vec<Type>),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Method {
    pub name: String,
    pub formal_args: Vec<LocalVarDecl>,
    pub formal_returns: Vec<LocalVarDecl>,
    pub pres: Vec<Exp>,
    pub posts: Vec<Exp>,
    /// `None` for an abstract method (signature only).
    pub body: Option<Stmt>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Function {
    pub name: String,
    pub formal_args: Vec<LocalVarDecl>,
    pub ret_type: Type,
    pub pres: Vec<Exp>,
    pub posts: Vec<Exp>,
    pub body: Option<Exp>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Predicate {
    pub name: String,
    pub formal_args: Vec<LocalVarDecl>,
    /// `None` for an abstract predicate (signature only).
    pub body: Option<Exp>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub name: String,
    pub typ: Type,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Domain {
    pub name: String,
    pub type_params: Vec<String>,
    pub functions: Vec<DomainFunc>,
    pub axioms: Vec<DomainAxiom>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DomainFunc {
    pub name: String,
    pub formal_args: Vec<LocalVarDecl>,
    pub ret_type: Type,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DomainAxiom {
    pub id: String,
    pub exp: Exp,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BinOp {
    And,
    Or,
    Add,
    Sub,
    Eq,
    Lt,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnOp {
    Not,
    Neg,
}

/// Expressions. Only the forms relevant to dependency extraction are modeled; anything else a
/// real frontend would have (quantifiers, sequences, ...) desugars to these for our purposes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Exp {
    TrueLit,
    FalseLit,
    IntLit(i64),
    LocalVar(String, Type),
    /// `receiver.field`
    FieldAccess(Box<Exp>, String),
    /// `f(args)` -- a function application.
    FuncApp(String, Vec<Exp>),
    /// `d::f(args)` -- a domain function application, with the type arguments instantiating the
    /// owning domain.
    DomainFuncApp(String, Vec<Exp>, Vec<Type>),
    /// `acc(p(args), perm)` -- a predicate instance used in a specification; only requires the
    /// predicate's signature.
    PredicateAccess(String, Vec<Exp>),
    /// `unfolding p(args) in body` -- requires the predicate's full body.
    Unfolding(String, Vec<Exp>, Box<Exp>),
    BinExp(Box<Exp>, BinOp, Box<Exp>),
    UnExp(UnOp, Box<Exp>),
    CondExp(Box<Exp>, Box<Exp>, Box<Exp>),
    Old(Box<Exp>),
    Let(LocalVarDecl, Box<Exp>, Box<Exp>),
}

/// Statements that make up a method body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Stmt {
    Seq(Vec<Stmt>),
    /// `targets... := m(args)`
    MethodCall(String, Vec<Exp>, Vec<String>),
    /// `fold p(args)` -- requires the predicate's full body.
    Fold(String, Vec<Exp>),
    /// `unfold p(args)` -- requires the predicate's full body.
    Unfold(String, Vec<Exp>),
    Inhale(Exp),
    Exhale(Exp),
    Assert(Exp),
    Assume(Exp),
    FieldAssign(Box<Exp>, String, Exp),
    LocalVarAssign(String, Exp),
    If(Exp, Box<Stmt>, Box<Stmt>),
    While(Exp, Vec<Exp>, Box<Stmt>),
    /// `new(x)` with the fields it allocates.
    NewStmt(String, Vec<String>),
}
