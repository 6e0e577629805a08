//! Shared helpers for building sentences/terms by hand in integration tests —
//! textual parsing is out of scope for this crate, so tests build trees
//! directly with these builders instead.

#![allow(dead_code)]

use folcore::ident::Identifier;
use folcore::sentence::Sentence;
use folcore::term::{Term, VariableDeclaration};

pub type Sym = &'static str;

pub fn id(name: Sym) -> Identifier<Sym> {
    Identifier::user(name)
}

pub fn decl(name: Sym) -> VariableDeclaration<Sym> {
    VariableDeclaration::new(id(name))
}

pub fn v(name: Sym) -> Term<Sym> {
    Term::variable(decl(name))
}

pub fn c(name: Sym) -> Term<Sym> {
    Term::constant(id(name))
}

pub fn f(name: Sym, args: Vec<Term<Sym>>) -> Term<Sym> {
    Term::function(id(name), args)
}

pub fn p(name: Sym, args: Vec<Term<Sym>>) -> Sentence<Sym> {
    Sentence::predicate(id(name), args)
}
