//! Unification and most general unifiers.
//!
//! A [`Substitution`] wraps an `FxHashMap<VariableDeclaration<S>, Term<S>>`
//! and enforces the occurs-check and one-binding-per-variable invariant in
//! `try_add`. An `FxHashMap` is used rather than a `BTreeMap` since
//! identifiers only need to guarantee `Hash + Eq`, not `Ord`.

mod mgu;

pub use mgu::{unify_literals, unify_terms};

use rustc_hash::FxHashMap;

use crate::error::FolError;
use crate::term::{Symbol, Term, VariableDeclaration};

/// A set of variable-to-term bindings built up during unification.
#[derive(Clone, Debug, Default)]
pub struct Substitution<S: Symbol> {
    table: FxHashMap<VariableDeclaration<S>, Term<S>>,
}

impl<S: Symbol> Substitution<S> {
    pub fn new() -> Self {
        Self { table: FxHashMap::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn get(&self, decl: &VariableDeclaration<S>) -> Option<&Term<S>> {
        self.table.get(decl)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&VariableDeclaration<S>, &Term<S>)> {
        self.table.iter()
    }

    /// Follows variable bindings to a fixed point, substituting bound
    /// variables with their mapped terms (including inside function
    /// arguments) until the result contains no further bound variables.
    pub fn resolve(&self, term: &Term<S>) -> Term<S> {
        match term {
            Term::Constant(_) => term.clone(),
            Term::VariableReference(decl) => match self.table.get(decl) {
                Some(bound) => self.resolve(bound),
                None => term.clone(),
            },
            Term::Function(id, args) => {
                let resolved: Vec<Term<S>> = args.iter().map(|a| self.resolve(a)).collect();
                Term::function(id.clone(), resolved)
            }
        }
    }

    fn occurs_in(&self, decl: &VariableDeclaration<S>, term: &Term<S>) -> bool {
        match term {
            Term::Constant(_) => false,
            Term::VariableReference(other) => {
                if other == decl {
                    true
                } else if let Some(bound) = self.table.get(other) {
                    self.occurs_in(decl, bound)
                } else {
                    false
                }
            }
            Term::Function(_, args) => args.iter().any(|a| self.occurs_in(decl, a)),
        }
    }

    /// Binds `decl` to `term`, rejecting the binding if `decl` occurs within
    /// `term` once existing bindings are resolved.
    pub fn try_add(&mut self, decl: VariableDeclaration<S>, term: Term<S>) -> Result<(), FolError> {
        let resolved = self.resolve(&term);
        if let Term::VariableReference(ref other) = resolved {
            if *other == decl {
                return Ok(());
            }
        }
        if self.occurs_in(&decl, &resolved) {
            return Err(FolError::OccursCheckFailed);
        }
        self.table.insert(decl, resolved);
        Ok(())
    }
}
