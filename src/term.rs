//! Terms and variable declarations.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use crate::ident::Identifier;

/// Bound required of any caller-supplied label used as a predicate, function,
/// constant or variable identifier.
pub trait Symbol: Clone + Eq + Hash + Debug {}
impl<T: Clone + Eq + Hash + Debug> Symbol for T {}

/// A variable declared by an enclosing quantifier. Distinct from a
/// [`Term::Variable`] reference to it, though both carry the same identifier;
/// declarations only ever appear as the binder of a quantifier node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VariableDeclaration<S: Symbol>(pub Identifier<S>);

impl<S: Symbol> VariableDeclaration<S> {
    pub fn new(id: Identifier<S>) -> Self {
        Self(id)
    }

    pub fn identifier(&self) -> &Identifier<S> {
        &self.0
    }
}

/// A term: a constant, a reference to a declared variable, or an n-ary function
/// application over subterms.
///
/// Terms are immutable after construction and reference-counted internally
/// (`Arc`) so that the fold framework in [`crate::fold`] can share unchanged
/// subtrees rather than reallocate them, and so clauses built from terms can
/// cross the thread boundary into the clause store's lock.
#[derive(Clone, Debug)]
pub enum Term<S: Symbol> {
    Constant(Identifier<S>),
    VariableReference(VariableDeclaration<S>),
    Function(Identifier<S>, Arc<[Term<S>]>),
}

impl<S: Symbol> Term<S> {
    pub fn constant(id: Identifier<S>) -> Self {
        Term::Constant(id)
    }

    pub fn variable(decl: VariableDeclaration<S>) -> Self {
        Term::VariableReference(decl)
    }

    pub fn function(id: Identifier<S>, args: Vec<Term<S>>) -> Self {
        Term::Function(id, args.into())
    }

    /// A nullary function application, used as the constant Skolem case.
    pub fn nullary_function(id: Identifier<S>) -> Self {
        Term::Function(id, Arc::from(Vec::new()))
    }

    pub fn args(&self) -> &[Term<S>] {
        match self {
            Term::Function(_, args) => args,
            _ => &[],
        }
    }
}

impl<S: Symbol> PartialEq for Term<S> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Term::Constant(a), Term::Constant(b)) => a == b,
            (Term::VariableReference(a), Term::VariableReference(b)) => a == b,
            (Term::Function(fa, aa), Term::Function(fb, ab)) => fa == fb && aa.as_ref() == ab.as_ref(),
            _ => false,
        }
    }
}
impl<S: Symbol> Eq for Term<S> {}

impl<S: Symbol> Hash for Term<S> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Term::Constant(id) => {
                0u8.hash(state);
                id.hash(state);
            }
            Term::VariableReference(decl) => {
                1u8.hash(state);
                decl.hash(state);
            }
            Term::Function(id, args) => {
                2u8.hash(state);
                id.hash(state);
                args.hash(state);
            }
        }
    }
}
