//! Sentences and literals.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::ident::Identifier;
use crate::term::{Symbol, Term, VariableDeclaration};

/// A first-order sentence. Conjunction, Disjunction and Equivalence are
/// commutative at the node level: `equals(A & B, B & A)` holds.
#[derive(Clone, Debug)]
pub enum Sentence<S: Symbol> {
    Predicate(Identifier<S>, Arc<[Term<S>]>),
    Negation(Arc<Sentence<S>>),
    Conjunction(Arc<Sentence<S>>, Arc<Sentence<S>>),
    Disjunction(Arc<Sentence<S>>, Arc<Sentence<S>>),
    Implication(Arc<Sentence<S>>, Arc<Sentence<S>>),
    Equivalence(Arc<Sentence<S>>, Arc<Sentence<S>>),
    UniversalQuantification(VariableDeclaration<S>, Arc<Sentence<S>>),
    ExistentialQuantification(VariableDeclaration<S>, Arc<Sentence<S>>),
}

impl<S: Symbol> Sentence<S> {
    pub fn predicate(id: Identifier<S>, args: Vec<Term<S>>) -> Self {
        Sentence::Predicate(id, args.into())
    }
    pub fn not(s: Sentence<S>) -> Self {
        Sentence::Negation(Arc::new(s))
    }
    pub fn and(l: Sentence<S>, r: Sentence<S>) -> Self {
        Sentence::Conjunction(Arc::new(l), Arc::new(r))
    }
    pub fn or(l: Sentence<S>, r: Sentence<S>) -> Self {
        Sentence::Disjunction(Arc::new(l), Arc::new(r))
    }
    pub fn implies(antecedent: Sentence<S>, consequent: Sentence<S>) -> Self {
        Sentence::Implication(Arc::new(antecedent), Arc::new(consequent))
    }
    pub fn iff(l: Sentence<S>, r: Sentence<S>) -> Self {
        Sentence::Equivalence(Arc::new(l), Arc::new(r))
    }
    pub fn forall(decl: VariableDeclaration<S>, body: Sentence<S>) -> Self {
        Sentence::UniversalQuantification(decl, Arc::new(body))
    }
    pub fn exists(decl: VariableDeclaration<S>, body: Sentence<S>) -> Self {
        Sentence::ExistentialQuantification(decl, Arc::new(body))
    }

    /// A hash that is stable across the swapped and unswapped ordering of a
    /// commutative pair's *own* two children — used to order children so that
    /// [`Hash`] and [`PartialEq`] stay consistent for commutative nodes.
    fn structural_hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        let mut h = DefaultHasher::new();
        self.hash(&mut h);
        h.finish()
    }
}

fn commutative_pair_eq<S: Symbol>(
    a1: &Arc<Sentence<S>>,
    b1: &Arc<Sentence<S>>,
    a2: &Arc<Sentence<S>>,
    b2: &Arc<Sentence<S>>,
) -> bool {
    (a1 == a2 && b1 == b2) || (a1 == b2 && b1 == a2)
}

fn hash_commutative_pair<S: Symbol, H: Hasher>(a: &Sentence<S>, b: &Sentence<S>, state: &mut H) {
    let mut hashes = [a.structural_hash(), b.structural_hash()];
    hashes.sort_unstable();
    hashes.hash(state);
}

impl<S: Symbol> PartialEq for Sentence<S> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Sentence::Predicate(pa, aa), Sentence::Predicate(pb, ab)) => pa == pb && aa.as_ref() == ab.as_ref(),
            (Sentence::Negation(a), Sentence::Negation(b)) => a == b,
            (Sentence::Conjunction(a1, b1), Sentence::Conjunction(a2, b2)) => commutative_pair_eq(a1, b1, a2, b2),
            (Sentence::Disjunction(a1, b1), Sentence::Disjunction(a2, b2)) => commutative_pair_eq(a1, b1, a2, b2),
            (Sentence::Equivalence(a1, b1), Sentence::Equivalence(a2, b2)) => commutative_pair_eq(a1, b1, a2, b2),
            (Sentence::Implication(a1, b1), Sentence::Implication(a2, b2)) => a1 == a2 && b1 == b2,
            (Sentence::UniversalQuantification(d1, b1), Sentence::UniversalQuantification(d2, b2)) => {
                d1 == d2 && b1 == b2
            }
            (Sentence::ExistentialQuantification(d1, b1), Sentence::ExistentialQuantification(d2, b2)) => {
                d1 == d2 && b1 == b2
            }
            _ => false,
        }
    }
}
impl<S: Symbol> Eq for Sentence<S> {}

impl<S: Symbol> Hash for Sentence<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Sentence::Predicate(id, args) => {
                0u8.hash(state);
                id.hash(state);
                args.hash(state);
            }
            Sentence::Negation(a) => {
                1u8.hash(state);
                a.hash(state);
            }
            Sentence::Conjunction(a, b) => {
                2u8.hash(state);
                hash_commutative_pair(a, b, state);
            }
            Sentence::Disjunction(a, b) => {
                3u8.hash(state);
                hash_commutative_pair(a, b, state);
            }
            Sentence::Equivalence(a, b) => {
                4u8.hash(state);
                hash_commutative_pair(a, b, state);
            }
            Sentence::Implication(a, b) => {
                5u8.hash(state);
                a.hash(state);
                b.hash(state);
            }
            Sentence::UniversalQuantification(d, b) => {
                6u8.hash(state);
                d.hash(state);
                b.hash(state);
            }
            Sentence::ExistentialQuantification(d, b) => {
                7u8.hash(state);
                d.hash(state);
                b.hash(state);
            }
        }
    }
}

/// A predicate or its negation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Literal<S: Symbol> {
    pub predicate: Identifier<S>,
    pub args: Arc<[Term<S>]>,
    pub is_negated: bool,
}

impl<S: Symbol> Literal<S> {
    pub fn positive(predicate: Identifier<S>, args: Vec<Term<S>>) -> Self {
        Self { predicate, args: args.into(), is_negated: false }
    }
    pub fn negative(predicate: Identifier<S>, args: Vec<Term<S>>) -> Self {
        Self { predicate, args: args.into(), is_negated: true }
    }
    pub fn negate(&self) -> Self {
        Self { predicate: self.predicate.clone(), args: self.args.clone(), is_negated: !self.is_negated }
    }
    /// Reconstructs the [`Sentence`] this literal denotes.
    pub fn to_sentence(&self) -> Sentence<S> {
        let pred = Sentence::Predicate(self.predicate.clone(), self.args.clone());
        if self.is_negated {
            Sentence::not(pred)
        } else {
            pred
        }
    }
}

/// Free builder functions for constructing sentences without going through
/// `Sentence`'s associated functions directly.
pub mod build {
    use super::*;

    pub fn pred<S: Symbol>(id: Identifier<S>, args: Vec<Term<S>>) -> Sentence<S> {
        Sentence::predicate(id, args)
    }
    pub fn not<S: Symbol>(s: Sentence<S>) -> Sentence<S> {
        Sentence::not(s)
    }
    pub fn and<S: Symbol>(l: Sentence<S>, r: Sentence<S>) -> Sentence<S> {
        Sentence::and(l, r)
    }
    pub fn or<S: Symbol>(l: Sentence<S>, r: Sentence<S>) -> Sentence<S> {
        Sentence::or(l, r)
    }
    pub fn imp<S: Symbol>(l: Sentence<S>, r: Sentence<S>) -> Sentence<S> {
        Sentence::implies(l, r)
    }
    pub fn equiv<S: Symbol>(l: Sentence<S>, r: Sentence<S>) -> Sentence<S> {
        Sentence::iff(l, r)
    }
}
