//! The Martelli–Montanari unification loop.
//!
//! A worklist of `(left, right)` goal pairs is reduced one step at a time by
//! ELIMINATE (a bound variable is substituted through the rest of the
//! worklist immediately — this is what keeps symmetric equations like
//! `f(x,y) = f(y,x)` from unifying inconsistently), SWAP (orient
//! `term = variable` as `variable = term`), and DECOMPOSE (peel one layer off
//! two function applications with matching heads and arity).

use std::collections::VecDeque;

use crate::error::FolError;
use crate::sentence::Literal;
use crate::term::{Symbol, Term};

use super::Substitution;

enum Step<S: Symbol> {
    Eliminate(crate::term::VariableDeclaration<S>, Term<S>),
    Decompose(Vec<(Term<S>, Term<S>)>),
    Done,
    Mismatch,
}

fn step<S: Symbol>(left: &Term<S>, right: &Term<S>) -> Step<S> {
    match (left, right) {
        (Term::VariableReference(d1), Term::VariableReference(d2)) if d1 == d2 => Step::Done,
        (Term::VariableReference(d), t) => Step::Eliminate(d.clone(), t.clone()),
        // SWAP: orient so the variable is always on the left.
        (t, Term::VariableReference(d)) => Step::Eliminate(d.clone(), t.clone()),
        (Term::Constant(a), Term::Constant(b)) => {
            if a == b {
                Step::Done
            } else {
                Step::Mismatch
            }
        }
        (Term::Function(f1, a1), Term::Function(f2, a2)) => {
            if f1 != f2 || a1.len() != a2.len() {
                Step::Mismatch
            } else {
                Step::Decompose(a1.iter().cloned().zip(a2.iter().cloned()).collect())
            }
        }
        _ => Step::Mismatch,
    }
}

/// Finds a most general unifier for the term pairs in `goals`, or returns an
/// error describing why no unifier exists.
fn solve<S: Symbol>(mut goals: VecDeque<(Term<S>, Term<S>)>) -> Result<Substitution<S>, FolError> {
    let mut subst = Substitution::new();
    while let Some((l, r)) = goals.pop_front() {
        // Apply the substitution accumulated so far before inspecting the
        // pair, so later steps never reason about a stale binding.
        let l = subst.resolve(&l);
        let r = subst.resolve(&r);
        match step(&l, &r) {
            Step::Done => continue,
            Step::Mismatch => return Err(FolError::UnificationMismatch),
            Step::Eliminate(decl, term) => {
                subst.try_add(decl, term)?;
            }
            Step::Decompose(pairs) => {
                for pair in pairs.into_iter().rev() {
                    goals.push_front(pair);
                }
            }
        }
    }
    Ok(subst)
}

/// Unifies two equal-length term lists, as used when unifying the argument
/// lists of two literals sharing a predicate name.
pub fn unify_terms<S: Symbol>(left: &[Term<S>], right: &[Term<S>]) -> Result<Substitution<S>, FolError> {
    if left.len() != right.len() {
        return Err(FolError::UnificationMismatch);
    }
    let goals = left.iter().cloned().zip(right.iter().cloned()).collect();
    solve(goals)
}

/// Unifies two literals' argument lists, requiring matching predicate name,
/// matching polarity, and matching arity. A resolution step needs a unifier
/// between a pair of *opposite*-polarity literals, so it unifies their
/// argument lists directly with [`unify_terms`] rather than going through
/// this function.
pub fn unify_literals<S: Symbol>(left: &Literal<S>, right: &Literal<S>) -> Result<Substitution<S>, FolError> {
    if left.predicate != right.predicate || left.is_negated != right.is_negated {
        return Err(FolError::UnificationMismatch);
    }
    unify_terms(&left.args, &right.args)
}
