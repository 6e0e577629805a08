//! Variable manipulation over clauses: canonical renaming, instance/
//! generalization tests, and subsumption.
//!
//! Canonical renaming follows a "first-encounter traversal assigns the next
//! identifier" scheme; the matching routines below share a one-pass,
//! backtracking worklist accumulation style.

use rustc_hash::FxHashMap;

use crate::cnf::Clause;
use crate::fold::TermFold;
use crate::ident::Identifier;
use crate::term::{Symbol, Term, VariableDeclaration};

struct Ordinalize<S: Symbol> {
    seen: FxHashMap<VariableDeclaration<S>, VariableDeclaration<S>>,
}

impl<S: Symbol> TermFold<S> for Ordinalize<S> {
    fn fold_variable(&mut self, decl: &VariableDeclaration<S>) -> Term<S> {
        let next_ordinal = self.seen.len() as u64;
        let mapped = self
            .seen
            .entry(decl.clone())
            .or_insert_with(|| VariableDeclaration::new(Identifier::Ordinal(next_ordinal)));
        Term::VariableReference(mapped.clone())
    }
}

/// Renames every variable in `clause` to a canonical identifier ordered by
/// first occurrence across its literals, so that two clauses differing only
/// in the names of their bound variables compare equal after ordinalization.
pub fn ordinalize<S: Symbol>(clause: &Clause<S>) -> Clause<S> {
    let mut pass = Ordinalize { seen: FxHashMap::default() };
    let literals = clause
        .literals
        .iter()
        .map(|lit| {
            let args: Vec<Term<S>> = lit.args.iter().map(|a| pass.fold_term(a)).collect();
            if lit.is_negated {
                crate::sentence::Literal::negative(lit.predicate.clone(), args)
            } else {
                crate::sentence::Literal::positive(lit.predicate.clone(), args)
            }
        })
        .collect();
    Clause::new(literals)
}

fn match_term<S: Symbol>(
    pattern: &Term<S>,
    instance: &Term<S>,
    bindings: &mut FxHashMap<VariableDeclaration<S>, Term<S>>,
) -> bool {
    match pattern {
        Term::VariableReference(decl) => match bindings.get(decl) {
            Some(bound) => bound == instance,
            None => {
                bindings.insert(decl.clone(), instance.clone());
                true
            }
        },
        Term::Constant(a) => matches!(instance, Term::Constant(b) if a == b),
        Term::Function(pf, pargs) => match instance {
            Term::Function(jf, jargs) if pf == jf && pargs.len() == jargs.len() => pargs
                .iter()
                .zip(jargs.iter())
                .all(|(p, j)| match_term(p, j, bindings)),
            _ => false,
        },
    }
}

/// Attempts a subsumption/instance match where every pattern literal must be
/// matched against a *distinct* instance literal, enforced via `used`. This
/// is the stricter, cardinality-preserving notion needed for
/// [`is_instance_of`].
fn try_match_bijective<S: Symbol>(
    pattern: &[crate::sentence::Literal<S>],
    instance: &[crate::sentence::Literal<S>],
    used: &mut Vec<bool>,
    bindings: &mut FxHashMap<VariableDeclaration<S>, Term<S>>,
) -> bool {
    let Some((first, rest)) = pattern.split_first() else {
        return true;
    };
    for (idx, candidate) in instance.iter().enumerate() {
        if used[idx] || candidate.is_negated != first.is_negated || candidate.predicate != first.predicate {
            continue;
        }
        if candidate.args.len() != first.args.len() {
            continue;
        }
        let mut trial = bindings.clone();
        if first.args.iter().zip(candidate.args.iter()).all(|(p, j)| match_term(p, j, &mut trial)) {
            used[idx] = true;
            if try_match_bijective(rest, instance, used, &mut trial) {
                *bindings = trial;
                return true;
            }
            used[idx] = false;
        }
    }
    false
}

/// True if `specific` is an instance of `general`: some substitution of
/// `general`'s variables reproduces `specific` exactly, literal for literal.
pub fn is_instance_of<S: Symbol>(specific: &Clause<S>, general: &Clause<S>) -> bool {
    if specific.literals.len() != general.literals.len() {
        return false;
    }
    let mut used = vec![false; specific.literals.len()];
    let mut bindings = FxHashMap::default();
    try_match_bijective(&general.literals, &specific.literals, &mut used, &mut bindings)
}

/// True if `general` is a generalization of `specific`, i.e. `specific` is an
/// instance of `general`. The inverse of [`is_instance_of`].
pub fn is_generalisation_of<S: Symbol>(general: &Clause<S>, specific: &Clause<S>) -> bool {
    is_instance_of(specific, general)
}

/// Attempts a subsumption match where a single pattern literal may match
/// several distinct instance literals (no `used` tracking) — subsumption
/// proper allows this, unlike the bijective instance check above.
fn try_match_subsuming<S: Symbol>(
    pattern: &[crate::sentence::Literal<S>],
    instance: &[crate::sentence::Literal<S>],
    bindings: &mut FxHashMap<VariableDeclaration<S>, Term<S>>,
) -> bool {
    let Some((first, rest)) = pattern.split_first() else {
        return true;
    };
    for candidate in instance {
        if candidate.is_negated != first.is_negated || candidate.predicate != first.predicate {
            continue;
        }
        if candidate.args.len() != first.args.len() {
            continue;
        }
        let mut trial = bindings.clone();
        if first.args.iter().zip(candidate.args.iter()).all(|(p, j)| match_term(p, j, &mut trial))
            && try_match_subsuming(rest, instance, &mut trial)
        {
            *bindings = trial;
            return true;
        }
    }
    false
}

/// True if `general` subsumes `specific`: some substitution of `general`'s
/// variables makes every one of its literals appear among `specific`'s.
/// Unlike [`is_instance_of`], `specific` may carry additional literals
/// `general` says nothing about, and one `general` literal may subsume
/// several `specific` literals at once — so `general` having more literals
/// than `specific` does not rule out a match; duplicate `general` literals
/// can collapse onto a single `specific` literal under the substitution.
pub fn subsumes<S: Symbol>(general: &Clause<S>, specific: &Clause<S>) -> bool {
    let mut bindings = FxHashMap::default();
    try_match_subsuming(&general.literals, &specific.literals, &mut bindings)
}
