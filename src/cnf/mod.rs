//! Conjunctive normal form normalization.
//!
//! The pipeline runs the seven steps in order: eliminate implications/
//! equivalences, push negations to normal form, standardize bound variables
//! apart, Skolemize, drop the now-redundant universal quantifiers, distribute
//! disjunction over conjunction, and flatten into a set of clauses. Each step
//! is its own pass: easier to reason about and to unit-test in isolation.

mod distribute;
mod skolemize;

use std::sync::Arc;

use tracing::debug;

use crate::fold::SentenceFold;
use crate::ident::{Identifier, Provenance, StandardisedVariableIdentifier};
use crate::sentence::Sentence;
use crate::term::{Symbol, Term, VariableDeclaration};

pub use distribute::distribute;
pub use skolemize::skolemize;

/// A disjunction of literals with no explicit structure, represented as the
/// set of its [`crate::sentence::Literal`]s.
///
/// Clauses are sets, not sequences: `{P(x), Q(x)}` and `{Q(x), P(x)}` are the
/// same clause, so equality and hashing are both order-independent.
#[derive(Clone, Debug, Eq)]
pub struct Clause<S: Symbol> {
    pub literals: Vec<crate::sentence::Literal<S>>,
}

impl<S: Symbol> Clause<S> {
    pub fn new(literals: Vec<crate::sentence::Literal<S>>) -> Self {
        let mut deduped: Vec<crate::sentence::Literal<S>> = Vec::with_capacity(literals.len());
        for literal in literals {
            if !deduped.contains(&literal) {
                deduped.push(literal);
            }
        }
        Self { literals: deduped }
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// A clause is a syntactic tautology if it contains a literal and its
    /// negation.
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .any(|l| self.literals.iter().any(|other| other.predicate == l.predicate && other.args == l.args && other.is_negated != l.is_negated))
    }
}

impl<S: Symbol> PartialEq for Clause<S> {
    fn eq(&self, other: &Self) -> bool {
        self.literals.len() == other.literals.len()
            && self.literals.iter().all(|l| other.literals.contains(l))
    }
}

impl<S: Symbol> std::hash::Hash for Clause<S> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Order-independent: combine each literal's own hash with XOR so the
        // result doesn't depend on `literals`' storage order. A fixed-seed
        // hasher is used per literal so the combined value is stable across
        // calls, unlike a randomized `RandomState`.
        use std::collections::hash_map::DefaultHasher;
        use std::hash::Hasher;
        let combined = self.literals.iter().fold(0u64, |acc, lit| {
            let mut h = DefaultHasher::new();
            lit.hash(&mut h);
            acc ^ h.finish()
        });
        combined.hash(state);
    }
}

/// A conjunction of [`Clause`]s — the end product of [`to_cnf`].
///
/// Like `Clause`, a `Cnf` is a set of clauses, not a sequence: equality is
/// order-independent.
#[derive(Clone, Debug)]
pub struct Cnf<S: Symbol> {
    pub clauses: Vec<Clause<S>>,
}

impl<S: Symbol> PartialEq for Cnf<S> {
    fn eq(&self, other: &Self) -> bool {
        self.clauses.len() == other.clauses.len()
            && self.clauses.iter().all(|c| other.clauses.contains(c))
    }
}

impl<S: Symbol> Eq for Cnf<S> {}

/// Runs the full seven-step normalization pipeline over a single sentence.
pub fn to_cnf<S: Symbol>(sentence: &Sentence<S>) -> Cnf<S> {
    debug!("starting cnf normalization");
    let no_impl = eliminate_implications(sentence);
    let nnf = to_nnf(&no_impl, false);
    let standardized = standardize_apart(&nnf);
    let skolemized = skolemize(&standardized);
    let matrix = drop_universals(&skolemized);
    let distributed = distribute::distribute(&matrix);
    let clauses = flatten(&distributed);
    debug!(clause_count = clauses.len(), "cnf normalization complete");
    Cnf { clauses }
}

/// Step 1: rewrite `Implication`/`Equivalence` nodes away
/// (`a -> b` becomes `!a | b`; `a <-> b` becomes `(!a | b) & (!b | a)`).
pub fn eliminate_implications<S: Symbol>(sentence: &Sentence<S>) -> Sentence<S> {
    match sentence {
        Sentence::Predicate(..) => sentence.clone(),
        Sentence::Negation(inner) => Sentence::not(eliminate_implications(inner)),
        Sentence::Conjunction(l, r) => Sentence::and(eliminate_implications(l), eliminate_implications(r)),
        Sentence::Disjunction(l, r) => Sentence::or(eliminate_implications(l), eliminate_implications(r)),
        Sentence::Implication(l, r) => {
            let l = eliminate_implications(l);
            let r = eliminate_implications(r);
            Sentence::or(Sentence::not(l), r)
        }
        Sentence::Equivalence(l, r) => {
            let l = eliminate_implications(l);
            let r = eliminate_implications(r);
            let forward = Sentence::or(Sentence::not(l.clone()), r.clone());
            let backward = Sentence::or(Sentence::not(r), l);
            Sentence::and(forward, backward)
        }
        Sentence::UniversalQuantification(decl, body) => {
            Sentence::forall(decl.clone(), eliminate_implications(body))
        }
        Sentence::ExistentialQuantification(decl, body) => {
            Sentence::exists(decl.clone(), eliminate_implications(body))
        }
    }
}

/// Step 2: push negation down to the literal level (negation normal form),
/// applying De Morgan's laws and quantifier duality. `negate` tracks whether
/// the surrounding context has flipped polarity.
pub fn to_nnf<S: Symbol>(sentence: &Sentence<S>, negate: bool) -> Sentence<S> {
    match sentence {
        Sentence::Predicate(..) => {
            if negate {
                Sentence::not(sentence.clone())
            } else {
                sentence.clone()
            }
        }
        Sentence::Negation(inner) => to_nnf(inner, !negate),
        Sentence::Conjunction(l, r) => {
            let l = to_nnf(l, negate);
            let r = to_nnf(r, negate);
            if negate {
                Sentence::or(l, r)
            } else {
                Sentence::and(l, r)
            }
        }
        Sentence::Disjunction(l, r) => {
            let l = to_nnf(l, negate);
            let r = to_nnf(r, negate);
            if negate {
                Sentence::and(l, r)
            } else {
                Sentence::or(l, r)
            }
        }
        // Implications/equivalences should already be gone by this point, but
        // handle them defensively so `to_nnf` stays total on its own.
        Sentence::Implication(l, r) => to_nnf(&Sentence::or(Sentence::not((**l).clone()), (**r).clone()), negate),
        Sentence::Equivalence(l, r) => {
            let forward = Sentence::or(Sentence::not((**l).clone()), (**r).clone());
            let backward = Sentence::or(Sentence::not((**r).clone()), (**l).clone());
            to_nnf(&Sentence::and(forward, backward), negate)
        }
        Sentence::UniversalQuantification(decl, body) => {
            let body = to_nnf(body, negate);
            if negate {
                Sentence::exists(decl.clone(), body)
            } else {
                Sentence::forall(decl.clone(), body)
            }
        }
        Sentence::ExistentialQuantification(decl, body) => {
            let body = to_nnf(body, negate);
            if negate {
                Sentence::forall(decl.clone(), body)
            } else {
                Sentence::exists(decl.clone(), body)
            }
        }
    }
}

struct StandardizeApart<S: Symbol> {
    renames: Vec<(VariableDeclaration<S>, VariableDeclaration<S>)>,
}

impl<S: Symbol> crate::fold::TermFold<S> for StandardizeApart<S> {
    fn fold_variable(&mut self, decl: &VariableDeclaration<S>) -> Term<S> {
        for (from, to) in self.renames.iter().rev() {
            if from == decl {
                return Term::VariableReference(to.clone());
            }
        }
        Term::VariableReference(decl.clone())
    }
}

impl<S: Symbol> SentenceFold<S> for StandardizeApart<S> {
    fn fold_universal(&mut self, decl: &VariableDeclaration<S>, body: &Arc<Sentence<S>>) -> Sentence<S> {
        self.rename_and_recurse(decl, body, Sentence::forall)
    }

    fn fold_existential(&mut self, decl: &VariableDeclaration<S>, body: &Arc<Sentence<S>>) -> Sentence<S> {
        self.rename_and_recurse(decl, body, Sentence::exists)
    }
}

impl<S: Symbol> StandardizeApart<S> {
    fn rename_and_recurse(
        &mut self,
        decl: &VariableDeclaration<S>,
        body: &Arc<Sentence<S>>,
        rebuild: fn(VariableDeclaration<S>, Sentence<S>) -> Sentence<S>,
    ) -> Sentence<S> {
        let label = format!("{:?}", decl.identifier());
        let fresh_id = Identifier::Standardised(StandardisedVariableIdentifier::fresh(Provenance {
            original_label: label,
        }));
        let fresh_decl = VariableDeclaration::new(fresh_id);
        self.renames.push((decl.clone(), fresh_decl.clone()));
        let folded_body = self.fold_sentence(body);
        self.renames.pop();
        rebuild(fresh_decl, folded_body)
    }
}

/// Step 3: give every bound variable a globally unique identifier, so that no
/// two quantifiers anywhere in the sentence bind the "same" variable.
pub fn standardize_apart<S: Symbol>(sentence: &Sentence<S>) -> Sentence<S> {
    let mut pass = StandardizeApart { renames: Vec::new() };
    pass.fold_sentence(sentence)
}

/// Step 5: having Skolemized away every existential, remaining universal
/// quantifiers bind the whole matrix and carry no further information — drop
/// them.
pub fn drop_universals<S: Symbol>(sentence: &Sentence<S>) -> Sentence<S> {
    match sentence {
        Sentence::UniversalQuantification(_, body) => drop_universals(body),
        Sentence::ExistentialQuantification(_, body) => drop_universals(body),
        other => other.clone(),
    }
}

/// Step 7: flatten a distributed, quantifier-free sentence of the shape
/// `(l1 | l2 | ...) & (l3 | ...) & ...` into a set of [`Clause`]s.
pub fn flatten<S: Symbol>(sentence: &Sentence<S>) -> Vec<Clause<S>> {
    let mut clauses = Vec::new();
    flatten_conjuncts(sentence, &mut clauses);
    clauses
}

fn flatten_conjuncts<S: Symbol>(sentence: &Sentence<S>, out: &mut Vec<Clause<S>>) {
    match sentence {
        Sentence::Conjunction(l, r) => {
            flatten_conjuncts(l, out);
            flatten_conjuncts(r, out);
        }
        other => {
            let mut literals = Vec::new();
            flatten_disjuncts(other, &mut literals);
            out.push(Clause::new(literals));
        }
    }
}

fn flatten_disjuncts<S: Symbol>(sentence: &Sentence<S>, out: &mut Vec<crate::sentence::Literal<S>>) {
    match sentence {
        Sentence::Disjunction(l, r) => {
            flatten_disjuncts(l, out);
            flatten_disjuncts(r, out);
        }
        Sentence::Predicate(id, args) => out.push(crate::sentence::Literal::positive(id.clone(), args.to_vec())),
        Sentence::Negation(inner) => match inner.as_ref() {
            Sentence::Predicate(id, args) => out.push(crate::sentence::Literal::negative(id.clone(), args.to_vec())),
            _ => unreachable!("flatten called on a sentence that is not in negation normal form"),
        },
        _ => unreachable!("flatten called on a sentence that still contains quantifiers or implications"),
    }
}
