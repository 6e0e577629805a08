//! Backward chaining over definite clauses.
//!
//! Candidate clauses are looked up by head predicate name, then attempted in
//! store order: unify the (freshened) clause head against the goal, then
//! recurse into the body literals left to right, each proved as a subgoal
//! against the same store. The bindings accumulated along the way are
//! threaded through the whole search and carried on the resulting
//! [`ProofTree`], so a free variable in the original goal can be read back out
//! of a successful proof.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::cancel::{self, CancellationToken};
use crate::cnf::Clause;
use crate::error::FolError;
use crate::ident::{Identifier, Provenance, StandardisedVariableIdentifier};
use crate::sentence::Literal;
use crate::term::{Symbol, Term, VariableDeclaration};
use crate::unify::{self, Substitution};

/// A store of definite (Horn, at-most-one-positive-literal) clauses.
pub struct DefiniteClauseStore<S: Symbol> {
    clauses: Vec<Arc<Clause<S>>>,
    by_head: FxHashMap<Identifier<S>, Vec<usize>>,
}

impl<S: Symbol> Default for DefiniteClauseStore<S> {
    fn default() -> Self {
        Self { clauses: Vec::new(), by_head: FxHashMap::default() }
    }
}

impl<S: Symbol> DefiniteClauseStore<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `clause`, rejecting it if it is not definite.
    pub fn tell(&mut self, clause: Clause<S>) -> Result<(), FolError> {
        let positive_count = clause.literals.iter().filter(|l| !l.is_negated).count();
        if positive_count > 1 {
            return Err(FolError::NotADefiniteClause {
                detail: format!("clause has {positive_count} positive literals, at most 1 is allowed"),
            });
        }
        let arc = Arc::new(clause);
        if let Some(head) = arc.literals.iter().find(|l| !l.is_negated) {
            let idx = self.clauses.len();
            self.by_head.entry(head.predicate.clone()).or_default().push(idx);
            self.clauses.push(arc);
        }
        // A clause with no positive literal (all-negative) carries no head
        // and can never fire as a rule; still stored for completeness but
        // unreachable from `prove`.
        else {
            self.clauses.push(arc);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }
}

/// One step of a successful backward-chaining proof.
#[derive(Debug, Clone)]
pub enum ProofStep<S: Symbol> {
    /// The goal matched a fact (a clause whose body is empty) directly.
    Fact { clause: Arc<Clause<S>> },
    /// The goal matched a rule's head; `premises` proves each body literal in
    /// order, left to right.
    Rule { clause: Arc<Clause<S>>, premises: Vec<ProofTree<S>> },
}

/// A completed proof of a single goal literal, along with the substitution
/// accumulated while proving it. For a goal containing free variables,
/// [`Substitution::resolve`] on `subst` recovers the binding each was proved
/// under.
#[derive(Debug, Clone)]
pub struct ProofTree<S: Symbol> {
    pub goal: Literal<S>,
    pub step: Box<ProofStep<S>>,
    pub subst: Substitution<S>,
}

fn freshen_clause<S: Symbol>(clause: &Clause<S>) -> Clause<S> {
    let mut renames: FxHashMap<VariableDeclaration<S>, VariableDeclaration<S>> = FxHashMap::default();
    let literals = clause
        .literals
        .iter()
        .map(|lit| {
            let args: Vec<Term<S>> = lit.args.iter().map(|a| rename_term(a, &mut renames)).collect();
            if lit.is_negated {
                Literal::negative(lit.predicate.clone(), args)
            } else {
                Literal::positive(lit.predicate.clone(), args)
            }
        })
        .collect();
    Clause::new(literals)
}

fn rename_term<S: Symbol>(term: &Term<S>, renames: &mut FxHashMap<VariableDeclaration<S>, VariableDeclaration<S>>) -> Term<S> {
    match term {
        Term::Constant(_) => term.clone(),
        Term::VariableReference(decl) => {
            let fresh = renames.entry(decl.clone()).or_insert_with(|| {
                let label = format!("{:?}", decl.identifier());
                VariableDeclaration::new(crate::ident::Identifier::Standardised(StandardisedVariableIdentifier::fresh(
                    Provenance { original_label: label },
                )))
            });
            Term::VariableReference(fresh.clone())
        }
        Term::Function(id, args) => {
            Term::function(id.clone(), args.iter().map(|a| rename_term(a, renames)).collect())
        }
    }
}

fn substitute_literal<S: Symbol>(literal: &Literal<S>, subst: &Substitution<S>) -> Literal<S> {
    let args: Vec<Term<S>> = literal.args.iter().map(|a| subst.resolve(a)).collect();
    if literal.is_negated {
        Literal::negative(literal.predicate.clone(), args)
    } else {
        Literal::positive(literal.predicate.clone(), args)
    }
}

/// Attempts to prove `goal` against `store`, checking `token` between
/// candidate-clause attempts. Depth-first over the body literals, left to
/// right, trying matching clauses in store order. On success, the returned
/// tree's `subst` carries every binding made along the way, so a free
/// variable in `goal` can be resolved to the term it was proved against.
pub fn prove<S: Symbol>(
    store: &DefiniteClauseStore<S>,
    goal: &Literal<S>,
    token: &CancellationToken,
) -> Result<Option<ProofTree<S>>, FolError> {
    let mut subst = Substitution::new();
    let step = prove_rec(store, goal, &mut subst, token)?;
    Ok(step.map(|step| ProofTree { goal: goal.clone(), step: Box::new(step), subst }))
}

fn prove_rec<S: Symbol>(
    store: &DefiniteClauseStore<S>,
    goal: &Literal<S>,
    subst: &mut Substitution<S>,
    token: &CancellationToken,
) -> Result<Option<ProofStep<S>>, FolError> {
    cancel::check(token)?;
    let Some(indices) = store.by_head.get(&goal.predicate) else {
        return Ok(None);
    };
    let resolved_goal_args: Vec<Term<S>> = goal.args.iter().map(|a| subst.resolve(a)).collect();
    for &idx in indices {
        cancel::check(token)?;
        let clause = &store.clauses[idx];
        let fresh = freshen_clause(clause);
        let Some(head) = fresh.literals.iter().find(|l| !l.is_negated) else {
            continue;
        };
        if head.args.len() != resolved_goal_args.len() {
            continue;
        }
        let Ok(head_subst) = unify::unify_terms(&head.args, &resolved_goal_args) else {
            continue;
        };
        let mut trial = subst.clone();
        if merge_substitution(&mut trial, &head_subst).is_err() {
            continue;
        }
        let body: Vec<Literal<S>> = fresh.literals.iter().filter(|l| l.is_negated).cloned().collect();
        if body.is_empty() {
            trace!(predicate = ?goal.predicate, "goal proved by fact");
            *subst = trial;
            return Ok(Some(ProofStep::Fact { clause: clause.clone() }));
        }
        if let Some(premises) = prove_body(store, &body, &mut trial, token)? {
            debug!(predicate = ?goal.predicate, body_len = body.len(), "goal proved by rule");
            *subst = trial;
            return Ok(Some(ProofStep::Rule { clause: clause.clone(), premises }));
        }
    }
    Ok(None)
}

/// Merges every binding in `from` into `into`, failing if one conflicts with
/// an existing binding via the occurs check.
fn merge_substitution<S: Symbol>(into: &mut Substitution<S>, from: &Substitution<S>) -> Result<(), FolError> {
    for (decl, term) in from.bindings() {
        into.try_add(decl.clone(), term.clone())?;
    }
    Ok(())
}

fn prove_body<S: Symbol>(
    store: &DefiniteClauseStore<S>,
    body: &[Literal<S>],
    subst: &mut Substitution<S>,
    token: &CancellationToken,
) -> Result<Option<Vec<ProofTree<S>>>, FolError> {
    let Some((first, rest)) = body.split_first() else {
        return Ok(Some(Vec::new()));
    };
    // `first`'s body literal is negative in the clause; the goal we actually
    // prove against the store is its positive counterpart.
    let subgoal = substitute_literal(&first.negate(), subst);
    let Some(substep) = prove_rec(store, &subgoal, subst, token)? else {
        return Ok(None);
    };
    let subproof = ProofTree { goal: subgoal, step: Box::new(substep), subst: subst.clone() };
    let Some(mut rest_proofs) = prove_body(store, rest, subst, token)? else {
        return Ok(None);
    };
    let mut proofs = vec![subproof];
    proofs.append(&mut rest_proofs);
    Ok(Some(proofs))
}
