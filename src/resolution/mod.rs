//! Set-of-support binary resolution.
//!
//! A `Resolver`-style search loop combining a candidate pair queue, a
//! pluggable [`Heuristic`], and a resolvee collector that gathers every
//! resolvable literal pair between two clauses, not just the first.

mod heuristic;
mod pqueue;

pub use heuristic::Heuristic;
pub use pqueue::PQueue;

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::cancel::{self, CancellationToken};
use crate::cnf::Clause;
use crate::error::FolError;
use crate::ident::Identifier;
use crate::sentence::Literal;
use crate::term::Symbol;
use crate::unify::{self, Substitution};
use crate::varmanip;

/// One resolution step recorded in a successful refutation trace.
#[derive(Debug, Clone)]
pub enum Deduction<S: Symbol> {
    /// An input clause, given to the engine before search began.
    Premise { clause: Arc<Clause<S>> },
    /// A clause derived by resolving two earlier clauses (identified by their
    /// index in the trace) on a pair of complementary literals.
    Resolve { clause: Arc<Clause<S>>, left: usize, right: usize },
}

/// The outcome of a resolution search.
#[derive(Debug, Clone)]
pub enum Proof<S: Symbol> {
    /// The empty clause was derived: the input clause set is unsatisfiable.
    /// The trace records every clause in the order it entered the proof,
    /// premises first.
    Refuted(Vec<Deduction<S>>),
    /// The search exhausted its candidate resolvents (or, absent a
    /// completeness guarantee for the given heuristic, its cancellation
    /// budget) without deriving the empty clause.
    Saturated,
}

struct Resolvee<S: Symbol> {
    left_idx: usize,
    right_idx: usize,
    left_lit: usize,
    right_lit: usize,
    subst: Substitution<S>,
}

fn find_resolvees<S: Symbol>(
    clauses: &[Arc<Clause<S>>],
    left_idx: usize,
    right_idx: usize,
) -> Vec<Resolvee<S>> {
    let mut out = Vec::new();
    let left = &clauses[left_idx];
    let right = &clauses[right_idx];
    for (li, l) in left.literals.iter().enumerate() {
        for (ri, r) in right.literals.iter().enumerate() {
            if l.predicate != r.predicate || l.is_negated == r.is_negated {
                continue;
            }
            // Opposite polarity is the whole point here, so unify the raw
            // argument lists rather than going through `unify_literals`
            // (which requires matching polarity).
            if let Ok(subst) = unify::unify_terms(&l.args, &r.args) {
                out.push(Resolvee { left_idx, right_idx, left_lit: li, right_lit: ri, subst });
            }
        }
    }
    out
}

fn build_resolvent<S: Symbol>(clauses: &[Arc<Clause<S>>], resolvee: &Resolvee<S>) -> Clause<S> {
    let left = &clauses[resolvee.left_idx];
    let right = &clauses[resolvee.right_idx];
    let mut literals: Vec<Literal<S>> = Vec::new();
    for (i, lit) in left.literals.iter().enumerate() {
        if i == resolvee.left_lit {
            continue;
        }
        literals.push(resolve_literal(lit, &resolvee.subst));
    }
    for (i, lit) in right.literals.iter().enumerate() {
        if i == resolvee.right_lit {
            continue;
        }
        literals.push(resolve_literal(lit, &resolvee.subst));
    }
    Clause::new(literals)
}

fn resolve_literal<S: Symbol>(literal: &Literal<S>, subst: &Substitution<S>) -> Literal<S> {
    let args = literal.args.iter().map(|a| subst.resolve(a)).collect();
    if literal.is_negated {
        Literal::negative(literal.predicate.clone(), args)
    } else {
        Literal::positive(literal.predicate.clone(), args)
    }
}

/// Runs set-of-support binary resolution over `clauses`, treating the
/// elements at `support_indices` (typically the clauses derived from a
/// negated conjecture) as the initial set of support: every resolution step
/// must involve at least one clause currently in the support set.
pub fn resolve<S: Symbol>(
    clauses: Vec<Clause<S>>,
    support_indices: &[usize],
    heuristic: Heuristic,
    token: &CancellationToken,
) -> Result<Proof<S>, FolError> {
    debug!(clause_count = clauses.len(), "starting resolution search");
    let mut all: Vec<Arc<Clause<S>>> = clauses.into_iter().map(Arc::new).collect();
    let mut by_pos: FxHashMap<Identifier<S>, Vec<usize>> = FxHashMap::default();
    let mut by_neg: FxHashMap<Identifier<S>, Vec<usize>> = FxHashMap::default();
    let mut is_support: Vec<bool> = vec![false; all.len()];
    let mut parents: Vec<Option<(usize, usize)>> = vec![None; all.len()];
    let mut distances: Vec<u64> = vec![0; all.len()];

    for &idx in support_indices {
        if idx < is_support.len() {
            is_support[idx] = true;
        }
    }
    for (idx, clause) in all.iter().enumerate() {
        index_clause(&mut by_pos, &mut by_neg, clause, idx);
        if clause.is_empty() {
            return Ok(Proof::Refuted(build_trace(&all, &parents, idx)));
        }
    }

    let mut queue: PQueue<(usize, usize), u64> = PQueue::new();
    seed_queue(&all, &is_support, &mut queue, heuristic);

    while let Some(((i, j), _weight)) = queue.poll() {
        cancel::check(token)?;
        if i >= all.len() || j >= all.len() {
            continue;
        }
        for resolvee in find_resolvees(&all, i, j) {
            let resolvent = build_resolvent(&all, &resolvee);
            if resolvent.is_tautology() {
                trace!("pruned tautologous resolvent");
                continue;
            }
            if all.iter().any(|existing| varmanip::subsumes(existing, &resolvent)) {
                trace!("pruned resolvent subsumed by an existing clause");
                continue;
            }
            let new_idx = all.len();
            let distance = distances[i].max(distances[j]) + 1;
            let is_empty = resolvent.is_empty();
            let arc = Arc::new(resolvent);
            index_clause(&mut by_pos, &mut by_neg, &arc, new_idx);
            all.push(arc);
            is_support.push(true);
            parents.push(Some((i, j)));
            distances.push(distance);

            if is_empty {
                debug!(steps = new_idx, "derived the empty clause");
                return Ok(Proof::Refuted(build_trace(&all, &parents, new_idx)));
            }

            for other_idx in candidate_partners(&by_pos, &by_neg, &all[new_idx]) {
                if other_idx == new_idx {
                    continue;
                }
                let weight = heuristic.score(&all[new_idx], distance.max(distances[other_idx]));
                queue.insert((new_idx, other_idx), weight);
            }
        }
    }

    debug!("resolution search saturated without a refutation");
    Ok(Proof::Saturated)
}

fn index_clause<S: Symbol>(
    by_pos: &mut FxHashMap<Identifier<S>, Vec<usize>>,
    by_neg: &mut FxHashMap<Identifier<S>, Vec<usize>>,
    clause: &Clause<S>,
    idx: usize,
) {
    for literal in &clause.literals {
        let map = if literal.is_negated { &mut *by_neg } else { &mut *by_pos };
        map.entry(literal.predicate.clone()).or_default().push(idx);
    }
}

fn candidate_partners<S: Symbol>(
    by_pos: &FxHashMap<Identifier<S>, Vec<usize>>,
    by_neg: &FxHashMap<Identifier<S>, Vec<usize>>,
    clause: &Clause<S>,
) -> Vec<usize> {
    let mut out = Vec::new();
    for literal in &clause.literals {
        let map = if literal.is_negated { by_pos } else { by_neg };
        if let Some(indices) = map.get(&literal.predicate) {
            out.extend(indices.iter().copied());
        }
    }
    out
}

fn seed_queue<S: Symbol>(
    all: &[Arc<Clause<S>>],
    is_support: &[bool],
    queue: &mut PQueue<(usize, usize), u64>,
    heuristic: Heuristic,
) {
    for i in 0..all.len() {
        for j in (i + 1)..all.len() {
            if !is_support[i] && !is_support[j] {
                continue;
            }
            let weight = heuristic.score(&all[j], 1);
            queue.insert((i, j), weight);
        }
    }
}

fn build_trace<S: Symbol>(
    all: &[Arc<Clause<S>>],
    parents: &[Option<(usize, usize)>],
    goal_idx: usize,
) -> Vec<Deduction<S>> {
    // Walk back from the empty clause, collecting every ancestor exactly
    // once, then emit them in forward (derivation) order.
    let mut needed = vec![false; all.len()];
    let mut stack = vec![goal_idx];
    while let Some(idx) = stack.pop() {
        if needed[idx] {
            continue;
        }
        needed[idx] = true;
        if let Some((l, r)) = parents[idx] {
            stack.push(l);
            stack.push(r);
        }
    }
    let mut trace = Vec::new();
    for idx in 0..all.len() {
        if !needed[idx] {
            continue;
        }
        match parents[idx] {
            None => trace.push(Deduction::Premise { clause: all[idx].clone() }),
            Some((l, r)) => trace.push(Deduction::Resolve { clause: all[idx].clone(), left: l, right: r }),
        }
    }
    trace
}
