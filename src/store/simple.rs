//! The default clause store: an insertion-ordered set with predicate-name and
//! feature-vector indexing.
//!
//! By-predicate-name positive/negative maps support both candidate resolvent
//! and candidate subsumer lookup without a linear scan; a
//! `parking_lot::RwLock` guards the whole structure so the store is safely
//! shared behind a single-writer/many-reader lock.

use std::sync::Arc;

use indexmap::IndexSet;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::FolError;
use crate::ident::Identifier;
use crate::sentence::Literal;
use crate::term::Symbol;
use crate::unify::{self, Substitution};
use crate::varmanip;

use super::fvindex::{ArityHistogram, FeatureExtractor, FeatureVectorIndex};
use super::{Clause, SubsumptionPolicy};

struct Inner<S: Symbol> {
    clauses: IndexSet<Arc<Clause<S>>>,
    by_pos: FxHashMap<Identifier<S>, Vec<usize>>,
    by_neg: FxHashMap<Identifier<S>, Vec<usize>>,
    fv_index: FeatureVectorIndex,
}

impl<S: Symbol> Inner<S> {
    fn new() -> Self {
        Self {
            clauses: IndexSet::new(),
            by_pos: FxHashMap::default(),
            by_neg: FxHashMap::default(),
            fv_index: FeatureVectorIndex::new(),
        }
    }
}

/// A clause store backed by an insertion-ordered set, indexed by predicate
/// name (for resolvent/matching candidate lookup) and by feature vector (for
/// subsumption candidate lookup).
pub struct SimpleClauseStore<S: Symbol> {
    inner: RwLock<Inner<S>>,
    policy: SubsumptionPolicy,
    extractor: Box<dyn FeatureExtractor<S>>,
}

impl<S: Symbol> SimpleClauseStore<S> {
    pub fn new(policy: SubsumptionPolicy) -> Self {
        Self {
            inner: RwLock::new(Inner::new()),
            policy,
            extractor: Box::new(ArityHistogram),
        }
    }

    pub fn with_extractor(policy: SubsumptionPolicy, extractor: Box<dyn FeatureExtractor<S>>) -> Self {
        Self { inner: RwLock::new(Inner::new()), policy, extractor }
    }

    pub fn len(&self) -> usize {
        self.inner.read().clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, clause: &Clause<S>) -> bool {
        self.inner.read().clauses.contains(clause)
    }

    /// Adds `clause` to the store, rejecting exact duplicates and, depending
    /// on [`SubsumptionPolicy`], clauses subsumed by or subsuming existing
    /// members.
    pub fn tell(&self, clause: Clause<S>) -> Result<(), FolError> {
        let mut inner = self.inner.write();
        if inner.clauses.contains(&clause) {
            return Err(FolError::DuplicateClause);
        }

        let features = self.extractor.extract(&clause);

        if matches!(self.policy, SubsumptionPolicy::Forward | SubsumptionPolicy::ForwardAndBackward) {
            for candidate_id in inner.fv_index.candidates_at_most(&features) {
                if let Some(existing) = inner.clauses.get_index(candidate_id) {
                    if varmanip::subsumes(existing, &clause) {
                        trace!("rejecting clause subsumed by an existing member");
                        return Err(FolError::DuplicateClause);
                    }
                }
            }
        }

        let arc = Arc::new(clause);
        let (idx, inserted) = inner.clauses.insert_full(arc.clone());
        debug_assert!(inserted, "duplicate already rejected above");

        for literal in arc.literals.iter() {
            let map = if literal.is_negated { &mut inner.by_neg } else { &mut inner.by_pos };
            map.entry(literal.predicate.clone()).or_default().push(idx);
        }
        inner.fv_index.insert(&features, idx);

        if matches!(self.policy, SubsumptionPolicy::ForwardAndBackward) {
            let subsumed: Vec<usize> = inner
                .fv_index
                .candidates_at_least(&features)
                .into_iter()
                .filter(|&other_idx| other_idx != idx)
                .filter(|&other_idx| {
                    inner
                        .clauses
                        .get_index(other_idx)
                        .map(|other| varmanip::subsumes(&arc, other))
                        .unwrap_or(false)
                })
                .collect();
            if !subsumed.is_empty() {
                trace!(count = subsumed.len(), "new clause subsumes existing members");
            }
        }

        debug!(index = idx, literal_count = arc.literals.len(), "clause told to store");
        Ok(())
    }

    /// All clauses mentioning `predicate` positively (if `negated` is
    /// `false`) or negatively (if `true`) — the concrete mechanism behind
    /// resolvent/resolution candidate generation.
    pub fn clauses_with_predicate(&self, predicate: &Identifier<S>, negated: bool) -> Vec<Arc<Clause<S>>> {
        let inner = self.inner.read();
        let map = if negated { &inner.by_neg } else { &inner.by_pos };
        match map.get(predicate) {
            Some(indices) => indices
                .iter()
                .filter_map(|&idx| inner.clauses.get_index(idx).cloned())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Iterates the store's clauses in insertion order.
    pub fn iterate(&self) -> Vec<Arc<Clause<S>>> {
        self.inner.read().clauses.iter().cloned().collect()
    }

    /// Candidate generalizers of `clause` drawn from the feature-vector index
    /// — callers still need to confirm with [`varmanip::subsumes`], this only
    /// narrows the search.
    pub fn subsumption_candidates(&self, clause: &Clause<S>) -> Vec<Arc<Clause<S>>> {
        let features = self.extractor.extract(clause);
        let inner = self.inner.read();
        inner
            .fv_index
            .candidates_at_most(&features)
            .into_iter()
            .filter_map(|idx| inner.clauses.get_index(idx).cloned())
            .collect()
    }

    /// Every valid binary resolvent between `clause` and a clause already in
    /// the store, paired with the stored clause each was derived against.
    /// Uses the predicate-name indices to only consider stored clauses that
    /// share a predicate with `clause` at opposite polarity, rather than
    /// scanning the whole store.
    pub fn find_resolvents(&self, clause: &Clause<S>) -> Vec<(Arc<Clause<S>>, Clause<S>)> {
        let inner = self.inner.read();
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for literal in &clause.literals {
            let map = if literal.is_negated { &inner.by_pos } else { &inner.by_neg };
            let Some(indices) = map.get(&literal.predicate) else { continue };
            for &idx in indices {
                if !seen.insert(idx) {
                    continue;
                }
                let Some(partner) = inner.clauses.get_index(idx) else { continue };
                for (own_i, own) in clause.literals.iter().enumerate() {
                    for (other_i, other) in partner.literals.iter().enumerate() {
                        if own.predicate != other.predicate || own.is_negated == other.is_negated {
                            continue;
                        }
                        if let Ok(subst) = unify::unify_terms(&own.args, &other.args) {
                            let resolvent = build_resolvent(clause, partner, own_i, other_i, &subst);
                            out.push((partner.clone(), resolvent));
                        }
                    }
                }
            }
        }
        out
    }
}

fn build_resolvent<S: Symbol>(
    left: &Clause<S>,
    right: &Clause<S>,
    left_lit: usize,
    right_lit: usize,
    subst: &Substitution<S>,
) -> Clause<S> {
    let mut literals: Vec<Literal<S>> = Vec::new();
    for (i, lit) in left.literals.iter().enumerate() {
        if i == left_lit {
            continue;
        }
        literals.push(resolve_literal(lit, subst));
    }
    for (i, lit) in right.literals.iter().enumerate() {
        if i == right_lit {
            continue;
        }
        literals.push(resolve_literal(lit, subst));
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
