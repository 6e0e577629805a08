//! The library's external surface: `KnowledgeBase` and `Query`.
//!
//! `KnowledgeBase` normalizes and stores told sentences as clauses; `Query`
//! runs set-of-support refutation against a knowledge base to test whether a
//! conjecture follows from it.

use tracing::instrument;

use crate::cancel::CancellationToken;
use crate::cnf::{self, Clause};
use crate::error::FolError;
use crate::resolution::{self, Deduction, Heuristic, Proof};
use crate::sentence::Sentence;
use crate::store::{SimpleClauseStore, SubsumptionPolicy};
use crate::term::Symbol;

/// A collection of told sentences, held internally as CNF clauses, that
/// queries are run against.
pub struct KnowledgeBase<S: Symbol> {
    store: SimpleClauseStore<S>,
    heuristic: Heuristic,
}

impl<S: Symbol> KnowledgeBase<S> {
    pub fn new() -> Self {
        Self { store: SimpleClauseStore::new(SubsumptionPolicy::None), heuristic: Heuristic::default() }
    }

    pub fn with_policy(policy: SubsumptionPolicy, heuristic: Heuristic) -> Self {
        Self { store: SimpleClauseStore::new(policy), heuristic }
    }

    /// Normalizes `sentence` to CNF and tells every resulting clause to the
    /// store.
    #[instrument(skip(self, sentence))]
    pub fn tell(&self, sentence: &Sentence<S>) -> Result<(), FolError> {
        let cnf = cnf::to_cnf(sentence);
        for clause in cnf.clauses {
            match self.store.tell(clause) {
                Ok(()) | Err(FolError::DuplicateClause) => continue,
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    pub fn clause_count(&self) -> usize {
        self.store.len()
    }

    fn all_clauses(&self) -> Vec<Clause<S>> {
        self.store.iterate().into_iter().map(|arc| (*arc).clone()).collect()
    }
}

impl<S: Symbol> Default for KnowledgeBase<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// The tri-state result of running a [`Query`].
#[derive(Debug, Clone)]
pub enum QueryResult<S: Symbol> {
    /// A refutation of the negated conjecture was found; the conjecture
    /// follows from the knowledge base. Carries the resolution trace as an
    /// explanation.
    Proved(Vec<Deduction<S>>),
    /// The search exhausted its candidates without a refutation. Resolution
    /// is only semi-decidable, so this means "not shown to be a consequence",
    /// not "shown to be false".
    Unknown,
}

/// A conjecture to test for entailment against a [`KnowledgeBase`].
pub struct Query<S: Symbol> {
    conjecture: Sentence<S>,
}

impl<S: Symbol> Query<S> {
    pub fn new(conjecture: Sentence<S>) -> Self {
        Self { conjecture }
    }

    /// Runs set-of-support resolution refutation: tells the knowledge base's
    /// clauses together with the clausal form of the conjecture's negation,
    /// and resolves with the negated-conjecture clauses as the initial set of
    /// support.
    #[instrument(skip(self, kb, token))]
    pub fn execute(&self, kb: &KnowledgeBase<S>, token: &CancellationToken) -> Result<QueryResult<S>, FolError> {
        let mut clauses = kb.all_clauses();
        let negated = Sentence::not(self.conjecture.clone());
        let negated_cnf = cnf::to_cnf(&negated);
        let support_start = clauses.len();
        clauses.extend(negated_cnf.clauses);
        let support_indices: Vec<usize> = (support_start..clauses.len()).collect();

        match resolution::resolve(clauses, &support_indices, kb.heuristic, token)? {
            Proof::Refuted(trace) => Ok(QueryResult::Proved(trace)),
            Proof::Saturated => Ok(QueryResult::Unknown),
        }
    }

    /// Runs [`Query::execute`] on a blocking-pool thread, giving async callers
    /// a non-blocking entry point into what is otherwise a synchronous search.
    pub async fn execute_async(
        self,
        kb: std::sync::Arc<KnowledgeBase<S>>,
        token: CancellationToken,
    ) -> Result<QueryResult<S>, FolError>
    where
        S: Send + 'static,
    {
        tokio::task::spawn_blocking(move || self.execute(&kb, &token))
            .await
            .map_err(|_| FolError::Cancelled)?
    }
}
