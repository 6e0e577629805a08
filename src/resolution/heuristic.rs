//! Pluggable clause-selection ordering for the resolution engine's expansion
//! queue.

use crate::cnf::Clause;
use crate::term::Symbol;

/// Scores a candidate resolvent for priority-queue ordering: lower scores
/// expand first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Pure breadth-first: score is just the resolution distance (number of
    /// resolution steps from an input clause). The default.
    #[default]
    Naive,
    /// Prefer clauses with fewer literals, tie-broken by distance.
    DisjunctCount,
    /// Prefer syntactically smaller clauses (total symbol count), tie-broken
    /// by distance.
    SymbolCount,
    /// `DisjunctCount`, weighted more heavily than distance.
    DisjunctCountPlusDistance,
}

impl Heuristic {
    pub fn score<S: Symbol>(&self, clause: &Clause<S>, distance: u64) -> u64 {
        match self {
            Heuristic::Naive => distance,
            Heuristic::DisjunctCount => clause.literals.len() as u64 * 1_000 + distance,
            Heuristic::SymbolCount => symbol_count(clause) * 1_000 + distance,
            Heuristic::DisjunctCountPlusDistance => clause.literals.len() as u64 * 10_000 + distance * 10,
        }
    }
}

fn symbol_count<S: Symbol>(clause: &Clause<S>) -> u64 {
    clause.literals.iter().map(|l| 1 + count_term_args(&l.args)).sum()
}

fn count_term_args<S: Symbol>(args: &[crate::term::Term<S>]) -> u64 {
    args.iter()
        .map(|a| match a {
            crate::term::Term::Constant(_) | crate::term::Term::VariableReference(_) => 1,
            crate::term::Term::Function(_, inner) => 1 + count_term_args(inner),
        })
        .sum()
}
