//! Clause storage and retrieval.

mod support;

use folcore::error::FolError;
use folcore::sentence::Literal;
use folcore::store::{Clause, SimpleClauseStore, SubsumptionPolicy};

use support::*;

#[test]
fn tell_rejects_exact_duplicates() {
    let store: SimpleClauseStore<Sym> = SimpleClauseStore::new(SubsumptionPolicy::None);
    let clause = Clause::new(vec![Literal::positive(id("P"), vec![c("a")])]);
    store.tell(clause.clone()).expect("first tell should succeed");
    assert!(matches!(store.tell(clause), Err(FolError::DuplicateClause)));
    assert_eq!(store.len(), 1);
}

#[test]
fn clauses_with_predicate_splits_by_polarity() {
    let store: SimpleClauseStore<Sym> = SimpleClauseStore::new(SubsumptionPolicy::None);
    store
        .tell(Clause::new(vec![Literal::positive(id("P"), vec![c("a")])]))
        .unwrap();
    store
        .tell(Clause::new(vec![
            Literal::negative(id("P"), vec![v("x")]),
            Literal::positive(id("Q"), vec![v("x")]),
        ]))
        .unwrap();

    assert_eq!(store.clauses_with_predicate(&id("P"), false).len(), 1);
    assert_eq!(store.clauses_with_predicate(&id("P"), true).len(), 1);
    assert_eq!(store.clauses_with_predicate(&id("Q"), false).len(), 1);
    assert!(store.clauses_with_predicate(&id("R"), false).is_empty());
}

#[test]
fn forward_subsumption_policy_rejects_a_clause_subsumed_by_an_existing_member() {
    let store: SimpleClauseStore<Sym> = SimpleClauseStore::new(SubsumptionPolicy::Forward);
    let general = Clause::new(vec![
        Literal::positive(id("P"), vec![v("X")]),
        Literal::positive(id("Q"), vec![v("X")]),
    ]);
    store.tell(general).expect("general clause should be told");

    let specific = Clause::new(vec![
        Literal::positive(id("P"), vec![c("a")]),
        Literal::positive(id("Q"), vec![c("a")]),
    ]);
    assert!(matches!(store.tell(specific), Err(FolError::DuplicateClause)));
    assert_eq!(store.len(), 1);
}

#[test]
fn none_policy_accepts_a_subsumed_clause_that_forward_would_reject() {
    let store: SimpleClauseStore<Sym> = SimpleClauseStore::new(SubsumptionPolicy::None);
    let general = Clause::new(vec![
        Literal::positive(id("P"), vec![v("X")]),
        Literal::positive(id("Q"), vec![v("X")]),
    ]);
    store.tell(general).unwrap();
    let specific = Clause::new(vec![
        Literal::positive(id("P"), vec![c("a")]),
        Literal::positive(id("Q"), vec![c("a")]),
    ]);
    store.tell(specific).expect("default policy tells subsumed clauses too");
    assert_eq!(store.len(), 2);
}

#[test]
fn find_resolvents_derives_the_binary_resolvent_and_names_its_partner() {
    let store: SimpleClauseStore<Sym> = SimpleClauseStore::new(SubsumptionPolicy::None);
    let fact = Clause::new(vec![Literal::positive(id("King"), vec![c("John")])]);
    store.tell(fact.clone()).unwrap();

    let rule = Clause::new(vec![
        Literal::negative(id("King"), vec![v("X")]),
        Literal::positive(id("Person"), vec![v("X")]),
    ]);

    let resolvents = store.find_resolvents(&rule);
    assert_eq!(resolvents.len(), 1);
    let (partner, resolvent) = &resolvents[0];
    assert_eq!(**partner, fact);
    assert_eq!(*resolvent, Clause::new(vec![Literal::positive(id("Person"), vec![c("John")])]));
}

#[test]
fn find_resolvents_finds_nothing_when_no_stored_clause_shares_a_complementary_predicate() {
    let store: SimpleClauseStore<Sym> = SimpleClauseStore::new(SubsumptionPolicy::None);
    store
        .tell(Clause::new(vec![Literal::positive(id("Q"), vec![c("a")])]))
        .unwrap();

    let clause = Clause::new(vec![Literal::negative(id("P"), vec![v("X")])]);
    assert!(store.find_resolvents(&clause).is_empty());
}

#[test]
fn iterate_preserves_insertion_order() {
    let store: SimpleClauseStore<Sym> = SimpleClauseStore::new(SubsumptionPolicy::None);
    let first = Clause::new(vec![Literal::positive(id("P"), vec![c("a")])]);
    let second = Clause::new(vec![Literal::positive(id("Q"), vec![c("b")])]);
    store.tell(first.clone()).unwrap();
    store.tell(second.clone()).unwrap();

    let all = store.iterate();
    assert_eq!(all.len(), 2);
    assert_eq!(*all[0], first);
    assert_eq!(*all[1], second);
}
