//! Structural equality/hash behaviour of terms, sentences and clauses,
//! including commutativity at the node level and clause set semantics.

mod support;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use folcore::cnf::Clause;
use folcore::sentence::Literal;

use support::*;

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut h = DefaultHasher::new();
    value.hash(&mut h);
    h.finish()
}

#[test]
fn conjunction_is_commutative() {
    let a = p("American", vec![c("West")]);
    let b = p("Hostile", vec![c("Nono")]);

    let ab = folcore::sentence::build::and(a.clone(), b.clone());
    let ba = folcore::sentence::build::and(b, a);

    assert_eq!(ab, ba);
    assert_eq!(hash_of(&ab), hash_of(&ba));
}

#[test]
fn disjunction_is_commutative() {
    let a = p("P", vec![v("x")]);
    let b = p("Q", vec![v("x")]);

    let ab = folcore::sentence::build::or(a.clone(), b.clone());
    let ba = folcore::sentence::build::or(b, a);

    assert_eq!(ab, ba);
    assert_eq!(hash_of(&ab), hash_of(&ba));
}

#[test]
fn implication_is_not_commutative() {
    let a = p("P", vec![c("a")]);
    let b = p("Q", vec![c("a")]);

    let ab = folcore::sentence::build::imp(a.clone(), b.clone());
    let ba = folcore::sentence::build::imp(b, a);

    assert_ne!(ab, ba);
}

#[test]
fn literal_negate_round_trips_polarity() {
    let lit = Literal::positive(id("P"), vec![c("a")]);
    let neg = lit.negate();
    assert!(neg.is_negated);
    assert_eq!(neg.negate(), lit);
}

#[test]
fn clause_equality_is_order_independent() {
    let l1 = Literal::positive(id("P"), vec![v("x")]);
    let l2 = Literal::positive(id("Q"), vec![v("x")]);

    let forward = Clause::new(vec![l1.clone(), l2.clone()]);
    let backward = Clause::new(vec![l2, l1]);

    assert_eq!(forward, backward);
    assert_eq!(hash_of(&forward), hash_of(&backward));
}

#[test]
fn clause_deduplicates_repeated_literals() {
    let l1 = Literal::positive(id("P"), vec![c("a")]);
    let clause = Clause::new(vec![l1.clone(), l1]);
    assert_eq!(clause.literals.len(), 1);
}

#[test]
fn clause_detects_tautology() {
    let p_pos = Literal::positive(id("P"), vec![c("a")]);
    let p_neg = Literal::negative(id("P"), vec![c("a")]);
    let tautology = Clause::new(vec![p_pos, p_neg]);
    assert!(tautology.is_tautology());

    let non_tautology = Clause::new(vec![
        Literal::positive(id("P"), vec![c("a")]),
        Literal::positive(id("Q"), vec![c("a")]),
    ]);
    assert!(!non_tautology.is_tautology());
}
