//! Variable manipulation: ordinalization and subsumption.

mod support;

use rstest::rstest;

use folcore::cnf::Clause;
use folcore::sentence::Literal;
use folcore::varmanip::{is_generalisation_of, is_instance_of, ordinalize, subsumes};

use support::*;

#[test]
fn ordinalize_is_stable_across_independent_calls_on_alpha_equivalent_clauses() {
    // F(G(X, Y), G(X, Z)) twice, built from fresh variable declarations each
    // time, must ordinalize to the same canonical clause.
    let build = || {
        Clause::new(vec![Literal::positive(
            id("F"),
            vec![f("G", vec![v("X"), v("Y")]), f("G", vec![v("X"), v("Z")])],
        )])
    };
    let first = ordinalize(&build());
    let second = ordinalize(&build());
    assert_eq!(first, second);
}

#[test]
fn ordinalize_assigns_positions_by_first_occurrence() {
    let clause = Clause::new(vec![Literal::positive(
        id("F"),
        vec![f("G", vec![v("X"), v("Y")]), f("G", vec![v("X"), v("Z")])],
    )]);
    let ordinalized = ordinalize(&clause);
    let expected = Clause::new(vec![Literal::positive(
        id("F"),
        vec![
            f("G", vec![Term::variable(decl_ordinal(0)), Term::variable(decl_ordinal(1))]),
            f("G", vec![Term::variable(decl_ordinal(0)), Term::variable(decl_ordinal(2))]),
        ],
    )]);
    assert_eq!(ordinalized, expected);
}

#[test]
fn ordinalize_distinguishes_genuinely_different_clauses() {
    let c1 = Clause::new(vec![Literal::positive(id("F"), vec![v("X"), v("X")])]);
    let c2 = Clause::new(vec![Literal::positive(id("F"), vec![v("X"), v("Y")])]);
    assert_ne!(ordinalize(&c1), ordinalize(&c2));
}

#[rstest]
#[case::same_constant_both_conjuncts(
    Clause::new(vec![Literal::positive(id("P"), vec![v("X")]), Literal::positive(id("Q"), vec![v("X")])]),
    Clause::new(vec![Literal::positive(id("P"), vec![c("c")]), Literal::positive(id("Q"), vec![c("c")])]),
    true
)]
#[case::inconsistent_binding_across_conjuncts(
    Clause::new(vec![Literal::positive(id("P"), vec![v("X")]), Literal::positive(id("Q"), vec![v("X")])]),
    Clause::new(vec![Literal::positive(id("P"), vec![c("c")]), Literal::positive(id("Q"), vec![c("d")])]),
    false
)]
#[case::duplicate_general_literals_collapse_onto_one_specific_literal(
    Clause::new(vec![Literal::positive(id("P"), vec![v("X")]), Literal::positive(id("P"), vec![v("Y")])]),
    Clause::new(vec![Literal::positive(id("P"), vec![c("a")])]),
    true
)]
#[case::mismatched_predicate_never_subsumes(
    Clause::new(vec![Literal::positive(id("P"), vec![v("X")])]),
    Clause::new(vec![Literal::positive(id("Q"), vec![c("a")])]),
    false
)]
fn subsumption_truth_table(#[case] general: Clause<Sym>, #[case] specific: Clause<Sym>, #[case] expected: bool) {
    assert_eq!(subsumes(&general, &specific), expected);
}

#[test]
fn instance_of_requires_bijective_literal_matching() {
    let general = Clause::new(vec![Literal::positive(id("P"), vec![v("X")])]);
    let instance = Clause::new(vec![Literal::positive(id("P"), vec![c("a")])]);
    assert!(is_instance_of(&instance, &general));
    assert!(is_generalisation_of(&general, &instance));

    // An extra literal breaks the bijective instance check even though the
    // non-bijective subsumption check above would still allow it.
    let bigger = Clause::new(vec![
        Literal::positive(id("P"), vec![c("a")]),
        Literal::positive(id("Q"), vec![c("a")]),
    ]);
    assert!(!is_instance_of(&bigger, &general));
    assert!(subsumes(&general, &bigger));
}

use folcore::ident::Identifier;
use folcore::term::{Term, VariableDeclaration};

fn decl_ordinal(n: u64) -> VariableDeclaration<Sym> {
    VariableDeclaration::new(Identifier::Ordinal(n))
}
