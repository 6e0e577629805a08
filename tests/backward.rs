//! Backward chaining over definite clauses.

mod support;

use folcore::backward::{prove, DefiniteClauseStore, ProofStep};
use folcore::cancel::CancellationToken;
use folcore::cnf::{self, Clause};
use folcore::sentence::{build, Literal};

use support::*;

fn tell_sentence(store: &mut DefiniteClauseStore<Sym>, sentence: &folcore::sentence::Sentence<Sym>) {
    for clause in cnf::to_cnf(sentence).clauses {
        store.tell(clause).expect("sentence should normalize to a definite clause");
    }
}

#[test]
fn s1_crime_domain_proves_criminal_west() {
    let mut store = DefiniteClauseStore::new();
    tell_sentence(&mut store, &p("American", vec![c("West")]));
    tell_sentence(&mut store, &p("Weapon", vec![c("M1")]));
    tell_sentence(&mut store, &p("Sells", vec![c("West"), c("M1"), c("Nono")]));
    tell_sentence(&mut store, &p("Hostile", vec![c("Nono")]));

    let rule = folcore::sentence::Sentence::forall(
        decl("x"),
        folcore::sentence::Sentence::forall(
            decl("y"),
            folcore::sentence::Sentence::forall(
                decl("z"),
                build::imp(
                    build::and(
                        build::and(p("American", vec![v("x")]), p("Weapon", vec![v("y")])),
                        build::and(p("Sells", vec![v("x"), v("y"), v("z")]), p("Hostile", vec![v("z")])),
                    ),
                    p("Criminal", vec![v("x")]),
                ),
            ),
        ),
    );
    tell_sentence(&mut store, &rule);

    let goal = Literal::positive(id("Criminal"), vec![c("West")]);
    let token = CancellationToken::new();
    let proof = prove(&store, &goal, &token).expect("cancellation unused").expect("should be proved");
    assert!(matches!(*proof.step, ProofStep::Rule { .. }));
}

#[test]
fn s2_greedy_kings_proves_with_binding_x_to_john() {
    let mut store = DefiniteClauseStore::new();
    tell_sentence(&mut store, &p("King", vec![c("John")]));
    tell_sentence(&mut store, &p("Greedy", vec![c("John")]));
    let rule = folcore::sentence::Sentence::forall(
        decl("x"),
        build::imp(
            build::and(p("King", vec![v("x")]), p("Greedy", vec![v("x")])),
            p("Evil", vec![v("x")]),
        ),
    );
    tell_sentence(&mut store, &rule);

    let goal = Literal::positive(id("Evil"), vec![v("X")]);
    let token = CancellationToken::new();
    let proof = prove(&store, &goal, &token).unwrap().expect("Evil(X) should be proved");
    match *proof.step {
        ProofStep::Rule { ref premises, .. } => assert_eq!(premises.len(), 2),
        ProofStep::Fact { .. } => panic!("expected a rule-derived proof"),
    }
    assert_eq!(proof.subst.resolve(&v("X")), c("John"));
}

#[test]
fn s3_inconsistent_binding_is_not_proved() {
    let mut store = DefiniteClauseStore::new();
    tell_sentence(&mut store, &p("King", vec![c("John")]));
    tell_sentence(&mut store, &p("Greedy", vec![c("Richard")]));
    let rule = folcore::sentence::Sentence::forall(
        decl("x"),
        build::imp(
            build::and(p("King", vec![v("x")]), p("Greedy", vec![v("x")])),
            p("Evil", vec![v("x")]),
        ),
    );
    tell_sentence(&mut store, &rule);

    let goal = Literal::positive(id("Evil"), vec![c("John")]);
    let token = CancellationToken::new();
    let proof = prove(&store, &goal, &token).unwrap();
    assert!(proof.is_none(), "King(John) & Greedy(Richard) must not prove Evil(John)");
}

#[test]
fn tell_rejects_non_definite_clauses() {
    let mut store = DefiniteClauseStore::new();
    // P(a) | Q(a) has two positive literals: not definite.
    let clause = Clause::new(vec![
        Literal::positive(id("P"), vec![c("a")]),
        Literal::positive(id("Q"), vec![c("a")]),
    ]);
    assert!(matches!(
        store.tell(clause),
        Err(folcore::error::FolError::NotADefiniteClause { .. })
    ));
}
