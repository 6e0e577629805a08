//! CNF normalization pipeline.

mod support;

use folcore::cnf;
use folcore::sentence::{build, Sentence};
use folcore::term::VariableDeclaration;

use support::*;

#[test]
fn eliminate_implications_rewrites_arrow_as_disjunction() {
    let a = p("P", vec![c("a")]);
    let b = p("Q", vec![c("a")]);
    let imp = build::imp(a.clone(), b.clone());

    let rewritten = cnf::eliminate_implications(&imp);
    let expected = build::or(build::not(a), b);
    assert_eq!(rewritten, expected);
}

#[test]
fn eliminate_implications_rewrites_equivalence_as_conjunction_of_two_arrows() {
    let a = p("P", vec![c("a")]);
    let b = p("Q", vec![c("a")]);
    let iff = build::equiv(a.clone(), b.clone());

    let rewritten = cnf::eliminate_implications(&iff);
    let forward = build::or(build::not(a.clone()), b.clone());
    let backward = build::or(build::not(b), a);
    assert_eq!(rewritten, build::and(forward, backward));
}

#[test]
fn nnf_pushes_negation_through_conjunction_via_de_morgan() {
    let a = p("P", vec![c("a")]);
    let b = p("Q", vec![c("a")]);
    let negated_conjunction = build::not(build::and(a.clone(), b.clone()));

    let nnf = cnf::to_nnf(&negated_conjunction, false);
    assert_eq!(nnf, build::or(build::not(a), build::not(b)));
}

#[test]
fn nnf_cancels_double_negation() {
    let a = p("P", vec![c("a")]);
    let double_neg = build::not(build::not(a.clone()));
    assert_eq!(cnf::to_nnf(&double_neg, false), a);
}

#[test]
fn distribute_pushes_disjunction_inside_conjunction() {
    // P | (Q & R)  ==  (P | Q) & (P | R)
    let pred_p = p("P", vec![c("a")]);
    let pred_q = p("Q", vec![c("a")]);
    let pred_r = p("R", vec![c("a")]);
    let sentence = build::or(pred_p.clone(), build::and(pred_q.clone(), pred_r.clone()));

    let distributed = cnf::distribute(&sentence);
    let expected = build::and(
        build::or(pred_p.clone(), pred_q),
        build::or(pred_p, pred_r),
    );
    assert_eq!(distributed, expected);
}

#[test]
fn flatten_collects_one_clause_per_top_level_conjunct() {
    let pred_p = p("P", vec![c("a")]);
    let pred_q = p("Q", vec![c("a")]);
    let pred_r = p("R", vec![c("a")]);
    let matrix = build::and(pred_p.clone(), build::or(pred_q.clone(), pred_r.clone()));

    let clauses = cnf::flatten(&matrix);
    assert_eq!(clauses.len(), 2);
    assert_eq!(clauses[0].literals.len(), 1);
    assert_eq!(clauses[1].literals.len(), 2);
}

#[test]
fn to_cnf_on_crime_rule_yields_a_single_four_literal_clause() {
    // forall x,y,z. American(x) & Weapon(y) & Sells(x,y,z) & Hostile(z) -> Criminal(x)
    let rule = Sentence::forall(
        decl("x"),
        Sentence::forall(
            decl("y"),
            Sentence::forall(
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

    let cnf = cnf::to_cnf(&rule);
    assert_eq!(cnf.clauses.len(), 1);
    assert_eq!(cnf.clauses[0].literals.len(), 5);
    assert_eq!(cnf.clauses[0].literals.iter().filter(|l| !l.is_negated).count(), 1);
}

#[test]
fn skolemization_replaces_existential_with_function_of_enclosing_universals() {
    // forall x. exists y. P(x, y)  =>  clause mentioning a Skolem function of x
    let sentence = Sentence::forall(decl("x"), Sentence::exists(decl("y"), p("P", vec![v("x"), v("y")])));
    let cnf = cnf::to_cnf(&sentence);

    assert_eq!(cnf.clauses.len(), 1);
    let literal = &cnf.clauses[0].literals[0];
    assert_eq!(literal.args.len(), 2);
    match &literal.args[1] {
        folcore::term::Term::Function(id, args) => {
            assert!(matches!(id, folcore::ident::Identifier::Skolem(_)));
            assert_eq!(args.len(), 1);
        }
        other => panic!("expected a skolem function term, got {other:?}"),
    }
}

#[test]
fn skolemization_of_a_bare_existential_yields_a_nullary_constant() {
    // exists y. P(y), with no enclosing universal: Skolem constant, not function.
    let sentence = Sentence::exists(decl("y"), p("P", vec![v("y")]));
    let cnf = cnf::to_cnf(&sentence);
    let literal = &cnf.clauses[0].literals[0];
    match &literal.args[0] {
        folcore::term::Term::Function(id, args) => {
            assert!(matches!(id, folcore::ident::Identifier::Skolem(_)));
            assert!(args.is_empty());
        }
        other => panic!("expected a nullary skolem constant, got {other:?}"),
    }
}

#[test]
fn standardize_apart_gives_identically_named_bound_variables_distinct_identities() {
    // (forall x. P(x)) & (forall x. Q(x)) -- the two x's must not collide.
    let sentence = build::and(
        Sentence::forall(decl("x"), p("P", vec![v("x")])),
        Sentence::forall(decl("x"), p("Q", vec![v("x")])),
    );
    let standardized = cnf::standardize_apart(&sentence);
    let free: Vec<VariableDeclaration<Sym>> = folcore::fold::free_variables(&standardized);
    assert!(free.is_empty(), "standardize-apart must not introduce free variables");

    if let Sentence::Conjunction(l, r) = &standardized {
        let (Sentence::UniversalQuantification(d1, _), Sentence::UniversalQuantification(d2, _)) =
            (l.as_ref(), r.as_ref())
        else {
            panic!("expected two universal quantifications");
        };
        assert_ne!(d1, d2, "standardize-apart must assign distinct identifiers");
    } else {
        panic!("expected a conjunction at the top level");
    }
}
