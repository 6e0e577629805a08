//! Step 4 of the CNF pipeline: replace existential quantifiers with Skolem
//! functions of the universally quantified variables in whose scope they sit.
//!
//! Walks the quantifier prefix front-to-back, accumulating the universal
//! variables seen so far and substituting `skolem_fun(vars)` for each
//! existential, folding the walk directly into the sentence tree rather than
//! building a separate prenex-form type first — [`super::standardize_apart`]
//! has already guaranteed every bound variable is globally unique, so nothing
//! is lost by working in place.

use crate::fold::TermFold;
use crate::ident::{Identifier, Provenance, SkolemFunctionIdentifier};
use crate::sentence::Sentence;
use crate::term::{Symbol, Term, VariableDeclaration};

struct SubstituteVar<'a, S: Symbol> {
    target: &'a VariableDeclaration<S>,
    replacement: &'a Term<S>,
}

impl<'a, S: Symbol> TermFold<S> for SubstituteVar<'a, S> {
    fn fold_variable(&mut self, decl: &VariableDeclaration<S>) -> Term<S> {
        if decl == self.target {
            self.replacement.clone()
        } else {
            Term::VariableReference(decl.clone())
        }
    }
}

impl<'a, S: Symbol> crate::fold::SentenceFold<S> for SubstituteVar<'a, S> {}

fn substitute<S: Symbol>(sentence: &Sentence<S>, target: &VariableDeclaration<S>, replacement: &Term<S>) -> Sentence<S> {
    use crate::fold::SentenceFold;
    let mut pass = SubstituteVar { target, replacement };
    pass.fold_sentence(sentence)
}

/// Builds `sk(v1, ..., vn)` — or a Skolem constant when `universals` is
/// empty.
fn skolem_term<S: Symbol>(universals: &[VariableDeclaration<S>], provenance_label: String) -> Term<S> {
    let id = Identifier::Skolem(SkolemFunctionIdentifier::fresh(Provenance {
        original_label: provenance_label,
    }));
    if universals.is_empty() {
        Term::nullary_function(id)
    } else {
        let args = universals
            .iter()
            .map(|decl| Term::VariableReference(decl.clone()))
            .collect();
        Term::function(id, args)
    }
}

fn skolemize_rec<S: Symbol>(sentence: &Sentence<S>, universals: &mut Vec<VariableDeclaration<S>>) -> Sentence<S> {
    match sentence {
        Sentence::UniversalQuantification(decl, body) => {
            universals.push(decl.clone());
            let folded = skolemize_rec(body, universals);
            universals.pop();
            Sentence::forall(decl.clone(), folded)
        }
        Sentence::ExistentialQuantification(decl, body) => {
            let label = format!("{:?}", decl.identifier());
            let term = skolem_term(universals, label);
            let substituted = substitute(body, decl, &term);
            skolemize_rec(&substituted, universals)
        }
        Sentence::Negation(inner) => Sentence::not(skolemize_rec(inner, universals)),
        Sentence::Conjunction(l, r) => Sentence::and(skolemize_rec(l, universals), skolemize_rec(r, universals)),
        Sentence::Disjunction(l, r) => Sentence::or(skolemize_rec(l, universals), skolemize_rec(r, universals)),
        Sentence::Implication(l, r) => Sentence::implies(skolemize_rec(l, universals), skolemize_rec(r, universals)),
        Sentence::Equivalence(l, r) => Sentence::iff(skolemize_rec(l, universals), skolemize_rec(r, universals)),
        Sentence::Predicate(..) => sentence.clone(),
    }
}

/// Skolemizes a sentence that is in negation normal form with all bound
/// variables standardized apart (i.e. the output of [`super::to_nnf`] followed
/// by [`super::standardize_apart`]).
pub fn skolemize<S: Symbol>(sentence: &Sentence<S>) -> Sentence<S> {
    skolemize_rec(sentence, &mut Vec::new())
}
