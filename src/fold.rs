//! A shared recursive transform/visit core.
//!
//! `TermFold`/`SentenceFold` let a pass over the term/sentence trees implement
//! only the variants it cares about; the default methods recurse structurally
//! and reuse the original `Arc` when a subtree comes back unchanged, so a
//! pass that touches nothing doesn't pay for a full tree copy.

use std::sync::Arc;

use crate::sentence::Sentence;
use crate::term::{Symbol, Term, VariableDeclaration};

/// A rewrite pass over [`Term`]s. Default methods recurse into children and
/// rebuild only when a child actually changed.
pub trait TermFold<S: Symbol> {
    fn fold_constant(&mut self, id: &crate::ident::Identifier<S>) -> Term<S> {
        Term::Constant(id.clone())
    }

    fn fold_variable(&mut self, decl: &VariableDeclaration<S>) -> Term<S> {
        Term::VariableReference(decl.clone())
    }

    fn fold_function(&mut self, id: &crate::ident::Identifier<S>, args: &Arc<[Term<S>]>) -> Term<S> {
        let folded = fold_term_slice(self, args);
        match folded {
            Some(new_args) => Term::Function(id.clone(), new_args),
            None => Term::Function(id.clone(), args.clone()),
        }
    }

    fn fold_term(&mut self, term: &Term<S>) -> Term<S> {
        match term {
            Term::Constant(id) => self.fold_constant(id),
            Term::VariableReference(decl) => self.fold_variable(decl),
            Term::Function(id, args) => self.fold_function(id, args),
        }
    }
}

/// Folds each element, returning `Some` only if at least one element differs
/// from the original (so callers can reuse the original `Arc<[Term<S>]>` when
/// nothing changed).
fn fold_term_slice<S: Symbol, F: TermFold<S> + ?Sized>(f: &mut F, args: &[Term<S>]) -> Option<Arc<[Term<S>]>> {
    let mut changed = false;
    let folded: Vec<Term<S>> = args
        .iter()
        .map(|a| {
            let new_a = f.fold_term(a);
            if new_a != *a {
                changed = true;
            }
            new_a
        })
        .collect();
    if changed {
        Some(folded.into())
    } else {
        None
    }
}

/// A rewrite pass over [`Sentence`]s. Mirrors [`TermFold`]: default methods
/// recurse, rebuilding a node only when a child changed, and delegate term
/// positions (predicate arguments) to an embedded [`TermFold`].
pub trait SentenceFold<S: Symbol>: TermFold<S> {
    fn fold_predicate(&mut self, id: &crate::ident::Identifier<S>, args: &Arc<[Term<S>]>) -> Sentence<S> {
        match fold_term_slice(self, args) {
            Some(new_args) => Sentence::Predicate(id.clone(), new_args),
            None => Sentence::Predicate(id.clone(), args.clone()),
        }
    }

    fn fold_negation(&mut self, inner: &Arc<Sentence<S>>) -> Sentence<S> {
        let folded = self.fold_sentence(inner);
        if folded == **inner {
            Sentence::Negation(inner.clone())
        } else {
            Sentence::Negation(Arc::new(folded))
        }
    }

    fn fold_conjunction(&mut self, l: &Arc<Sentence<S>>, r: &Arc<Sentence<S>>) -> Sentence<S> {
        fold_binary(self, l, r, Sentence::Conjunction)
    }

    fn fold_disjunction(&mut self, l: &Arc<Sentence<S>>, r: &Arc<Sentence<S>>) -> Sentence<S> {
        fold_binary(self, l, r, Sentence::Disjunction)
    }

    fn fold_implication(&mut self, l: &Arc<Sentence<S>>, r: &Arc<Sentence<S>>) -> Sentence<S> {
        fold_binary(self, l, r, Sentence::Implication)
    }

    fn fold_equivalence(&mut self, l: &Arc<Sentence<S>>, r: &Arc<Sentence<S>>) -> Sentence<S> {
        fold_binary(self, l, r, Sentence::Equivalence)
    }

    fn fold_universal(&mut self, decl: &VariableDeclaration<S>, body: &Arc<Sentence<S>>) -> Sentence<S> {
        let folded = self.fold_sentence(body);
        if folded == **body {
            Sentence::UniversalQuantification(decl.clone(), body.clone())
        } else {
            Sentence::UniversalQuantification(decl.clone(), Arc::new(folded))
        }
    }

    fn fold_existential(&mut self, decl: &VariableDeclaration<S>, body: &Arc<Sentence<S>>) -> Sentence<S> {
        let folded = self.fold_sentence(body);
        if folded == **body {
            Sentence::ExistentialQuantification(decl.clone(), body.clone())
        } else {
            Sentence::ExistentialQuantification(decl.clone(), Arc::new(folded))
        }
    }

    fn fold_sentence(&mut self, sentence: &Sentence<S>) -> Sentence<S> {
        match sentence {
            Sentence::Predicate(id, args) => self.fold_predicate(id, args),
            Sentence::Negation(inner) => self.fold_negation(inner),
            Sentence::Conjunction(l, r) => self.fold_conjunction(l, r),
            Sentence::Disjunction(l, r) => self.fold_disjunction(l, r),
            Sentence::Implication(l, r) => self.fold_implication(l, r),
            Sentence::Equivalence(l, r) => self.fold_equivalence(l, r),
            Sentence::UniversalQuantification(decl, body) => self.fold_universal(decl, body),
            Sentence::ExistentialQuantification(decl, body) => self.fold_existential(decl, body),
        }
    }
}

fn fold_binary<S, F>(
    f: &mut F,
    l: &Arc<Sentence<S>>,
    r: &Arc<Sentence<S>>,
    rebuild: fn(Arc<Sentence<S>>, Arc<Sentence<S>>) -> Sentence<S>,
) -> Sentence<S>
where
    S: Symbol,
    F: SentenceFold<S> + ?Sized,
{
    let new_l = f.fold_sentence(l);
    let new_r = f.fold_sentence(r);
    let l_changed = new_l != **l;
    let r_changed = new_r != **r;
    if !l_changed && !r_changed {
        rebuild(l.clone(), r.clone())
    } else {
        let next_l = if l_changed { Arc::new(new_l) } else { l.clone() };
        let next_r = if r_changed { Arc::new(new_r) } else { r.clone() };
        rebuild(next_l, next_r)
    }
}

/// Collects every free [`VariableDeclaration`] in a sentence, i.e. variables
/// referenced outside the scope of a matching quantifier.
pub fn free_variables<S: Symbol>(sentence: &Sentence<S>) -> Vec<VariableDeclaration<S>> {
    let mut out = Vec::new();
    collect_free_vars(sentence, &mut Vec::new(), &mut out);
    out
}

fn collect_free_vars<S: Symbol>(
    sentence: &Sentence<S>,
    bound: &mut Vec<VariableDeclaration<S>>,
    out: &mut Vec<VariableDeclaration<S>>,
) {
    match sentence {
        Sentence::Predicate(_, args) => {
            for arg in args.iter() {
                collect_free_vars_term(arg, bound, out);
            }
        }
        Sentence::Negation(inner) => collect_free_vars(inner, bound, out),
        Sentence::Conjunction(l, r)
        | Sentence::Disjunction(l, r)
        | Sentence::Implication(l, r)
        | Sentence::Equivalence(l, r) => {
            collect_free_vars(l, bound, out);
            collect_free_vars(r, bound, out);
        }
        Sentence::UniversalQuantification(decl, body) | Sentence::ExistentialQuantification(decl, body) => {
            bound.push(decl.clone());
            collect_free_vars(body, bound, out);
            bound.pop();
        }
    }
}

fn collect_free_vars_term<S: Symbol>(
    term: &Term<S>,
    bound: &[VariableDeclaration<S>],
    out: &mut Vec<VariableDeclaration<S>>,
) {
    match term {
        Term::Constant(_) => {}
        Term::VariableReference(decl) => {
            if !bound.contains(decl) && !out.contains(decl) {
                out.push(decl.clone());
            }
        }
        Term::Function(_, args) => {
            for arg in args.iter() {
                collect_free_vars_term(arg, bound, out);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ident::Identifier;

    fn decl(name: &'static str) -> VariableDeclaration<&'static str> {
        VariableDeclaration::new(Identifier::user(name))
    }

    #[test]
    fn quantified_variable_is_not_free() {
        let sentence = Sentence::forall(decl("x"), Sentence::predicate(Identifier::user("P"), vec![Term::variable(decl("x"))]));
        assert!(free_variables(&sentence).is_empty());
    }

    #[test]
    fn variable_outside_any_quantifier_is_free() {
        let sentence = Sentence::predicate(Identifier::user("P"), vec![Term::variable(decl("x"))]);
        assert_eq!(free_variables(&sentence), vec![decl("x")]);
    }

    #[test]
    fn fold_reuses_the_original_arc_when_nothing_changed() {
        struct NoOp;
        impl TermFold<&'static str> for NoOp {}
        impl SentenceFold<&'static str> for NoOp {}

        let inner = Arc::new(Sentence::predicate(Identifier::user("P"), vec![Term::variable(decl("x"))]));
        let sentence = Sentence::Negation(inner.clone());
        let mut pass = NoOp;
        let folded = pass.fold_sentence(&sentence);
        match folded {
            Sentence::Negation(out) => assert!(Arc::ptr_eq(&out, &inner)),
            _ => panic!("expected a negation"),
        }
    }
}
