//! Step 6 of the CNF pipeline: distribute disjunction over conjunction so the
//! sentence takes the shape `(l1 | ...) & (l2 | ...) & ...`.

use crate::sentence::Sentence;
use crate::term::Symbol;

/// Distributes `|` over `&` in a quantifier-free, implication-free negation
/// normal form sentence.
pub fn distribute<S: Symbol>(sentence: &Sentence<S>) -> Sentence<S> {
    match sentence {
        Sentence::Conjunction(l, r) => Sentence::and(distribute(l), distribute(r)),
        Sentence::Disjunction(l, r) => distribute_or(distribute(l), distribute(r)),
        other => other.clone(),
    }
}

/// `l | r` where `l` and `r` are already distributed: if either side is a
/// conjunction, distribute `|` over it and recurse; otherwise it's a plain
/// disjunction of literals.
fn distribute_or<S: Symbol>(l: Sentence<S>, r: Sentence<S>) -> Sentence<S> {
    match (l, r) {
        (Sentence::Conjunction(a, b), r) => {
            let left = distribute_or((*a).clone(), r.clone());
            let right = distribute_or((*b).clone(), r);
            Sentence::and(left, right)
        }
        (l, Sentence::Conjunction(a, b)) => {
            let left = distribute_or(l.clone(), (*a).clone());
            let right = distribute_or(l, (*b).clone());
            Sentence::and(left, right)
        }
        (l, r) => Sentence::or(l, r),
    }
}
