//! Opaque identifiers used for predicate, function, constant and variable names.
//!
//! Any value with well-defined equality and hashing can be a user identifier (`S`).
//! Standardised and Skolem identifiers are generated internally by the CNF
//! normalizer and compare equal only to themselves (reference/instance identity),
//! never to a user label that happens to print the same way.

use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

static STANDARDISED_COUNTER: AtomicU64 = AtomicU64::new(0);
static SKOLEM_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A back-pointer to the scope a generated identifier was produced from, kept
/// for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Provenance {
    /// Human-readable description of the originating scope, e.g. the printed
    /// label of the quantifier's declared variable.
    pub original_label: String,
}

/// A freshly minted identifier standing in for a bound variable after
/// standardize-apart. Compares equal only to itself.
#[derive(Clone)]
pub struct StandardisedVariableIdentifier {
    id: u64,
    pub provenance: Provenance,
}

impl StandardisedVariableIdentifier {
    pub fn fresh(provenance: Provenance) -> Self {
        let id = STANDARDISED_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self { id, provenance }
    }
}

impl PartialEq for StandardisedVariableIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for StandardisedVariableIdentifier {}
impl Hash for StandardisedVariableIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
impl Debug for StandardisedVariableIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.provenance.original_label, self.id)
    }
}

/// A freshly minted function symbol replacing an existential quantifier during
/// Skolemization. Compares equal only to itself.
#[derive(Clone)]
pub struct SkolemFunctionIdentifier {
    id: u64,
    pub provenance: Provenance,
}

impl SkolemFunctionIdentifier {
    pub fn fresh(provenance: Provenance) -> Self {
        let id = SKOLEM_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self { id, provenance }
    }
}

impl PartialEq for SkolemFunctionIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for SkolemFunctionIdentifier {}
impl Hash for SkolemFunctionIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
impl Debug for SkolemFunctionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sk_{}#{}", self.provenance.original_label, self.id)
    }
}

/// An identifier usable as a predicate, function, constant or variable name.
///
/// `S` is the caller-supplied label type (an interned string, a `u64`,
/// whatever the host prefers — this type places no constraints on it beyond
/// what's needed to hash and compare). The other variants are produced
/// internally and are never equal to a `User` identifier, nor to each other
/// unless they are literally the same generated instance, nor to
/// [`Identifier::Sentinel`], a reserved placeholder value.
#[derive(Clone, Debug)]
pub enum Identifier<S> {
    User(S),
    Standardised(StandardisedVariableIdentifier),
    Skolem(SkolemFunctionIdentifier),
    /// A canonical position number assigned by `varmanip::ordinalize`. Unlike
    /// `Standardised`/`Skolem`, equality is by value, not by generation
    /// instance: two ordinalizations that assign the same variable the same
    /// first-encounter position compare equal, which is what makes structural
    /// equality of ordinalized forms a usable alpha-equivalence test.
    Ordinal(u64),
    /// Reserved sentinel: never equal to any real identifier, including another
    /// `Sentinel`. Used as a placeholder/"no such identifier" value.
    Sentinel,
}

impl<S> Identifier<S> {
    pub fn user(label: S) -> Self {
        Identifier::User(label)
    }
}

impl<S: PartialEq> PartialEq for Identifier<S> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Identifier::User(a), Identifier::User(b)) => a == b,
            (Identifier::Standardised(a), Identifier::Standardised(b)) => a == b,
            (Identifier::Skolem(a), Identifier::Skolem(b)) => a == b,
            (Identifier::Ordinal(a), Identifier::Ordinal(b)) => a == b,
            // The sentinel compares unequal to everything, including itself.
            _ => false,
        }
    }
}
impl<S: Eq> Eq for Identifier<S> {}

impl<S: Hash> Hash for Identifier<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Identifier::User(s) => {
                0u8.hash(state);
                s.hash(state);
            }
            Identifier::Standardised(id) => {
                1u8.hash(state);
                id.hash(state);
            }
            Identifier::Skolem(id) => {
                2u8.hash(state);
                id.hash(state);
            }
            Identifier::Ordinal(n) => {
                3u8.hash(state);
                n.hash(state);
            }
            Identifier::Sentinel => {
                // Hash consistently, but equality still always fails: a hash
                // collision is not an equality violation since eq() never
                // returns true for Sentinel.
                4u8.hash(state);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sentinel_never_compares_equal_even_to_itself() {
        let a: Identifier<&str> = Identifier::Sentinel;
        let b: Identifier<&str> = Identifier::Sentinel;
        assert_ne!(a, b);
    }

    #[test]
    fn ordinal_equality_is_by_value_not_by_generation() {
        let a: Identifier<&str> = Identifier::Ordinal(3);
        let b: Identifier<&str> = Identifier::Ordinal(3);
        assert_eq!(a, b);
        assert_ne!(Identifier::Ordinal(3), Identifier::<&str>::Ordinal(4));
    }

    #[test]
    fn standardised_identifiers_are_distinct_per_instance() {
        let a = StandardisedVariableIdentifier::fresh(Provenance { original_label: "x".into() });
        let b = StandardisedVariableIdentifier::fresh(Provenance { original_label: "x".into() });
        assert_ne!(a, b);
    }
}
