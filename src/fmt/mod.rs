//! Pretty-debug formatting for logs and test failure messages — not a
//! textual surface syntax or a parser's inverse, which stay out of scope.
//!
//! A [`NameTable`] assigns each generated
//! ([`crate::ident::Identifier::Standardised`]/`Skolem`) identifier a short,
//! stable display label the first time it's seen, while user identifiers
//! fall back to their own `Debug` output.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::cnf::Clause;
use crate::ident::Identifier;
use crate::sentence::{Literal, Sentence};
use crate::term::{Symbol, Term};

/// Assigns short display labels (`_G0`, `_G1`, ...) to generated identifiers
/// the first time each is printed, so repeated printing of the same proof or
/// clause set stays readable instead of showing raw atomic counter values.
#[derive(Default)]
pub struct NameTable {
    labels: std::cell::RefCell<FxHashMap<u64, String>>,
    next: std::cell::Cell<u64>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn label_for(&self, key: u64) -> String {
        if let Some(existing) = self.labels.borrow().get(&key) {
            return existing.clone();
        }
        let n = self.next.get();
        self.next.set(n + 1);
        let label = format!("_G{n}");
        self.labels.borrow_mut().insert(key, label.clone());
        label
    }
}

/// A type that can render itself using a [`NameTable`] for generated
/// identifiers.
pub trait DisplayNamed {
    fn fmt_named(&self, f: &mut fmt::Formatter<'_>, names: &NameTable) -> fmt::Result;
}

impl<S: Symbol> DisplayNamed for Identifier<S> {
    fn fmt_named(&self, f: &mut fmt::Formatter<'_>, names: &NameTable) -> fmt::Result {
        match self {
            Identifier::User(s) => write!(f, "{s:?}"),
            Identifier::Standardised(id) => write!(f, "{}", names.label_for(std_id_key(id))),
            Identifier::Skolem(id) => write!(f, "sk_{}", names.label_for(skolem_id_key(id))),
            Identifier::Ordinal(n) => write!(f, "v{n}"),
            Identifier::Sentinel => write!(f, "<sentinel>"),
        }
    }
}

// The counters backing generated identifiers are process-global and
// monotonically increasing, so their `Debug` output is already a stable,
// unique key to hash on without exposing the atomic counter type here.
fn std_id_key<T: fmt::Debug>(id: &T) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut h = std::collections::hash_map::DefaultHasher::new();
    format!("{id:?}").hash(&mut h);
    h.finish()
}
fn skolem_id_key<T: fmt::Debug>(id: &T) -> u64 {
    std_id_key(id)
}

impl<S: Symbol> DisplayNamed for Term<S> {
    fn fmt_named(&self, f: &mut fmt::Formatter<'_>, names: &NameTable) -> fmt::Result {
        match self {
            Term::Constant(id) => id.fmt_named(f, names),
            Term::VariableReference(decl) => decl.identifier().fmt_named(f, names),
            Term::Function(id, args) => {
                id.fmt_named(f, names)?;
                write!(f, "(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.fmt_named(f, names)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl<S: Symbol> DisplayNamed for Literal<S> {
    fn fmt_named(&self, f: &mut fmt::Formatter<'_>, names: &NameTable) -> fmt::Result {
        if self.is_negated {
            write!(f, "!")?;
        }
        self.predicate.fmt_named(f, names)?;
        write!(f, "(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            arg.fmt_named(f, names)?;
        }
        write!(f, ")")
    }
}

impl<S: Symbol> DisplayNamed for Clause<S> {
    fn fmt_named(&self, f: &mut fmt::Formatter<'_>, names: &NameTable) -> fmt::Result {
        write!(f, "{{")?;
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            lit.fmt_named(f, names)?;
        }
        write!(f, "}}")
    }
}

impl<S: Symbol> DisplayNamed for Sentence<S> {
    fn fmt_named(&self, f: &mut fmt::Formatter<'_>, names: &NameTable) -> fmt::Result {
        match self {
            Sentence::Predicate(id, args) => {
                id.fmt_named(f, names)?;
                write!(f, "(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.fmt_named(f, names)?;
                }
                write!(f, ")")
            }
            Sentence::Negation(inner) => {
                write!(f, "!")?;
                inner.fmt_named(f, names)
            }
            Sentence::Conjunction(l, r) => {
                write!(f, "(")?;
                l.fmt_named(f, names)?;
                write!(f, " & ")?;
                r.fmt_named(f, names)?;
                write!(f, ")")
            }
            Sentence::Disjunction(l, r) => {
                write!(f, "(")?;
                l.fmt_named(f, names)?;
                write!(f, " | ")?;
                r.fmt_named(f, names)?;
                write!(f, ")")
            }
            Sentence::Implication(l, r) => {
                write!(f, "(")?;
                l.fmt_named(f, names)?;
                write!(f, " -> ")?;
                r.fmt_named(f, names)?;
                write!(f, ")")
            }
            Sentence::Equivalence(l, r) => {
                write!(f, "(")?;
                l.fmt_named(f, names)?;
                write!(f, " <-> ")?;
                r.fmt_named(f, names)?;
                write!(f, ")")
            }
            Sentence::UniversalQuantification(decl, body) => {
                write!(f, "forall ")?;
                decl.identifier().fmt_named(f, names)?;
                write!(f, ". ")?;
                body.fmt_named(f, names)
            }
            Sentence::ExistentialQuantification(decl, body) => {
                write!(f, "exists ")?;
                decl.identifier().fmt_named(f, names)?;
                write!(f, ". ")?;
                body.fmt_named(f, names)
            }
        }
    }
}

/// Wraps any [`DisplayNamed`] value together with the table to format it
/// with, so it can be used directly in `write!`/`format!`/log fields.
pub struct WithTable<'a, T> {
    value: &'a T,
    names: &'a NameTable,
}

impl<'a, T: DisplayNamed> fmt::Display for WithTable<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt_named(f, self.names)
    }
}

pub fn with_table<'a, T: DisplayNamed>(value: &'a T, names: &'a NameTable) -> WithTable<'a, T> {
    WithTable { value, names }
}
