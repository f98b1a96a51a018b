//! Core value types for the rekh engine.
//!
//! Everything the pipeline passes around is built from a handful of small
//! value types: integer-identified entities and relations, rule-local
//! variables, atoms (patterns that may contain variables), and fully-bound
//! facts. All of them are immutable value objects with structural equality.

pub mod class;
pub mod pred;
pub mod rule;

use serde::{Deserialize, Serialize};

pub use class::Class;
pub use pred::Pred;
pub use rule::{Atom, Rule};

/// Identifier for an entity in the knowledge graph.
///
/// Dataset vocabularies are 0-based, so this is a plain `u64` newtype.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(transparent)]
#[serde(transparent)]
pub struct EntId(u64);

impl EntId {
    /// Create an `EntId` from a raw `u64`.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying `u64` value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ent:{}", self.0)
    }
}

/// Identifier for a relation (edge type) in the knowledge graph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(transparent)]
#[serde(transparent)]
pub struct RelId(u64);

impl RelId {
    /// Create a `RelId` from a raw `u64`.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying `u64` value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rel:{}", self.0)
    }
}

/// A rule-local variable, scoped to a single rule and compared by name.
///
/// Variables never appear in stored triples; they only occur inside rule
/// atoms and are bound to concrete entities during grounding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Var {
    /// Variable token as written in the mined rule, e.g. `X` or `Y`.
    pub name: String,
}

impl Var {
    /// Create a variable with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl std::fmt::Display for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "?{}", self.name)
    }
}

/// A term position inside a rule atom: either a variable or a bound entity.
///
/// The four (head, tail) combinations of this sum type are matched
/// exhaustively by the grounding engine, so unsupported atom shapes are a
/// checked match arm rather than an ad hoc type test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// An unbound variable, to be bound during grounding.
    Variable(Var),
    /// A concrete entity id.
    Entity(EntId),
}

impl Term {
    /// Shorthand for a variable term.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Variable(Var::new(name))
    }

    /// Shorthand for a bound entity term.
    pub fn ent(id: EntId) -> Self {
        Self::Entity(id)
    }

    /// Whether this term is a variable.
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variable(v) => write!(f, "{v}"),
            Self::Entity(e) => write!(f, "{e}"),
        }
    }
}

/// A fully-bound (head, relation, tail) statement.
///
/// Equality, hashing, and ordering are structural over the three ids. The
/// `Ord` impl (head, then relation, then tail) is what gives prediction
/// fusion its deterministic tie-break.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Fact {
    /// Head (subject) entity.
    pub head: EntId,
    /// Relation.
    pub rel: RelId,
    /// Tail (object) entity.
    pub tail: EntId,
}

impl Fact {
    /// Create a new fact.
    pub fn new(head: EntId, rel: RelId, tail: EntId) -> Self {
        Self { head, rel, tail }
    }
}

impl std::fmt::Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.head, self.rel, self.tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ent(id: u64) -> EntId {
        EntId::new(id)
    }

    fn rel(id: u64) -> RelId {
        RelId::new(id)
    }

    #[test]
    fn id_display() {
        assert_eq!(ent(42).to_string(), "ent:42");
        assert_eq!(rel(7).to_string(), "rel:7");
    }

    #[test]
    fn fact_equality_is_structural() {
        let a = Fact::new(ent(1), rel(5), ent(9));
        let b = Fact::new(ent(1), rel(5), ent(9));
        let c = Fact::new(ent(2), rel(5), ent(9));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn fact_ordering_is_lexicographic_on_ids() {
        let a = Fact::new(ent(1), rel(5), ent(9));
        let b = Fact::new(ent(1), rel(7), ent(2));
        let c = Fact::new(ent(2), rel(1), ent(1));
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn term_shapes() {
        let v = Term::var("X");
        let e = Term::ent(ent(3));
        assert!(v.is_variable());
        assert!(!e.is_variable());
        assert_eq!(v.to_string(), "?X");
        assert_eq!(e.to_string(), "ent:3");
    }

    #[test]
    fn vars_compare_by_name() {
        assert_eq!(Var::new("X"), Var::new("X"));
        assert_ne!(Var::new("X"), Var::new("Y"));
    }
}
