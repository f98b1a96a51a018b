//! Rules: a head atom implied by a conjunction of body atoms.

use serde::{Deserialize, Serialize};

use crate::registry::LabelRegistry;

use super::{RelId, Term, Var};

/// A pattern over the graph: (head term, relation, tail term).
///
/// Atoms appear in rule bodies and heads and may contain variables. A fully
/// bound atom with both terms concrete is the pattern form of a
/// [`Fact`](super::Fact).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    /// Head term (subject position).
    pub head: Term,
    /// Relation.
    pub rel: RelId,
    /// Tail term (object position).
    pub tail: Term,
}

impl Atom {
    /// Create a new atom.
    pub fn new(head: Term, rel: RelId, tail: Term) -> Self {
        Self { head, rel, tail }
    }

    /// Variables occurring in this atom, in head-then-tail order.
    pub fn vars(&self) -> Vec<&Var> {
        let mut vars = Vec::new();
        if let Term::Variable(v) = &self.head {
            vars.push(v);
        }
        if let Term::Variable(v) = &self.tail {
            vars.push(v);
        }
        vars
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}, {})", self.rel, self.head, self.tail)
    }
}

/// A mined inference rule: head atom implied by an ordered body of atoms,
/// with a confidence learned by the external miner.
///
/// Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// The implied atom.
    pub head: Atom,
    /// Body atoms; all must hold for the head to be predicted.
    pub body: Vec<Atom>,
    /// Mined confidence in [0, 1].
    pub conf: f32,
}

impl Rule {
    /// Create a rule, clamping the confidence into [0, 1].
    pub fn new(head: Atom, body: Vec<Atom>, conf: f32) -> Self {
        Self {
            head,
            body,
            conf: conf.clamp(0.0, 1.0),
        }
    }

    /// Whether every variable in the head also appears in the body.
    ///
    /// Unsafe rules cannot be grounded: an unbound head variable has no
    /// candidate entities. The grounding engine skips them as unsupported.
    pub fn is_safe(&self) -> bool {
        self.head
            .vars()
            .iter()
            .all(|hv| self.body.iter().any(|atom| atom.vars().contains(hv)))
    }

    /// Render the rule with human-readable labels for logs and reports.
    pub fn render(&self, registry: &LabelRegistry) -> String {
        let atom = |a: &Atom| {
            let term = |t: &Term| match t {
                Term::Variable(v) => v.to_string(),
                Term::Entity(e) => registry.resolve_ent(*e),
            };
            format!("{}({}, {})", registry.resolve_rel(a.rel), term(&a.head), term(&a.tail))
        };
        let body: Vec<String> = self.body.iter().map(atom).collect();
        format!("{:.3}: {} <= {}", self.conf, atom(&self.head), body.join(", "))
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body: Vec<String> = self.body.iter().map(|a| a.to_string()).collect();
        write!(f, "{:.3}: {} <= {}", self.conf, self.head, body.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntId;

    fn rule_xy(head: Atom, body: Atom) -> Rule {
        Rule::new(head, vec![body], 0.9)
    }

    #[test]
    fn safe_rule_shares_variable() {
        let rule = rule_xy(
            Atom::new(Term::var("X"), RelId::new(7), Term::ent(EntId::new(2))),
            Atom::new(Term::var("X"), RelId::new(5), Term::ent(EntId::new(9))),
        );
        assert!(rule.is_safe());
    }

    #[test]
    fn unsafe_rule_has_unbound_head_variable() {
        let rule = rule_xy(
            Atom::new(Term::var("Y"), RelId::new(7), Term::ent(EntId::new(2))),
            Atom::new(Term::var("X"), RelId::new(5), Term::ent(EntId::new(9))),
        );
        assert!(!rule.is_safe());
    }

    #[test]
    fn ground_head_is_trivially_safe() {
        let rule = rule_xy(
            Atom::new(
                Term::ent(EntId::new(1)),
                RelId::new(7),
                Term::ent(EntId::new(2)),
            ),
            Atom::new(Term::var("X"), RelId::new(5), Term::ent(EntId::new(9))),
        );
        assert!(rule.is_safe());
    }

    #[test]
    fn confidence_is_clamped() {
        let rule = Rule::new(
            Atom::new(Term::var("X"), RelId::new(1), Term::ent(EntId::new(2))),
            vec![Atom::new(
                Term::var("X"),
                RelId::new(3),
                Term::ent(EntId::new(4)),
            )],
            1.7,
        );
        assert_eq!(rule.conf, 1.0);
    }

    #[test]
    fn render_resolves_labels_via_registry() {
        use crate::registry::LabelRegistry;

        let registry = LabelRegistry::from_entries(
            [(2, "Hawaii".to_string()), (9, "USA".to_string())],
            [(5, "part-of".to_string()), (7, "located-in".to_string())],
        );
        let rule = rule_xy(
            Atom::new(Term::var("X"), RelId::new(7), Term::ent(EntId::new(2))),
            Atom::new(Term::var("X"), RelId::new(5), Term::ent(EntId::new(9))),
        );
        assert_eq!(
            rule.render(&registry),
            "0.900: located-in(?X, Hawaii) <= part-of(?X, USA)"
        );
    }

    #[test]
    fn display_renders_implication() {
        let rule = rule_xy(
            Atom::new(Term::var("X"), RelId::new(7), Term::ent(EntId::new(2))),
            Atom::new(Term::var("X"), RelId::new(5), Term::ent(EntId::new(9))),
        );
        let shown = rule.to_string();
        assert!(shown.contains("<="));
        assert!(shown.contains("rel:7(?X, ent:2)"));
    }
}
