//! Rule store: converting mined-rule records into [`Rule`]s and filtering them.
//!
//! Mined rules arrive as raw records (numeric ids, variable tokens, a
//! confidence); [`parse_rule`] resolves them against the label registry and
//! rejects records the engine cannot trust (empty body, ids outside the
//! vocabulary). Batch loading skips bad records with a warning instead of
//! aborting — one corrupt line must not sink a mining run.

pub mod anyburl;

use std::path::Path;

use crate::error::{DatasetError, RuleError};
use crate::model::rule::{Atom, Rule};
use crate::model::{EntId, RelId, Term};
use crate::registry::LabelRegistry;

pub use anyburl::{RawAtom, RawRule, RawTerm, read_rules_tsv};

/// Convert a raw mined-rule record into a [`Rule`], resolving ids against
/// the registry.
///
/// Fails with [`RuleError`] if the body is empty or any id is absent from
/// the label maps.
pub fn parse_rule(raw: &RawRule, registry: &LabelRegistry) -> Result<Rule, RuleError> {
    if raw.body.is_empty() {
        return Err(RuleError::EmptyBody);
    }

    let atom = |raw_atom: &RawAtom| -> Result<Atom, RuleError> {
        let rel = RelId::new(raw_atom.rel);
        if !registry.has_rel(rel) {
            return Err(RuleError::UnknownRelation { id: raw_atom.rel });
        }
        let term = |raw_term: &RawTerm| -> Result<Term, RuleError> {
            match raw_term {
                RawTerm::Var(name) => Ok(Term::var(name.clone())),
                RawTerm::Ent(id) => {
                    let ent = EntId::new(*id);
                    if !registry.has_ent(ent) {
                        return Err(RuleError::UnknownEntity { id: *id });
                    }
                    Ok(Term::Entity(ent))
                }
            }
        };
        Ok(Atom::new(term(&raw_atom.head)?, rel, term(&raw_atom.tail)?))
    };

    let head = atom(&raw.head)?;
    let body = raw.body.iter().map(atom).collect::<Result<Vec<_>, _>>()?;

    Ok(Rule::new(head, body, raw.conf))
}

/// Result of a batch rule load: parsed rules plus the number of records
/// skipped as malformed or out-of-vocabulary.
#[derive(Debug)]
pub struct RuleLoad {
    /// Successfully parsed rules, in file order.
    pub rules: Vec<Rule>,
    /// Records dropped with a warning.
    pub skipped: usize,
}

/// Read a mined-rules TSV and parse every record, skipping bad ones.
///
/// A record fails either as malformed TSV or because it does not resolve
/// against the registry; both are fatal for that rule only.
pub fn load_rules(path: &Path, registry: &LabelRegistry) -> Result<RuleLoad, DatasetError> {
    let raw_rules = read_rules_tsv(path)?;

    let mut rules = Vec::with_capacity(raw_rules.len());
    let mut skipped = 0;
    for (line, raw) in raw_rules {
        match raw.and_then(|raw| parse_rule(&raw, registry)) {
            Ok(rule) => rules.push(rule),
            Err(e) => {
                tracing::warn!(line, error = %e, "skipping unparseable rule");
                skipped += 1;
            }
        }
    }

    tracing::info!(
        loaded = rules.len(),
        skipped,
        path = %path.display(),
        "loaded mined rules"
    );

    Ok(RuleLoad { rules, skipped })
}

/// Keep rules with confidence strictly greater than `threshold`.
pub fn filter_by_confidence(rules: Vec<Rule>, threshold: f32) -> Vec<Rule> {
    rules.into_iter().filter(|r| r.conf > threshold).collect()
}

/// Keep rules whose body has exactly `n` atoms.
///
/// The grounding engine handles single-atom bodies only; longer rules stay
/// in the store for reporting but are not grounded.
pub fn filter_by_body_length(rules: Vec<Rule>, n: usize) -> Vec<Rule> {
    rules.into_iter().filter(|r| r.body.len() == n).collect()
}

/// Sort rules by confidence, descending. Stable, so equal-confidence rules
/// keep their file order.
pub fn sort_by_confidence(rules: &mut [Rule]) {
    rules.sort_by(|a, b| b.conf.partial_cmp(&a.conf).unwrap_or(std::cmp::Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> LabelRegistry {
        LabelRegistry::from_entries(
            (0..20).map(|i| (i, format!("e{i}"))),
            (0..10).map(|i| (i, format!("r{i}"))),
        )
    }

    fn raw(conf: f32, head: RawAtom, body: Vec<RawAtom>) -> RawRule {
        RawRule { conf, head, body }
    }

    fn var_atom(rel: u64, tail: u64) -> RawAtom {
        RawAtom {
            head: RawTerm::Var("X".into()),
            rel,
            tail: RawTerm::Ent(tail),
        }
    }

    #[test]
    fn parse_resolves_ids_and_variables() {
        let rule = parse_rule(&raw(0.9, var_atom(7, 2), vec![var_atom(5, 9)]), &registry())
            .unwrap();
        assert_eq!(rule.conf, 0.9);
        assert_eq!(rule.head.rel, RelId::new(7));
        assert!(rule.head.head.is_variable());
        assert_eq!(rule.body.len(), 1);
        assert!(rule.is_safe());
    }

    #[test]
    fn empty_body_is_rejected() {
        let err = parse_rule(&raw(0.9, var_atom(7, 2), vec![]), &registry()).unwrap_err();
        assert!(matches!(err, RuleError::EmptyBody));
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let err = parse_rule(&raw(0.9, var_atom(7, 99), vec![var_atom(5, 9)]), &registry())
            .unwrap_err();
        assert!(matches!(err, RuleError::UnknownEntity { id: 99 }));

        let err = parse_rule(&raw(0.9, var_atom(77, 2), vec![var_atom(5, 9)]), &registry())
            .unwrap_err();
        assert!(matches!(err, RuleError::UnknownRelation { id: 77 }));
    }

    #[test]
    fn confidence_filter_is_strict() {
        let rules = vec![
            parse_rule(&raw(0.8, var_atom(7, 2), vec![var_atom(5, 9)]), &registry()).unwrap(),
            parse_rule(&raw(0.81, var_atom(7, 3), vec![var_atom(5, 9)]), &registry()).unwrap(),
        ];
        let kept = filter_by_confidence(rules, 0.8);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].conf, 0.81);
    }

    #[test]
    fn body_length_filter_keeps_exact_length() {
        let registry = registry();
        let one = parse_rule(&raw(0.9, var_atom(7, 2), vec![var_atom(5, 9)]), &registry).unwrap();
        let two = parse_rule(
            &raw(0.9, var_atom(7, 2), vec![var_atom(5, 9), var_atom(3, 4)]),
            &registry,
        )
        .unwrap();
        let kept = filter_by_body_length(vec![one, two], 1);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].body.len(), 1);
    }

    #[test]
    fn sort_is_confidence_descending() {
        let registry = registry();
        let mut rules = vec![
            parse_rule(&raw(0.5, var_atom(7, 2), vec![var_atom(5, 9)]), &registry).unwrap(),
            parse_rule(&raw(0.9, var_atom(7, 3), vec![var_atom(5, 9)]), &registry).unwrap(),
            parse_rule(&raw(0.7, var_atom(7, 4), vec![var_atom(5, 9)]), &registry).unwrap(),
        ];
        sort_by_confidence(&mut rules);
        let confs: Vec<f32> = rules.iter().map(|r| r.conf).collect();
        assert_eq!(confs, vec![0.9, 0.7, 0.5]);
    }
}
