//! Prediction fusion: merging rule-grounding and text-classifier output
//! into one ranked, evidence-carrying list per entity.
//!
//! Either mechanism alone is sufficient grounds for a claim, so the fused
//! confidence is the maximum of the two sources, not an average. Output
//! order is deterministic: the fact union is walked in [`Fact`] order and
//! the final sort is stable, so equal-confidence predictions stay ordered
//! by fact identity no matter how the inputs were permuted.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rayon::prelude::*;

use crate::model::{EntId, Fact, Pred};

/// Fuse one entity's text and rule predictions.
///
/// Sentences come from the text source, supporting rules from the rule
/// source, confidence is the per-fact maximum (0 for an absent source).
/// A fact appears in the output iff it appears in at least one input.
/// Within one source a duplicated fact is resolved later-entry-wins.
pub fn fuse(text_preds: &[Pred], rule_preds: &[Pred]) -> Vec<Pred> {
    let index = |preds: &[Pred]| -> HashMap<Fact, Pred> {
        preds.iter().map(|p| (p.fact, p.clone())).collect()
    };
    let by_fact_text = index(text_preds);
    let by_fact_rule = index(rule_preds);

    let facts: BTreeSet<Fact> = by_fact_text
        .keys()
        .chain(by_fact_rule.keys())
        .copied()
        .collect();

    let mut fused: Vec<Pred> = facts
        .into_iter()
        .map(|fact| {
            let text = by_fact_text.get(&fact);
            let rule = by_fact_rule.get(&fact);

            let text_conf = text.map_or(0.0, |p| p.conf);
            let rule_conf = rule.map_or(0.0, |p| p.conf);

            Pred {
                fact,
                conf: text_conf.max(rule_conf),
                sents: text.map(|p| p.sents.clone()).unwrap_or_default(),
                rules: rule.map(|p| p.rules.clone()).unwrap_or_default(),
            }
        })
        .collect();

    fused.sort_by(|a, b| b.conf.partial_cmp(&a.conf).unwrap_or(std::cmp::Ordering::Equal));
    fused
}

/// Fuse every entity present in either per-entity prediction map.
///
/// Entities are independent, so the merge runs in parallel.
pub fn fuse_all(
    text: &BTreeMap<EntId, Vec<Pred>>,
    rule: &BTreeMap<EntId, Vec<Pred>>,
) -> BTreeMap<EntId, Vec<Pred>> {
    let ents: BTreeSet<EntId> = text.keys().chain(rule.keys()).copied().collect();

    ents.into_par_iter()
        .map(|ent| {
            let text_preds = text.get(&ent).map(Vec::as_slice).unwrap_or(&[]);
            let rule_preds = rule.get(&ent).map(Vec::as_slice).unwrap_or(&[]);
            (ent, fuse(text_preds, rule_preds))
        })
        .collect()
}
