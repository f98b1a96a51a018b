//! Class selection: support-ranked (relation, tail) label vocabulary.
//!
//! Scans every distinct (rel, tail) pattern in a partition's triple store,
//! ranks by support, and keeps the top `k` as the multi-label classification
//! target. The ordering is total (support desc, then rel id, then tail id)
//! so repeated runs over the same store produce the same vocabulary.

use crate::model::Class;
use crate::registry::LabelRegistry;
use crate::store::TripleStore;

/// Select the top-`k` (relation, tail) patterns by support.
///
/// Frequency is support normalized by the registry's total entity count
/// (a score in [0, 1], not a probability). If fewer than `k` distinct
/// patterns exist, all of them are returned.
pub fn select_classes(store: &TripleStore, k: usize, registry: &LabelRegistry) -> Vec<Class> {
    let total_ents = registry.ent_count();

    let mut patterns: Vec<_> = store.rel_tail_patterns().collect();
    patterns.sort_by(|&(rel_a, tail_a, sup_a), &(rel_b, tail_b, sup_b)| {
        sup_b
            .cmp(&sup_a)
            .then(rel_a.cmp(&rel_b))
            .then(tail_a.cmp(&tail_b))
    });
    patterns.truncate(k);

    let selected: Vec<Class> = patterns
        .into_iter()
        .map(|(rel, tail, support)| Class {
            rel,
            tail,
            support,
            freq: if total_ents == 0 {
                0.0
            } else {
                support as f64 / total_ents as f64
            },
            label: format!("{} {}", registry.resolve_rel(rel), registry.resolve_ent(tail)),
        })
        .collect();

    tracing::info!(
        requested = k,
        selected = selected.len(),
        triples = store.len(),
        "selected class vocabulary"
    );

    selected
}
