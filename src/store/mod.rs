//! Indexed triple store for one graph partition.
//!
//! The store is append-then-freeze: bulk-loaded once per partition
//! (train/valid/test), indexed, and then only queried. Two composite indices
//! back the queries grounding and class selection actually issue:
//! `(rel, tail) → heads` and `(head, rel) → tails`. Posting lists preserve
//! insertion order so binding enumeration is deterministic across runs.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::model::{EntId, RelId};

/// Narrow query capability the grounding engine is written against.
///
/// Live graph backends (with sessions, transactions, retries) implement this
/// by delegating to their driver; the in-memory [`TripleStore`] implements it
/// infallibly. Queries are read-only and idempotent.
pub trait TripleSource {
    /// All heads `h` such that `(h, rel, tail)` is stored.
    fn heads_by_rel_tail(&self, rel: RelId, tail: EntId) -> Result<Vec<EntId>, StoreError>;

    /// All tails `t` such that `(head, rel, t)` is stored.
    fn tails_by_head_rel(&self, head: EntId, rel: RelId) -> Result<Vec<EntId>, StoreError>;
}

/// In-memory indexed collection of (head, rel, tail) triples.
///
/// No deduplication is performed: counts reflect the raw multiplicity of the
/// input (typical inputs are already deduplicated at the source).
pub struct TripleStore {
    /// `(rel, tail)` → heads, in insertion order.
    by_rel_tail: HashMap<(RelId, EntId), Vec<EntId>>,
    /// `(head, rel)` → tails, in insertion order.
    by_head_rel: HashMap<(EntId, RelId), Vec<EntId>>,
    /// Total number of stored triples.
    len: usize,
}

impl TripleStore {
    /// Bulk-load triples and build both indices.
    pub fn from_triples(triples: impl IntoIterator<Item = (EntId, RelId, EntId)>) -> Self {
        let mut by_rel_tail: HashMap<(RelId, EntId), Vec<EntId>> = HashMap::new();
        let mut by_head_rel: HashMap<(EntId, RelId), Vec<EntId>> = HashMap::new();
        let mut len = 0;

        for (head, rel, tail) in triples {
            by_rel_tail.entry((rel, tail)).or_default().push(head);
            by_head_rel.entry((head, rel)).or_default().push(tail);
            len += 1;
        }

        Self {
            by_rel_tail,
            by_head_rel,
            len,
        }
    }

    /// All heads pointing at `tail` via `rel`. Empty if the pattern is absent.
    pub fn heads_for(&self, rel: RelId, tail: EntId) -> &[EntId] {
        self.by_rel_tail
            .get(&(rel, tail))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All tails `head` points at via `rel`. Empty if the pattern is absent.
    pub fn tails_for(&self, head: EntId, rel: RelId) -> &[EntId] {
        self.by_head_rel
            .get(&(head, rel))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Support of a (rel, tail) pattern: cardinality of [`heads_for`](Self::heads_for).
    pub fn count_rel_tail(&self, rel: RelId, tail: EntId) -> usize {
        self.heads_for(rel, tail).len()
    }

    /// Every distinct (rel, tail) pattern with its support.
    ///
    /// Iteration order is unspecified; class selection imposes its own total
    /// order downstream.
    pub fn rel_tail_patterns(&self) -> impl Iterator<Item = (RelId, EntId, usize)> + '_ {
        self.by_rel_tail
            .iter()
            .map(|(&(rel, tail), heads)| (rel, tail, heads.len()))
    }

    /// Total number of stored triples.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the store holds no triples.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl TripleSource for TripleStore {
    fn heads_by_rel_tail(&self, rel: RelId, tail: EntId) -> Result<Vec<EntId>, StoreError> {
        Ok(self.heads_for(rel, tail).to_vec())
    }

    fn tails_by_head_rel(&self, head: EntId, rel: RelId) -> Result<Vec<EntId>, StoreError> {
        Ok(self.tails_for(head, rel).to_vec())
    }
}

impl std::fmt::Debug for TripleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripleStore")
            .field("triples", &self.len)
            .field("rel_tail_patterns", &self.by_rel_tail.len())
            .finish()
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

    fn store() -> TripleStore {
        TripleStore::from_triples([
            (ent(1), rel(5), ent(9)),
            (ent(2), rel(5), ent(9)),
            (ent(3), rel(5), ent(9)),
            (ent(1), rel(7), ent(2)),
        ])
    }

    #[test]
    fn heads_for_returns_all_matching_heads() {
        let store = store();
        assert_eq!(store.heads_for(rel(5), ent(9)), &[ent(1), ent(2), ent(3)]);
    }

    #[test]
    fn tails_for_returns_all_matching_tails() {
        let store = store();
        assert_eq!(store.tails_for(ent(1), rel(5)), &[ent(9)]);
        assert_eq!(store.tails_for(ent(1), rel(7)), &[ent(2)]);
    }

    #[test]
    fn unknown_patterns_yield_empty_not_error() {
        let store = store();
        assert!(store.heads_for(rel(99), ent(1)).is_empty());
        assert!(store.tails_for(ent(99), rel(5)).is_empty());

        let empty = TripleStore::from_triples([]);
        assert!(empty.is_empty());
        assert!(empty.heads_for(rel(5), ent(9)).is_empty());
    }

    #[test]
    fn count_equals_query_cardinality() {
        let store = store();
        assert_eq!(store.count_rel_tail(rel(5), ent(9)), 3);
        assert_eq!(store.count_rel_tail(rel(7), ent(2)), 1);
        assert_eq!(store.count_rel_tail(rel(7), ent(9)), 0);
    }

    #[test]
    fn multiplicity_is_preserved() {
        let store = TripleStore::from_triples([
            (ent(1), rel(5), ent(9)),
            (ent(1), rel(5), ent(9)),
        ]);
        assert_eq!(store.count_rel_tail(rel(5), ent(9)), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn posting_lists_keep_insertion_order() {
        let store = TripleStore::from_triples([
            (ent(3), rel(5), ent(9)),
            (ent(1), rel(5), ent(9)),
            (ent(2), rel(5), ent(9)),
        ]);
        assert_eq!(store.heads_for(rel(5), ent(9)), &[ent(3), ent(1), ent(2)]);
    }

    #[test]
    fn patterns_enumerate_distinct_rel_tail_pairs() {
        let store = store();
        let mut patterns: Vec<_> = store.rel_tail_patterns().collect();
        patterns.sort_by_key(|&(r, t, _)| (r, t));
        assert_eq!(patterns, vec![(rel(5), ent(9), 3), (rel(7), ent(2), 1)]);
    }

    #[test]
    fn triple_source_impl_matches_direct_queries() {
        let store = store();
        assert_eq!(
            store.heads_by_rel_tail(rel(5), ent(9)).unwrap(),
            vec![ent(1), ent(2), ent(3)]
        );
        assert_eq!(
            store.tails_by_head_rel(ent(1), rel(7)).unwrap(),
            vec![ent(2)]
        );
    }
}
