//! Label registry: entity and relation id → label maps.
//!
//! The [`LabelRegistry`] holds the human-readable vocabularies the pipeline
//! resolves ids against: rule parsing validates ids exist, class selection
//! builds class labels, and reports render rules with names instead of raw
//! ids. Loaded once per run from the label tables, read-only afterward.

use dashmap::DashMap;

use crate::model::{EntId, RelId};

/// Id → label maps for entities and relations.
///
/// The entity map's size doubles as the total entity vocabulary count used
/// to normalize class frequencies.
pub struct LabelRegistry {
    ent_labels: DashMap<EntId, String>,
    rel_labels: DashMap<RelId, String>,
}

impl LabelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            ent_labels: DashMap::new(),
            rel_labels: DashMap::new(),
        }
    }

    /// Build a registry from (id, label) entry lists.
    pub fn from_entries(
        ents: impl IntoIterator<Item = (u64, String)>,
        rels: impl IntoIterator<Item = (u64, String)>,
    ) -> Self {
        let registry = Self::new();
        for (id, label) in ents {
            registry.insert_ent(EntId::new(id), label);
        }
        for (id, label) in rels {
            registry.insert_rel(RelId::new(id), label);
        }
        registry
    }

    /// Register a single entity label.
    pub fn insert_ent(&self, id: EntId, label: impl Into<String>) {
        self.ent_labels.insert(id, label.into());
    }

    /// Register a single relation label.
    pub fn insert_rel(&self, id: RelId, label: impl Into<String>) {
        self.rel_labels.insert(id, label.into());
    }

    /// Look up an entity label.
    pub fn ent_label(&self, id: EntId) -> Option<String> {
        self.ent_labels.get(&id).map(|r| r.value().clone())
    }

    /// Look up a relation label.
    pub fn rel_label(&self, id: RelId) -> Option<String> {
        self.rel_labels.get(&id).map(|r| r.value().clone())
    }

    /// Whether an entity id is in the vocabulary.
    pub fn has_ent(&self, id: EntId) -> bool {
        self.ent_labels.contains_key(&id)
    }

    /// Whether a relation id is in the vocabulary.
    pub fn has_rel(&self, id: RelId) -> bool {
        self.rel_labels.contains_key(&id)
    }

    /// Resolve an entity to a display string, falling back to `ent:{id}`.
    pub fn resolve_ent(&self, id: EntId) -> String {
        self.ent_label(id).unwrap_or_else(|| id.to_string())
    }

    /// Resolve a relation to a display string, falling back to `rel:{id}`.
    pub fn resolve_rel(&self, id: RelId) -> String {
        self.rel_label(id).unwrap_or_else(|| id.to_string())
    }

    /// Total entity vocabulary size (the class-frequency normalizer).
    pub fn ent_count(&self) -> usize {
        self.ent_labels.len()
    }

    /// Total relation vocabulary size.
    pub fn rel_count(&self) -> usize {
        self.rel_labels.len()
    }
}

impl Default for LabelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LabelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelRegistry")
            .field("ents", &self.ent_count())
            .field("rels", &self.rel_count())
            .finish()
    }
}
