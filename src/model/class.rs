//! Classes: (relation, tail) patterns chosen as multi-label target dimensions.

use serde::{Deserialize, Serialize};

use super::{EntId, RelId};

/// One output dimension of the multi-label classification target.
///
/// A class is a (relation, tail) pattern; an entity "has" the class when
/// (entity, relation, tail) is in the graph. Created once by class selection,
/// immutable afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    /// Relation of the pattern.
    pub rel: RelId,
    /// Tail entity of the pattern.
    pub tail: EntId,
    /// Number of distinct head entities matching the pattern in the store.
    pub support: usize,
    /// Support normalized by the total entity vocabulary size, in [0, 1].
    pub freq: f64,
    /// Human-readable label: relation label and tail label joined by a space.
    pub label: String,
}

impl std::fmt::Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{} {} | support {} | freq {:.4}]",
            self.label, self.rel, self.tail, self.support, self.freq
        )
    }
}
