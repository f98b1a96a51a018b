//! # rekh
//!
//! A knowledge-graph completion engine: grounds mined logical rules against
//! an indexed triple store and fuses the resulting predictions with an
//! external text classifier's output into one ranked, evidence-carrying
//! list per entity. Also selects the support-ranked (relation, tail) class
//! vocabulary that multi-label dataset construction builds its target
//! vectors from.
//!
//! ## Architecture
//!
//! - **Model** (`model`): entities, relations, variables, atoms, facts,
//!   rules, classes, predictions — small immutable value types
//! - **Triple store** (`store`): append-then-freeze composite indices over
//!   one graph partition, behind the narrow `TripleSource` query trait
//! - **Class selection** (`classes`): support-ranked label vocabulary
//! - **Rules** (`rules`): mined-rule parsing, confidence and body-length
//!   filters
//! - **Grounding** (`ground`): variable binding against the store,
//!   head instantiation, per-entity prediction grouping
//! - **Fusion** (`fuse`): best-evidence-wins merge of rule and text
//!   predictions
//! - **Dataset** (`dataset`): the line-oriented interchange formats
//!
//! ## Library usage
//!
//! ```no_run
//! use rekh::model::{EntId, RelId};
//! use rekh::registry::LabelRegistry;
//! use rekh::store::TripleStore;
//!
//! let store = TripleStore::from_triples([
//!     (EntId::new(1), RelId::new(5), EntId::new(9)),
//!     (EntId::new(2), RelId::new(5), EntId::new(9)),
//! ]);
//! let registry = LabelRegistry::from_entries(
//!     [(1, "Sun".into()), (2, "Sirius".into()), (9, "Star".into())],
//!     [(5, "is-a".into())],
//! );
//! let classes = rekh::classes::select_classes(&store, 10, &registry);
//! assert_eq!(classes[0].support, 2);
//! ```

pub mod classes;
pub mod dataset;
pub mod error;
pub mod fuse;
pub mod ground;
pub mod model;
pub mod registry;
pub mod rules;
pub mod store;

pub use error::{RekhError, RekhResult};
pub use model::{Class, EntId, Fact, Pred, RelId, Term, Var};
