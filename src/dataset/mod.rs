//! On-disk dataset formats.
//!
//! Line-oriented text formats shared with the surrounding pipeline:
//!
//! - **triples txt** — `count` header, then `head tail rel` id rows
//! - **labels txt** — `count` header, then `label<TAB>id` rows
//! - **contexts txt** — `ent<TAB>sentence` rows, many per entity
//! - **classes tsv** — `rel<TAB>tail<TAB>freq<TAB>label` rows
//! - **samples tsv** — `ent<TAB>flag...<TAB>sentence` multi-hot dataset rows
//!
//! Every reader reports failures as [`DatasetError`](crate::error::DatasetError)
//! with the offending path and line.

pub mod classes_tsv;
pub mod contexts_txt;
pub mod labels_txt;
pub mod samples_tsv;
pub mod triples_txt;

pub use classes_tsv::{read_classes_tsv, write_classes_tsv};
pub use contexts_txt::read_contexts_txt;
pub use labels_txt::read_labels_txt;
pub use samples_tsv::{Sample, build_samples, write_samples_tsv};
pub use triples_txt::read_triples_txt;
