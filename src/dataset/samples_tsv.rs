//! Samples tsv: multi-hot classification rows, one entity per line.
//!
//! Row layout: `ent<TAB>flag...<TAB>sentence` with one 0/1 flag per class,
//! flags in class-vocabulary order. The sentence column carries the
//! entity's first context sentence; entities without any sentence evidence
//! cannot become samples and are skipped with a logged identifier.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use rayon::prelude::*;

use crate::error::DatasetError;
use crate::model::{Class, EntId};
use crate::store::TripleStore;

/// One dataset row: an entity, its multi-hot class labels, and its
/// sentence evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// The entity this row describes.
    pub ent: EntId,
    /// One flag per class, in class-vocabulary order.
    pub labels: Vec<bool>,
    /// Sentence evidence attached to the row.
    pub sent: String,
}

/// Build one sample per context-bearing entity.
///
/// A flag is set when the entity has that class's (rel, tail) pattern in the
/// store. Entities with an empty sentence list are skipped and logged, not
/// silently dropped. Rows come back in entity-id order.
pub fn build_samples(
    store: &TripleStore,
    classes: &[Class],
    contexts: &BTreeMap<EntId, Vec<String>>,
) -> Vec<Sample> {
    let samples: Vec<Sample> = contexts
        .par_iter()
        .filter_map(|(&ent, sents)| {
            let Some(first_sent) = sents.first() else {
                tracing::warn!(ent = %ent, "entity has no sentence evidence, skipping");
                return None;
            };

            let labels = classes
                .iter()
                .map(|class| store.heads_for(class.rel, class.tail).contains(&ent))
                .collect();

            Some(Sample {
                ent,
                labels,
                sent: first_sent.clone(),
            })
        })
        .collect();

    let mut samples = samples;
    samples.sort_by_key(|s| s.ent);

    tracing::info!(
        samples = samples.len(),
        classes = classes.len(),
        "built dataset samples"
    );

    samples
}

/// Write samples as TSV rows.
pub fn write_samples_tsv(path: &Path, samples: &[Sample]) -> Result<(), DatasetError> {
    let mut out = fs::File::create(path).map_err(|e| DatasetError::io(path, e))?;
    for sample in samples {
        let flags: Vec<&str> = sample
            .labels
            .iter()
            .map(|&flag| if flag { "1" } else { "0" })
            .collect();
        writeln!(
            out,
            "{}\t{}\t{}",
            sample.ent.get(),
            flags.join("\t"),
            sample.sent
        )
        .map_err(|e| DatasetError::io(path, e))?;
    }
    Ok(())
}
