//! Contexts txt: sentence evidence per entity.
//!
//! Each line is `ent<TAB>sentence`; an entity may have any number of lines.
//! No count header — sentence collections are ragged by nature.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::DatasetError;
use crate::model::EntId;

/// Read a contexts file, grouping sentences by entity.
///
/// Sentence order within an entity follows file order.
pub fn read_contexts_txt(path: &Path) -> Result<BTreeMap<EntId, Vec<String>>, DatasetError> {
    let content = fs::read_to_string(path).map_err(|e| DatasetError::io(path, e))?;

    let mut contexts: BTreeMap<EntId, Vec<String>> = BTreeMap::new();
    for (idx, line) in content.lines().enumerate() {
        let lineno = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let (ent, sentence) = line.split_once('\t').ok_or_else(|| {
            DatasetError::parse(path, lineno, "expected `ent<TAB>sentence`")
        })?;
        let ent: u64 = ent.trim().parse().map_err(|e| {
            DatasetError::parse(path, lineno, format!("bad entity id `{ent}`: {e}"))
        })?;

        contexts
            .entry(EntId::new(ent))
            .or_default()
            .push(sentence.trim().to_string());
    }

    Ok(contexts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn groups_sentences_by_entity() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0\tObama was born in Hawaii.").unwrap();
        writeln!(file, "1\tHawaii is a US state.").unwrap();
        writeln!(file, "0\tObama served two terms.").unwrap();

        let contexts = read_contexts_txt(file.path()).unwrap();
        assert_eq!(contexts.len(), 2);
        assert_eq!(contexts[&EntId::new(0)].len(), 2);
        assert_eq!(contexts[&EntId::new(0)][0], "Obama was born in Hawaii.");
        assert_eq!(contexts[&EntId::new(1)].len(), 1);
    }

    #[test]
    fn missing_tab_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 no tab here").unwrap();

        assert!(read_contexts_txt(file.path()).is_err());
    }
}
