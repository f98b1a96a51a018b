//! Labels txt: the id → label vocabulary tables.
//!
//! First line is the entry count; each following line is `label<TAB>id`.
//! Labels may contain spaces, which is why the separator is a tab.

use std::fs;
use std::path::Path;

use crate::error::DatasetError;

/// Read a labels file into (id, label) entries.
pub fn read_labels_txt(path: &Path) -> Result<Vec<(u64, String)>, DatasetError> {
    let content = fs::read_to_string(path).map_err(|e| DatasetError::io(path, e))?;
    let mut lines = content.lines().enumerate();

    let (_, count_line) = lines
        .next()
        .ok_or_else(|| DatasetError::parse(path, 1, "empty file, expected a count header"))?;
    let declared: usize = count_line.trim().parse().map_err(|e| {
        DatasetError::parse(path, 1, format!("bad count header `{count_line}`: {e}"))
    })?;

    let mut entries = Vec::with_capacity(declared);
    for (idx, line) in lines {
        let lineno = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let (label, id) = line.rsplit_once('\t').ok_or_else(|| {
            DatasetError::parse(path, lineno, "expected `label<TAB>id`")
        })?;
        let id: u64 = id.trim().parse().map_err(|e| {
            DatasetError::parse(path, lineno, format!("bad id `{id}`: {e}"))
        })?;

        entries.push((id, label.to_string()));
    }

    if entries.len() != declared {
        return Err(DatasetError::parse(
            path,
            1,
            format!("count header says {declared} entries, file has {}", entries.len()),
        ));
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_labels_with_spaces() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "2").unwrap();
        writeln!(file, "Barack Obama\t0").unwrap();
        writeln!(file, "Hawaii\t1").unwrap();

        let entries = read_labels_txt(file.path()).unwrap();
        assert_eq!(
            entries,
            vec![(0, "Barack Obama".to_string()), (1, "Hawaii".to_string())]
        );
    }

    #[test]
    fn missing_tab_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1").unwrap();
        writeln!(file, "Hawaii 1").unwrap();

        let err = read_labels_txt(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
