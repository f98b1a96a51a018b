//! Triples txt: one graph partition as whitespace-separated id rows.
//!
//! The first line is the number of triples; each following line is
//! `head tail rel` (the tail comes second, matching the upstream split
//! files). The declared count must match the number of rows.

use std::fs;
use std::path::Path;

use crate::error::DatasetError;
use crate::model::{EntId, RelId};

/// Read a triples file into (head, rel, tail) tuples.
pub fn read_triples_txt(path: &Path) -> Result<Vec<(EntId, RelId, EntId)>, DatasetError> {
    let content = fs::read_to_string(path).map_err(|e| DatasetError::io(path, e))?;
    let mut lines = content.lines().enumerate();

    let (_, count_line) = lines
        .next()
        .ok_or_else(|| DatasetError::parse(path, 1, "empty file, expected a count header"))?;
    let declared: usize = count_line.trim().parse().map_err(|e| {
        DatasetError::parse(path, 1, format!("bad count header `{count_line}`: {e}"))
    })?;

    let mut triples = Vec::with_capacity(declared);
    for (idx, line) in lines {
        let lineno = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(DatasetError::parse(
                path,
                lineno,
                format!("expected `head tail rel`, found {} fields", fields.len()),
            ));
        }

        let id = |field: &str| -> Result<u64, DatasetError> {
            field.parse().map_err(|e| {
                DatasetError::parse(path, lineno, format!("bad id `{field}`: {e}"))
            })
        };

        let head = EntId::new(id(fields[0])?);
        let tail = EntId::new(id(fields[1])?);
        let rel = RelId::new(id(fields[2])?);
        triples.push((head, rel, tail));
    }

    if triples.len() != declared {
        return Err(DatasetError::parse(
            path,
            1,
            format!("count header says {declared} triples, file has {}", triples.len()),
        ));
    }

    Ok(triples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_head_tail_rel_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "2").unwrap();
        writeln!(file, "1 9 5").unwrap();
        writeln!(file, "2 9 5").unwrap();

        let triples = read_triples_txt(file.path()).unwrap();
        assert_eq!(
            triples,
            vec![
                (EntId::new(1), RelId::new(5), EntId::new(9)),
                (EntId::new(2), RelId::new(5), EntId::new(9)),
            ]
        );
    }

    #[test]
    fn count_mismatch_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "3").unwrap();
        writeln!(file, "1 9 5").unwrap();

        let err = read_triples_txt(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn bad_row_reports_its_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1").unwrap();
        writeln!(file, "1 9").unwrap();

        let err = read_triples_txt(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
