//! Classes tsv: the selected label vocabulary on disk.
//!
//! One class per line: `rel<TAB>tail<TAB>support<TAB>freq<TAB>label`,
//! in selection order (support-descending).

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::DatasetError;
use crate::model::{Class, EntId, RelId};

/// Write classes in selection order.
pub fn write_classes_tsv(path: &Path, classes: &[Class]) -> Result<(), DatasetError> {
    let mut out = fs::File::create(path).map_err(|e| DatasetError::io(path, e))?;
    for class in classes {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            class.rel.get(),
            class.tail.get(),
            class.support,
            class.freq,
            class.label
        )
        .map_err(|e| DatasetError::io(path, e))?;
    }
    Ok(())
}

/// Read classes back, preserving file order.
pub fn read_classes_tsv(path: &Path) -> Result<Vec<Class>, DatasetError> {
    let content = fs::read_to_string(path).map_err(|e| DatasetError::io(path, e))?;

    let mut classes = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let lineno = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.splitn(5, '\t').collect();
        if fields.len() != 5 {
            return Err(DatasetError::parse(
                path,
                lineno,
                format!("expected 5 tab-separated fields, found {}", fields.len()),
            ));
        }

        let parse = |name: &str, field: &str| -> Result<u64, DatasetError> {
            field.parse().map_err(|e| {
                DatasetError::parse(path, lineno, format!("bad {name} `{field}`: {e}"))
            })
        };

        classes.push(Class {
            rel: RelId::new(parse("relation id", fields[0])?),
            tail: EntId::new(parse("tail id", fields[1])?),
            support: parse("support", fields[2])? as usize,
            freq: fields[3].parse().map_err(|e| {
                DatasetError::parse(path, lineno, format!("bad freq `{}`: {e}", fields[3]))
            })?,
            label: fields[4].to_string(),
        });
    }

    Ok(classes)
}
