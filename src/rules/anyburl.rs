//! AnyBURL rules TSV: the mined-rule interchange format.
//!
//! One rule per line, four tab-separated fields:
//!
//! ```text
//! preds<TAB>support<TAB>conf<TAB>HEAD <= BODY[, BODY]*
//! ```
//!
//! An atom is `REL(TERM, TERM)` where `REL` is a numeric relation id and a
//! term is either a numeric entity id or an uppercase variable token
//! (`X`, `Y`, ...). The leading `preds`/`support` mining statistics are
//! skipped; only the confidence and the rule string matter downstream.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{DatasetError, RuleError};

/// A term in a raw (unresolved) rule atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTerm {
    /// Numeric entity id.
    Ent(u64),
    /// Variable token as written, e.g. `X`.
    Var(String),
}

/// A raw rule atom: numeric relation id plus two terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAtom {
    pub head: RawTerm,
    pub rel: u64,
    pub tail: RawTerm,
}

/// A mined-rule record as read from the TSV, before id resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRule {
    pub conf: f32,
    pub head: RawAtom,
    pub body: Vec<RawAtom>,
}

fn atom_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+)\(\s*([A-Za-z0-9]+)\s*,\s*([A-Za-z0-9]+)\s*\)")
            .expect("atom regex is valid")
    })
}

fn parse_term(token: &str) -> Result<RawTerm, String> {
    if token.chars().all(|c| c.is_ascii_digit()) {
        token
            .parse::<u64>()
            .map(RawTerm::Ent)
            .map_err(|e| format!("bad entity id `{token}`: {e}"))
    } else if token.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        Ok(RawTerm::Var(token.to_string()))
    } else {
        Err(format!("bad term `{token}`: expected entity id or variable"))
    }
}

/// Parse the atoms of one side of a rule string.
///
/// Rejects leftover text that is not an atom or a separator, so a truncated
/// `5(X,` does not silently vanish.
fn parse_atoms(side: &str) -> Result<Vec<RawAtom>, String> {
    let re = atom_regex();
    let mut atoms = Vec::new();
    let mut cursor = 0;

    for caps in re.captures_iter(side) {
        let whole = caps.get(0).expect("whole match");
        let gap = &side[cursor..whole.start()];
        if gap.chars().any(|c| !c.is_whitespace() && c != ',') {
            return Err(format!("unrecognized text `{}`", gap.trim()));
        }
        cursor = whole.end();

        let rel = caps[1]
            .parse::<u64>()
            .map_err(|e| format!("bad relation id `{}`: {e}", &caps[1]))?;
        atoms.push(RawAtom {
            head: parse_term(&caps[2])?,
            rel,
            tail: parse_term(&caps[3])?,
        });
    }

    let trailing = &side[cursor..];
    if trailing.chars().any(|c| !c.is_whitespace() && c != ',') {
        return Err(format!("unrecognized text `{}`", trailing.trim()));
    }

    Ok(atoms)
}

/// Parse one `HEAD <= BODY[, BODY]*` rule string.
pub fn parse_rule_str(rule_str: &str) -> Result<(RawAtom, Vec<RawAtom>), String> {
    let (head_str, body_str) = rule_str
        .split_once("<=")
        .ok_or_else(|| "missing `<=`".to_string())?;

    let mut heads = parse_atoms(head_str)?;
    if heads.len() != 1 {
        return Err(format!("expected exactly 1 head atom, found {}", heads.len()));
    }
    let body = parse_atoms(body_str)?;

    Ok((heads.remove(0), body))
}

/// Parse one TSV line into a raw record.
fn parse_line(line: &str, lineno: usize) -> Result<RawRule, RuleError> {
    let malformed = |message: String| RuleError::Malformed {
        line: lineno,
        message,
    };

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 4 {
        return Err(malformed(format!(
            "expected 4 tab-separated fields, found {}",
            fields.len()
        )));
    }

    let conf: f32 = fields[2]
        .trim()
        .parse()
        .map_err(|e| malformed(format!("bad confidence `{}`: {e}", fields[2])))?;

    let (head, body) =
        parse_rule_str(fields[3]).map_err(|message| malformed(format!("bad rule string: {message}")))?;

    Ok(RawRule { conf, head, body })
}

/// Read a rules TSV into raw records, each tagged with its 1-based line
/// number for diagnostics.
///
/// Only failing to read the file at all is a [`DatasetError`]. A line that
/// does not parse is fatal for that rule only: it comes back as a
/// [`RuleError::Malformed`] record so batch loading can log, count, and
/// move on.
pub fn read_rules_tsv(
    path: &Path,
) -> Result<Vec<(usize, Result<RawRule, RuleError>)>, DatasetError> {
    let content = fs::read_to_string(path).map_err(|e| DatasetError::io(path, e))?;

    let mut records = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let lineno = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        records.push((lineno, parse_line(line, lineno)));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_variable_and_entity_terms() {
        let (head, body) = parse_rule_str("7(X, 2) <= 5(X, 9)").unwrap();
        assert_eq!(head.rel, 7);
        assert_eq!(head.head, RawTerm::Var("X".into()));
        assert_eq!(head.tail, RawTerm::Ent(2));
        assert_eq!(body, vec![RawAtom {
            head: RawTerm::Var("X".into()),
            rel: 5,
            tail: RawTerm::Ent(9),
        }]);
    }

    #[test]
    fn parses_multi_atom_bodies() {
        let (_, body) = parse_rule_str("7(X, 2) <= 5(X, 9), 3(X, Y)").unwrap();
        assert_eq!(body.len(), 2);
        assert_eq!(body[1].tail, RawTerm::Var("Y".into()));
    }

    #[test]
    fn rejects_missing_implication() {
        assert!(parse_rule_str("7(X, 2)").is_err());
    }

    #[test]
    fn rejects_truncated_atoms() {
        assert!(parse_rule_str("7(X, 2) <= 5(X,").is_err());
    }

    #[test]
    fn rejects_lowercase_terms() {
        assert!(parse_rule_str("7(x, 2) <= 5(X, 9)").is_err());
    }

    #[test]
    fn reads_tsv_records_with_line_numbers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "27\t25\t0.9259\t7(X, 2) <= 5(X, 9)").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "3\t3\t1.0\t4(13, Y) <= 6(13, Y)").unwrap();

        let records = read_rules_tsv(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, 1);
        let first = records[0].1.as_ref().unwrap();
        assert!((first.conf - 0.9259).abs() < 1e-6);
        assert_eq!(records[1].0, 3);
        assert_eq!(records[1].1.as_ref().unwrap().head.head, RawTerm::Ent(13));
    }

    #[test]
    fn bad_line_is_a_malformed_record_not_a_read_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.9\t7(X, 2) <= 5(X, 9)").unwrap();
        writeln!(file, "27\t25\t0.9\t7(X, 2) <= 5(X, 9)").unwrap();

        let records = read_rules_tsv(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        let err = records[0].1.as_ref().unwrap_err();
        assert!(err.to_string().contains("line 1"));
        assert!(records[1].1.is_ok());
    }
}
