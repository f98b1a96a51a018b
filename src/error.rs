//! Rich diagnostic error types for the rekh engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know exactly what went wrong
//! and how to fix it. Recoverable conditions (unsupported rule shapes, skipped
//! entities) are *not* errors — they are counted in reports and logged.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the rekh engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum RekhError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Dataset(#[from] DatasetError),
}

// ---------------------------------------------------------------------------
// Rule errors
// ---------------------------------------------------------------------------

/// A mined-rule record could not be converted into the internal representation.
///
/// Fatal for that rule only; batch loading logs the failure and continues
/// with the remaining rules.
#[derive(Debug, Error, Diagnostic)]
pub enum RuleError {
    #[error("rule has an empty body")]
    #[diagnostic(
        code(rekh::rule::empty_body),
        help(
            "Every rule needs at least one body atom to ground against. \
             Check the mining output — a bare head atom is not a rule."
        )
    )]
    EmptyBody,

    #[error("rule references unknown entity id {id}")]
    #[diagnostic(
        code(rekh::rule::unknown_entity),
        help(
            "The entity id does not appear in the entity label table. \
             Make sure the rules were mined against the same vocabulary \
             as the supplied labels file."
        )
    )]
    UnknownEntity { id: u64 },

    #[error("rule references unknown relation id {id}")]
    #[diagnostic(
        code(rekh::rule::unknown_relation),
        help(
            "The relation id does not appear in the relation label table. \
             Make sure the rules were mined against the same vocabulary \
             as the supplied labels file."
        )
    )]
    UnknownRelation { id: u64 },

    #[error("malformed rule record at line {line}: {message}")]
    #[diagnostic(
        code(rekh::rule::malformed),
        help(
            "Expected `preds<TAB>support<TAB>conf<TAB>head <= body[, body]` \
             with atoms written as `REL(TERM, TERM)`. Check the rules file \
             for truncated or hand-edited lines."
        )
    )]
    Malformed { line: usize, message: String },
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// A triple-source query failed.
///
/// The in-memory [`TripleStore`](crate::store::TripleStore) never produces
/// these; the variant exists so fallible live-graph backends fit behind the
/// same [`TripleSource`](crate::store::TripleSource) trait. The grounding
/// engine converts these into skip-and-count, never a batch abort.
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("triple source backend error: {message}")]
    #[diagnostic(
        code(rekh::store::backend),
        help(
            "The triple source failed to answer a query. Grounding treats \
             this as fatal for the current rule only; check the backend's \
             own logs for the root cause."
        )
    )]
    Backend { message: String },
}

// ---------------------------------------------------------------------------
// Dataset errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum DatasetError {
    #[error("I/O error reading {}", .path.display())]
    #[diagnostic(
        code(rekh::dataset::io),
        help("Check that the file exists, is readable, and the disk is not full.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {} at line {line}: {message}", .path.display())]
    #[diagnostic(
        code(rekh::dataset::parse),
        help(
            "The file does not match the expected format. Triples and labels \
             files start with a count line; see the dataset module docs for \
             the per-format row layouts."
        )
    )]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl DatasetError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a parse error for a specific line of a file.
    pub fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

/// Convenience alias for functions returning rekh results.
pub type RekhResult<T> = std::result::Result<T, RekhError>;
