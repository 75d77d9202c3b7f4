//! Error types for path compilation and evaluation.

use crate::value::ReceiverError;
use thiserror::Error;

/// No segment grammar matched at `position` (a byte offset).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("lexer error at position {position}")]
pub struct LexError {
    pub position: usize,
}

/// A token's lexeme could not be converted into its segment's value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("compile error: {reason}")]
pub struct CompileError {
    pub reason: String,
}

/// A segment could not be applied to the running value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot apply `{segment}` (segment {position}): {reason}")]
pub struct ApplyError {
    /// Canonical text of the failing segment
    pub segment: String,
    /// Zero-based index of the segment in its path
    pub position: usize,
    #[source]
    pub reason: ReceiverError,
}

/// Errors returned by the compile entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Compile(#[from] CompileError),
}
