//! Error types surfaced by the extractor.

use thiserror::Error;

/// Errors that can occur while turning source text into a `SourceUnit`.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to load C# grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("invalid extraction query: {0}")]
    Query(#[from] tree_sitter::QueryError),
    #[error("parser produced no syntax tree")]
    NoTree,
    #[error("syntax error at {line}:{column}")]
    Syntax {
        /// Line of the first error node (1-indexed).
        line: usize,
        /// Column of the first error node (1-indexed).
        column: usize,
    },
}

impl ParseError {
    /// Returns the 1-indexed `(line, column)` of a syntax error, if any.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            ParseError::Syntax { line, column } => Some((*line, *column)),
            _ => None,
        }
    }
}
