use thiserror::Error;

/// Why a source text could not be turned into a structure dump.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("failed to load {language} grammar: {reason}")]
    Grammar {
        language: &'static str,
        reason: String,
    },

    #[error("parser produced no tree")]
    NoTree,

    /// 1-based position of the first erroneous node.
    #[error("{reason} (line {line}, column {column})")]
    Syntax {
        reason: String,
        line: usize,
        column: usize,
    },
}
