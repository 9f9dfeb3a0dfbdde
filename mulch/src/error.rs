//! Error types for parsing.
//!
//! Only the parse entry points can fail. Traversal, search, and mutation
//! report "not found" as `None`, never as an error.

use thiserror::Error;

/// Why a parse produced no [`Document`](crate::Document).
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input text (or byte buffer) was empty.
    #[error("input is empty")]
    EmptyInput,

    /// The declared encoding label did not resolve to a known charset.
    #[error("unsupported encoding label: {label:?}")]
    UnsupportedEncoding {
        /// The label as the caller supplied it.
        label: String,
    },

    /// The parse engine reported diagnostics and recovery was disabled.
    #[error("markup could not be parsed: {detail}")]
    UnrecoverableParse {
        /// The first diagnostic the engine reported.
        detail: String,
    },
}
