//! Lexical error type.
//!
//! At most one `LexError` lives on a tokenizer at a time, and its presence
//! is terminal: once latched, the tokenizer produces no further tokens.

use std::error::Error;
use std::fmt;

/// What kind of scan failure occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    /// A byte sequence that matches no token class.
    InvalidToken,
    /// The stream ended in the middle of a token that still required input
    /// (a numeric literal whose `.` has no following digit).
    UnexpectedEndOfInput,
}

/// A scan failure with the 0-based start position of the offending lexeme.
///
/// `message` is human prose for terminal display; only `kind`, `line` and
/// `column` are part of the programmatic contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    /// What went wrong.
    pub kind: LexErrorKind,
    /// Human-readable description; positions are in the fields, not here.
    pub message: String,
    /// 0-based line of the offending lexeme's first byte.
    pub line: u32,
    /// 0-based column of the offending lexeme's first byte.
    pub column: u32,
}

impl LexError {
    /// Create an invalid-token error carrying the partial lexeme.
    ///
    /// The position lives in the `line`/`column` fields; renderers compose
    /// it into the displayed diagnostic.
    #[cold]
    pub(crate) fn invalid_token(lexeme: &str, line: u32, column: u32) -> Self {
        Self {
            kind: LexErrorKind::InvalidToken,
            message: format!("invalid token `{lexeme}`"),
            line,
            column,
        }
    }

    /// Create an unexpected-end-of-input error.
    #[cold]
    pub(crate) fn unexpected_end_of_input(line: u32, column: u32) -> Self {
        Self {
            kind: LexErrorKind::UnexpectedEndOfInput,
            message: "unexpected end of input".to_string(),
            line,
            column,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for LexError {}
