//! Parse error types.
//!
//! A run produces at most one error and halts on it. Grammar and lexical
//! rejections are [`ParseError`]; resource exhaustion of the symbol stack
//! is a separate [`ParseFailure`] arm so the two can never be confused.

use std::error::Error;
use std::fmt;

use expr_lexer::{LexError, Token};

use crate::stack::StackOverflow;

/// What kind of rejection ended the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The tokenizer latched a scan error; the parser surfaces it.
    Lex(LexError),
    /// A token arrived that no production accepts, carrying the token.
    UnexpectedToken(Token),
    /// Input ended while a grammar obligation still required a token.
    UnexpectedEndOfInput,
    /// Reserved for rejections with no more specific cause; the current
    /// driver never produces it.
    InvalidSequence,
}

/// Rejection of the input, with a human-readable message.
///
/// Only `kind` is part of the programmatic contract; `message` is prose
/// for terminal display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Human-readable description; positions live on the kind payloads.
    pub message: String,
}

impl ParseError {
    /// Wrap a latched scan error.
    #[cold]
    pub(crate) fn lex(err: LexError) -> Self {
        Self {
            message: format!("scan error: {err}"),
            kind: ParseErrorKind::Lex(err),
        }
    }

    /// Reject the given lookahead token.
    #[cold]
    pub(crate) fn unexpected_token(token: Token) -> Self {
        Self {
            message: format!("unexpected token `{}`", token.text),
            kind: ParseErrorKind::UnexpectedToken(token),
        }
    }

    /// Reject because the input ended early.
    #[cold]
    pub(crate) fn unexpected_end_of_input() -> Self {
        Self {
            kind: ParseErrorKind::UnexpectedEndOfInput,
            message: "unexpected end of input".to_string(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            ParseErrorKind::Lex(err) => Some(err),
            _ => None,
        }
    }
}

/// Why a parse run ended without accepting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseFailure {
    /// The input was rejected (lexical or grammar error).
    Rejected(ParseError),
    /// Nesting exhausted the symbol stack. Not a verdict on the input's
    /// grammaticality.
    StackExhausted(StackOverflow),
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(err) => err.fmt(f),
            Self::StackExhausted(overflow) => overflow.fmt(f),
        }
    }
}

impl Error for ParseFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::StackExhausted(overflow) => Some(overflow),
        }
    }
}

impl From<StackOverflow> for ParseFailure {
    fn from(overflow: StackOverflow) -> Self {
        Self::StackExhausted(overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expr_lexer::TokenKind;

    #[test]
    fn unexpected_token_message_carries_the_text() {
        let token = Token {
            kind: TokenKind::ParenRight,
            text: ")".to_string(),
            line: 0,
            column: 4,
        };
        let err = ParseError::unexpected_token(token);
        assert_eq!(err.to_string(), "unexpected token `)`");
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken(_)));
    }

    #[test]
    fn lex_wrapper_preserves_the_source_error() {
        let mut lexer = expr_lexer::Tokenizer::new(&b"@"[..]);
        let Err(lex_err) = lexer.next_token() else {
            panic!("expected a scan error");
        };
        let err = ParseError::lex(lex_err.clone());
        assert_eq!(err.kind, ParseErrorKind::Lex(lex_err));
        assert!(err.message.starts_with("scan error: "));
    }

    #[test]
    fn stack_exhaustion_converts_from_overflow() {
        let failure = ParseFailure::from(StackOverflow { capacity: 256 });
        assert!(matches!(failure, ParseFailure::StackExhausted(_)));
    }
}
