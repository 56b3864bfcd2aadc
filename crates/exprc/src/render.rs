//! Terminal diagnostic formatting.
//!
//! One line per diagnostic, `label:line:column: error: message` when the
//! error locates a lexeme (1-based positions), `label: error: message`
//! otherwise. The core error types keep their positions in fields; this is
//! the only place they are folded into display text.

use expr_lexer::LexError;
use expr_parse::{ParseErrorKind, ParseFailure};

/// Render a parse failure against the input it came from.
pub fn failure(label: &str, failure: &ParseFailure) -> String {
    match failure {
        ParseFailure::Rejected(err) => match &err.kind {
            ParseErrorKind::Lex(lex) => positioned(label, lex.line, lex.column, &err.message),
            ParseErrorKind::UnexpectedToken(token) => {
                positioned(label, token.line, token.column, &err.message)
            }
            ParseErrorKind::UnexpectedEndOfInput | ParseErrorKind::InvalidSequence => {
                bare(label, &err.message)
            }
        },
        ParseFailure::StackExhausted(overflow) => bare(label, &overflow.to_string()),
    }
}

/// Render a scan error from the token-dump path.
pub fn scan_error(label: &str, err: &LexError) -> String {
    positioned(label, err.line, err.column, &err.message)
}

fn positioned(label: &str, line: u32, column: u32, message: &str) -> String {
    format!("{label}:{}:{}: error: {message}", line + 1, column + 1)
}

fn bare(label: &str, message: &str) -> String {
    format!("{label}: error: {message}")
}
