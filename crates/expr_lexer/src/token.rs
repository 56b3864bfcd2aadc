//! Token types produced by the tokenizer.

use std::fmt;

/// The seven lexical classes of expression input.
///
/// All five arithmetic operator characters share [`ArithmeticOp`]; the
/// literal character is preserved in [`Token::text`] so consumers can
/// distinguish precedence levels.
///
/// [`ArithmeticOp`]: TokenKind::ArithmeticOp
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Numeric literal: `digits(.digits)?` or `.digits`.
    Number,
    /// `[A-Za-z_][A-Za-z0-9_]*`.
    Identifier,
    /// `(`.
    ParenLeft,
    /// `)`.
    ParenRight,
    /// One of `+ - * / ^`.
    ArithmeticOp,
    /// One of `= < <= > >=`.
    RelationalOp,
    /// `&` or `|`.
    LogicalOp,
}

impl TokenKind {
    /// Human-readable class name for diagnostics and token dumps.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Identifier => "identifier",
            Self::ParenLeft => "left parenthesis",
            Self::ParenRight => "right parenthesis",
            Self::ArithmeticOp => "arithmetic operator",
            Self::RelationalOp => "relational operator",
            Self::LogicalOp => "logical operator",
        }
    }
}

/// One lexical unit: class, literal text, and 0-based start position.
///
/// Immutable once produced. `text` is an owned, null-free copy of the
/// lexeme as it appeared in the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Lexical class.
    pub kind: TokenKind,
    /// The lexeme, exactly as consumed.
    pub text: String,
    /// 0-based line of the first byte of the lexeme.
    pub line: u32,
    /// 0-based column of the first byte of the lexeme.
    pub column: u32,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.text)
    }
}
