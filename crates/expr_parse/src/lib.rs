//! Non-recursive LL(1) recognizer for expression input.
//!
//! The parser walks an explicit 18-rule predictive table over the grammar
//!
//! ```text
//! expr      → relation expr'
//! expr'     → logical-op relation expr'      | ε
//! relation  → sum relation'
//! relation' → relational-op sum relation'    | ε
//! sum       → product sum'
//! sum'      → (+|-) product sum'             | ε
//! product   → power product'
//! product'  → (*|/) power product'           | ε
//! power     → factor power'
//! power'    → (^) factor power'              | ε
//! factor    → number | identifier | "(" expr ")"
//! ```
//!
//! using a bounded [`SymbolStack`] of pending obligations instead of the
//! host call stack. Tokens are pulled from an [`expr_lexer::Tokenizer`]
//! strictly on demand; the run halts on the first error and leaves the
//! stack partially unwound.
//!
//! Precedence, low to high: logical, relational, additive, multiplicative,
//! power. All tiers are left-associative by construction; the power tier's
//! repeated rule application is kept as-is rather than rewritten for true
//! right associativity.

mod error;
mod observer;
mod rules;
mod stack;


pub use error::{ParseError, ParseErrorKind, ParseFailure};
pub use observer::{ParseObserver, ParseState};
pub use rules::Rule;
pub use stack::{StackOverflow, Symbol, SymbolStack, STACK_CAPACITY};

use std::io::Read;

use expr_lexer::{LexError, Token, TokenKind, Tokenizer};
use tracing::trace;

use crate::stack::Symbol as S;

/// Predictive parser over one tokenizer.
///
/// A parser owns its tokenizer exclusively and recognizes exactly one
/// input; create a fresh pair per run. Instances share no state.
pub struct Parser<'o, R> {
    lexer: Tokenizer<R>,
    /// Current lookahead; `None` once the input is exhausted.
    token: Option<Token>,
    /// Scan error reported by the last advance, surfaced with priority at
    /// the top of the driver loop.
    lex_error: Option<LexError>,
    stack: SymbolStack,
    observer: Option<&'o mut dyn ParseObserver>,
}

impl<'o, R: Read> Parser<'o, R> {
    /// Create a parser without derivation tracing.
    pub fn new(lexer: Tokenizer<R>) -> Self {
        Self {
            lexer,
            token: None,
            lex_error: None,
            stack: SymbolStack::new(),
            observer: None,
        }
    }

    /// Create a parser that reports every rule application to `observer`.
    pub fn with_observer(lexer: Tokenizer<R>, observer: &'o mut dyn ParseObserver) -> Self {
        Self {
            observer: Some(observer),
            ..Self::new(lexer)
        }
    }

    /// Run the recognizer to completion.
    ///
    /// Accepts with `Ok(())` when the whole input derives from `expr`;
    /// otherwise reports the first failure. Re-running a fresh parser on
    /// the same input yields the same outcome.
    pub fn parse(mut self) -> Result<(), ParseFailure> {
        self.stack.push(S::Bottom)?;
        self.stack.push(S::Expr)?;
        self.advance();

        loop {
            // A latched scan error outranks all top-of-stack handling.
            if let Some(err) = self.lex_error.take() {
                return Err(ParseFailure::Rejected(ParseError::lex(err)));
            }

            let Some(top) = self.stack.top() else {
                // The bottom sentinel is never popped.
                unreachable!("symbol stack drained below the bottom sentinel");
            };

            match top {
                S::Bottom => {
                    return if self.token.is_some() {
                        Err(ParseFailure::Rejected(self.reject()))
                    } else {
                        Ok(())
                    };
                }

                S::Expr => self.expand_tier(Rule::Expr)?,
                S::Relation => self.expand_tier(Rule::Relation)?,
                S::Sum => self.expand_tier(Rule::Sum)?,
                S::Product => self.expand_tier(Rule::Product)?,
                S::Power => self.expand_tier(Rule::Power)?,

                S::ExprTail => match self.token_kind() {
                    None | Some(TokenKind::ParenRight) => self.apply(Rule::ExprEnd)?,
                    Some(TokenKind::LogicalOp) => self.apply(Rule::ExprChain)?,
                    _ => return Err(ParseFailure::Rejected(self.reject())),
                },

                S::RelationTail => match self.token_kind() {
                    None | Some(TokenKind::LogicalOp | TokenKind::ParenRight) => {
                        self.apply(Rule::RelationEnd)?;
                    }
                    Some(TokenKind::RelationalOp) => self.apply(Rule::RelationChain)?,
                    _ => return Err(ParseFailure::Rejected(self.reject())),
                },

                S::SumTail => match self.token_kind() {
                    None
                    | Some(
                        TokenKind::RelationalOp | TokenKind::LogicalOp | TokenKind::ParenRight,
                    ) => self.apply(Rule::SumEnd)?,
                    Some(TokenKind::ArithmeticOp) => match self.token_text() {
                        "+" | "-" => self.apply(Rule::SumChain)?,
                        other => unreachable!("operator `{other}` cannot reach sum'"),
                    },
                    _ => return Err(ParseFailure::Rejected(self.reject())),
                },

                S::ProductTail => match self.token_kind() {
                    None
                    | Some(
                        TokenKind::RelationalOp | TokenKind::LogicalOp | TokenKind::ParenRight,
                    ) => self.apply(Rule::ProductEnd)?,
                    Some(TokenKind::ArithmeticOp) => match self.token_text() {
                        "*" | "/" => self.apply(Rule::ProductChain)?,
                        "+" | "-" => self.apply(Rule::ProductEnd)?,
                        other => unreachable!("operator `{other}` cannot reach product'"),
                    },
                    _ => return Err(ParseFailure::Rejected(self.reject())),
                },

                S::PowerTail => match self.token_kind() {
                    None
                    | Some(
                        TokenKind::RelationalOp | TokenKind::LogicalOp | TokenKind::ParenRight,
                    ) => self.apply(Rule::PowerEnd)?,
                    Some(TokenKind::ArithmeticOp) => match self.token_text() {
                        "^" => self.apply(Rule::PowerChain)?,
                        "+" | "-" | "*" | "/" => self.apply(Rule::PowerEnd)?,
                        other => unreachable!("operator `{other}` cannot reach power'"),
                    },
                    _ => return Err(ParseFailure::Rejected(self.reject())),
                },

                S::Factor => match self.token_kind() {
                    Some(TokenKind::Number | TokenKind::Identifier) => self.apply(Rule::Atom)?,
                    Some(TokenKind::ParenLeft) => self.apply(Rule::Group)?,
                    _ => return Err(ParseFailure::Rejected(self.reject())),
                },

                S::CloseParen => match self.token_kind() {
                    Some(TokenKind::ParenRight) => self.apply(Rule::GroupClose)?,
                    _ => return Err(ParseFailure::Rejected(self.reject())),
                },
            }
        }
    }

    /// Expand one of the five operand tiers: all share the same selector
    /// (`number | identifier | "("`) and reject anything else.
    fn expand_tier(&mut self, rule: Rule) -> Result<(), ParseFailure> {
        match self.token_kind() {
            Some(TokenKind::Number | TokenKind::Identifier | TokenKind::ParenLeft) => {
                self.apply(rule)?;
                Ok(())
            }
            _ => Err(ParseFailure::Rejected(self.reject())),
        }
    }

    /// Apply one rule: observer hooks around the stack rewrite and the
    /// conditional token advance.
    fn apply(&mut self, rule: Rule) -> Result<(), StackOverflow> {
        trace!(rule = rule.name(), production = rule.production(), "apply");
        self.notify_before(rule);

        match rule {
            Rule::Expr => {
                let _ = self.stack.pop();
                self.stack.push(S::ExprTail)?;
                self.stack.push(S::Relation)?;
            }
            Rule::ExprChain => {
                let _ = self.stack.pop();
                self.stack.push(S::ExprTail)?;
                self.stack.push(S::Relation)?;
                self.advance();
            }
            Rule::Relation => {
                let _ = self.stack.pop();
                self.stack.push(S::RelationTail)?;
                self.stack.push(S::Sum)?;
            }
            Rule::RelationChain => {
                let _ = self.stack.pop();
                self.stack.push(S::RelationTail)?;
                self.stack.push(S::Sum)?;
                self.advance();
            }
            Rule::Sum => {
                let _ = self.stack.pop();
                self.stack.push(S::SumTail)?;
                self.stack.push(S::Product)?;
            }
            Rule::SumChain => {
                let _ = self.stack.pop();
                self.stack.push(S::SumTail)?;
                self.stack.push(S::Product)?;
                self.advance();
            }
            Rule::Product => {
                let _ = self.stack.pop();
                self.stack.push(S::ProductTail)?;
                self.stack.push(S::Power)?;
            }
            Rule::ProductChain => {
                let _ = self.stack.pop();
                self.stack.push(S::ProductTail)?;
                self.stack.push(S::Power)?;
                self.advance();
            }
            Rule::Power => {
                let _ = self.stack.pop();
                self.stack.push(S::PowerTail)?;
                self.stack.push(S::Factor)?;
            }
            Rule::PowerChain => {
                let _ = self.stack.pop();
                self.stack.push(S::PowerTail)?;
                self.stack.push(S::Factor)?;
                self.advance();
            }
            Rule::ExprEnd
            | Rule::RelationEnd
            | Rule::SumEnd
            | Rule::ProductEnd
            | Rule::PowerEnd => {
                let _ = self.stack.pop();
            }
            Rule::Atom => {
                let _ = self.stack.pop();
                self.advance();
            }
            Rule::Group => {
                let _ = self.stack.pop();
                self.stack.push(S::CloseParen)?;
                self.stack.push(S::Expr)?;
                self.advance();
            }
            Rule::GroupClose => {
                let _ = self.stack.pop();
                self.advance();
            }
        }

        self.notify_after(rule);
        Ok(())
    }

    /// Release the current token and fetch the next one, recording a scan
    /// failure for the driver loop to surface.
    fn advance(&mut self) {
        self.token = match self.lexer.next_token() {
            Ok(token) => token,
            Err(err) => {
                self.lex_error = Some(err);
                None
            }
        };
    }

    /// Build the rejection for the current situation: a token in hand is
    /// unexpected; no token means either a latched scan error or early end
    /// of input.
    fn reject(&mut self) -> ParseError {
        match self.token.take() {
            Some(token) => ParseError::unexpected_token(token),
            None => match self.lexer.latched_error() {
                Some(err) => ParseError::lex(err.clone()),
                None => ParseError::unexpected_end_of_input(),
            },
        }
    }

    #[inline]
    fn token_kind(&self) -> Option<TokenKind> {
        self.token.as_ref().map(|t| t.kind)
    }

    /// Text of the current token; only called in arms where one exists.
    #[inline]
    fn token_text(&self) -> &str {
        self.token.as_ref().map_or("", |t| t.text.as_str())
    }

    fn notify_before(&mut self, rule: Rule) {
        if let Some(observer) = self.observer.as_deref_mut() {
            let state = ParseState::new(self.stack.symbols(), self.token.as_ref());
            observer.before_rule(rule, &state);
        }
    }

    fn notify_after(&mut self, rule: Rule) {
        if let Some(observer) = self.observer.as_deref_mut() {
            let state = ParseState::new(self.stack.symbols(), self.token.as_ref());
            observer.after_rule(rule, &state);
        }
    }
}
