//! Derivation tracing hooks.
//!
//! External tooling can watch each rule application by injecting a
//! [`ParseObserver`]; the core's correctness does not depend on one being
//! present. Hooks run synchronously and in-line, never queued.

use expr_lexer::Token;

use crate::rules::Rule;
use crate::stack::Symbol;

/// Read-only snapshot of the parser handed to observers.
pub struct ParseState<'a> {
    symbols: &'a [Symbol],
    lookahead: Option<&'a Token>,
}

impl<'a> ParseState<'a> {
    pub(crate) fn new(symbols: &'a [Symbol], lookahead: Option<&'a Token>) -> Self {
        Self { symbols, lookahead }
    }

    /// Current stack contents, bottom first.
    pub fn symbols(&self) -> &'a [Symbol] {
        self.symbols
    }

    /// The token the parser is deciding on, if any remains.
    pub fn lookahead(&self) -> Option<&'a Token> {
        self.lookahead
    }
}

/// Observer invoked around every rule application.
///
/// Both methods default to doing nothing, so implementors override only
/// the side they care about.
pub trait ParseObserver {
    /// Called before the rule rewrites the stack.
    fn before_rule(&mut self, rule: Rule, state: &ParseState<'_>) {
        let _ = (rule, state);
    }

    /// Called after the rule's rewrite (and token advance, if any).
    fn after_rule(&mut self, rule: Rule, state: &ParseState<'_>) {
        let _ = (rule, state);
    }
}
