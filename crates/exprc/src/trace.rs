//! Derivation tracing for `check --trace`.
//!
//! Consumes the parser's observer surface and prints one line per rule
//! application to stderr, showing the rule number, its production, the
//! current stack depth, and the lookahead token.

use expr_parse::{ParseObserver, ParseState, Rule};

/// Observer printing every rule application.
#[derive(Default)]
pub struct DerivationTrace {
    applied: usize,
}

impl DerivationTrace {
    /// Number of rules applied so far.
    pub fn applied(&self) -> usize {
        self.applied
    }
}

impl ParseObserver for DerivationTrace {
    fn before_rule(&mut self, rule: Rule, state: &ParseState<'_>) {
        let stack = state
            .symbols()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let lookahead = state
            .lookahead()
            .map_or_else(|| "<end>".to_string(), ToString::to_string);
        eprintln!(
            "rule {:>2}: {:<40} lookahead={lookahead} stack=[{stack}]",
            rule.name(),
            rule.production(),
        );
    }

    fn after_rule(&mut self, _rule: Rule, _state: &ParseState<'_>) {
        self.applied += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expr_lexer::Tokenizer;
    use expr_parse::Parser;

    #[test]
    fn counts_applied_rules() {
        let mut tracer = DerivationTrace::default();
        let lexer = Tokenizer::new(&b"x"[..]);
        let result = Parser::with_observer(lexer, &mut tracer).parse();
        assert!(result.is_ok());
        // The derivation of a single identifier applies 11 rules.
        assert_eq!(tracer.applied(), 11);
    }
}
