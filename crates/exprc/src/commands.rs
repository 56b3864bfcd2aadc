//! The `check` and `lex` commands.
//!
//! Both commands accept any number of file arguments; `-` names stdin and
//! is honored at most once, and no arguments at all means stdin. An input
//! that cannot be opened is reported and counted as a failure without
//! stopping the remaining inputs.

use std::fs::File;
use std::io::{ErrorKind, Read};

use expr_lexer::Tokenizer;
use expr_parse::Parser;

use crate::render;
use crate::trace::DerivationTrace;

/// Where one input comes from; planned before anything is opened.
#[derive(Clone, Debug, PartialEq, Eq)]
enum InputPlan {
    Stdin,
    File(String),
}

impl InputPlan {
    fn label(&self) -> &str {
        match self {
            Self::Stdin => "<stdin>",
            Self::File(path) => path,
        }
    }

    fn open(&self) -> std::io::Result<Box<dyn Read>> {
        match self {
            Self::Stdin => Ok(Box::new(std::io::stdin())),
            Self::File(path) => Ok(Box::new(File::open(path)?)),
        }
    }
}

/// Resolve the argument list into input plans, deduplicating `-`.
fn plan_inputs(paths: &[String]) -> Vec<InputPlan> {
    if paths.is_empty() {
        return vec![InputPlan::Stdin];
    }

    let mut plans = Vec::new();
    let mut used_stdin = false;
    for path in paths {
        if path == "-" {
            if !used_stdin {
                used_stdin = true;
                plans.push(InputPlan::Stdin);
            }
        } else {
            plans.push(InputPlan::File(path.clone()));
        }
    }
    plans
}

fn open_error(path: &str, err: &std::io::Error) -> String {
    match err.kind() {
        ErrorKind::NotFound => format!("exprc: cannot find file '{path}'"),
        ErrorKind::PermissionDenied => format!("exprc: permission denied reading '{path}'"),
        _ => format!("exprc: error reading '{path}': {err}"),
    }
}

/// Run a command body over every input, returning the process exit code:
/// 0 when every input succeeded, 1 otherwise.
fn for_each_input(paths: &[String], mut body: impl FnMut(&str, Box<dyn Read>) -> bool) -> i32 {
    let mut failures = 0usize;
    for plan in plan_inputs(paths) {
        match plan.open() {
            Ok(source) => {
                if !body(plan.label(), source) {
                    failures += 1;
                }
            }
            Err(err) => {
                eprintln!("{}", open_error(plan.label(), &err));
                failures += 1;
            }
        }
    }
    i32::from(failures > 0)
}

/// Recognize each input; print `OK: <label>` per acceptance, one
/// diagnostic line per rejection.
pub fn check(paths: &[String], trace: bool) -> i32 {
    for_each_input(paths, |label, source| check_input(label, source, trace))
}

fn check_input(label: &str, source: Box<dyn Read>, trace: bool) -> bool {
    let lexer = Tokenizer::new(source);
    let result = if trace {
        let mut tracer = DerivationTrace::default();
        let outcome = Parser::with_observer(lexer, &mut tracer).parse();
        tracing::debug!(input = label, rules = tracer.applied(), "derivation finished");
        outcome
    } else {
        Parser::new(lexer).parse()
    };

    match result {
        Ok(()) => {
            println!("OK: {label}");
            true
        }
        Err(failure) => {
            eprintln!("{}", render::failure(label, &failure));
            false
        }
    }
}

/// Dump the token stream of each input, one line per token.
pub fn lex(paths: &[String]) -> i32 {
    for_each_input(paths, lex_input)
}

fn lex_input(label: &str, source: Box<dyn Read>) -> bool {
    let mut lexer = Tokenizer::new(source);
    loop {
        match lexer.next_token() {
            Ok(Some(token)) => {
                println!(
                    "{label}:{}:{}: {:?} `{}`",
                    token.line + 1,
                    token.column + 1,
                    token.kind,
                    token.text
                );
            }
            Ok(None) => return true,
            Err(err) => {
                eprintln!("{}", render::scan_error(label, &err));
                return false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_arguments_plan_to_stdin() {
        assert_eq!(plan_inputs(&[]), vec![InputPlan::Stdin]);
    }

    #[test]
    fn dash_is_stdin_and_deduplicated() {
        let paths = vec!["-".to_string(), "a.expr".to_string(), "-".to_string()];
        assert_eq!(
            plan_inputs(&paths),
            vec![
                InputPlan::Stdin,
                InputPlan::File("a.expr".to_string()),
            ]
        );
    }

    #[test]
    fn file_order_is_preserved() {
        let paths = vec!["b".to_string(), "a".to_string()];
        assert_eq!(
            plan_inputs(&paths),
            vec![
                InputPlan::File("b".to_string()),
                InputPlan::File("a".to_string()),
            ]
        );
    }
}
