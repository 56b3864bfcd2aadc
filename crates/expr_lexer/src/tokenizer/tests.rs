#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::{self, Read};

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::error::LexErrorKind;
use crate::token::TokenKind;
use crate::{LexError, Token, Tokenizer};

fn lex_ok(input: &str) -> Vec<Token> {
    let mut lexer = Tokenizer::new(input.as_bytes());
    let mut tokens = Vec::new();
    while let Some(tok) = lexer.next_token().expect("scan failure") {
        tokens.push(tok);
    }
    tokens
}

fn lex_err(input: &str) -> LexError {
    let mut lexer = Tokenizer::new(input.as_bytes());
    loop {
        match lexer.next_token() {
            Ok(Some(_)) => {}
            Ok(None) => panic!("input lexed cleanly"),
            Err(err) => return err,
        }
    }
}

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

// === Empty and whitespace-only input ===

#[test]
fn empty_input_yields_no_tokens() {
    let mut lexer = Tokenizer::new(&b""[..]);
    assert_eq!(lexer.next_token().unwrap(), None);
    // Clean end of input is repeatable.
    assert_eq!(lexer.next_token().unwrap(), None);
    assert!(lexer.latched_error().is_none());
}

#[test]
fn whitespace_only_input_yields_no_tokens_and_no_error() {
    let mut lexer = Tokenizer::new(&b" \t\n\x0B\x0C\r  "[..]);
    assert_eq!(lexer.next_token().unwrap(), None);
    assert!(lexer.latched_error().is_none());
}

// === Numbers ===

#[test]
fn integer_literal() {
    let tokens = lex_ok("42");
    assert_eq!(kinds(&tokens), vec![TokenKind::Number]);
    assert_eq!(texts(&tokens), vec!["42"]);
    assert_eq!((tokens[0].line, tokens[0].column), (0, 0));
}

#[test]
fn decimal_literal_keeps_exact_text() {
    let tokens = lex_ok("3.1415");
    assert_eq!(texts(&tokens), vec!["3.1415"]);
    assert_eq!(kinds(&tokens), vec![TokenKind::Number]);
}

#[test]
fn leading_dot_literal() {
    let tokens = lex_ok(".5");
    assert_eq!(texts(&tokens), vec![".5"]);
    assert_eq!(kinds(&tokens), vec![TokenKind::Number]);
}

#[test]
fn trailing_dot_at_end_of_stream_is_unexpected_eof() {
    let err = lex_err("1.");
    assert_eq!(err.kind, LexErrorKind::UnexpectedEndOfInput);
    assert_eq!((err.line, err.column), (0, 0));
}

#[test]
fn trailing_dot_before_other_input_is_invalid_token() {
    let err = lex_err("1.x");
    assert_eq!(err.kind, LexErrorKind::InvalidToken);
    assert_eq!((err.line, err.column), (0, 0));
    assert!(err.message.contains("`1.`"), "message was: {}", err.message);
}

#[test]
fn bare_dot_at_end_of_stream_is_unexpected_eof() {
    let err = lex_err(".");
    assert_eq!(err.kind, LexErrorKind::UnexpectedEndOfInput);
}

#[test]
fn dot_followed_by_letter_is_invalid_token() {
    let err = lex_err(" .x");
    assert_eq!(err.kind, LexErrorKind::InvalidToken);
    // Position points at the start of the offending lexeme, the dot.
    assert_eq!((err.line, err.column), (0, 1));
}

// === Maximal munch ===

#[test]
fn number_then_identifier_without_separator() {
    let tokens = lex_ok("12ab");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Number, TokenKind::Identifier]
    );
    assert_eq!(texts(&tokens), vec!["12", "ab"]);
    assert_eq!((tokens[1].line, tokens[1].column), (0, 2));
}

#[test]
fn adjacent_parens_split_into_single_tokens() {
    let tokens = lex_ok("((");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::ParenLeft, TokenKind::ParenLeft]
    );
    assert_eq!((tokens[1].line, tokens[1].column), (0, 1));
}

// === Identifiers ===

#[test]
fn identifier_accepts_underscore_and_digits_after_head() {
    let tokens = lex_ok("_tmp9 x");
    assert_eq!(texts(&tokens), vec!["_tmp9", "x"]);
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Identifier, TokenKind::Identifier]
    );
}

// === Operators ===

#[test]
fn every_arithmetic_operator_is_one_token_with_text() {
    let tokens = lex_ok("+ - * / ^");
    assert_eq!(texts(&tokens), vec!["+", "-", "*", "/", "^"]);
    assert!(tokens.iter().all(|t| t.kind == TokenKind::ArithmeticOp));
}

#[test]
fn relational_operators_use_lookahead() {
    let tokens = lex_ok("a<=b >= c < d=e>f");
    assert_eq!(
        texts(&tokens),
        vec!["a", "<=", "b", ">=", "c", "<", "d", "=", "e", ">", "f"]
    );
    assert_eq!(tokens[1].kind, TokenKind::RelationalOp);
    assert_eq!(tokens[3].kind, TokenKind::RelationalOp);
}

#[test]
fn lone_less_than_at_end_of_stream() {
    let tokens = lex_ok("<");
    assert_eq!(texts(&tokens), vec!["<"]);
    assert_eq!(kinds(&tokens), vec![TokenKind::RelationalOp]);
}

#[test]
fn logical_operators_are_single_characters() {
    let tokens = lex_ok("&|");
    assert_eq!(texts(&tokens), vec!["&", "|"]);
    assert!(tokens.iter().all(|t| t.kind == TokenKind::LogicalOp));
}

// === Positions ===

#[test]
fn line_and_column_track_every_newline_style() {
    let tokens = lex_ok("a\nbb\r\ncc\rd");
    let positions: Vec<_> = tokens.iter().map(|t| (t.line, t.column)).collect();
    assert_eq!(positions, vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    assert_eq!(texts(&tokens), vec!["a", "bb", "cc", "d"]);
}

#[test]
fn column_counts_consumed_bytes_within_a_line() {
    let tokens = lex_ok("ab + cd");
    let positions: Vec<_> = tokens.iter().map(|t| (t.line, t.column)).collect();
    assert_eq!(positions, vec![(0, 0), (0, 3), (0, 5)]);
}

// === Errors and latching ===

#[test]
fn invalid_byte_reports_its_lexeme_and_position() {
    let mut lexer = Tokenizer::new(&b"1 +@ 2"[..]);
    assert_eq!(lexer.next_token().unwrap().unwrap().text, "1");
    assert_eq!(lexer.next_token().unwrap().unwrap().text, "+");
    let err = lexer.next_token().unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidToken);
    assert_eq!((err.line, err.column), (0, 3));
    assert_eq!(err.to_string(), "invalid token `@`");
}

#[test]
fn scan_error_latches_and_repeats() {
    let mut lexer = Tokenizer::new(&b"@ 1"[..]);
    let first = lexer.next_token().unwrap_err();
    let second = lexer.next_token().unwrap_err();
    assert_eq!(first, second);
    assert_eq!(lexer.latched_error(), Some(&first));
}

// === Buffering seams ===

#[test]
fn tiny_chunks_lex_identically() {
    let input = "alpha + 42.5 <= (beta ^ 2)";
    let whole = lex_ok(input);
    let mut lexer = Tokenizer::with_chunk_size(input.as_bytes(), 2);
    let mut tiny = Vec::new();
    while let Some(tok) = lexer.next_token().unwrap() {
        tiny.push(tok);
    }
    assert_eq!(whole, tiny);
}

#[test]
fn crlf_split_across_refills_counts_one_line() {
    let mut lexer = Tokenizer::with_chunk_size(&b"a\r\nb"[..], 1);
    let a = lexer.next_token().unwrap().unwrap();
    let b = lexer.next_token().unwrap().unwrap();
    assert_eq!((a.line, a.column), (0, 0));
    assert_eq!((b.line, b.column), (1, 0));
}

/// Reader yielding one byte per call, exercising short reads.
struct ByteAtATime<'a>(&'a [u8]);

impl Read for ByteAtATime<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match (self.0.split_first(), buf.first_mut()) {
            (Some((&byte, rest)), Some(slot)) => {
                *slot = byte;
                self.0 = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[test]
fn one_byte_reads_lex_identically() {
    let input = "x1 & .25 >= y_2";
    let whole = lex_ok(input);
    let mut lexer = Tokenizer::new(ByteAtATime(input.as_bytes()));
    let mut dripped = Vec::new();
    while let Some(tok) = lexer.next_token().unwrap() {
        dripped.push(tok);
    }
    assert_eq!(whole, dripped);
}

/// Reader that fails with `Interrupted` once before every successful read.
struct InterruptedReader<'a> {
    data: &'a [u8],
    pending_interrupt: bool,
}

impl Read for InterruptedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pending_interrupt {
            self.pending_interrupt = false;
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        self.pending_interrupt = true;
        let n = self.data.len().min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn interrupted_reads_are_retried() {
    let mut lexer = Tokenizer::new(InterruptedReader {
        data: b"7 + 8",
        pending_interrupt: true,
    });
    let mut tokens = Vec::new();
    while let Some(tok) = lexer.next_token().unwrap() {
        tokens.push(tok);
    }
    assert_eq!(texts(&tokens), vec!["7", "+", "8"]);
}

/// Reader that yields its data, then fails every subsequent read.
struct FailingTail<'a> {
    data: &'a [u8],
}

impl Read for FailingTail<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::other("wire fell out"));
        }
        let n = self.data.len().min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn read_failure_is_treated_as_end_of_stream() {
    let mut lexer = Tokenizer::new(FailingTail { data: b"12" });
    let tok = lexer.next_token().unwrap().unwrap();
    assert_eq!(tok.text, "12");
    assert_eq!(tok.kind, TokenKind::Number);
    assert_eq!(lexer.next_token().unwrap(), None);
    assert!(lexer.latched_error().is_none());
}

// === Properties ===

fn token_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,6}",
        "[0-9]{1,4}\\.[0-9]{1,4}",
        "\\.[0-9]{1,4}",
        "[A-Za-z_][A-Za-z0-9_]{0,8}",
        Just("(".to_string()),
        Just(")".to_string()),
        proptest::sample::select(vec!["+", "-", "*", "/", "^"]).prop_map(str::to_string),
        proptest::sample::select(vec!["=", "<", "<=", ">", ">="]).prop_map(str::to_string),
        proptest::sample::select(vec!["&", "|"]).prop_map(str::to_string),
    ]
}

proptest! {
    #[test]
    fn whitespace_never_produces_tokens(input in "[ \t\r\n\x0B\x0C]{0,64}") {
        let mut lexer = Tokenizer::new(input.as_bytes());
        prop_assert_eq!(lexer.next_token().unwrap(), None);
    }

    /// Joining token texts with single spaces re-lexes to the same sequence.
    #[test]
    fn space_joined_round_trip(expected in proptest::collection::vec(token_text(), 0..24)) {
        let joined = expected.join(" ");
        let tokens = lex_ok(&joined);
        prop_assert_eq!(
            tokens.iter().map(|t| t.text.clone()).collect::<Vec<_>>(),
            expected.clone()
        );

        // And a second pass over the re-joined text agrees on kinds too.
        let again = lex_ok(&tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" "));
        prop_assert_eq!(kinds(&again), kinds(&tokens));
    }
}
