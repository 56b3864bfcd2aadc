//! Hand-written streaming scanner producing one [`Token`] per call.
//!
//! The tokenizer pulls bytes from the underlying stream through a chunk
//! window ([`ScanBuffer`]) refilled only when fully consumed, and gathers
//! the current lexeme in a second, growable [`ScanBuffer`]. Scanning is a
//! single state machine consuming one byte per transition; a byte that
//! terminates a token without belonging to it is pushed back so the next
//! call sees it first (maximal munch). Whitespace terminates any pending
//! token and is never pushed back.
//!
//! # Positions
//!
//! `(line, column)` are 0-based and advance per consumed byte. `\n` and a
//! bare `\r` each count as one line break; `\r\n` consumes both bytes as a
//! single break, which requires one speculative read past the `\r` (the
//! only place two bytes participate in one newline decision). Tokens and
//! errors carry the position of their first byte.
//!
//! # End of stream and failures
//!
//! A zero-byte read marks end of stream. A failing read is treated the
//! same way: the token stream has no separate I/O error kind, and callers
//! that need to distinguish must wrap the stream. A scan failure latches a
//! [`LexError`]; every later call reports the same error without
//! rescanning.

use std::io::{ErrorKind, Read};

use crate::buffer::{ScanBuffer, SeekFrom};
use crate::error::LexError;
use crate::token::{Token, TokenKind};

/// Default size of the input chunk window in bytes.
const BLOCK_SIZE: usize = 512;

/// Initial capacity of the lexeme accumulator in bytes.
const LEXEME_SIZE: usize = 64;

/// Scanner states. `Start` dispatches on the first byte of a lexeme; the
/// remaining states carry a partial token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    Start,
    /// Digits seen, no dot yet.
    Integer,
    /// A `.` consumed (with or without leading digits); a digit is
    /// mandatory next.
    FractionDot,
    /// Digits after the dot.
    Fraction,
    /// Identifier head consumed.
    Ident,
    /// `<` consumed; `=` may extend it.
    Less,
    /// `>` consumed; `=` may extend it.
    Greater,
}

/// How the current scan failed, before the error is materialized.
#[derive(Clone, Copy)]
enum ScanFailure {
    Invalid,
    EndOfInput,
}

/// Streaming tokenizer over a blocking byte source.
///
/// One tokenizer consumes exactly one source for its lifetime. Instances
/// share no state; any number can run side by side.
pub struct Tokenizer<R> {
    source: R,
    /// Input chunk window, refilled from `source` on demand.
    chunk: ScanBuffer,
    /// Accumulator for the lexeme currently being scanned.
    lexeme: ScanBuffer,
    /// Latched scan failure; terminal once set.
    error: Option<LexError>,
    at_eof: bool,
    line: u32,
    column: u32,
    /// Position of the first byte of the pending lexeme.
    token_line: u32,
    token_column: u32,
}

impl<R: Read> Tokenizer<R> {
    /// Create a tokenizer with the default chunk window size.
    pub fn new(source: R) -> Self {
        Self::with_chunk_size(source, BLOCK_SIZE)
    }

    /// Create a tokenizer with a custom chunk window size.
    ///
    /// Small sizes force refills inside tokens; useful for exercising the
    /// buffering seams.
    pub fn with_chunk_size(source: R, chunk_size: usize) -> Self {
        let mut chunk = ScanBuffer::new(chunk_size);
        // Start exhausted so the first scan triggers a refill.
        chunk.seek(SeekFrom::End(0));
        Self {
            source,
            chunk,
            lexeme: ScanBuffer::new(LEXEME_SIZE),
            error: None,
            at_eof: false,
            line: 0,
            column: 0,
            token_line: 0,
            token_column: 0,
        }
    }

    /// The latched scan error, if any.
    pub fn latched_error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    /// Produce the next token.
    ///
    /// Returns `Ok(None)` on clean end of input (repeatable), or `Err` when
    /// scanning fails. The error latches: every subsequent call returns the
    /// same error without consuming further input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        self.lexeme.seek(SeekFrom::Start(0));
        let mut state = ScanState::Start;

        loop {
            if self.chunk.is_at_end() && !self.at_eof {
                self.refill();
            }

            let (byte, space) = if self.at_eof {
                // End of stream terminates a pending token like whitespace.
                (0u8, true)
            } else {
                let b = self.chunk.advance();
                (b, is_space(b))
            };

            let mut kind: Option<TokenKind> = None;
            let mut keep = true;
            let mut failure: Option<ScanFailure> = None;

            match state {
                ScanState::Start => {
                    if self.at_eof {
                        return Ok(None);
                    }
                    if space {
                        // Skipped; position bookkeeping below still runs.
                    } else if byte.is_ascii_digit() {
                        state = ScanState::Integer;
                    } else if byte == b'.' {
                        state = ScanState::FractionDot;
                    } else if byte.is_ascii_alphabetic() || byte == b'_' {
                        state = ScanState::Ident;
                    } else if byte == b'(' {
                        kind = Some(TokenKind::ParenLeft);
                    } else if byte == b')' {
                        kind = Some(TokenKind::ParenRight);
                    } else if matches!(byte, b'+' | b'-' | b'*' | b'/' | b'^') {
                        kind = Some(TokenKind::ArithmeticOp);
                    } else if byte == b'=' {
                        kind = Some(TokenKind::RelationalOp);
                    } else if byte == b'<' {
                        state = ScanState::Less;
                    } else if byte == b'>' {
                        state = ScanState::Greater;
                    } else if byte == b'&' || byte == b'|' {
                        kind = Some(TokenKind::LogicalOp);
                    } else {
                        failure = Some(ScanFailure::Invalid);
                    }
                }
                ScanState::Integer => {
                    if space {
                        kind = Some(TokenKind::Number);
                    } else if byte == b'.' {
                        state = ScanState::FractionDot;
                    } else if !byte.is_ascii_digit() {
                        kind = Some(TokenKind::Number);
                        keep = false;
                    }
                }
                ScanState::FractionDot => {
                    // The dot demands at least one digit.
                    if space || !byte.is_ascii_digit() {
                        keep = false;
                        failure = Some(if self.at_eof {
                            ScanFailure::EndOfInput
                        } else {
                            ScanFailure::Invalid
                        });
                    } else {
                        state = ScanState::Fraction;
                    }
                }
                ScanState::Fraction => {
                    if space || !byte.is_ascii_digit() {
                        kind = Some(TokenKind::Number);
                        keep = false;
                    }
                }
                ScanState::Ident => {
                    if space || (!byte.is_ascii_alphanumeric() && byte != b'_') {
                        kind = Some(TokenKind::Identifier);
                        keep = false;
                    }
                }
                ScanState::Less | ScanState::Greater => {
                    if space || byte != b'=' {
                        keep = false;
                    }
                    kind = Some(TokenKind::RelationalOp);
                }
            }

            if !space {
                if keep {
                    if self.lexeme.is_at_start() {
                        self.token_line = self.line;
                        self.token_column = self.column;
                    }
                    self.lexeme.put(byte);
                } else {
                    // Maximal munch: the byte belongs to the next token.
                    self.chunk.unadvance();
                }
            }

            if let Some(failure) = failure {
                return Err(self.latch(failure));
            }

            if !self.at_eof && (space || keep) {
                self.bump_position(byte);
            }

            if let Some(kind) = kind {
                let text = String::from_utf8_lossy(self.lexeme.filled()).into_owned();
                return Ok(Some(Token {
                    kind,
                    text,
                    line: self.token_line,
                    column: self.token_column,
                }));
            }
        }
    }

    /// Refill the chunk window from the source.
    ///
    /// A zero-byte read, or any read failure other than `Interrupted`,
    /// marks end of stream; the window is left exhausted in that case.
    fn refill(&mut self) {
        loop {
            match self.source.read(self.chunk.window_mut()) {
                Ok(0) => self.at_eof = true,
                Ok(read) => self.chunk.reset_window(read),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(_) => self.at_eof = true,
            }
            return;
        }
    }

    /// Account for one consumed byte.
    ///
    /// A `\r` triggers a speculative read of the following byte: a `\n` is
    /// folded into the same line break, anything else is pushed back.
    fn bump_position(&mut self, byte: u8) {
        if byte == b'\r' {
            if self.chunk.is_at_end() && !self.at_eof {
                self.refill();
            }
            if !self.at_eof && self.chunk.advance() != b'\n' {
                self.chunk.unadvance();
            }
        }

        if byte == b'\r' || byte == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    /// Materialize and latch the scan error for the pending lexeme.
    fn latch(&mut self, failure: ScanFailure) -> LexError {
        let lexeme = String::from_utf8_lossy(self.lexeme.filled()).into_owned();
        let err = match failure {
            ScanFailure::Invalid => {
                LexError::invalid_token(&lexeme, self.token_line, self.token_column)
            }
            ScanFailure::EndOfInput => {
                LexError::unexpected_end_of_input(self.token_line, self.token_column)
            }
        };
        self.error = Some(err.clone());
        err
    }
}

/// Whitespace set of the scanner: space, `\t`, `\n`, `\v`, `\f`, `\r`.
#[inline]
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

#[cfg(test)]
mod tests;
