//! Module `scanner` implements a one‑pass lexer for the language.
//!
//! It transforms source text into a sequence of [`Token`]s, skipping whitespace
//! and comments, and emitting exactly one `EOF` token at the end. Designed as a
//! `FusedIterator`, it can be chained safely with other iterator adapters.
//!
//! # Public API
//!
//! - `Scanner::new(src: &str) -> Scanner<'_>`
//!   Create a new lexer over the input text.
//!
//! - `impl Iterator for Scanner<'a>`
//!   Yields `Result<Token, Diagnostic>` on each `.next()`, where `Ok(token)` is
//!   a scanned token and `Err` reports a lexing error with line information.
//!
//! - `scan(src, ctx) -> Vec<Token>`
//!   Drains a scanner, forwarding every error to a [`ParserContext`]. Never
//!   fails: a single call surfaces every lexical error in the input.
//!
//! # Token Recognition
//!
//! - Single‑character tokens: `(`, `)`, `{`, `}`, `,`, `.`, `-`, `+`, `;`, `*`,
//!   `?`, `:`.
//! - Two‑character operators (maximal munch): `!=`, `==`, `<=`, `>=`.
//! - Comments: `//` to end of line, `/* … */` up to the first `*/`.
//! - String literals: `"` … `"`, allowing multi‑line.
//! - Numeric literals: `digit+ ('.' digit+)?`, parsed eagerly to `f64`.
//! - Identifiers/keywords: alphanumeric/_ sequences, resolved via a
//!   perfect‑hash `KEYWORDS` map.
//!
//! # Performance
//!
//! - Bulk comment skipping via `memchr` / `memmem`.
//! - `#[inline(always)]` on hot path helpers.

use crate::context::ParserContext;
use crate::error::Diagnostic;
use crate::token::{LiteralValue, Token, TokenType};
use log::{debug, info};
use memchr::{memchr, memchr_iter, memmem};
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"and"      => TokenType::AND,
    b"break"    => TokenType::BREAK,
    b"class"    => TokenType::CLASS,
    b"continue" => TokenType::CONTINUE,
    b"else"     => TokenType::ELSE,
    b"false"    => TokenType::FALSE,
    b"fun"      => TokenType::FUN,
    b"for"      => TokenType::FOR,
    b"if"       => TokenType::IF,
    b"nil"      => TokenType::NIL,
    b"or"       => TokenType::OR,
    b"print"    => TokenType::PRINT,
    b"return"   => TokenType::RETURN,
    b"super"    => TokenType::SUPER,
    b"this"     => TokenType::THIS,
    b"true"     => TokenType::TRUE,
    b"var"      => TokenType::VAR,
    b"while"    => TokenType::WHILE,
};

type ScanResult<T> = std::result::Result<T, Diagnostic>;

/// A single pass **scanner / lexer** that converts source text into a
/// sequence of [`Token`]s.
pub struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    start: usize, // index of the *first* byte of the current lexeme
    curr: usize,  // index *one past* the last byte examined
    line: usize,  // 1‑based line counter (\n increments)
    pending: Option<(TokenType, Option<LiteralValue>)>,
}

impl<'a> Scanner<'a> {
    /// Create a new lexer over `src`.
    #[inline]
    pub fn new(src: &'a str) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            bytes: src.as_bytes(),
            start: 0,
            curr: 0,
            line: 1,
            pending: None,
        }
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    const fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.len()
    }

    /// Advance one byte and return it. Callers guard with [`Self::is_at_end`].
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.bytes[self.curr];
        self.curr += 1;
        b
    }

    /// Peek at the current byte without consuming it. Returns `0` past EOF.
    #[inline(always)]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.bytes[self.curr]
        }
    }

    #[inline(always)]
    fn peek_next(&self) -> u8 {
        if self.curr + 1 >= self.len() {
            0
        } else {
            self.bytes[self.curr + 1]
        }
    }

    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    #[inline(always)]
    fn emit(&mut self, token_type: TokenType) {
        self.pending = Some((token_type, None));
    }

    #[inline(always)]
    fn emit_literal(&mut self, token_type: TokenType, literal: LiteralValue) {
        self.pending = Some((token_type, Some(literal)));
    }

    fn error(&self, message: &str) -> Diagnostic {
        Diagnostic::new(self.line, "", message)
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan a *single* lexeme starting at `self.curr`. If it produces an actual
    /// token the kind is stored in `self.pending`; whitespace and comments
    /// leave `pending = None`.
    fn scan_token(&mut self) -> ScanResult<()> {
        let b = self.advance();

        match b {
            // ── single‑character punctuators ──────────────────────────────
            b'(' => self.emit(TokenType::LEFT_PAREN),
            b')' => self.emit(TokenType::RIGHT_PAREN),
            b'{' => self.emit(TokenType::LEFT_BRACE),
            b'}' => self.emit(TokenType::RIGHT_BRACE),
            b',' => self.emit(TokenType::COMMA),
            b'.' => self.emit(TokenType::DOT),
            b'-' => self.emit(TokenType::MINUS),
            b'+' => self.emit(TokenType::PLUS),
            b';' => self.emit(TokenType::SEMICOLON),
            b'*' => self.emit(TokenType::STAR),
            b'?' => self.emit(TokenType::QUESTION),
            b':' => self.emit(TokenType::COLON),

            // ── two‑character operators (!=, ==, <=, >=) ─────────────────
            b'!' => {
                let tt = if self.match_byte(b'=') {
                    TokenType::BANG_EQUAL
                } else {
                    TokenType::BANG
                };

                self.emit(tt);
            }

            b'=' => {
                let tt = if self.match_byte(b'=') {
                    TokenType::EQUAL_EQUAL
                } else {
                    TokenType::EQUAL
                };

                self.emit(tt);
            }

            b'<' => {
                let tt = if self.match_byte(b'=') {
                    TokenType::LESS_EQUAL
                } else {
                    TokenType::LESS
                };

                self.emit(tt);
            }

            b'>' => {
                let tt = if self.match_byte(b'=') {
                    TokenType::GREATER_EQUAL
                } else {
                    TokenType::GREATER
                };

                self.emit(tt);
            }

            // ── whitespace / newline ─────────────────────────────────────
            b' ' | b'\r' | b'\t' => {}

            b'\n' => {
                self.line += 1;
            }

            // ── comments ─────────────────────────────────────────────────
            b'/' => {
                if self.match_byte(b'/') {
                    // Fast‑forward to the next newline; the newline itself is
                    // left for the main loop so the line counter stays right.
                    match memchr(b'\n', &self.bytes[self.curr..]) {
                        Some(pos) => self.curr += pos,
                        None => self.curr = self.len(),
                    }
                } else if self.match_byte(b'*') {
                    return self.skip_block_comment();
                } else {
                    self.emit(TokenType::SLASH);
                }
            }

            b'"' => {
                return self.parse_string();
            }

            b'0'..=b'9' => {
                self.parse_number();
            }

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                self.parse_identifier();
            }

            // ── unexpected character ─────────────────────────────────────
            _ => {
                // Consume the whole character so a multi-byte code point is
                // reported once.
                let width = self.src[self.start..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                self.curr = self.start + width;

                return Err(self.error("Unexpected character."));
            }
        }

        Ok(())
    }

    /// Skip a `/* … */` comment. `self.curr` points just past the opening `/*`.
    fn skip_block_comment(&mut self) -> ScanResult<()> {
        let rest: &[u8] = &self.bytes[self.curr..];

        match memmem::find(rest, b"*/") {
            Some(pos) => {
                self.line += memchr_iter(b'\n', &rest[..pos]).count();
                self.curr += pos + 2;

                Ok(())
            }
            None => {
                self.line += memchr_iter(b'\n', rest).count();
                self.curr = self.len();

                Err(self.error("Unterminated block comment."))
            }
        }
    }

    /// Parse a double‑quoted string literal.
    ///
    /// * `self.start` still points to the opening `"`.
    /// * When we return, `self.curr` points **past** the closing `"`.
    fn parse_string(&mut self) -> ScanResult<()> {
        while !self.is_at_end() && self.peek() != b'"' {
            if self.advance() == b'\n' {
                self.line += 1;
            }
        }

        if self.is_at_end() {
            return Err(self.error("Unterminated string."));
        }

        self.advance(); // closing quote

        let value: &str = &self.src[self.start + 1..self.curr - 1];
        self.emit_literal(TokenType::STRING, LiteralValue::Str(value.to_owned()));

        Ok(())
    }

    /// Parse a numeric literal (`123`, `3.14`). Fractions are optional.
    fn parse_number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume "."

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text: &str = &self.src[self.start..self.curr];
        let n: f64 = text.parse::<f64>().unwrap_or(0.0); // digits only, cannot fail
        self.emit_literal(TokenType::NUMBER, LiteralValue::Number(n));
    }

    /// Parse an identifier and decide if it is a **keyword** or a generic
    /// `IDENTIFIER` token.
    fn parse_identifier(&mut self) {
        while {
            let c: u8 = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.advance();
        }

        let slice: &[u8] = &self.bytes[self.start..self.curr];

        let tt: TokenType = KEYWORDS
            .get(slice)
            .copied()
            .unwrap_or(TokenType::IDENTIFIER);

        match tt {
            TokenType::TRUE => self.emit_literal(tt, LiteralValue::True),
            TokenType::FALSE => self.emit_literal(tt, LiteralValue::False),
            _ => self.emit(tt),
        }
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Scanner<'a> {
    type Item = ScanResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.curr <= self.len() {
            // EOF guard: emit exactly one EOF then terminate.
            if self.curr == self.len() {
                self.curr += 1;
                return Some(Ok(Token::new(TokenType::EOF, "", None, self.line)));
            }

            self.start = self.curr;
            self.pending = None;

            if let Err(e) = self.scan_token() {
                return Some(Err(e));
            }

            if let Some((tt, literal)) = self.pending.take() {
                let lexeme: &str = &self.src[self.start..self.curr];
                debug!("Scanned token ({:?}) on line {}", tt, self.line);

                return Some(Ok(Token::new(tt, lexeme, literal, self.line)));
            }
            // Otherwise it was whitespace / comment → continue loop.
        }

        None
    }
}

impl<'a> FusedIterator for Scanner<'a> {}

/// Scan `source` to completion. Lexical errors go to `ctx`; scanning carries
/// on past them, and the result always ends with a single `EOF` token.
pub fn scan(source: &str, ctx: &mut dyn ParserContext) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for result in Scanner::new(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(diagnostic) => ctx.parser_error(diagnostic.line, &diagnostic.message),
        }
    }

    info!("Scanned {} tokens", tokens.len());

    tokens
}
