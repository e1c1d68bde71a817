//! Centralised error hierarchy for the interpreter.
//!
//! Three families are kept apart:
//!
//! * [`Diagnostic`]: lexical, syntactic and static-resolution findings. They
//!   are collected through a [`ParserContext`](crate::context::ParserContext)
//!   and never abort the pass that found them.
//! * [`RuntimeError`]: raised by the interpreter; fatal to the current
//!   `interpret` call.
//! * [`LoxError`]: the umbrella returned by the [`Lox`](crate::lox::Lox)
//!   driver, convertible into a process exit code.
//!
//! Internal control-flow signals (`return`, `break`, `continue`) are not
//! errors at all; see [`Completion`](crate::interpreter::Completion).
//!
//! The module **does not** print diagnostics itself.

use std::io;
use thiserror::Error;

use log::debug;

use crate::token::Token;

/// One diagnostic reported by the scanner, parser or resolver.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {line}] Error{location}: {message}")]
pub struct Diagnostic {
    /// 1‑based line where the problem was found.
    pub line: usize,

    /// Position hint such as `" at end"` or `" at 'x'"`; may be empty.
    pub location: String,

    /// Human‑readable description.
    pub message: String,
}

impl Diagnostic {
    pub fn new<L: Into<String>, S: Into<String>>(line: usize, location: L, msg: S) -> Self {
        let diagnostic = Diagnostic {
            line,
            location: location.into(),
            message: msg.into(),
        };

        debug!("Creating diagnostic: {}", diagnostic);

        diagnostic
    }
}

/// Runtime evaluation error, carrying the token it originated from.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}\n[line {}]", .token.line)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        debug!(
            "Creating Runtime error: line={}, msg={}",
            token.line, message
        );

        RuntimeError {
            token: token.clone(),
            message,
        }
    }

    pub fn line(&self) -> usize {
        self.token.line
    }
}

/// Canonical error type returned by the driver.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Scanning, parsing or resolution reported at least one diagnostic.
    #[error("{}", render_diagnostics(.0))]
    Compile(Vec<Diagnostic>),

    /// The program failed while running.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Wrapper around `std::io::Error` (transparent). Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// UTF‑8 decoding failure when ingesting external text.
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),
}

impl LoxError {
    /// Process exit code conventionally associated with this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoxError::Compile(_) => 65,
            LoxError::Runtime(_) => 70,
            LoxError::Io(_) | LoxError::Utf8(_) => 74,
        }
    }
}

fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;
