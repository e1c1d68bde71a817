//! Capabilities the passes need from their host.
//!
//! The scanner, parser and resolver only ever *report* through a
//! [`ParserContext`]; the interpreter prints and reports runtime failures
//! through an [`InterpreterContext`]. Rendering and exit codes belong to
//! whoever implements these traits.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use crate::error::{Diagnostic, RuntimeError};

/// Diagnostic sink shared by scanner, parser and resolver.
pub trait ParserContext {
    /// Report a problem at `line` with a position hint (`" at end"`,
    /// `" at 'x'"`).
    fn parser_error_at(&mut self, line: usize, location: &str, message: &str);

    /// Report a problem at `line` without a position hint.
    fn parser_error(&mut self, line: usize, message: &str) {
        self.parser_error_at(line, "", message);
    }
}

/// A [`ParserContext`] that keeps every diagnostic in report order.
#[derive(Debug, Default)]
pub struct Diagnostics {
    reported: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn had_error(&self) -> bool {
        !self.reported.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.reported.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.reported
    }
}

impl ParserContext for Diagnostics {
    fn parser_error_at(&mut self, line: usize, location: &str, message: &str) {
        let diagnostic = Diagnostic::new(line, location, message);

        info!("Diagnostic reported: {}", diagnostic);

        self.reported.push(diagnostic);
    }
}

/// Output surface of the interpreter.
pub trait InterpreterContext {
    /// Emit the text of a `print` statement (or an evaluated REPL line).
    fn print(&mut self, text: &str);

    /// Report a runtime error that aborted the current `interpret` call.
    fn runtime_error(&mut self, error: &RuntimeError);
}

/// Prints to stdout and reports runtime errors on stderr.
#[derive(Debug, Default)]
pub struct StdioContext;

impl InterpreterContext for StdioContext {
    fn print(&mut self, text: &str) {
        println!("{}", text);
    }

    fn runtime_error(&mut self, error: &RuntimeError) {
        eprintln!("{}", error);
    }
}

/// Records printed lines and runtime errors in memory.
///
/// Clones share the same buffers, so a caller can hand one clone to the
/// interpreter and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct CaptureContext {
    output: Rc<RefCell<Vec<String>>>,
    errors: Rc<RefCell<Vec<RuntimeError>>>,
}

impl CaptureContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every printed line so far.
    pub fn output(&self) -> Vec<String> {
        self.output.borrow().clone()
    }

    /// Every runtime error reported so far.
    pub fn errors(&self) -> Vec<RuntimeError> {
        self.errors.borrow().clone()
    }
}

impl InterpreterContext for CaptureContext {
    fn print(&mut self, text: &str) {
        debug!("Captured output: {}", text);

        self.output.borrow_mut().push(text.to_string());
    }

    fn runtime_error(&mut self, error: &RuntimeError) {
        self.errors.borrow_mut().push(error.clone());
    }
}
