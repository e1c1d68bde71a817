//! The driver that wires scan → parse → resolve → interpret.

use log::{debug, info};

use crate::context::{Diagnostics, InterpreterContext, StdioContext};
use crate::error::{LoxError, Result};
use crate::interpreter::Interpreter;
use crate::parser::{self, Parsed};
use crate::resolver::{self, Locals};
use crate::scanner;
use crate::value::Value;

/// One interpreter session. Globals and resolved bindings persist across
/// calls, so a REPL can define something on one line and use it on the next.
pub struct Lox {
    interpreter: Interpreter,
}

impl Default for Lox {
    fn default() -> Self {
        Self::new(Box::new(StdioContext))
    }
}

impl Lox {
    pub fn new(context: Box<dyn InterpreterContext>) -> Self {
        info!("Starting Lox session");

        Lox {
            interpreter: Interpreter::new(context),
        }
    }

    /// Run a whole script. Nothing executes if any diagnostic was reported.
    pub fn run(&mut self, source: &str) -> Result<()> {
        let (parsed, locals) = compile(source, false)?;
        self.interpreter.add_locals(locals);

        match parsed {
            Parsed::Statements(statements) => self.interpreter.interpret(&statements)?,
            Parsed::Expression(expr) => {
                self.interpreter.interpret_expression(&expr)?;
            }
        }

        Ok(())
    }

    /// Run one REPL line. A bare expression is evaluated, printed, and its
    /// value returned.
    pub fn run_line(&mut self, line: &str) -> Result<Option<Value>> {
        let (parsed, locals) = compile(line, true)?;
        self.interpreter.add_locals(locals);

        match parsed {
            Parsed::Statements(statements) => {
                self.interpreter.interpret(&statements)?;
                Ok(None)
            }
            Parsed::Expression(expr) => Ok(Some(self.interpreter.interpret_expression(&expr)?)),
        }
    }
}

/// Front half of the pipeline: every diagnostic from all three passes is
/// collected before deciding whether the input can run.
pub fn compile(source: &str, allow_expression: bool) -> Result<(Parsed, Locals)> {
    let mut diagnostics = Diagnostics::new();

    let tokens = scanner::scan(source, &mut diagnostics);
    debug!("Scanned {} token(s)", tokens.len());

    let parsed = parser::parse(tokens, allow_expression, &mut diagnostics);

    let locals = match &parsed {
        Parsed::Statements(statements) => resolver::resolve(statements, &mut diagnostics),
        Parsed::Expression(expr) => resolver::resolve_expression(expr, &mut diagnostics),
    };

    if diagnostics.had_error() {
        info!("Compilation failed with {} diagnostic(s)", diagnostics.len());
        return Err(LoxError::Compile(diagnostics.into_vec()));
    }

    Ok((parsed, locals))
}
