use std::fmt;
use std::rc::Rc;

use chrono::Utc;
use log::debug;

use crate::class::LoxInstance;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::expr::Lambda;
use crate::interpreter::{Completion, Interpreter};
use crate::token::{Token, TokenType};
use crate::value::Value;

/// Anything a call expression can invoke.
///
/// The interpreter checks the argument count against [`arity`](Self::arity)
/// before calling, so implementations can index `arguments` freely.
pub trait Callable {
    fn arity(&self) -> usize;
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>)
        -> Result<Value, RuntimeError>;
}

/// A builtin provided by the host.
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: fn(&[Value]) -> Value,
}

impl NativeFunction {
    /// `clock()`: seconds since the Unix epoch.
    pub fn clock() -> Self {
        NativeFunction {
            name: "clock",
            arity: 0,
            func: |_| Value::Number(Utc::now().timestamp_millis() as f64 / 1000.0),
        }
    }
}

impl Callable for NativeFunction {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, _interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        debug!("Calling native '{}'", self.name);

        Ok((self.func)(&arguments))
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

/// A user function, method or anonymous function together with the scope it
/// closes over.
#[derive(Clone)]
pub struct LoxFunction {
    name: Option<String>,
    declaration: Rc<Lambda>,
    closure: Environment,
    is_initializer: bool,
}

impl LoxFunction {
    pub fn new(
        name: Option<String>,
        declaration: Rc<Lambda>,
        closure: Environment,
        is_initializer: bool,
    ) -> Self {
        LoxFunction {
            name,
            declaration,
            closure,
            is_initializer,
        }
    }

    /// `None` for anonymous functions.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// A copy of this method whose closure gains one scope binding `this`.
    pub fn bind(&self, instance: Rc<LoxInstance>) -> LoxFunction {
        let environment = self.closure.child();
        environment.bind("this", Value::Instance(instance));

        LoxFunction {
            closure: environment,
            ..self.clone()
        }
    }
}

impl Callable for LoxFunction {
    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        debug!("Calling {}", self.name().unwrap_or("anonymous function"));

        let environment = self.closure.child();
        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.define(param, Some(argument))?;
        }

        let completion = interpreter.execute_block(&self.declaration.body, environment)?;

        if self.is_initializer {
            let this = Token::synthetic(TokenType::THIS, "this", 0);
            return self.closure.get_at(0, &this);
        }

        match completion {
            Completion::Return(value) => Ok(value),
            _ => Ok(Value::Nil),
        }
    }
}

// The closure may (indirectly) contain this function, so it is left out.
impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxFunction")
            .field("name", &self.name)
            .field("arity", &self.declaration.params.len())
            .field("is_initializer", &self.is_initializer)
            .finish()
    }
}
