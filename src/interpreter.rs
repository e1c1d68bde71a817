use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, info};

use crate::callable::{Callable, LoxFunction, NativeFunction};
use crate::class::LoxClass;
use crate::context::InterpreterContext;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::expr::{Expr, ExprId};
use crate::resolver::Locals;
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::{Token, TokenType};
use crate::value::Value;

/// How a statement finished. Anything but `Normal` unwinds to the nearest
/// loop (`Break`, `Continue`) or function call (`Return`).
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Normal,
    Return(Value),
    Break,
    Continue,
}

/// Convenient alias for interpreter results.
pub type IResult<T> = Result<T, RuntimeError>;

pub struct Interpreter {
    globals: Environment,
    /// Current lexical scope; swapped during block and call execution.
    environment: Environment,
    locals: Locals,
    context: Box<dyn InterpreterContext>,
}

impl Interpreter {
    /// Creates a new Interpreter and defines native functions such as `clock`.
    pub fn new(context: Box<dyn InterpreterContext>) -> Self {
        info!("Initializing Interpreter");

        let globals = Environment::new();

        debug!("Defining native function 'clock'");
        globals.bind("clock", Value::Native(Rc::new(NativeFunction::clock())));

        Self {
            environment: globals.clone(),
            globals,
            locals: HashMap::new(),
            context,
        }
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    /// Merge hop counts from a resolve pass. Ids are unique per node, so
    /// tables from successive REPL lines never collide.
    pub fn add_locals(&mut self, locals: Locals) {
        debug!("Adding {} resolved local(s)", locals.len());

        self.locals.extend(locals);
    }

    /// Interprets a list of statements (a "program"). The first runtime error
    /// stops execution and is reported through the context.
    pub fn interpret(&mut self, statements: &[Stmt]) -> IResult<()> {
        debug!("Interpreting {} statements", statements.len());

        for stmt in statements {
            if let Err(error) = self.execute(stmt) {
                info!("Runtime error: {}", error.message);
                self.context.runtime_error(&error);
                return Err(error);
            }
        }

        info!("Interpretation completed successfully");
        Ok(())
    }

    /// Evaluates a bare REPL expression and prints its value.
    pub fn interpret_expression(&mut self, expr: &Expr) -> IResult<Value> {
        match self.evaluate(expr) {
            Ok(value) => {
                self.context.print(&value.to_string());
                Ok(value)
            }
            Err(error) => {
                self.context.runtime_error(&error);
                Err(error)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Statements
    // ─────────────────────────────────────────────────────────────────────────

    /// Executes a single statement.
    pub fn execute(&mut self, stmt: &Stmt) -> IResult<Completion> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Completion::Normal)
            }

            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                debug!("Printing {} value", value.type_name());
                self.context.print(&value.to_string());
                Ok(Completion::Normal)
            }

            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => Some(self.evaluate(expr)?),
                    None => None,
                };

                self.environment.define(name, value)?;
                Ok(Completion::Normal)
            }

            Stmt::Block(statements) => {
                let environment = self.environment.child();
                self.execute_block(statements, environment)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Completion::Normal)
                }
            }

            Stmt::While {
                condition,
                body,
                increment,
            } => {
                while self.evaluate(condition)?.is_truthy() {
                    match self.execute(body)? {
                        Completion::Break => break,
                        Completion::Return(value) => return Ok(Completion::Return(value)),
                        Completion::Normal | Completion::Continue => {}
                    }

                    if let Some(increment) = increment {
                        self.evaluate(increment)?;
                    }
                }

                Ok(Completion::Normal)
            }

            Stmt::Break(_) => Ok(Completion::Break),

            Stmt::Continue(_) => Ok(Completion::Continue),

            Stmt::BreakError(token) | Stmt::ContinueError(token) => {
                Err(RuntimeError::new(token, "Compilation error"))
            }

            Stmt::Function(FunctionDecl { name, lambda }) => {
                debug!("Defining function '{}'", name.lexeme);

                let function = LoxFunction::new(
                    Some(name.lexeme.clone()),
                    Rc::clone(lambda),
                    self.environment.clone(),
                    false,
                );

                self.environment
                    .define(name, Some(Value::Function(Rc::new(function))))?;
                Ok(Completion::Normal)
            }

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                Ok(Completion::Return(value))
            }

            Stmt::Class {
                name,
                superclass,
                methods,
                static_methods,
            } => {
                self.execute_class(name, superclass.as_ref(), methods, static_methods)?;
                Ok(Completion::Normal)
            }
        }
    }

    /// Runs `statements` in `environment`, restoring the previous scope on
    /// every exit path.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Environment,
    ) -> IResult<Completion> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result = Ok(Completion::Normal);
        for stmt in statements {
            match self.execute(stmt) {
                Ok(Completion::Normal) => {}
                other => {
                    result = other;
                    break;
                }
            }
        }

        self.environment = previous;
        result
    }

    fn execute_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[FunctionDecl],
        static_methods: &[FunctionDecl],
    ) -> IResult<()> {
        let superclass: Option<Rc<LoxClass>> = match superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Class(class) => Some(class),
                _ => {
                    let token = match expr {
                        Expr::Variable { name, .. } => name,
                        _ => name,
                    };
                    return Err(RuntimeError::new(token, "Superclass must be a class."));
                }
            },
            None => None,
        };

        self.environment.define(name, None)?;

        let method_environment = match &superclass {
            Some(superclass) => {
                let environment = self.environment.child();
                environment.bind("super", Value::Class(Rc::clone(superclass)));
                environment
            }
            None => self.environment.clone(),
        };

        let methods: HashMap<String, Rc<LoxFunction>> = methods
            .iter()
            .map(|method| {
                let function = LoxFunction::new(
                    Some(method.name.lexeme.clone()),
                    Rc::clone(&method.lambda),
                    method_environment.clone(),
                    method.name.lexeme == "init",
                );
                (method.name.lexeme.clone(), Rc::new(function))
            })
            .collect();

        let statics: HashMap<String, Value> = static_methods
            .iter()
            .map(|method| {
                let function = LoxFunction::new(
                    Some(method.name.lexeme.clone()),
                    Rc::clone(&method.lambda),
                    method_environment.clone(),
                    false,
                );
                (method.name.lexeme.clone(), Value::Function(Rc::new(function)))
            })
            .collect();

        let class = LoxClass::new(name.lexeme.clone(), superclass, methods, statics);

        info!("Class '{}' defined", name.lexeme);

        self.environment
            .assign(name, Value::Class(Rc::new(class)))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Expressions
    // ─────────────────────────────────────────────────────────────────────────

    pub fn evaluate(&mut self, expr: &Expr) -> IResult<Value> {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => {
                let right = self.evaluate(right)?;

                match operator.token_type {
                    TokenType::MINUS => match right {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        _ => Err(RuntimeError::new(operator, "Operand must be a number.")),
                    },
                    TokenType::BANG => Ok(Value::Bool(!right.is_truthy())),
                    _ => Err(RuntimeError::new(operator, "Compilation error")),
                }
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;

                match operator.token_type {
                    // Short‑circuit, yielding the operand itself.
                    TokenType::OR if left.is_truthy() => Ok(left),
                    TokenType::AND if !left.is_truthy() => Ok(left),
                    TokenType::OR | TokenType::AND | TokenType::COMMA => self.evaluate(right),
                    _ => {
                        let right = self.evaluate(right)?;
                        binary_op(operator, left, right)
                    }
                }
            }

            Expr::BinaryError { operator, .. } => {
                Err(RuntimeError::new(operator, "Compilation error"))
            }

            Expr::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.evaluate(then_branch)
                } else {
                    self.evaluate(else_branch)
                }
            }

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;

                match self.locals.get(id) {
                    Some(&distance) => self.environment.assign_at(distance, name, value.clone())?,
                    None => self.globals.assign(name, value.clone())?,
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee = self.evaluate(callee)?;

                let mut args: Vec<Value> = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.evaluate(argument)?);
                }

                match callee {
                    Value::Native(native) => self.call(&*native, paren, args),
                    Value::Function(function) => self.call(&*function, paren, args),
                    Value::Class(class) => self.call(&class, paren, args),
                    _ => Err(RuntimeError::new(
                        paren,
                        "Can only call functions and classes.",
                    )),
                }
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => instance.get(name),
                Value::Class(class) => class.get(name),
                _ => Err(RuntimeError::new(name, "Only instances have properties.")),
            },

            Expr::Set {
                object,
                name,
                value,
            } => {
                let object = self.evaluate(object)?;

                match object {
                    Value::Instance(instance) => {
                        let value = self.evaluate(value)?;
                        instance.set(name, value.clone());
                        Ok(value)
                    }
                    Value::Class(class) => {
                        let value = self.evaluate(value)?;
                        class.set(name, value.clone());
                        Ok(value)
                    }
                    _ => Err(RuntimeError::new(name, "Only instances have fields.")),
                }
            }

            Expr::This { id, keyword } => self.look_up_variable(*id, keyword),

            Expr::Super {
                id,
                keyword,
                method,
            } => self.evaluate_super(*id, keyword, method),

            Expr::Lambda(lambda) => {
                let function =
                    LoxFunction::new(None, Rc::clone(lambda), self.environment.clone(), false);
                Ok(Value::Function(Rc::new(function)))
            }
        }
    }

    fn call(
        &mut self,
        callee: &dyn Callable,
        paren: &Token,
        arguments: Vec<Value>,
    ) -> IResult<Value> {
        if arguments.len() != callee.arity() {
            return Err(RuntimeError::new(
                paren,
                format!(
                    "Expected {} arguments but got {}.",
                    callee.arity(),
                    arguments.len()
                ),
            ));
        }

        callee.call(self, arguments)
    }

    /// `super.method`: the superclass sits `distance` scopes out and the
    /// receiver one scope inside that.
    fn evaluate_super(&mut self, id: ExprId, keyword: &Token, method: &Token) -> IResult<Value> {
        let distance = match self.locals.get(&id) {
            Some(&distance) => distance,
            None => return Err(RuntimeError::new(keyword, "Undefined variable super")),
        };

        let superclass = match self.environment.get_at(distance, keyword)? {
            Value::Class(class) => class,
            _ => return Err(RuntimeError::new(keyword, "Superclass must be a class.")),
        };

        let this = Token::synthetic(TokenType::THIS, "this", keyword.line);
        let instance = match self.environment.get_at(distance.saturating_sub(1), &this)? {
            Value::Instance(instance) => instance,
            _ => return Err(RuntimeError::new(keyword, "Only instances have properties.")),
        };

        match superclass.find_method(&method.lexeme) {
            Some(found) => Ok(Value::Function(Rc::new(found.bind(instance)))),
            None => Err(RuntimeError::new(
                method,
                format!("Undefined property '{}'.", method.lexeme),
            )),
        }
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> IResult<Value> {
        match self.locals.get(&id) {
            Some(&distance) => self.environment.get_at(distance, name),
            None => self.globals.get(name),
        }
    }
}

fn binary_op(operator: &Token, left: Value, right: Value) -> IResult<Value> {
    match operator.token_type {
        TokenType::PLUS => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
            _ => Err(RuntimeError::new(
                operator,
                "Operands must be two numbers or two strings.",
            )),
        },

        TokenType::EQUAL_EQUAL => Ok(Value::Bool(left == right)),
        TokenType::BANG_EQUAL => Ok(Value::Bool(left != right)),

        _ => {
            let (a, b) = match (left, right) {
                (Value::Number(a), Value::Number(b)) => (a, b),
                _ => return Err(RuntimeError::new(operator, "Operands must be numbers.")),
            };

            match operator.token_type {
                TokenType::MINUS => Ok(Value::Number(a - b)),
                TokenType::STAR => Ok(Value::Number(a * b)),
                TokenType::SLASH => Ok(Value::Number(a / b)),
                TokenType::GREATER => Ok(Value::Bool(a > b)),
                TokenType::GREATER_EQUAL => Ok(Value::Bool(a >= b)),
                TokenType::LESS => Ok(Value::Bool(a < b)),
                TokenType::LESS_EQUAL => Ok(Value::Bool(a <= b)),
                _ => Err(RuntimeError::new(operator, "Compilation error")),
            }
        }
    }
}
