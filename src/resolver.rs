//! Static resolver pass.
//!
//! One walk over the AST that:
//! 1. Builds lexical scopes (a stack of maps tracking declared / defined / used).
//! 2. Reports static errors through the [`ParserContext`]: redeclaration,
//!    reading a local in its own initializer, unused locals, misplaced
//!    `this` / `super` / `return`, a class inheriting from itself.
//! 3. Records, for each variable‑reference node that binds to a local, how
//!    many scopes out its declaration lives. Globals stay unrecorded and are
//!    looked up by name at run time.
//!
//! Errors never stop the walk; the whole tree is always visited.

use std::collections::HashMap;

use log::{debug, info};

use crate::context::ParserContext;
use crate::expr::{Expr, ExprId, Lambda};
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::Token;

/// Hop counts keyed by the identity of `Variable`, `Assign`, `This` and
/// `Super` nodes.
pub type Locals = HashMap<ExprId, usize>;

/// Resolve a program.
pub fn resolve(statements: &[Stmt], ctx: &mut dyn ParserContext) -> Locals {
    let mut resolver = Resolver::new(ctx);
    resolver.resolve(statements);
    resolver.into_locals()
}

/// Resolve a bare REPL expression.
pub fn resolve_expression(expr: &Expr, ctx: &mut dyn ParserContext) -> Locals {
    let mut resolver = Resolver::new(ctx);
    resolver.resolve_expr(expr);
    resolver.into_locals()
}

/// What kind of function body are we in? Used to validate `return`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FunctionType {
    None,
    Function,
    Method,
    Initializer,
}

/// What kind of class body are we in? Used to validate `this` and `super`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ClassType {
    None,
    Class,
    Subclass,
    /// Inside a `class`‑prefixed method, which has no receiver.
    Static,
}

#[derive(Debug)]
struct Binding {
    defined: bool,
    used: bool,
    token: Token,
}

pub struct Resolver<'c> {
    scopes: Vec<HashMap<String, Binding>>,
    locals: Locals,
    current_function: FunctionType,
    current_class: ClassType,
    ctx: &'c mut dyn ParserContext,
}

impl<'c> Resolver<'c> {
    pub fn new(ctx: &'c mut dyn ParserContext) -> Self {
        info!("Resolver instantiated");

        Resolver {
            scopes: Vec::new(),
            locals: HashMap::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
            ctx,
        }
    }

    /// Walk all top‑level statements.
    pub fn resolve(&mut self, statements: &[Stmt]) {
        info!(
            "Beginning resolve pass over {} statement(s)",
            statements.len()
        );

        for stmt in statements {
            self.resolve_stmt(stmt);
        }
    }

    pub fn into_locals(self) -> Locals {
        info!("Resolve pass recorded {} local binding(s)", self.locals.len());

        self.locals
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Statement resolution
    // ─────────────────────────────────────────────────────────────────────────

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(statements) => {
                self.begin_scope();
                for s in statements {
                    self.resolve_stmt(s);
                }
                self.end_scope();
            }

            Stmt::Var { name, initializer } => {
                // declare → resolve initializer → define
                self.declare(name);
                if let Some(expr) = initializer {
                    self.resolve_expr(expr);
                }
                self.define(name);
            }

            Stmt::Function(FunctionDecl { name, lambda }) => {
                // The name is visible inside its own body, so recursion works.
                self.declare(name);
                self.define(name);
                self.resolve_function(lambda, FunctionType::Function);
            }

            Stmt::Class {
                name,
                superclass,
                methods,
                static_methods,
            } => self.resolve_class(name, superclass.as_ref(), methods, static_methods),

            Stmt::Expression(expr) | Stmt::Print(expr) => self.resolve_expr(expr),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);
                if let Some(eb) = else_branch.as_deref() {
                    self.resolve_stmt(eb);
                }
            }

            Stmt::While {
                condition,
                body,
                increment,
            } => {
                self.resolve_expr(condition);
                self.resolve_stmt(body);
                if let Some(inc) = increment {
                    self.resolve_expr(inc);
                }
            }

            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionType::None {
                    self.error(keyword, "Can't return from top-level code.");
                }

                if let Some(expr) = value {
                    if self.current_function == FunctionType::Initializer {
                        self.error(keyword, "Can't return a value from an initializer.");
                    }

                    self.resolve_expr(expr);
                }
            }

            // Placement was already checked by the parser.
            Stmt::Break(_)
            | Stmt::Continue(_)
            | Stmt::BreakError(_)
            | Stmt::ContinueError(_) => {}
        }
    }

    fn resolve_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[FunctionDecl],
        static_methods: &[FunctionDecl],
    ) {
        let enclosing_class = self.current_class;
        self.current_class = ClassType::Class;

        self.declare(name);
        self.define(name);

        if let Some(superclass) = superclass {
            if let Expr::Variable {
                name: superclass_name,
                ..
            } = superclass
            {
                if superclass_name.lexeme == name.lexeme {
                    self.error(superclass_name, "A class can't inherit from itself.");
                }
            }

            self.current_class = ClassType::Subclass;
            self.resolve_expr(superclass);

            self.begin_scope();
            self.define_synthetic("super", name);
        }

        self.begin_scope();
        self.define_synthetic("this", name);

        for method in methods {
            let kind = if method.name.lexeme == "init" {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };

            self.resolve_function(&method.lambda, kind);
        }

        self.end_scope();

        // Static methods close over the `super` scope but never see `this`.
        let class_kind = self.current_class;
        self.current_class = ClassType::Static;
        for method in static_methods {
            self.resolve_function(&method.lambda, FunctionType::Function);
        }
        self.current_class = class_kind;

        if superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Expression resolution
    // ─────────────────────────────────────────────────────────────────────────

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => {}

            Expr::Grouping(inner) => self.resolve_expr(inner),

            Expr::Unary { right, .. } | Expr::BinaryError { right, .. } => {
                self.resolve_expr(right)
            }

            Expr::Binary { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }

            Expr::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_expr(then_branch);
                self.resolve_expr(else_branch);
            }

            Expr::Variable { id, name } => {
                let in_own_initializer = self
                    .scopes
                    .last()
                    .and_then(|scope| scope.get(&name.lexeme))
                    .is_some_and(|binding| !binding.defined);

                if in_own_initializer {
                    let message = format!(
                        "Can't read local variable {} in its own initializer.",
                        name.lexeme
                    );
                    self.error(name, &message);
                }

                self.resolve_local(*id, name, true);
            }

            Expr::Assign { id, name, value } => {
                // RHS first, then bind the target
                self.resolve_expr(value);
                self.resolve_local(*id, name, false);
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                self.resolve_expr(callee);
                for arg in arguments {
                    self.resolve_expr(arg);
                }
            }

            Expr::Get { object, .. } => self.resolve_expr(object),

            Expr::Set { object, value, .. } => {
                self.resolve_expr(value);
                self.resolve_expr(object);
            }

            Expr::This { id, keyword } => match self.current_class {
                ClassType::None => self.error(keyword, "Can't use 'this' outside of a class."),
                ClassType::Static => self.error(keyword, "Can't use 'this' in a static method."),
                ClassType::Class | ClassType::Subclass => {
                    self.resolve_local(*id, keyword, true)
                }
            },

            Expr::Super { id, keyword, .. } => match self.current_class {
                ClassType::None => self.error(keyword, "Can't use 'super' outside of a class."),
                ClassType::Class => self.error(
                    keyword,
                    "Can't use 'super' in a class with no superclass.",
                ),
                ClassType::Static => {
                    self.error(keyword, "Can't use 'super' in a static method.")
                }
                ClassType::Subclass => self.resolve_local(*id, keyword, true),
            },

            Expr::Lambda(lambda) => self.resolve_function(lambda, FunctionType::Function),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Function helper
    // ─────────────────────────────────────────────────────────────────────────

    /// Enter a fresh scope for a function's parameters + body.
    fn resolve_function(&mut self, lambda: &Lambda, kind: FunctionType) {
        let enclosing = self.current_function;
        self.current_function = kind;

        self.begin_scope();
        for param in &lambda.params {
            self.declare(param);
            self.define(param);
            self.mark_used(param);
        }
        for stmt in &lambda.body {
            self.resolve_stmt(stmt);
        }
        self.end_scope();

        self.current_function = enclosing;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scope management
    // ─────────────────────────────────────────────────────────────────────────

    #[inline]
    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pop the innermost scope, reporting every local that was never read.
    fn end_scope(&mut self) {
        let Some(scope) = self.scopes.pop() else {
            return;
        };

        let mut unused: Vec<Token> = scope
            .into_values()
            .filter(|binding| !binding.used)
            .map(|binding| binding.token)
            .collect();

        // Map order is arbitrary; report in source order.
        unused.sort_by(|a, b| a.line.cmp(&b.line).then_with(|| a.lexeme.cmp(&b.lexeme)));

        for token in unused {
            let message = format!("Local variable {} is never used.", token.lexeme);
            self.error(&token, &message);
        }
    }

    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };

        let already_declared = scope.contains_key(&name.lexeme);

        scope.insert(
            name.lexeme.clone(),
            Binding {
                defined: false,
                used: false,
                token: name.clone(),
            },
        );

        if already_declared {
            let message = format!("Variable {} already declared in this scope.", name.lexeme);
            self.error(name, &message);
        }
    }

    fn define(&mut self, name: &Token) {
        if let Some(binding) = self
            .scopes
            .last_mut()
            .and_then(|scope| scope.get_mut(&name.lexeme))
        {
            binding.defined = true;
        }
    }

    fn mark_used(&mut self, name: &Token) {
        if let Some(binding) = self
            .scopes
            .last_mut()
            .and_then(|scope| scope.get_mut(&name.lexeme))
        {
            binding.used = true;
        }
    }

    /// Bind `this` or `super` in the innermost scope; never reported unused.
    fn define_synthetic(&mut self, lexeme: &str, class_name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(
                lexeme.to_string(),
                Binding {
                    defined: true,
                    used: true,
                    token: Token::synthetic(class_name.token_type, lexeme, class_name.line),
                },
            );
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Binding‑distance helper
    // ─────────────────────────────────────────────────────────────────────────

    /// Record this occurrence as a local at depth `d`, or leave it unrecorded
    /// (global) if no scope declares it. `read` marks the binding as used.
    fn resolve_local(&mut self, id: ExprId, name: &Token, read: bool) {
        for (depth, scope) in self.scopes.iter_mut().rev().enumerate() {
            if let Some(binding) = scope.get_mut(&name.lexeme) {
                if read {
                    binding.used = true;
                }

                debug!("Resolved '{}' at depth {}", name.lexeme, depth);

                self.locals.insert(id, depth);
                return;
            }
        }

        debug!("Resolved '{}' as global", name.lexeme);
    }

    fn error(&mut self, token: &Token, message: &str) {
        debug!("Resolve error at line {}: {}", token.line, message);

        self.ctx
            .parser_error_at(token.line, &token.location(), message);
    }
}
