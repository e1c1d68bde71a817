use std::rc::Rc;

use crate::expr::{Expr, Lambda};
use crate::token::Token;

/// A named function: a `fun` declaration or a method inside a class body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Token,
    pub lambda: Rc<Lambda>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(Expr),

    Print(Expr),

    /// `initializer` is `None` when the declaration has no `=`, which leaves
    /// the variable unassigned rather than `nil`.
    Var {
        name: Token,
        initializer: Option<Expr>,
    },

    Block(Vec<Stmt>),

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// `increment` is only set by `for` desugaring; it runs after the body on
    /// every iteration, including ones cut short by `continue`.
    While {
        condition: Expr,
        body: Box<Stmt>,
        increment: Option<Expr>,
    },

    Break(Token),

    Continue(Token),

    /// `break` outside any loop; always fails if executed.
    BreakError(Token),

    /// `continue` outside any loop; always fails if executed.
    ContinueError(Token),

    Function(FunctionDecl),

    Return {
        keyword: Token,
        value: Option<Expr>,
    },

    Class {
        name: Token,
        /// Always an `Expr::Variable` when present.
        superclass: Option<Expr>,
        methods: Vec<FunctionDecl>,
        static_methods: Vec<FunctionDecl>,
    },
}
