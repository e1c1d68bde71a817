use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::stmt::Stmt;
use crate::token::{LiteralValue, Token};

/// Stable identity of a variable-reference node.
///
/// The resolver keys its hop-count table by this id rather than by structural
/// equality, so two textually identical `x` reads stay distinct. Ids are
/// process-unique, which keeps them distinct across REPL lines that share one
/// interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(usize);

static NEXT_EXPR_ID: AtomicUsize = AtomicUsize::new(0);

impl ExprId {
    pub fn fresh() -> Self {
        ExprId(NEXT_EXPR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Parameters and body shared by named functions, methods and anonymous
/// function expressions. Held behind an `Rc` so runtime function values can
/// keep their declaration alive without copying the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralValue),

    Grouping(Box<Expr>),

    Unary {
        operator: Token,
        right: Box<Expr>,
    },

    /// Arithmetic, comparison, equality, logical (`and`/`or`) and the comma
    /// operator all share this node; the operator token tells them apart.
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// A binary operator with no left operand (`*3`). Accepted by the parser
    /// for error recovery; always fails if evaluated.
    BinaryError {
        operator: Token,
        right: Box<Expr>,
    },

    /// `condition ? then_branch : else_branch`
    Conditional {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },

    Variable {
        id: ExprId,
        name: Token,
    },

    Assign {
        id: ExprId,
        name: Token,
        value: Box<Expr>,
    },

    Call {
        callee: Box<Expr>,
        /// The closing `)` token, retained for error reporting.
        paren: Token,
        arguments: Vec<Expr>,
    },

    /// object.property
    Get {
        object: Box<Expr>,
        name: Token,
    },

    /// object.property = value
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },

    This {
        id: ExprId,
        keyword: Token,
    },

    /// `super.method`
    Super {
        id: ExprId,
        keyword: Token,
        method: Token,
    },

    Lambda(Rc<Lambda>),
}

impl Expr {
    pub fn variable(name: Token) -> Self {
        Expr::Variable {
            id: ExprId::fresh(),
            name,
        }
    }
}
