//! Debug renderings of expressions: parenthesized prefix form and
//! reverse‑Polish form.

use thiserror::Error;

use crate::expr::Expr;
use crate::token::Token;
use crate::value::Value;

/// Converts an expression to the Crafting‑Interpreters prefix form,
/// e.g. `(* (- 123) (group 45.67))`.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(expr: &Expr) -> String {
        match expr {
            Expr::Literal(lit) => Value::from(lit).to_string(),

            Expr::Grouping(inner) => parenthesize("group", &[&**inner]),

            Expr::Unary { operator, right } => parenthesize(&operator.lexeme, &[&**right]),

            Expr::Binary {
                left,
                operator,
                right,
            } => parenthesize(&operator.lexeme, &[&**left, &**right]),

            Expr::BinaryError { operator, right } => {
                format!("(error {} {})", operator.lexeme, Self::print(right))
            }

            Expr::Conditional {
                condition,
                then_branch,
                else_branch,
            } => parenthesize("?:", &[&**condition, &**then_branch, &**else_branch]),

            Expr::Variable { name, .. } => name.lexeme.clone(),

            Expr::Assign { name, value, .. } => {
                format!("(= {} {})", name.lexeme, Self::print(value))
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                let mut s = format!("(call {}", Self::print(callee));
                for arg in arguments {
                    s.push(' ');
                    s.push_str(&Self::print(arg));
                }
                s.push(')');
                s
            }

            Expr::Get { object, name } => format!("(. {} {})", Self::print(object), name.lexeme),

            Expr::Set {
                object,
                name,
                value,
            } => format!(
                "(= (. {} {}) {})",
                Self::print(object),
                name.lexeme,
                Self::print(value)
            ),

            Expr::This { .. } => "this".into(),

            Expr::Super { method, .. } => format!("(super {})", method.lexeme),

            Expr::Lambda(lambda) => format!("(fun ({}))", join_params(&lambda.params)),
        }
    }
}

fn parenthesize(name: &str, exprs: &[&Expr]) -> String {
    let mut s = format!("({}", name);
    for expr in exprs {
        s.push(' ');
        s.push_str(&AstPrinter::print(expr));
    }
    s.push(')');
    s
}

fn join_params(params: &[Token]) -> String {
    params
        .iter()
        .map(|p| p.lexeme.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Error)]
#[error("[line {line}] Can't print a binary operator without left operand '{operator}'")]
pub struct RpnError {
    pub line: usize,
    pub operator: String,
}

/// Reverse‑Polish rendering: `(1 + 2) * (4 - 3)` → `1 2 + 4 3 - *`.
/// Grouping disappears; a conditional prints as `c a b ?`.
pub struct RpnPrinter;

impl RpnPrinter {
    pub fn print(expr: &Expr) -> Result<String, RpnError> {
        Ok(match expr {
            Expr::Literal(lit) => Value::from(lit).to_string(),

            Expr::Grouping(inner) => Self::print(inner)?,

            Expr::Unary { operator, right } => format!("{} {}", Self::print(right)?, operator.lexeme),

            Expr::Binary {
                left,
                operator,
                right,
            } => format!(
                "{} {} {}",
                Self::print(left)?,
                Self::print(right)?,
                operator.lexeme
            ),

            Expr::BinaryError { operator, .. } => {
                return Err(RpnError {
                    line: operator.line,
                    operator: operator.lexeme.clone(),
                })
            }

            Expr::Conditional {
                condition,
                then_branch,
                else_branch,
            } => format!(
                "{} {} {} ?",
                Self::print(condition)?,
                Self::print(then_branch)?,
                Self::print(else_branch)?
            ),

            Expr::Variable { name, .. } => name.lexeme.clone(),

            Expr::Assign { name, value, .. } => format!("{} {} =", name.lexeme, Self::print(value)?),

            Expr::Call {
                callee, arguments, ..
            } => {
                let mut parts = vec![Self::print(callee)?];
                for arg in arguments {
                    parts.push(Self::print(arg)?);
                }
                parts.push("call".to_string());
                parts.join(" ")
            }

            Expr::Get { object, name } => format!("{} {} .", Self::print(object)?, name.lexeme),

            Expr::Set {
                object,
                name,
                value,
            } => format!(
                "{} {} {} .=",
                Self::print(object)?,
                name.lexeme,
                Self::print(value)?
            ),

            Expr::This { .. } => "this".into(),

            Expr::Super { method, .. } => format!("super {} .", method.lexeme),

            Expr::Lambda(lambda) => format!("fun/{}", lambda.params.len()),
        })
    }
}
