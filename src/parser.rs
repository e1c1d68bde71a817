/*!
Recursive‑descent parser: tokens → statements (or a bare expression in REPL
mode).

Time & Space Complexity
-----------------------

| Phase / function              | Cost | Rationale                                                |
|-------------------------------|-----:|----------------------------------------------------------|
| `Parser::parse` main loop     | Θ(n) | Each token is consumed once via `advance()`.             |
| Error recovery `synchronize()`| O(k) | Discards tokens up to the next statement boundary.       |

Call‑stack depth grows with syntactic nesting.

### Error policy

Every syntax error is reported to the [`ParserContext`] the moment it is found.
Errors that leave the parser lost unwind to the nearest declaration, which
enters *panic mode* (`synchronize`) and resumes, so one call reports every
error in the input. Errors that leave the parser on solid ground (invalid
assignment target, `break` outside a loop, a binary operator with no left
operand, too many arguments) are reported and parsing simply continues with a
best‑effort node.

Grammar (EBNF)
--------------

```text
program        → declaration* EOF ;
declaration    → classDecl | funDecl | varDecl | statement ;
classDecl      → "class" IDENT ( "<" IDENT )? "{" ( "class"? function )* "}" ;
funDecl        → "fun" function ;
function       → IDENT "(" parameters? ")" block ;
varDecl        → "var" IDENT ( "=" expression )? ";" ;
statement      → exprStmt | printStmt | forStmt | whileStmt | ifStmt
               | returnStmt | breakStmt | continueStmt | block ;
exprStmt       → series ";" ;
printStmt      → "print" series ";" ;
forStmt        → "for" "(" ( varDecl | exprStmt | ";" ) expression? ";"
                 expression? ")" statement ;
block          → "{" declaration* "}" ;
series         → binaryError ( "," binaryError )* ;
binaryError    → BINARY_OP expression | expression ;
expression     → assignment ;
assignment     → ( call "." )? IDENT "=" assignment | conditional ;
conditional    → logic_or ( "?" conditional ":" conditional )? ;
logic_or       → logic_and ( "or" logic_and )* ;
logic_and      → equality  ( "and" equality )* ;
equality       → comparison ( ( "!=" | "==" ) comparison )* ;
comparison     → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
term           → factor ( ( "-" | "+" ) factor )* ;
factor         → unary ( ( "/" | "*" ) unary )* ;
unary          → ( "!" | "-" ) unary | call ;
call           → primary ( "(" arguments? ")" | "." IDENT )* ;
primary        → NUMBER | STRING | "true" | "false" | "nil" | "this"
               | "super" "." IDENT | IDENT | "(" expression ")"
               | "fun" "(" parameters? ")" block ;
```
*/

use std::rc::Rc;

use log::{debug, info};
use thiserror::Error;

use crate::context::ParserContext;
use crate::expr::{Expr, ExprId, Lambda};
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::{LiteralValue, Token, TokenType};

const MAX_ARGUMENTS: usize = 255;

/// Marker for an error that has already been reported; it only drives
/// unwinding to the nearest recovery point.
#[derive(Debug, Error)]
#[error("parse error")]
struct ParseError;

type PResult<T> = std::result::Result<T, ParseError>;

/// Result of a parse: a program, or in REPL mode possibly a single bare
/// expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Statements(Vec<Stmt>),
    Expression(Expr),
}

enum Line {
    Statement(Stmt),
    Expression(Expr),
}

/// Parse `tokens`. With `allow_expression` set, an input consisting of exactly
/// one expression without a trailing `;` comes back as [`Parsed::Expression`].
pub fn parse(tokens: Vec<Token>, allow_expression: bool, ctx: &mut dyn ParserContext) -> Parsed {
    Parser::new(tokens, ctx).parse(allow_expression)
}

/// Top‑level parser over an owned token sequence.
pub struct Parser<'c> {
    tokens: Vec<Token>,
    current: usize,
    /// Number of loops enclosing the current position within the innermost
    /// function body.
    loop_depth: usize,
    ctx: &'c mut dyn ParserContext,
}

impl<'c> Parser<'c> {
    pub fn new(mut tokens: Vec<Token>, ctx: &'c mut dyn ParserContext) -> Self {
        info!("Parser created with {} tokens", tokens.len());

        if tokens.last().map(|t| t.token_type) != Some(TokenType::EOF) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::new(TokenType::EOF, "", None, line));
        }

        Self {
            tokens,
            current: 0,
            loop_depth: 0,
            ctx,
        }
    }

    // ───────────────────────── public API ─────────────────────────

    pub fn parse(mut self, allow_expression: bool) -> Parsed {
        info!("Beginning parse phase");

        let mut statements: Vec<Stmt> = Vec::new();

        if allow_expression && !self.is_at_end() {
            match self.declaration_or_expression() {
                Ok(Line::Expression(expr)) => {
                    debug!("Input parsed as a bare expression");
                    return Parsed::Expression(expr);
                }
                Ok(Line::Statement(stmt)) => statements.push(stmt),
                Err(ParseError) => self.synchronize(),
            }
        }

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        info!("Parsed {} top-level statement(s)", statements.len());

        Parsed::Statements(statements)
    }

    // ──────────────────────── declaration rules ───────────────────

    fn declaration_or_expression(&mut self) -> PResult<Line> {
        if !self.starts_expression_statement() {
            return self.declaration_inner().map(Line::Statement);
        }

        let expr: Expr = self.series()?;

        if self.matches(TokenType::SEMICOLON) {
            Ok(Line::Statement(Stmt::Expression(expr)))
        } else if self.is_at_end() {
            Ok(Line::Expression(expr))
        } else {
            Err(self.error_at_current("Expect ';' after expression."))
        }
    }

    fn starts_expression_statement(&self) -> bool {
        match self.peek().token_type {
            TokenType::CLASS
            | TokenType::VAR
            | TokenType::PRINT
            | TokenType::LEFT_BRACE
            | TokenType::IF
            | TokenType::WHILE
            | TokenType::FOR
            | TokenType::RETURN
            | TokenType::BREAK
            | TokenType::CONTINUE => false,
            TokenType::FUN => !self.check_next(TokenType::IDENTIFIER),
            _ => true,
        }
    }

    /// Parse one declaration, recovering from any error. Returns `None` when
    /// the declaration was discarded.
    fn declaration(&mut self) -> Option<Stmt> {
        debug!("Entering declaration");

        match self.declaration_inner() {
            Ok(stmt) => Some(stmt),
            Err(ParseError) => {
                self.synchronize();
                None
            }
        }
    }

    fn declaration_inner(&mut self) -> PResult<Stmt> {
        if self.matches(TokenType::CLASS) {
            self.class_declaration()
        } else if self.check(TokenType::FUN) && self.check_next(TokenType::IDENTIFIER) {
            self.advance();
            Ok(Stmt::Function(self.function("function")?))
        } else if self.matches(TokenType::VAR) {
            self.var_declaration()
        } else {
            self.statement()
        }
    }

    fn class_declaration(&mut self) -> PResult<Stmt> {
        let name: Token = self.consume(TokenType::IDENTIFIER, "Expect class name.")?;

        let superclass: Option<Expr> = if self.matches(TokenType::LESS) {
            let superclass_name = self.consume(TokenType::IDENTIFIER, "Expect superclass name.")?;
            Some(Expr::variable(superclass_name))
        } else {
            None
        };

        self.consume(TokenType::LEFT_BRACE, "Expect '{' before class body.")?;

        let mut methods: Vec<FunctionDecl> = Vec::new();
        let mut static_methods: Vec<FunctionDecl> = Vec::new();

        while !self.check(TokenType::RIGHT_BRACE) && !self.is_at_end() {
            if self.matches(TokenType::CLASS) {
                static_methods.push(self.function("static method")?);
            } else {
                methods.push(self.function("method")?);
            }
        }

        self.consume(TokenType::RIGHT_BRACE, "Expect '}' after class body.")?;

        debug!(
            "Parsed class '{}' with {} method(s), {} static",
            name.lexeme,
            methods.len(),
            static_methods.len()
        );

        Ok(Stmt::Class {
            name,
            superclass,
            methods,
            static_methods,
        })
    }

    fn function(&mut self, kind: &str) -> PResult<FunctionDecl> {
        let name: Token = self.consume(TokenType::IDENTIFIER, &format!("Expect {} name.", kind))?;

        self.consume(
            TokenType::LEFT_PAREN,
            &format!("Expect '(' after {} name.", kind),
        )?;

        let lambda = self.parameters_and_body(kind)?;

        Ok(FunctionDecl { name, lambda })
    }

    /// Parse `parameters? ")" block`; the opening `(` is already consumed.
    fn parameters_and_body(&mut self, kind: &str) -> PResult<Rc<Lambda>> {
        let mut params: Vec<Token> = Vec::new();

        if !self.check(TokenType::RIGHT_PAREN) {
            loop {
                if params.len() >= MAX_ARGUMENTS {
                    let token = self.peek().clone();
                    self.report(&token, "Can't have more than 255 parameters.");
                }

                params.push(self.consume(TokenType::IDENTIFIER, "Expect parameter name.")?);

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after parameters.")?;
        self.consume(
            TokenType::LEFT_BRACE,
            &format!("Expect '{{' before {} body.", kind),
        )?;

        // Loops outside a function body don't make `break` legal inside it.
        let enclosing_loops = std::mem::replace(&mut self.loop_depth, 0);
        let body = self.block();
        self.loop_depth = enclosing_loops;

        Ok(Rc::new(Lambda {
            params,
            body: body?,
        }))
    }

    fn var_declaration(&mut self) -> PResult<Stmt> {
        let name: Token = self.consume(TokenType::IDENTIFIER, "Expect variable name.")?;

        let initializer: Option<Expr> = if self.matches(TokenType::EQUAL) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(
            TokenType::SEMICOLON,
            "Expect ';' after variable declaration.",
        )?;

        Ok(Stmt::Var { name, initializer })
    }

    // ───────────────────────── statement rules ────────────────────

    fn statement(&mut self) -> PResult<Stmt> {
        if self.matches(TokenType::FOR) {
            self.for_statement()
        } else if self.matches(TokenType::IF) {
            self.if_statement()
        } else if self.matches(TokenType::WHILE) {
            self.while_statement()
        } else if self.matches(TokenType::RETURN) {
            self.return_statement()
        } else if self.matches(TokenType::BREAK) {
            self.break_statement()
        } else if self.matches(TokenType::CONTINUE) {
            self.continue_statement()
        } else if self.matches(TokenType::LEFT_BRACE) {
            Ok(Stmt::Block(self.block()?))
        } else if self.matches(TokenType::PRINT) {
            self.print_statement()
        } else {
            self.expression_statement()
        }
    }

    /// `for` is sugar: `{ init; while (cond) body }`, with the increment
    /// attached to the loop so `continue` still runs it.
    fn for_statement(&mut self) -> PResult<Stmt> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'for'.")?;

        let initializer: Option<Stmt> = if self.matches(TokenType::SEMICOLON) {
            None
        } else if self.matches(TokenType::VAR) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition: Expr = if !self.check(TokenType::SEMICOLON) {
            self.expression()?
        } else {
            Expr::Literal(LiteralValue::True)
        };
        self.consume(TokenType::SEMICOLON, "Expect ';' after loop condition.")?;

        let increment: Option<Expr> = if !self.check(TokenType::RIGHT_PAREN) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after for clauses.")?;

        let body: Stmt = self.loop_body()?;

        let while_loop = Stmt::While {
            condition,
            body: Box::new(body),
            increment,
        };

        Ok(match initializer {
            Some(init) => Stmt::Block(vec![init, while_loop]),
            None => while_loop,
        })
    }

    fn while_statement(&mut self) -> PResult<Stmt> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'while'.")?;
        let condition: Expr = self.expression()?;
        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after condition.")?;

        let body: Stmt = self.loop_body()?;

        Ok(Stmt::While {
            condition,
            body: Box::new(body),
            increment: None,
        })
    }

    fn loop_body(&mut self) -> PResult<Stmt> {
        self.loop_depth += 1;
        let body = self.statement();
        self.loop_depth -= 1;

        body
    }

    fn if_statement(&mut self) -> PResult<Stmt> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'if'.")?;
        let condition: Expr = self.expression()?;
        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after if condition.")?;

        let then_branch: Box<Stmt> = Box::new(self.statement()?);
        let else_branch: Option<Box<Stmt>> = if self.matches(TokenType::ELSE) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn return_statement(&mut self) -> PResult<Stmt> {
        let keyword: Token = self.previous().clone();
        let value: Option<Expr> = if !self.check(TokenType::SEMICOLON) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::SEMICOLON, "Expect ';' after return value.")?;

        Ok(Stmt::Return { keyword, value })
    }

    fn break_statement(&mut self) -> PResult<Stmt> {
        let keyword: Token = self.previous().clone();
        self.consume(TokenType::SEMICOLON, "Expect ';' after 'break'.")?;

        if self.loop_depth == 0 {
            self.report(&keyword, "Invalid break statement");
            return Ok(Stmt::BreakError(keyword));
        }

        Ok(Stmt::Break(keyword))
    }

    fn continue_statement(&mut self) -> PResult<Stmt> {
        let keyword: Token = self.previous().clone();
        self.consume(TokenType::SEMICOLON, "Expect ';' after 'continue'.")?;

        if self.loop_depth == 0 {
            self.report(&keyword, "Invalid continue statement");
            return Ok(Stmt::ContinueError(keyword));
        }

        Ok(Stmt::Continue(keyword))
    }

    fn print_statement(&mut self) -> PResult<Stmt> {
        let value: Expr = self.series()?;

        self.consume(TokenType::SEMICOLON, "Expect ';' after value.")?;

        Ok(Stmt::Print(value))
    }

    fn expression_statement(&mut self) -> PResult<Stmt> {
        let expr: Expr = self.series()?;
        self.consume(TokenType::SEMICOLON, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }

    fn block(&mut self) -> PResult<Vec<Stmt>> {
        let mut statements: Vec<Stmt> = Vec::new();

        while !self.check(TokenType::RIGHT_BRACE) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(TokenType::RIGHT_BRACE, "Expect '}' after block.")?;
        Ok(statements)
    }

    // ─────────────────────── expression rules ─────────────────────

    /// Comma series, the loosest binding form; only statements use it so
    /// call arguments stay comma separated.
    fn series(&mut self) -> PResult<Expr> {
        self.left_assoc(Self::binary_error, &[TokenType::COMMA])
    }

    /// A binary operator with nothing on its left. The right operand is still
    /// parsed so later errors inside it get reported too.
    fn binary_error(&mut self) -> PResult<Expr> {
        if self.match_any(&[
            TokenType::SLASH,
            TokenType::STAR,
            TokenType::PLUS,
            TokenType::GREATER,
            TokenType::GREATER_EQUAL,
            TokenType::LESS,
            TokenType::LESS_EQUAL,
            TokenType::BANG_EQUAL,
            TokenType::EQUAL_EQUAL,
        ]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.expression()?;

            self.report(&operator, "Binary operator without left operand");

            return Ok(Expr::BinaryError {
                operator,
                right: Box::new(right),
            });
        }

        self.expression()
    }

    fn expression(&mut self) -> PResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> PResult<Expr> {
        let expr: Expr = self.conditional()?;

        if self.matches(TokenType::EQUAL) {
            let equals: Token = self.previous().clone();
            let value: Expr = self.assignment()?;

            return Ok(match expr {
                Expr::Variable { name, .. } => Expr::Assign {
                    id: ExprId::fresh(),
                    name,
                    value: Box::new(value),
                },

                Expr::Get { object, name } => Expr::Set {
                    object,
                    name,
                    value: Box::new(value),
                },

                other => {
                    self.report(&equals, "Invalid assignment target.");
                    other
                }
            });
        }

        Ok(expr)
    }

    fn conditional(&mut self) -> PResult<Expr> {
        let expr: Expr = self.logical_or()?;

        if self.matches(TokenType::QUESTION) {
            let then_branch: Expr = self.conditional()?;
            self.consume(TokenType::COLON, "Expect ':' after conditional.")?;
            let else_branch: Expr = self.conditional()?;

            return Ok(Expr::Conditional {
                condition: Box::new(expr),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            });
        }

        Ok(expr)
    }

    fn logical_or(&mut self) -> PResult<Expr> {
        self.left_assoc(Self::logical_and, &[TokenType::OR])
    }

    fn logical_and(&mut self) -> PResult<Expr> {
        self.left_assoc(Self::equality, &[TokenType::AND])
    }

    fn equality(&mut self) -> PResult<Expr> {
        self.left_assoc(
            Self::comparison,
            &[TokenType::BANG_EQUAL, TokenType::EQUAL_EQUAL],
        )
    }

    fn comparison(&mut self) -> PResult<Expr> {
        self.left_assoc(
            Self::term,
            &[
                TokenType::GREATER,
                TokenType::GREATER_EQUAL,
                TokenType::LESS,
                TokenType::LESS_EQUAL,
            ],
        )
    }

    fn term(&mut self) -> PResult<Expr> {
        self.left_assoc(Self::factor, &[TokenType::MINUS, TokenType::PLUS])
    }

    fn factor(&mut self) -> PResult<Expr> {
        self.left_assoc(Self::unary, &[TokenType::SLASH, TokenType::STAR])
    }

    /// Shared rule for every left‑associative binary level.
    fn left_assoc(
        &mut self,
        operand: fn(&mut Self) -> PResult<Expr>,
        operators: &[TokenType],
    ) -> PResult<Expr> {
        let mut expr: Expr = operand(self)?;

        while self.match_any(operators) {
            let operator: Token = self.previous().clone();
            let right: Expr = operand(self)?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn unary(&mut self) -> PResult<Expr> {
        if self.match_any(&[TokenType::BANG, TokenType::MINUS]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.unary()?;
            return Ok(Expr::Unary {
                operator,
                right: Box::new(right),
            });
        }

        self.call()
    }

    fn call(&mut self) -> PResult<Expr> {
        let mut expr: Expr = self.primary()?;

        loop {
            if self.matches(TokenType::LEFT_PAREN) {
                expr = self.finish_call(expr)?;
            } else if self.matches(TokenType::DOT) {
                let name: Token =
                    self.consume(TokenType::IDENTIFIER, "Expect property name after '.'.")?;

                expr = Expr::Get {
                    object: Box::new(expr),
                    name,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> PResult<Expr> {
        let mut arguments: Vec<Expr> = Vec::new();
        if !self.check(TokenType::RIGHT_PAREN) {
            loop {
                if arguments.len() >= MAX_ARGUMENTS {
                    let token = self.peek().clone();
                    self.report(&token, "Can't have more than 255 arguments.");
                }

                arguments.push(self.expression()?);

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        let paren: Token = self.consume(TokenType::RIGHT_PAREN, "Expect ')' after arguments.")?;

        Ok(Expr::Call {
            callee: Box::new(callee),
            paren,
            arguments,
        })
    }

    fn primary(&mut self) -> PResult<Expr> {
        if self.matches(TokenType::FALSE) {
            return Ok(Expr::Literal(LiteralValue::False));
        }
        if self.matches(TokenType::TRUE) {
            return Ok(Expr::Literal(LiteralValue::True));
        }
        if self.matches(TokenType::NIL) {
            return Ok(Expr::Literal(LiteralValue::Nil));
        }

        if self.match_any(&[TokenType::NUMBER, TokenType::STRING]) {
            let literal = self.previous().literal.clone().unwrap_or(LiteralValue::Nil);
            return Ok(Expr::Literal(literal));
        }

        if self.matches(TokenType::SUPER) {
            let keyword: Token = self.previous().clone();
            self.consume(TokenType::DOT, "Expect '.' after 'super'.")?;
            let method: Token =
                self.consume(TokenType::IDENTIFIER, "Expect superclass method name.")?;

            return Ok(Expr::Super {
                id: ExprId::fresh(),
                keyword,
                method,
            });
        }

        if self.matches(TokenType::THIS) {
            return Ok(Expr::This {
                id: ExprId::fresh(),
                keyword: self.previous().clone(),
            });
        }

        if self.matches(TokenType::IDENTIFIER) {
            return Ok(Expr::variable(self.previous().clone()));
        }

        if self.matches(TokenType::FUN) {
            self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'fun'.")?;
            return Ok(Expr::Lambda(self.parameters_and_body("function")?));
        }

        if self.matches(TokenType::LEFT_PAREN) {
            let expr: Expr = self.expression()?;

            self.consume(TokenType::RIGHT_PAREN, "Expect ')' after expression.")?;

            return Ok(Expr::Grouping(Box::new(expr)));
        }

        Err(self.error_at_current("Expect expression."))
    }

    // ────────────────────── utility helpers ───────────────────────

    #[inline(always)]
    fn matches(&mut self, ttype: TokenType) -> bool {
        if self.check(ttype) {
            self.advance();

            return true;
        }

        false
    }

    fn match_any(&mut self, ttypes: &[TokenType]) -> bool {
        ttypes.iter().any(|&ttype| self.matches(ttype))
    }

    fn consume(&mut self, ttype: TokenType, message: &str) -> PResult<Token> {
        if self.check(ttype) {
            return Ok(self.advance().clone());
        }

        Err(self.error_at_current(message))
    }

    #[inline(always)]
    fn check(&self, ttype: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        self.peek().token_type == ttype
    }

    fn check_next(&self, ttype: TokenType) -> bool {
        self.tokens
            .get(self.current + 1)
            .is_some_and(|t| t.token_type == ttype)
    }

    #[inline(always)]
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::EOF
    }

    #[inline(always)]
    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    #[inline(always)]
    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn report(&mut self, token: &Token, message: &str) {
        debug!("Parse error at line {}: {}", token.line, message);

        self.ctx
            .parser_error_at(token.line, &token.location(), message);
    }

    fn error_at_current(&mut self, message: &str) -> ParseError {
        let token = self.peek().clone();
        self.report(&token, message);
        ParseError
    }

    /// Discards tokens until it thinks it is at a statement boundary.
    fn synchronize(&mut self) {
        self.advance(); // skip the token that caused the error

        while !self.is_at_end() {
            if self.previous().token_type == TokenType::SEMICOLON {
                return;
            }

            match self.peek().token_type {
                TokenType::CLASS
                | TokenType::FUN
                | TokenType::VAR
                | TokenType::FOR
                | TokenType::IF
                | TokenType::WHILE
                | TokenType::PRINT
                | TokenType::RETURN => return,
                _ => {}
            }

            self.advance();
        }
    }
}
