use log::debug;
use serde::Serialize;
use std::fmt;

/// The different kinds of tokens recognized by the scanner.
///
/// Kinds carry no payload: literal values live on [`Token::literal`] so the
/// kind stays `Copy` and can key the static keyword table.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    /// '('
    LEFT_PAREN,

    /// ')'
    RIGHT_PAREN,

    /// '{'
    LEFT_BRACE,

    /// '}'
    RIGHT_BRACE,

    /// ','
    COMMA,

    /// '.'
    DOT,

    /// '-'
    MINUS,

    /// '+'
    PLUS,

    /// ';'
    SEMICOLON,

    /// '/'
    SLASH,

    /// '*'
    STAR,

    /// '?'
    QUESTION,

    /// ':'
    COLON,

    /// '!'
    BANG,

    /// '!='
    BANG_EQUAL,

    /// '='
    EQUAL,

    /// '=='
    EQUAL_EQUAL,

    /// '>'
    GREATER,

    /// '>='
    GREATER_EQUAL,

    /// '<'
    LESS,

    /// '<='
    LESS_EQUAL,

    /// A user‑defined identifier
    IDENTIFIER,

    /// A string literal
    STRING,

    /// A numeric literal
    NUMBER,

    AND,
    BREAK,
    CLASS,
    CONTINUE,
    ELSE,
    FALSE,
    FUN,
    FOR,
    IF,
    NIL,
    OR,
    PRINT,
    RETURN,
    SUPER,
    THIS,
    TRUE,
    VAR,
    WHILE,

    /// End‑of‑file marker
    EOF,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Variant names already are the canonical upper-case spelling.
        fmt::Debug::fmt(self, f)
    }
}

/// A literal value scanned eagerly from the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiteralValue {
    /// Numeric literal, stored as IEEE‑754 `f64`.
    Number(f64),

    /// String literal without surrounding quotes.
    Str(String),

    True,
    False,
    Nil,
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Number(n) => {
                // 3 → "3.0", 3.14 → "3.14"
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    let mut buf = itoa::Buffer::new();
                    write!(f, "{}.0", buf.format(*n as i64))
                } else {
                    write!(f, "{}", n)
                }
            }
            LiteralValue::Str(s) => f.write_str(s),
            LiteralValue::True => f.write_str("true"),
            LiteralValue::False => f.write_str("false"),
            LiteralValue::Nil => f.write_str("nil"),
        }
    }
}

/// A scanned token: its kind, the original lexeme, an optional literal and
/// the line it was found on. Tokens are immutable once scanned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// The exact substring of the source that produced this token.
    pub lexeme: String,

    pub literal: Option<LiteralValue>,

    /// 1‑based line number in the source.
    pub line: usize,
}

impl Token {
    pub fn new(
        token_type: TokenType,
        lexeme: impl Into<String>,
        literal: Option<LiteralValue>,
        line: usize,
    ) -> Self {
        let lexeme = lexeme.into();

        debug!(
            "Creating new token: type={:?}, lexeme={}, line={}",
            token_type, lexeme, line
        );

        Self {
            token_type,
            lexeme,
            literal,
            line,
        }
    }

    /// Build a token that never appeared in source, e.g. the implicit `this`
    /// looked up when an initializer returns.
    pub fn synthetic(token_type: TokenType, lexeme: &str, line: usize) -> Self {
        Self::new(token_type, lexeme, None, line)
    }

    /// Location hint used in diagnostics: `" at end"` or `" at 'x'"`.
    pub fn location(&self) -> String {
        if self.token_type == TokenType::EOF {
            " at end".to_string()
        } else {
            format!(" at '{}'", self.lexeme)
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {} {}", self.token_type, self.lexeme, literal),
            None => write!(f, "{} {} null", self.token_type, self.lexeme),
        }
    }
}
