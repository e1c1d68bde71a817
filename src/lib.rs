pub mod callable;
pub mod class;
pub mod context;
pub mod environment;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod lox;
pub mod parser;
pub mod printer;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;
pub mod value;
