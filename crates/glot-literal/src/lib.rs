//! Literal inference for example statements.
//!
//! Tokenizes a single statement of example code and parses one literal
//! expression into a `(value, type)` pair: the concrete [`Value`] plus the
//! inferred [`glot_schema::Type`] tree. The tokenizer also serves the
//! assertion scanner, which walks the same token stream to recognize the
//! `assert f(args) == expected` shape.

mod cursor;
mod error;
mod lexer;
mod parse;
mod token;
mod value;

pub use error::LiteralError;
pub use lexer::Lexer;
pub use parse::{parse_literal, LiteralParser, NumericWidening, Parsed};
pub use token::{Token, TokenKind};
pub use value::{MapKey, Value};
