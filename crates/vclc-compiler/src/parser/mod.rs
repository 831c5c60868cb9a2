//! Tokens for the literal compiler.
//!
//! The compiler works on a flat token stream; there is no tree. Trivia is
//! dropped by the lexer, so the cursor only ever sees significant tokens.

mod kind;
mod lexer;

#[cfg(test)]
mod lexer_tests;

pub use kind::TokenKind;
pub use lexer::{Token, lex, string_value, token_text};
