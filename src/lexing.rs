//! Lexical stage
//!
//! [`segment`] splits a sentence into lexemes; [`Classifier`] assigns each one
//! a lexical type and a syntactic category and checks it against the
//! character alphabet.

pub mod classifier;
pub mod segmenter;

pub use classifier::{first_invalid, tokenization, Classifier, LexicalType, Token};
pub use segmenter::{segment, Lexeme, LexemeKind};
