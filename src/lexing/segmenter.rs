//! Sentence segmentation
//!
//! Splits raw text into lexemes with logos. Whitespace separates words;
//! each of `. , ; : ! ? ¿ ¡` is a lexeme of its own; integers and decimals are
//! numbers. Anything else up to the next space or punctuation mark is a word,
//! including characters outside the lexical alphabet (those are reported by
//! the classifier, not here).

use logos::Logos;
use serde::Serialize;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[logos(skip r"\s+")]
#[serde(rename_all = "snake_case")]
pub enum LexemeKind {
    #[regex(r"[0-9]+(\.[0-9]+)?", priority = 3)]
    Number,

    #[regex(r"[.,;:!?¿¡]")]
    Punctuation,

    #[regex(r"[^\s.,;:!?¿¡]+", priority = 1)]
    Word,
}

/// One lexeme with its index in the sentence and its byte span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lexeme {
    pub text: String,
    pub kind: LexemeKind,
    pub index: usize,
    pub span: Range<usize>,
}

/// Splits `sentence` into lexemes, in order.
pub fn segment(sentence: &str) -> Vec<Lexeme> {
    let mut lexer = LexemeKind::lexer(sentence);
    let mut lexemes = Vec::new();

    while let Some(result) = lexer.next() {
        // Every non-space character is covered by `Word`, so errors only
        // show up for input logos cannot decode; keep the slice as a word.
        let kind = result.unwrap_or(LexemeKind::Word);
        lexemes.push(Lexeme {
            text: lexer.slice().to_string(),
            kind,
            index: lexemes.len(),
            span: lexer.span(),
        });
    }

    lexemes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(sentence: &str) -> Vec<(String, LexemeKind)> {
        segment(sentence)
            .into_iter()
            .map(|l| (l.text, l.kind))
            .collect()
    }

    #[test]
    fn test_words_and_punctuation() {
        let lexemes = kinds("¿Cuánto cuesta el balón?");
        let texts: Vec<&str> = lexemes.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(texts, ["¿", "Cuánto", "cuesta", "el", "balón", "?"]);
        assert_eq!(lexemes[0].1, LexemeKind::Punctuation);
        assert_eq!(lexemes[1].1, LexemeKind::Word);
        assert_eq!(lexemes[5].1, LexemeKind::Punctuation);
    }

    #[test]
    fn test_numbers() {
        let lexemes = kinds("cuesta 25 o 19.99 euros");
        assert_eq!(lexemes[1], ("25".to_string(), LexemeKind::Number));
        assert_eq!(lexemes[3], ("19.99".to_string(), LexemeKind::Number));
    }

    #[test]
    fn test_number_followed_by_period() {
        let lexemes = kinds("son 3.");
        assert_eq!(lexemes[1], ("3".to_string(), LexemeKind::Number));
        assert_eq!(lexemes[2], (".".to_string(), LexemeKind::Punctuation));
    }

    #[test]
    fn test_mixed_word_is_one_lexeme() {
        let lexemes = kinds("3cosa hola@mundo");
        assert_eq!(lexemes[0], ("3cosa".to_string(), LexemeKind::Word));
        assert_eq!(lexemes[1], ("hola@mundo".to_string(), LexemeKind::Word));
    }

    #[test]
    fn test_indices_and_spans() {
        let lexemes = segment("  el perro.");
        assert_eq!(lexemes.len(), 3);
        assert_eq!(lexemes[1].index, 1);
        assert_eq!(lexemes[1].span, 5..10);
        assert_eq!(lexemes[2].span, 10..11);
    }

    #[test]
    fn test_empty_input() {
        assert!(segment("   ").is_empty());
    }
}
