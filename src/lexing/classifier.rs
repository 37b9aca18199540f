//! Word classification.
//!
//! Numbers and punctuation are recognized first; every other word runs
//! through the configured rule table in order and takes the category of the
//! first rule that matches, falling back to the default category. Independently
//! of its category, a word is valid only if the alphabet automaton accepts it;
//! otherwise the first character outside the alphabet is reported.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use super::segmenter::segment;
use crate::automata::{Automaton, AutomatonBuilder};
use crate::config::LexiconConfig;
use crate::error::{ConfigError, Error};

static INT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());
static FLOAT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LexicalType {
    Identifier,
    Int,
    Float,
    Punctuation,
}

impl fmt::Display for LexicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LexicalType::Identifier => "id",
            LexicalType::Int => "int",
            LexicalType::Float => "float",
            LexicalType::Punctuation => "punct",
        };
        f.write_str(name)
    }
}

/// A classified word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub lexeme: String,
    pub position: usize,
    pub lexical_type: LexicalType,
    /// Syntactic category tag fed to the parser (`art`, `sust`, `verbo`, ...).
    pub category: String,
    pub valid: bool,
    pub error_char: Option<char>,
    /// Numeric value of `int` and `float` tokens.
    pub constant: Option<f64>,
    pub reserved: bool,
}

#[derive(Debug)]
struct CompiledRule {
    category: String,
    words: HashSet<String>,
    pattern: Option<Regex>,
    reserved: bool,
}

impl CompiledRule {
    fn matches(&self, word: &str) -> bool {
        self.words.contains(word) || self.pattern.as_ref().is_some_and(|p| p.is_match(word))
    }
}

/// Rule-table classifier, built once from [`LexiconConfig`].
#[derive(Debug)]
pub struct Classifier {
    rules: Vec<CompiledRule>,
    alphabet: Automaton,
    default_category: String,
    number_category: String,
    punctuation_category: String,
}

/// Accepts any non-empty string over `symbols`.
fn alphabet_automaton(symbols: impl IntoIterator<Item = char> + Clone) -> Result<Automaton, Error> {
    Ok(AutomatonBuilder::new("alphabet")
        .description("letters with Spanish diacritics, digits and punctuation")
        .alphabet(symbols.clone())
        .state("q0", false)
        .state("q1", true)
        .initial("q0")
        .transitions("q0", symbols.clone(), "q1")
        .transitions("q1", symbols, "q1")
        .build()?)
}

impl Classifier {
    pub fn from_config(config: &LexiconConfig) -> Result<Self, Error> {
        let symbols = config
            .letters
            .chars()
            .chain(config.digits.chars())
            .chain(config.punctuation.chars());
        let alphabet = alphabet_automaton(symbols)?;

        let mut rules = Vec::with_capacity(config.rules.len());
        for rule in &config.rules {
            let pattern = match &rule.pattern {
                Some(pattern) => Some(Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
                    ConfigError::Pattern {
                        category: rule.category.clone(),
                        source,
                    }
                })?),
                None => None,
            };
            rules.push(CompiledRule {
                category: rule.category.clone(),
                words: rule.words.iter().map(|w| w.to_lowercase()).collect(),
                pattern,
                reserved: rule.reserved,
            });
        }

        Ok(Self {
            rules,
            alphabet,
            default_category: config.default_category.clone(),
            number_category: config.number_category.clone(),
            punctuation_category: config.punctuation_category.clone(),
        })
    }

    pub fn alphabet(&self) -> &Automaton {
        &self.alphabet
    }

    /// Classifies one word. `position` is its index in the sentence.
    pub fn classify(&self, word: &str, position: usize) -> Token {
        let simulation = self.alphabet.simulate(word);
        let error_char = simulation.error.as_ref().and_then(|e| e.symbol());
        let mut token = Token {
            lexeme: word.to_string(),
            position,
            lexical_type: LexicalType::Identifier,
            category: self.default_category.clone(),
            valid: simulation.accepted,
            error_char,
            constant: None,
            reserved: false,
        };

        if INT_REGEX.is_match(word) {
            token.lexical_type = LexicalType::Int;
            token.category = self.number_category.clone();
            token.constant = word.parse().ok();
        } else if FLOAT_REGEX.is_match(word) {
            token.lexical_type = LexicalType::Float;
            token.category = self.number_category.clone();
            token.constant = word.parse().ok();
        } else if is_punctuation(word) {
            token.lexical_type = LexicalType::Punctuation;
            token.category = self.punctuation_category.clone();
        } else {
            let lower = word.to_lowercase();
            if let Some(rule) = self.rules.iter().find(|r| r.matches(&lower)) {
                token.category = rule.category.clone();
                token.reserved = rule.reserved;
            }
        }

        token
    }

    /// Segments and classifies a whole sentence.
    pub fn tokenize(&self, sentence: &str) -> Vec<Token> {
        segment(sentence)
            .iter()
            .map(|lexeme| self.classify(&lexeme.text, lexeme.index))
            .collect()
    }
}

fn is_punctuation(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('.' | ',' | ';' | ':' | '!' | '?' | '¿' | '¡'), None)
    )
}

/// The lexical-type line of a sentence: `id id int .` (punctuation shows
/// itself).
pub fn tokenization(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| match t.lexical_type {
            LexicalType::Punctuation => t.lexeme.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The first invalid token, if any.
pub fn first_invalid(tokens: &[Token]) -> Option<&Token> {
    tokens.iter().find(|t| !t.valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_defaults;

    fn classifier() -> Classifier {
        Classifier::from_config(&load_defaults().unwrap().lexicon).unwrap()
    }

    #[test]
    fn test_rule_order() {
        let classifier = classifier();
        let category = |w: &str| classifier.classify(w, 0).category;
        assert_eq!(category("El"), "art");
        assert_eq!(category("según"), "prep");
        assert_eq!(category("dónde"), "pronom");
        assert_eq!(category("solamente"), "adv");
        // only listed adverbs; other -mente words fall through to the default
        assert_eq!(category("rápidamente"), "sust");
        assert_eq!(category("pero"), "conj");
        assert_eq!(category("cuesta"), "verbo");
        assert_eq!(category("quien"), "interr");
        assert_eq!(category("ligero"), "adj");
        assert_eq!(category("balón"), "sust");
        // listed under both pronom and conj; the earlier rule wins
        assert_eq!(category("si"), "pronom");
    }

    #[test]
    fn test_numbers_and_punctuation() {
        let classifier = classifier();
        let int = classifier.classify("42", 1);
        assert_eq!(int.lexical_type, LexicalType::Int);
        assert_eq!(int.category, "num");
        assert_eq!(int.constant, Some(42.0));

        let float = classifier.classify("19.99", 2);
        assert_eq!(float.lexical_type, LexicalType::Float);
        assert_eq!(float.constant, Some(19.99));

        let mark = classifier.classify("¿", 0);
        assert_eq!(mark.lexical_type, LexicalType::Punctuation);
        assert_eq!(mark.category, "punt");
    }

    #[test]
    fn test_invalid_character() {
        let token = classifier().classify("hola@mundo", 0);
        assert!(!token.valid);
        assert_eq!(token.error_char, Some('@'));
        assert_eq!(token.category, "sust");
    }

    #[test]
    fn test_reserved_flag() {
        let classifier = classifier();
        assert!(classifier.classify("la", 0).reserved);
        assert!(!classifier.classify("vender", 0).reserved);
    }

    #[test]
    fn test_tokenize_sentence() {
        let tokens = classifier().tokenize("El balón cuesta 30.");
        let categories: Vec<&str> = tokens.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(categories, ["art", "sust", "verbo", "num", "punt"]);
        assert_eq!(tokenization(&tokens), "id id id int .");
        assert!(first_invalid(&tokens).is_none());
    }

    #[test]
    fn test_pattern_rule_matches_whole_word() {
        let mut config = load_defaults().unwrap().lexicon;
        let adverbs = config.rules.iter_mut().find(|r| r.category == "adv").unwrap();
        adverbs.pattern = Some("[a-záéíóúüñ]+mente".to_string());
        let classifier = Classifier::from_config(&config).unwrap();
        assert_eq!(classifier.classify("rápidamente", 0).category, "adv");
        assert_eq!(classifier.classify("Rápidamente", 0).category, "adv");
        assert_eq!(classifier.classify("mentes", 0).category, "sust");
    }

    #[test]
    fn test_bad_pattern_is_a_config_error() {
        let mut config = load_defaults().unwrap().lexicon;
        config.rules[0].pattern = Some("(".to_string());
        let err = Classifier::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Pattern { ref category, .. }) if category == "art"));
    }
}
