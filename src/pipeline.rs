//! Sentence analysis pipeline
//!
//! An [`Analyzer`] owns everything that is built once (classifier, parse
//! table, semantic matcher) and runs each sentence through
//! segment → classify → parse → tree → semantic. It holds no mutable state and
//! can be shared across threads by reference.

use serde::Serialize;
use tracing::debug;

use crate::config::{load_defaults, SintagmaConfig};
use crate::error::Result;
use crate::grammar::{Grammar, ParseTable};
use crate::lexing::{first_invalid, tokenization, Classifier, LexicalType, Token};
use crate::parsing::{ParseOutcome, PredictiveParser};
use crate::semantic::{SemanticMatcher, SemanticReport};
use crate::tree::{build_tree, heuristic_tree, SyntaxTree};

/// The first word containing a character outside the alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexicalError {
    pub word: String,
    pub position: usize,
    pub character: Option<char>,
}

/// Everything known about one sentence.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub sentence: String,
    pub tokens: Vec<Token>,
    /// Lexical types line, e.g. `id id int .`.
    pub tokenization: String,
    pub lexical_error: Option<LexicalError>,
    pub categories: Vec<String>,
    pub parse: ParseOutcome,
    /// Derivation tree replayed from the trace; only the expanded prefix when
    /// the parse was rejected.
    pub tree: SyntaxTree,
    /// Category-based guess, present when the parse was rejected.
    pub fallback: Option<SyntaxTree>,
    pub semantic: SemanticReport,
}

impl Analysis {
    pub fn accepted(&self) -> bool {
        self.parse.accepted
    }

    /// Valid words and a derivation.
    pub fn is_valid(&self) -> bool {
        self.lexical_error.is_none() && self.parse.accepted
    }
}

#[derive(Debug)]
pub struct Analyzer {
    classifier: Classifier,
    table: ParseTable,
    matcher: SemanticMatcher,
}

impl Analyzer {
    pub fn new(classifier: Classifier, table: ParseTable, matcher: SemanticMatcher) -> Self {
        Self {
            classifier,
            table,
            matcher,
        }
    }

    pub fn from_config(config: &SintagmaConfig) -> Result<Self> {
        let grammar = Grammar::from_notation(
            &config.grammar.start,
            config.grammar.terminals.iter().cloned(),
            &config.grammar.rules,
        )?;
        let table = ParseTable::build(grammar, config.grammar.conflict_policy)?;
        let classifier = Classifier::from_config(&config.lexicon)?;
        let matcher = SemanticMatcher::from_config(&config.semantic);
        Ok(Self::new(classifier, table, matcher))
    }

    /// Analyzer over the embedded default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::from_config(&load_defaults()?)
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn table(&self) -> &ParseTable {
        &self.table
    }

    pub fn matcher(&self) -> &SemanticMatcher {
        &self.matcher
    }

    /// Parses a sequence of category tags directly.
    pub fn parse_categories<S: AsRef<str>>(&self, categories: &[S]) -> ParseOutcome {
        PredictiveParser::new(&self.table).parse(categories)
    }

    pub fn analyze(&self, sentence: &str) -> Analysis {
        let tokens = self.classifier.tokenize(sentence);
        let lexical_error = first_invalid(&tokens).map(|t| LexicalError {
            word: t.lexeme.clone(),
            position: t.position,
            character: t.error_char,
        });
        let categories: Vec<String> = tokens.iter().map(|t| t.category.clone()).collect();

        let parse = self.parse_categories(&categories);

        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        let mut tree = build_tree(&parse.steps);
        tree.attach_lexemes(&lexemes[..parse.consumed.min(lexemes.len())]);

        let fallback = (!parse.accepted).then(|| {
            heuristic_tree(
                tokens
                    .iter()
                    .map(|t| (t.lexeme.as_str(), t.category.as_str())),
            )
        });

        let words: Vec<&str> = tokens
            .iter()
            .filter(|t| t.lexical_type == LexicalType::Identifier)
            .map(|t| t.lexeme.as_str())
            .collect();
        let semantic = self.matcher.analyze(&words);

        debug!(
            sentence,
            tokens = tokens.len(),
            accepted = parse.accepted,
            lexically_valid = lexical_error.is_none(),
            concepts = semantic.concepts.len(),
            "sentence analyzed"
        );

        Analysis {
            sentence: sentence.to_string(),
            tokenization: tokenization(&tokens),
            tokens,
            lexical_error,
            categories,
            parse,
            tree,
            fallback,
            semantic,
        }
    }
}
