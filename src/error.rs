//! Construction-time errors.
//!
//! Everything in here is fatal: a malformed automaton, grammar or configuration
//! aborts before any sentence is analyzed. Per-sentence problems (a word the
//! automaton rejects, a token sequence the parser rejects) are not errors in
//! this sense; they travel as data inside [`crate::automata::Simulation`] and
//! [`crate::parsing::ParseOutcome`].

use thiserror::Error;

pub use crate::automata::AutomatonError;
pub use crate::formats::FormatError;
pub use crate::grammar::GrammarError;

/// Configuration could not be loaded or deserialized.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("invalid regular expression in lexicon rule '{category}': {source}")]
    Pattern {
        category: String,
        #[source]
        source: regex::Error,
    },
}

/// Crate-level error aggregating every construction failure.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Automaton(#[from] AutomatonError),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

pub type Result<T> = std::result::Result<T, Error>;
