//! Configuration loader.
//!
//! `defaults/sintagma.default.toml` is embedded into the crate so the default
//! grammar, lexicon and knowledge base always ship with the binary. Callers
//! layer their own files and overrides on top of those defaults via [`Loader`]
//! before deserializing into [`SintagmaConfig`].

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;
use crate::grammar::ConflictPolicy;

const DEFAULT_TOML: &str = include_str!("../defaults/sintagma.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SintagmaConfig {
    pub grammar: GrammarConfig,
    pub lexicon: LexiconConfig,
    pub semantic: SemanticConfig,
    pub output: OutputConfig,
}

/// The grammar the parser checks sentences against.
#[derive(Debug, Clone, Deserialize)]
pub struct GrammarConfig {
    pub start: String,
    pub terminals: Vec<String>,
    /// Rule text, one `A -> x y | z` rule per line.
    pub rules: String,
    #[serde(default)]
    pub conflict_policy: ConflictPolicy,
}

/// Character alphabet and the ordered word-category rules.
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconConfig {
    pub letters: String,
    pub digits: String,
    pub punctuation: String,
    pub default_category: String,
    pub number_category: String,
    pub punctuation_category: String,
    /// Evaluated in order; the first matching rule wins.
    pub rules: Vec<CategoryRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    #[serde(default)]
    pub words: Vec<String>,
    /// Regular expression the whole (lowercased) word must match.
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub reserved: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SemanticConfig {
    pub stopwords: Vec<String>,
    /// Knowledge base, in ranking tie-break order.
    pub concepts: Vec<ConceptConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConceptConfig {
    pub name: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub associations: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `output.format`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<SintagmaConfig, ConfigError> {
        Ok(self.builder.build()?.try_deserialize()?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults, without any layering.
pub fn load_defaults() -> Result<SintagmaConfig, ConfigError> {
    Loader::new().build()
}
