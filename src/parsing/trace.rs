//! Parse trace types.
//!
//! A trace is an append-only list of [`ParsingStep`]s. The first entry is
//! always [`Action::Start`], the last one [`Action::Accept`] or
//! [`Action::Reject`].

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::grammar::{Production, Symbol};

/// Why a token sequence was rejected. Positions are 0-based token indices.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ParseError {
    #[error("expected '{expected}' but found '{found}' at position {position}")]
    ExpectedTerminalMismatch {
        expected: String,
        found: String,
        position: usize,
    },
    #[error("no production for {nonterminal} with lookahead '{lookahead}' at position {position}")]
    NoProductionForLookahead {
        nonterminal: String,
        lookahead: String,
        position: usize,
    },
    #[error("derivation incomplete at position {position}")]
    IncompleteDerivation { position: usize },
    #[error("{nonterminal} expanded again at position {position} without consuming input")]
    LeftRecursion { nonterminal: String, position: usize },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::ExpectedTerminalMismatch { position, .. }
            | ParseError::NoProductionForLookahead { position, .. }
            | ParseError::IncompleteDerivation { position }
            | ParseError::LeftRecursion { position, .. } => *position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Start,
    Expand {
        nonterminal: String,
        body: Vec<Symbol>,
    },
    Match {
        terminal: String,
    },
    Accept,
    Reject {
        error: ParseError,
    },
}

impl Action {
    pub(crate) fn expand(production: &Production) -> Self {
        Action::Expand {
            nonterminal: production.head.clone(),
            body: production.body.clone(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Start => f.write_str("start"),
            Action::Expand { nonterminal, body } => {
                let body = if body.is_empty() {
                    "ε".to_string()
                } else {
                    body.iter().map(Symbol::name).collect::<Vec<_>>().join(" ")
                };
                write!(f, "expand {nonterminal} → {body}")
            }
            Action::Match { terminal } => write!(f, "match '{terminal}'"),
            Action::Accept => f.write_str("accept"),
            Action::Reject { error } => write!(f, "reject: {error}"),
        }
    }
}

/// Parser state after one operation. `stack` is bottom first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsingStep {
    pub stack: Vec<String>,
    pub remaining: Vec<String>,
    pub action: Action,
}

impl fmt::Display for ParsingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec!["$"];
        stack.extend(self.stack.iter().map(String::as_str));
        let mut input: Vec<&str> = self.remaining.iter().map(String::as_str).collect();
        input.push("$");
        write!(f, "{} | {} | {}", stack.join(" "), input.join(" "), self.action)
    }
}

/// Result of parsing one token sequence. The trace is returned either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseOutcome {
    pub accepted: bool,
    pub steps: Vec<ParsingStep>,
    pub error: Option<ParseError>,
    /// Tokens matched before the parser stopped.
    pub consumed: usize,
}

impl ParseOutcome {
    /// The expansions of the trace, in order.
    pub fn expansions(&self) -> impl Iterator<Item = (&str, &[Symbol])> {
        self.steps.iter().filter_map(|step| match &step.action {
            Action::Expand { nonterminal, body } => Some((nonterminal.as_str(), body.as_slice())),
            _ => None,
        })
    }
}
