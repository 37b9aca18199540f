//! Grammar notation reader
//!
//! Reads rule text, one rule per line:
//!
//! ```text
//! # comment
//! S   -> SN SV
//! SVc -> SN | Adv AdvC | ε
//! ```
//!
//! `->`, `→` and `::=` are accepted as the arrow. An alternative written as `ε`
//! (or left empty) is the empty sequence. Several lines may share a head; their
//! alternatives are appended in order.

use chumsky::prelude::*;

use super::model::{Grammar, GrammarBuilder, GrammarError};

type ParserError = Simple<char>;

/// One rule head with its alternatives, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLine {
    pub line: usize,
    pub head: String,
    pub alternatives: Vec<Vec<String>>,
}

fn rule_line() -> impl Parser<char, (String, Vec<Vec<String>>), Error = ParserError> {
    let inline_ws = filter::<char, _, ParserError>(|c: &char| *c == ' ' || *c == '\t')
        .repeated()
        .ignored();

    let symbol = filter::<char, _, ParserError>(|c: &char| {
        c.is_alphanumeric() || *c == '_' || *c == '\''
    })
    .repeated()
    .at_least(1)
    .collect::<String>();

    let arrow = just("->").or(just("→")).or(just("::="));

    let alternative = symbol
        .clone()
        .padded_by(inline_ws.clone())
        .repeated()
        .map(|symbols: Vec<String>| {
            if symbols.len() == 1 && symbols[0] == "ε" {
                Vec::new()
            } else {
                symbols
            }
        });

    let bar = just('|').padded_by(inline_ws.clone());
    let comment = just('#').then(any().repeated()).ignored();

    symbol
        .padded_by(inline_ws.clone())
        .then_ignore(arrow)
        .then(alternative.separated_by(bar))
        .then_ignore(inline_ws)
        .then_ignore(comment.or_not())
        .then_ignore(end())
}

/// Parses rule text into rule lines. Blank and comment lines are skipped.
pub fn parse_rules(text: &str) -> Result<Vec<RuleLine>, GrammarError> {
    let parser = rule_line();
    let mut rules = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (head, alternatives) = parser.parse(trimmed).map_err(|errors| {
            let message = errors
                .first()
                .map(ToString::to_string)
                .unwrap_or_else(|| "malformed rule".to_string());
            GrammarError::Notation { line, message }
        })?;
        rules.push(RuleLine {
            line,
            head,
            alternatives,
        });
    }

    Ok(rules)
}

impl Grammar {
    /// Builds a grammar from rule text. Every rule head is a nonterminal (in
    /// order of first appearance); every other symbol must be one of the
    /// declared `terminals`.
    pub fn from_notation<I, S>(start: &str, terminals: I, text: &str) -> Result<Grammar, GrammarError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rules = parse_rules(text)?;
        let mut builder = GrammarBuilder::new(start)
            .terminals(terminals)
            .nonterminals(rules.iter().map(|r| r.head.clone()));
        for rule in rules {
            for alternative in rule.alternatives {
                builder = builder.rule_owned(rule.head.clone(), alternative);
            }
        }
        builder.build()
    }
}
