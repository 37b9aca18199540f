//! FIRST and FOLLOW sets.
//!
//! Both are computed by fixed-point iteration over the productions. Each pass
//! folds every production into the running sets and flips a single `changed`
//! flag whenever an insertion adds something new; iteration stops on the first
//! pass that changes nothing.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::model::{Grammar, Symbol};

/// A table lookahead: a terminal or the end-of-input marker `$`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lookahead {
    Terminal(String),
    End,
}

impl Lookahead {
    pub fn terminal(name: impl Into<String>) -> Self {
        Lookahead::Terminal(name.into())
    }
}

impl fmt::Display for Lookahead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookahead::Terminal(name) => f.write_str(name),
            Lookahead::End => f.write_str("$"),
        }
    }
}

/// FIRST set of a symbol or sequence: terminals it can start with, and
/// whether it can derive ε.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FirstSet {
    pub terminals: BTreeSet<String>,
    pub nullable: bool,
}

impl FirstSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, terminal: &str) -> bool {
        self.terminals.contains(terminal)
    }

    /// Merges `other` in, returning whether anything was added.
    pub fn union(&mut self, other: &FirstSet) -> bool {
        let mut changed = false;
        for terminal in &other.terminals {
            changed |= self.terminals.insert(terminal.clone());
        }
        if other.nullable && !self.nullable {
            self.nullable = true;
            changed = true;
        }
        changed
    }
}

impl fmt::Display for FirstSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items: Vec<&str> = self.terminals.iter().map(String::as_str).collect();
        if self.nullable {
            items.push("ε");
        }
        write!(f, "{{{}}}", items.join(", "))
    }
}

/// FIRST and FOLLOW for every nonterminal of a grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrammarSets {
    first: BTreeMap<String, FirstSet>,
    follow: BTreeMap<String, BTreeSet<Lookahead>>,
}

impl GrammarSets {
    pub fn compute(grammar: &Grammar) -> Self {
        let first = compute_first_sets(grammar);
        let follow = compute_follow_sets(grammar, &first);
        Self { first, follow }
    }

    pub fn first(&self, nonterminal: &str) -> Option<&FirstSet> {
        self.first.get(nonterminal)
    }

    pub fn follow(&self, nonterminal: &str) -> Option<&BTreeSet<Lookahead>> {
        self.follow.get(nonterminal)
    }

    pub fn is_nullable(&self, nonterminal: &str) -> bool {
        self.first.get(nonterminal).is_some_and(|f| f.nullable)
    }

    /// FIRST of a symbol sequence; the empty sequence is nullable.
    pub fn first_of_sequence(&self, symbols: &[Symbol]) -> FirstSet {
        first_of_sequence(symbols, &self.first)
    }
}

fn first_of_sequence(symbols: &[Symbol], first: &BTreeMap<String, FirstSet>) -> FirstSet {
    let mut result = FirstSet::new();
    for symbol in symbols {
        match symbol {
            Symbol::Terminal(name) => {
                result.terminals.insert(name.clone());
                return result;
            }
            Symbol::NonTerminal(name) => {
                let Some(set) = first.get(name) else {
                    return result;
                };
                result.terminals.extend(set.terminals.iter().cloned());
                if !set.nullable {
                    return result;
                }
            }
        }
    }
    result.nullable = true;
    result
}

fn compute_first_sets(grammar: &Grammar) -> BTreeMap<String, FirstSet> {
    let mut first: BTreeMap<String, FirstSet> = grammar
        .nonterminals()
        .iter()
        .map(|n| (n.clone(), FirstSet::new()))
        .collect();

    loop {
        let mut changed = false;
        for production in grammar.productions() {
            let body_first = first_of_sequence(&production.body, &first);
            if let Some(entry) = first.get_mut(&production.head) {
                changed |= entry.union(&body_first);
            }
        }
        if !changed {
            break;
        }
    }

    first
}

fn compute_follow_sets(
    grammar: &Grammar,
    first: &BTreeMap<String, FirstSet>,
) -> BTreeMap<String, BTreeSet<Lookahead>> {
    let mut follow: BTreeMap<String, BTreeSet<Lookahead>> = grammar
        .nonterminals()
        .iter()
        .map(|n| (n.clone(), BTreeSet::new()))
        .collect();
    if let Some(start) = follow.get_mut(grammar.start()) {
        start.insert(Lookahead::End);
    }

    loop {
        let mut changed = false;
        for production in grammar.productions() {
            for (index, symbol) in production.body.iter().enumerate() {
                let Symbol::NonTerminal(name) = symbol else {
                    continue;
                };
                let suffix = first_of_sequence(&production.body[index + 1..], first);
                let mut additions: Vec<Lookahead> = suffix
                    .terminals
                    .iter()
                    .map(|t| Lookahead::Terminal(t.clone()))
                    .collect();
                if suffix.nullable {
                    if let Some(head_follow) = follow.get(&production.head) {
                        additions.extend(head_follow.iter().cloned());
                    }
                }
                if let Some(target) = follow.get_mut(name) {
                    for lookahead in additions {
                        changed |= target.insert(lookahead);
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }

    follow
}
