//! Context-free grammar model.
//!
//! Symbols are tagged ([`Symbol::Terminal`] / [`Symbol::NonTerminal`]) once at
//! construction, so nothing downstream has to guess what a bare name means.
//! A production with an empty right-hand side is an ε-production.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

use super::table::Conflict;

/// Problems found while constructing a grammar or its parse table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrammarError {
    #[error("symbol '{0}' is declared both as terminal and nonterminal")]
    OverlappingSymbol(String),
    #[error("start symbol '{0}' is not a nonterminal")]
    UnknownStart(String),
    #[error("production head '{0}' is not a nonterminal")]
    UnknownHead(String),
    #[error("production for '{head}' uses undeclared symbol '{symbol}'")]
    UnknownSymbol { head: String, symbol: String },
    #[error("nonterminal '{0}' has no productions")]
    NoProductions(String),
    #[error("grammar notation, line {line}: {message}")]
    Notation { line: usize, message: String },
    #[error("nonterminal '{0}' is left-recursive")]
    LeftRecursive(String),
    #[error("grammar is not LL(1): {}", describe_conflicts(.0))]
    Conflicts(Vec<Conflict>),
}

fn describe_conflicts(conflicts: &[Conflict]) -> String {
    conflicts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A grammar symbol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Symbol {
    Terminal(String),
    NonTerminal(String),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) | Symbol::NonTerminal(name) => name,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `head → body`; an empty body derives ε.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Production {
    pub head: String,
    pub body: Vec<Symbol>,
}

impl Production {
    pub fn is_epsilon(&self) -> bool {
        self.body.is_empty()
    }

    /// The right-hand side as text, `ε` when empty.
    pub fn body_text(&self) -> String {
        if self.body.is_empty() {
            "ε".to_string()
        } else {
            self.body
                .iter()
                .map(Symbol::name)
                .collect::<Vec<_>>()
                .join(" ")
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.head, self.body_text())
    }
}

/// An immutable, validated context-free grammar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grammar {
    start: String,
    nonterminals: Vec<String>,
    terminals: BTreeSet<String>,
    productions: Vec<Production>,
}

impl Grammar {
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Nonterminals in declaration order.
    pub fn nonterminals(&self) -> &[String] {
        &self.nonterminals
    }

    pub fn terminals(&self) -> &BTreeSet<String> {
        &self.terminals
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, index: usize) -> Option<&Production> {
        self.productions.get(index)
    }

    pub fn productions_of<'a>(&'a self, head: &'a str) -> impl Iterator<Item = (usize, &'a Production)> + 'a {
        self.productions
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.head == head)
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        self.terminals.contains(name)
    }

    pub fn is_nonterminal(&self, name: &str) -> bool {
        self.nonterminals.iter().any(|n| n == name)
    }

    /// Tags a bare name, `None` if the grammar does not declare it.
    pub fn symbol(&self, name: &str) -> Option<Symbol> {
        if self.is_terminal(name) {
            Some(Symbol::Terminal(name.to_string()))
        } else if self.is_nonterminal(name) {
            Some(Symbol::NonTerminal(name.to_string()))
        } else {
            None
        }
    }
}

/// Declarative grammar construction; right-hand sides are given as names and
/// resolved against the declared symbol sets in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    start: String,
    nonterminals: Vec<String>,
    terminals: BTreeSet<String>,
    rules: Vec<(String, Vec<String>)>,
}

impl GrammarBuilder {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            nonterminals: Vec::new(),
            terminals: BTreeSet::new(),
            rules: Vec::new(),
        }
    }

    pub fn nonterminal(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.nonterminals.contains(&name) {
            self.nonterminals.push(name);
        }
        self
    }

    pub fn nonterminals<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, |b, n| b.nonterminal(n))
    }

    pub fn terminal(mut self, name: impl Into<String>) -> Self {
        self.terminals.insert(name.into());
        self
    }

    pub fn terminals<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, |b, n| b.terminal(n))
    }

    /// Adds `head → body`. An empty body is an ε-production.
    pub fn rule(mut self, head: &str, body: &[&str]) -> Self {
        self.rules.push((
            head.to_string(),
            body.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    pub(crate) fn rule_owned(mut self, head: String, body: Vec<String>) -> Self {
        self.rules.push((head, body));
        self
    }

    pub fn build(self) -> Result<Grammar, GrammarError> {
        if let Some(shared) = self
            .nonterminals
            .iter()
            .find(|n| self.terminals.contains(*n))
        {
            return Err(GrammarError::OverlappingSymbol(shared.clone()));
        }
        if !self.nonterminals.contains(&self.start) {
            return Err(GrammarError::UnknownStart(self.start));
        }

        let mut productions = Vec::with_capacity(self.rules.len());
        for (head, body) in self.rules {
            if !self.nonterminals.contains(&head) {
                return Err(GrammarError::UnknownHead(head));
            }
            let mut symbols = Vec::with_capacity(body.len());
            for name in body {
                if self.terminals.contains(&name) {
                    symbols.push(Symbol::Terminal(name));
                } else if self.nonterminals.contains(&name) {
                    symbols.push(Symbol::NonTerminal(name));
                } else {
                    return Err(GrammarError::UnknownSymbol { head, symbol: name });
                }
            }
            productions.push(Production {
                head,
                body: symbols,
            });
        }

        if let Some(empty) = self
            .nonterminals
            .iter()
            .find(|n| !productions.iter().any(|p| &p.head == *n))
        {
            return Err(GrammarError::NoProductions(empty.clone()));
        }

        Ok(Grammar {
            start: self.start,
            nonterminals: self.nonterminals,
            terminals: self.terminals,
            productions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> GrammarBuilder {
        GrammarBuilder::new("S")
            .nonterminals(["S", "SN", "SV", "Det", "N", "V"])
            .terminals(["art", "sust", "verbo"])
            .rule("S", &["SN", "SV"])
            .rule("SN", &["Det", "N"])
            .rule("SV", &["V", "SN"])
            .rule("Det", &["art"])
            .rule("N", &["sust"])
            .rule("V", &["verbo"])
    }

    #[test]
    fn test_build_tags_symbols() {
        let grammar = small().build().unwrap();
        assert_eq!(grammar.start(), "S");
        assert_eq!(grammar.productions().len(), 6);
        assert_eq!(
            grammar.productions()[0].body,
            vec![
                Symbol::NonTerminal("SN".into()),
                Symbol::NonTerminal("SV".into())
            ]
        );
        assert_eq!(grammar.symbol("art"), Some(Symbol::Terminal("art".into())));
        assert_eq!(grammar.symbol("adv"), None);
        assert_eq!(grammar.productions_of("SN").count(), 1);
    }

    #[test]
    fn test_production_display() {
        let grammar = small().build().unwrap();
        assert_eq!(grammar.productions()[0].to_string(), "S → SN SV");
        let eps = Production {
            head: "X".into(),
            body: vec![],
        };
        assert!(eps.is_epsilon());
        assert_eq!(eps.to_string(), "X → ε");
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            small().terminal("SN").build(),
            Err(GrammarError::OverlappingSymbol("SN".into()))
        );
        assert_eq!(
            GrammarBuilder::new("Z").nonterminal("S").rule("S", &[]).build(),
            Err(GrammarError::UnknownStart("Z".into()))
        );
        assert_eq!(
            small().rule("Q", &["art"]).build(),
            Err(GrammarError::UnknownHead("Q".into()))
        );
        assert_eq!(
            small().rule("SV", &["V", "adv"]).build(),
            Err(GrammarError::UnknownSymbol {
                head: "SV".into(),
                symbol: "adv".into()
            })
        );
        assert_eq!(
            small().nonterminal("Adv").build(),
            Err(GrammarError::NoProductions("Adv".into()))
        );
    }
}
