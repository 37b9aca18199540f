//! LL(1) prediction table.
//!
//! For every production `A → α`, α is placed in `table[A][a]` for each
//! terminal `a` in FIRST(α), and, when α is nullable, in `table[A][b]` for each
//! `b` in FOLLOW(A) (which may include `$`). A cell that ends up with more than
//! one production is a [`Conflict`]. Under [`ConflictPolicy::FirstListed`] the
//! first production added to the cell wins and the conflict stays visible via
//! [`ParseTable::conflicts`]; under [`ConflictPolicy::Reject`] construction fails.
//!
//! Left recursion (`A ⇒+ β A γ` with β nullable) is refused under either
//! policy: a predictive parser would expand `A` forever without consuming input.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{info, warn};

use super::model::{Grammar, GrammarError, Production, Symbol};
use super::sets::{GrammarSets, Lookahead};

/// What to do with a cell that receives more than one production.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    #[default]
    FirstListed,
    Reject,
}

impl ConflictPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "first-listed" => Some(ConflictPolicy::FirstListed),
            "reject" => Some(ConflictPolicy::Reject),
            _ => None,
        }
    }
}

/// A table cell holding several candidate productions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub nonterminal: String,
    pub lookahead: Lookahead,
    /// Candidates in insertion order; the first one is what `FirstListed` uses.
    pub productions: Vec<Production>,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let candidates: Vec<String> = self.productions.iter().map(ToString::to_string).collect();
        write!(
            f,
            "[{}, {}] has {} candidates ({})",
            self.nonterminal,
            self.lookahead,
            self.productions.len(),
            candidates.join(" | ")
        )
    }
}

/// The prediction table together with the grammar and sets it was built from.
#[derive(Debug, Clone)]
pub struct ParseTable {
    grammar: Grammar,
    sets: GrammarSets,
    policy: ConflictPolicy,
    cells: BTreeMap<String, BTreeMap<Lookahead, Vec<usize>>>,
}

impl ParseTable {
    pub fn build(grammar: Grammar, policy: ConflictPolicy) -> Result<Self, GrammarError> {
        let sets = GrammarSets::compute(&grammar);
        if let Some(nonterminal) = find_left_recursion(&grammar, &sets) {
            warn!(%nonterminal, "left-recursive grammar");
            return Err(GrammarError::LeftRecursive(nonterminal));
        }
        Self::assemble(grammar, sets, policy)
    }

    /// Builds the table without the left-recursion check, so the parser's own
    /// loop guard can be exercised.
    #[cfg(test)]
    pub(crate) fn build_allowing_left_recursion(
        grammar: Grammar,
        policy: ConflictPolicy,
    ) -> Result<Self, GrammarError> {
        let sets = GrammarSets::compute(&grammar);
        Self::assemble(grammar, sets, policy)
    }

    fn assemble(grammar: Grammar, sets: GrammarSets, policy: ConflictPolicy) -> Result<Self, GrammarError> {
        let mut cells: BTreeMap<String, BTreeMap<Lookahead, Vec<usize>>> = BTreeMap::new();

        for (index, production) in grammar.productions().iter().enumerate() {
            let first = sets.first_of_sequence(&production.body);
            let mut lookaheads: Vec<Lookahead> = first
                .terminals
                .iter()
                .map(|t| Lookahead::Terminal(t.clone()))
                .collect();
            if first.nullable {
                if let Some(follow) = sets.follow(&production.head) {
                    lookaheads.extend(follow.iter().cloned());
                }
            }
            let row = cells.entry(production.head.clone()).or_default();
            for lookahead in lookaheads {
                let cell = row.entry(lookahead).or_default();
                if !cell.contains(&index) {
                    cell.push(index);
                }
            }
        }

        let table = Self {
            grammar,
            sets,
            policy,
            cells,
        };
        let conflicts = table.conflicts();

        info!(
            productions = table.grammar.productions().len(),
            conflicts = conflicts.len(),
            "parse table built"
        );
        for conflict in &conflicts {
            warn!(%conflict, ?policy, "grammar conflict");
        }

        if policy == ConflictPolicy::Reject && !conflicts.is_empty() {
            return Err(GrammarError::Conflicts(conflicts));
        }
        Ok(table)
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn sets(&self) -> &GrammarSets {
        &self.sets
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// All candidates of a cell, in insertion order.
    pub fn candidates(&self, nonterminal: &str, lookahead: &Lookahead) -> Vec<&Production> {
        self.cell(nonterminal, lookahead)
            .iter()
            .filter_map(|&i| self.grammar.production(i))
            .collect()
    }

    /// The production the parser applies for `(nonterminal, lookahead)`.
    pub fn predict(&self, nonterminal: &str, lookahead: &Lookahead) -> Option<&Production> {
        self.cell(nonterminal, lookahead)
            .first()
            .and_then(|&i| self.grammar.production(i))
    }

    /// Every cell with more than one candidate, row by row.
    pub fn conflicts(&self) -> Vec<Conflict> {
        self.cells
            .iter()
            .flat_map(|(nonterminal, row)| {
                row.iter()
                    .filter(|(_, cell)| cell.len() > 1)
                    .map(move |(lookahead, cell)| Conflict {
                        nonterminal: nonterminal.clone(),
                        lookahead: lookahead.clone(),
                        productions: cell
                            .iter()
                            .filter_map(|&i| self.grammar.production(i).cloned())
                            .collect(),
                    })
            })
            .collect()
    }

    pub fn is_ll1(&self) -> bool {
        self.cells
            .values()
            .all(|row| row.values().all(|cell| cell.len() <= 1))
    }

    /// Filled cells in grammar declaration order:
    /// `(nonterminal, lookahead, candidates)`.
    pub fn entries(&self) -> Vec<(&str, &Lookahead, Vec<&Production>)> {
        let mut entries = Vec::new();
        for nonterminal in self.grammar.nonterminals() {
            let Some(row) = self.cells.get(nonterminal) else {
                continue;
            };
            for (lookahead, cell) in row {
                let productions = cell
                    .iter()
                    .filter_map(|&i| self.grammar.production(i))
                    .collect();
                entries.push((nonterminal.as_str(), lookahead, productions));
            }
        }
        entries
    }

    fn cell(&self, nonterminal: &str, lookahead: &Lookahead) -> &[usize] {
        self.cells
            .get(nonterminal)
            .and_then(|row| row.get(lookahead))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// The first nonterminal, in declaration order, that can derive a sentential
/// form starting with itself.
fn find_left_recursion(grammar: &Grammar, sets: &GrammarSets) -> Option<String> {
    // Nonterminals that can appear leftmost in one step, past nullable prefixes.
    let mut leading: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for production in grammar.productions() {
        let entry = leading.entry(production.head.as_str()).or_default();
        for symbol in &production.body {
            match symbol {
                Symbol::Terminal(_) => break,
                Symbol::NonTerminal(name) => {
                    entry.insert(name.as_str());
                    if !sets.is_nullable(name) {
                        break;
                    }
                }
            }
        }
    }

    grammar
        .nonterminals()
        .iter()
        .find(|start| {
            let start = start.as_str();
            let mut seen = BTreeSet::new();
            let mut pending: Vec<&str> = leading.get(start).into_iter().flatten().copied().collect();
            while let Some(next) = pending.pop() {
                if next == start {
                    return true;
                }
                if seen.insert(next) {
                    pending.extend(leading.get(next).into_iter().flatten().copied());
                }
            }
            false
        })
        .cloned()
}
