//! Deterministic finite automata over single characters.
//!
//! An [`Automaton`] is assembled through [`AutomatonBuilder`], which checks every
//! structural invariant up front: unique state ids, a declared initial state,
//! targets that exist, symbols inside the alphabet and at most one transition
//! per (state, symbol). Once built the automaton is immutable and can be shared
//! freely between threads.
//!
//! Running an automaton never fails with an `Err`: [`Automaton::simulate`]
//! returns a [`Simulation`] that carries the transition trace and, when the
//! input is rejected, a [`SimulationError`] pointing at the offending character.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::trace;

/// Structural problems detected while building an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    #[error("automaton '{automaton}' declares state '{state}' twice")]
    DuplicateState { automaton: String, state: String },
    #[error("automaton '{automaton}' has no initial state")]
    MissingInitialState { automaton: String },
    #[error("automaton '{automaton}' references unknown state '{state}'")]
    UnknownState { automaton: String, state: String },
    #[error("automaton '{automaton}': symbol '{symbol}' in state '{state}' is outside the alphabet")]
    SymbolOutsideAlphabet {
        automaton: String,
        state: String,
        symbol: char,
    },
    #[error("automaton '{automaton}' is not deterministic: state '{state}' has more than one transition on '{symbol}'")]
    Nondeterministic {
        automaton: String,
        state: String,
        symbol: char,
    },
}

/// A single automaton state with its outgoing transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct State {
    pub id: String,
    pub accepting: bool,
    pub transitions: BTreeMap<char, String>,
}

impl State {
    pub fn next(&self, symbol: char) -> Option<&str> {
        self.transitions.get(&symbol).map(String::as_str)
    }
}

/// A validated deterministic finite automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Automaton {
    name: String,
    description: String,
    alphabet: BTreeSet<char>,
    states: BTreeMap<String, State>,
    initial: String,
}

/// One consumed character: `state --symbol--> next`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub state: String,
    pub symbol: char,
    pub next: String,
}

/// Why an input was rejected. Positions are 0-based character offsets.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimulationError {
    #[error("character '{symbol}' at position {position} is outside the alphabet")]
    AlphabetViolation { symbol: char, position: usize },
    #[error("no transition from state '{state}' on '{symbol}' at position {position}")]
    NoTransition {
        state: String,
        symbol: char,
        position: usize,
    },
    #[error("input ended at position {position} in non-accepting state '{state}'")]
    IncompleteAcceptance { state: String, position: usize },
}

impl SimulationError {
    /// The offending character, or `None` when the input simply ran out.
    pub fn symbol(&self) -> Option<char> {
        match self {
            SimulationError::AlphabetViolation { symbol, .. }
            | SimulationError::NoTransition { symbol, .. } => Some(*symbol),
            SimulationError::IncompleteAcceptance { .. } => None,
        }
    }

    pub fn position(&self) -> usize {
        match self {
            SimulationError::AlphabetViolation { position, .. }
            | SimulationError::NoTransition { position, .. }
            | SimulationError::IncompleteAcceptance { position, .. } => *position,
        }
    }
}

/// Full result of running an automaton over an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Simulation {
    pub steps: Vec<Transition>,
    pub accepted: bool,
    pub error: Option<SimulationError>,
}

impl Automaton {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    pub fn initial_state(&self) -> &str {
        &self.initial
    }

    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.get(id)
    }

    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    /// Returns `true` iff the whole input drives the automaton into an
    /// accepting state. Stops at the first character it cannot consume.
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = self.initial_state_ref();
        for (position, symbol) in input.chars().enumerate() {
            match self.step(current, symbol, position) {
                Ok(next) => current = next,
                Err(_) => return false,
            }
        }
        current.accepting
    }

    /// Runs the automaton and records every transition taken.
    pub fn simulate(&self, input: &str) -> Simulation {
        let mut current = self.initial_state_ref();
        let mut steps = Vec::new();
        let mut consumed = 0;

        for (position, symbol) in input.chars().enumerate() {
            match self.step(current, symbol, position) {
                Ok(next) => {
                    trace!(automaton = %self.name, from = %current.id, %symbol, to = %next.id, "transition");
                    steps.push(Transition {
                        state: current.id.clone(),
                        symbol,
                        next: next.id.clone(),
                    });
                    current = next;
                    consumed = position + 1;
                }
                Err(error) => {
                    return Simulation {
                        steps,
                        accepted: false,
                        error: Some(error),
                    };
                }
            }
        }

        if current.accepting {
            Simulation {
                steps,
                accepted: true,
                error: None,
            }
        } else {
            Simulation {
                steps,
                accepted: false,
                error: Some(SimulationError::IncompleteAcceptance {
                    state: current.id.clone(),
                    position: consumed,
                }),
            }
        }
    }

    fn initial_state_ref(&self) -> &State {
        // The builder refuses to produce an automaton without its initial state.
        &self.states[&self.initial]
    }

    fn step(&self, state: &State, symbol: char, position: usize) -> Result<&State, SimulationError> {
        if !self.alphabet.contains(&symbol) {
            return Err(SimulationError::AlphabetViolation { symbol, position });
        }
        state
            .next(symbol)
            .and_then(|target| self.states.get(target))
            .ok_or_else(|| SimulationError::NoTransition {
                state: state.id.clone(),
                symbol,
                position,
            })
    }
}

/// Collects states and transitions, then validates them in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    name: String,
    description: String,
    alphabet: BTreeSet<char>,
    states: Vec<(String, bool)>,
    transitions: Vec<(String, char, String)>,
    initial: Option<String>,
}

impl AutomatonBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn alphabet(mut self, symbols: impl IntoIterator<Item = char>) -> Self {
        self.alphabet.extend(symbols);
        self
    }

    pub fn state(mut self, id: impl Into<String>, accepting: bool) -> Self {
        self.states.push((id.into(), accepting));
        self
    }

    pub fn initial(mut self, id: impl Into<String>) -> Self {
        self.initial = Some(id.into());
        self
    }

    pub fn transition(mut self, from: &str, symbol: char, to: &str) -> Self {
        self.transitions
            .push((from.to_string(), symbol, to.to_string()));
        self
    }

    /// Adds the same `from -> to` edge for every symbol.
    pub fn transitions(mut self, from: &str, symbols: impl IntoIterator<Item = char>, to: &str) -> Self {
        for symbol in symbols {
            self = self.transition(from, symbol, to);
        }
        self
    }

    pub fn build(self) -> Result<Automaton, AutomatonError> {
        let name = self.name;
        let mut states: BTreeMap<String, State> = BTreeMap::new();

        for (id, accepting) in self.states {
            if states.contains_key(&id) {
                return Err(AutomatonError::DuplicateState {
                    automaton: name,
                    state: id,
                });
            }
            states.insert(
                id.clone(),
                State {
                    id,
                    accepting,
                    transitions: BTreeMap::new(),
                },
            );
        }

        let initial = match self.initial {
            Some(initial) if states.contains_key(&initial) => initial,
            Some(initial) => {
                return Err(AutomatonError::UnknownState {
                    automaton: name,
                    state: initial,
                })
            }
            None => return Err(AutomatonError::MissingInitialState { automaton: name }),
        };

        for (from, symbol, to) in self.transitions {
            if !states.contains_key(&to) {
                return Err(AutomatonError::UnknownState {
                    automaton: name,
                    state: to,
                });
            }
            if !self.alphabet.contains(&symbol) {
                return Err(AutomatonError::SymbolOutsideAlphabet {
                    automaton: name,
                    state: from,
                    symbol,
                });
            }
            let Some(state) = states.get_mut(&from) else {
                return Err(AutomatonError::UnknownState {
                    automaton: name,
                    state: from,
                });
            };
            if state.transitions.insert(symbol, to).is_some() {
                return Err(AutomatonError::Nondeterministic {
                    automaton: name,
                    state: from,
                    symbol,
                });
            }
        }

        Ok(Automaton {
            name,
            description: self.description,
            alphabet: self.alphabet,
            states,
            initial,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab_star_b() -> Automaton {
        // (a|b)*b
        AutomatonBuilder::new("ends-in-b")
            .alphabet(['a', 'b'])
            .state("q0", false)
            .state("q1", true)
            .initial("q0")
            .transition("q0", 'a', "q0")
            .transition("q0", 'b', "q1")
            .transition("q1", 'a', "q0")
            .transition("q1", 'b', "q1")
            .build()
            .unwrap()
    }

    #[test]
    fn test_accepts_and_rejects() {
        let dfa = ab_star_b();
        assert!(dfa.accepts("b"));
        assert!(dfa.accepts("aab"));
        assert!(!dfa.accepts(""));
        assert!(!dfa.accepts("ba"));
        assert!(!dfa.accepts("abc"));
    }

    #[test]
    fn test_simulate_records_every_transition() {
        let sim = ab_star_b().simulate("abb");
        assert!(sim.accepted);
        assert_eq!(sim.error, None);
        assert_eq!(sim.steps.len(), 3);
        assert_eq!(
            sim.steps[0],
            Transition {
                state: "q0".into(),
                symbol: 'a',
                next: "q0".into()
            }
        );
        assert_eq!(sim.steps[2].next, "q1");
    }

    #[test]
    fn test_simulate_reports_alphabet_violation() {
        let sim = ab_star_b().simulate("abxb");
        assert!(!sim.accepted);
        assert_eq!(sim.steps.len(), 2);
        assert_eq!(
            sim.error,
            Some(SimulationError::AlphabetViolation {
                symbol: 'x',
                position: 2
            })
        );
    }

    #[test]
    fn test_simulate_reports_end_of_input() {
        let sim = ab_star_b().simulate("aba");
        let error = sim.error.unwrap();
        assert_eq!(error.position(), 3);
        assert_eq!(error.symbol(), None);
        assert!(matches!(error, SimulationError::IncompleteAcceptance { ref state, .. } if state == "q0"));
    }

    #[test]
    fn test_missing_transition_is_reported() {
        let dfa = AutomatonBuilder::new("only-a")
            .alphabet(['a', 'b'])
            .state("q0", true)
            .initial("q0")
            .transition("q0", 'a', "q0")
            .build()
            .unwrap();
        let sim = dfa.simulate("ab");
        assert_eq!(
            sim.error,
            Some(SimulationError::NoTransition {
                state: "q0".into(),
                symbol: 'b',
                position: 1
            })
        );
        assert!(!dfa.accepts("ab"));
    }

    #[test]
    fn test_duplicate_symbol_is_rejected() {
        let err = AutomatonBuilder::new("nfa")
            .alphabet(['a'])
            .state("q0", false)
            .state("q1", true)
            .initial("q0")
            .transition("q0", 'a', "q0")
            .transition("q0", 'a', "q1")
            .build()
            .unwrap_err();
        assert!(matches!(err, AutomatonError::Nondeterministic { symbol: 'a', .. }));
    }

    #[test]
    fn test_structural_errors() {
        let missing_initial = AutomatonBuilder::new("x").state("q0", true).build();
        assert!(matches!(
            missing_initial,
            Err(AutomatonError::MissingInitialState { .. })
        ));

        let unknown_target = AutomatonBuilder::new("x")
            .alphabet(['a'])
            .state("q0", true)
            .initial("q0")
            .transition("q0", 'a', "q9")
            .build();
        assert!(matches!(unknown_target, Err(AutomatonError::UnknownState { .. })));

        let outside = AutomatonBuilder::new("x")
            .alphabet(['a'])
            .state("q0", true)
            .initial("q0")
            .transition("q0", 'z', "q0")
            .build();
        assert!(matches!(
            outside,
            Err(AutomatonError::SymbolOutsideAlphabet { symbol: 'z', .. })
        ));

        let duplicate = AutomatonBuilder::new("x")
            .state("q0", true)
            .state("q0", false)
            .initial("q0")
            .build();
        assert!(matches!(duplicate, Err(AutomatonError::DuplicateState { .. })));
    }
}
