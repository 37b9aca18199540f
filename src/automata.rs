//! Automaton engine
//!
//! Deterministic finite automata over single characters: construction with
//! load-time validation ([`dfa::AutomatonBuilder`]), acceptance checks and
//! step-by-step simulation ([`dfa::Automaton::simulate`]), plus the stock
//! automata in [`builtin`].

pub mod builtin;
pub mod dfa;

pub use dfa::{
    Automaton, AutomatonBuilder, AutomatonError, Simulation, SimulationError, State, Transition,
};
