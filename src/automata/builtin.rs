//! Stock automata used by the lexical stage.
//!
//! - identifier: a letter or `_`, then letters, digits or `_`
//! - verb: lowercase word of two or more letters ending in `r` (infinitive shape)
//! - noun: lowercase word of two or more letters ending in `o`
//!
//! Letters include the Spanish diacritics for the identifier automaton; the
//! verb and noun automata work on plain ASCII lowercase.

use super::dfa::{Automaton, AutomatonBuilder, AutomatonError};

pub const SPANISH_LETTERS: &str = "áéíóúüñÁÉÍÓÚÜÑ";

fn ascii_lowercase() -> impl Iterator<Item = char> + Clone {
    'a'..='z'
}

fn letters() -> impl Iterator<Item = char> + Clone {
    ('a'..='z').chain('A'..='Z').chain(SPANISH_LETTERS.chars())
}

fn digits() -> impl Iterator<Item = char> + Clone {
    '0'..='9'
}

pub fn identifier() -> Result<Automaton, AutomatonError> {
    let head = letters().chain(['_']);
    let tail = head.clone().chain(digits());
    AutomatonBuilder::new("identifier")
        .description("letter or '_' followed by letters, digits or '_'")
        .alphabet(tail.clone())
        .state("q0", false)
        .state("q1", true)
        .initial("q0")
        .transitions("q0", head, "q1")
        .transitions("q1", tail, "q1")
        .build()
}

/// Words of two or more letters that end in `last`: q0 -any-> q1,
/// q1 -last-> q2 (accepting), q2 -last-> q2, q2 -other-> q1.
fn ends_with(name: &str, description: &str, last: char) -> Result<Automaton, AutomatonError> {
    let others = ascii_lowercase().filter(move |c| *c != last);
    AutomatonBuilder::new(name)
        .description(description)
        .alphabet(ascii_lowercase())
        .state("q0", false)
        .state("q1", false)
        .state("q2", true)
        .initial("q0")
        .transitions("q0", ascii_lowercase(), "q1")
        .transitions("q1", others.clone(), "q1")
        .transition("q1", last, "q2")
        .transitions("q2", others, "q1")
        .transition("q2", last, "q2")
        .build()
}

pub fn verb() -> Result<Automaton, AutomatonError> {
    ends_with("verb", "lowercase word ending in 'r'", 'r')
}

pub fn noun() -> Result<Automaton, AutomatonError> {
    ends_with("noun", "lowercase word ending in 'o'", 'o')
}

/// Looks a stock automaton up by name.
pub fn by_name(name: &str) -> Option<Result<Automaton, AutomatonError>> {
    match name {
        "identifier" => Some(identifier()),
        "verb" => Some(verb()),
        "noun" => Some(noun()),
        _ => None,
    }
}

pub const NAMES: [&str; 3] = ["identifier", "verb", "noun"];
