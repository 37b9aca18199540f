//! Grammar model and LL(1) table construction
//!
//! A [`Grammar`] is built either programmatically with [`GrammarBuilder`] or
//! from rule text with [`Grammar::from_notation`]. [`ParseTable::build`]
//! computes FIRST/FOLLOW ([`GrammarSets`]) and the prediction table, applying a
//! [`ConflictPolicy`] to cells with more than one candidate.

pub mod model;
pub mod notation;
pub mod sets;
pub mod table;

pub use model::{Grammar, GrammarBuilder, GrammarError, Production, Symbol};
pub use notation::{parse_rules, RuleLine};
pub use sets::{FirstSet, GrammarSets, Lookahead};
pub use table::{Conflict, ConflictPolicy, ParseTable};
