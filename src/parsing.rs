//! Predictive parsing
//!
//! [`PredictiveParser`] runs a token sequence against a [`crate::grammar::ParseTable`]
//! and returns a [`ParseOutcome`] holding the step-by-step trace.

pub mod parser;
pub mod trace;

pub use parser::PredictiveParser;
pub use trace::{Action, ParseError, ParseOutcome, ParsingStep};
