//! # sintagma
//!
//! Syntactic analysis of short Spanish sentences.
//!
//! The crate combines four techniques over one pipeline:
//!
//! - deterministic finite automata for lexical validation ([`automata`])
//! - a table-driven LL(1) predictive parser with a full step trace
//!   ([`grammar`], [`parsing`])
//! - derivation trees replayed from that trace ([`tree`])
//! - stem-based matching against a small concept knowledge base ([`semantic`])
//!
//! [`pipeline::Analyzer`] wires them together from a [`config::SintagmaConfig`];
//! [`formats`] renders the resulting [`pipeline::Analysis`].
//!
//! ## Testing
//!
//! Unit tests live next to the code. The integration tests under `tests/`
//! cover the parser against the default grammar, tree rendering snapshots,
//! configuration layering and the `sintagma` binary.

pub mod automata;
pub mod config;
pub mod error;
pub mod formats;
pub mod grammar;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod semantic;
pub mod tree;

pub use config::{load_defaults, Loader, SintagmaConfig};
pub use error::{Error, Result};
pub use pipeline::{Analysis, Analyzer};
