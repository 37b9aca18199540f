//! Syntax trees
//!
//! [`build_tree`] replays a parse trace into a derivation tree with numbered
//! derivation strings; [`heuristic_tree`] guesses a flat tree when no
//! derivation exists. Text and tag renderings live in [`crate::formats`].

pub mod builder;
pub mod heuristic;
pub mod node;

pub use builder::build_tree;
pub use heuristic::{category_label, heuristic_tree};
pub use node::{SyntaxTree, TreeNode};
