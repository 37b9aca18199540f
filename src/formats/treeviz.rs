//! Treeviz formatter
//!
//! Plain-text rendering meant for terminals: one line per tree node with box
//! drawing connectors, followed by the numbered derivation and the parser
//! trace. Terminal leaves show the word they matched:
//!
//! ```text
//! S
//! ├── SN
//! │   ├── Det
//! │   │   └── art "el"
//! │   └── N
//! │       └── sust "balón"
//! └── SV
//!     └── V
//!         └── verbo "cuesta"
//! ```

use std::fmt::Write as _;

use super::registry::{FormatError, Formatter};
use crate::pipeline::Analysis;
use crate::tree::{SyntaxTree, TreeNode};

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, analysis: &Analysis) -> Result<String, FormatError> {
        analysis_to_treeviz(analysis).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Text tree with derivation and parser trace"
    }
}

/// Renders just the tree.
pub fn to_treeviz_str(tree: &SyntaxTree) -> String {
    let mut result = String::new();
    result.push_str(&tree.root.display_label());
    if tree.approximate {
        result.push_str(" (approximate)");
    }
    result.push('\n');
    append_children(&mut result, &tree.root.children, "");
    result
}

fn append_node(result: &mut String, node: &TreeNode, prefix: &str, is_last: bool) {
    let connector = if is_last { "└── " } else { "├── " };
    result.push_str(prefix);
    result.push_str(connector);
    result.push_str(&node.display_label());
    result.push('\n');

    let new_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
    append_children(result, &node.children, &new_prefix);
}

fn append_children(result: &mut String, children: &[TreeNode], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, child, prefix, is_last);
    }
}

fn analysis_to_treeviz(analysis: &Analysis) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "sentence: {}", analysis.sentence)?;
    writeln!(out, "tokenization: {}", analysis.tokenization)?;
    writeln!(out, "categories: {}", analysis.categories.join(" "))?;
    if let Some(error) = &analysis.lexical_error {
        match error.character {
            Some(c) => writeln!(
                out,
                "lexical error: '{}' (word {}) contains '{}'",
                error.word,
                error.position + 1,
                c
            )?,
            None => writeln!(
                out,
                "lexical error: '{}' (word {})",
                error.word,
                error.position + 1
            )?,
        }
    }
    match &analysis.parse.error {
        None => writeln!(out, "status: accepted")?,
        Some(error) => writeln!(out, "status: rejected: {error}")?,
    }

    writeln!(out)?;
    if analysis.accepted() {
        writeln!(out, "tree:")?;
    } else {
        writeln!(out, "tree (partial):")?;
    }
    out.push_str(&to_treeviz_str(&analysis.tree));
    if let Some(fallback) = &analysis.fallback {
        writeln!(out)?;
        writeln!(out, "fallback:")?;
        out.push_str(&to_treeviz_str(fallback));
    }

    writeln!(out)?;
    writeln!(out, "derivation:")?;
    for line in &analysis.tree.derivation {
        writeln!(out, "  {line}")?;
    }

    writeln!(out)?;
    writeln!(out, "trace:")?;
    for (i, step) in analysis.parse.steps.iter().enumerate() {
        writeln!(out, "  {:>3}  {}", i + 1, step)?;
    }

    let semantic = &analysis.semantic;
    if !semantic.is_empty() {
        writeln!(out)?;
        writeln!(out, "concepts:")?;
        for m in &semantic.concepts {
            writeln!(out, "  {} ({})", m.concept, m.score)?;
        }
        for relation in &semantic.relations {
            writeln!(out, "  {} ~ {}", relation.from, relation.to)?;
        }
        if !semantic.suggestions.is_empty() {
            writeln!(out, "suggestions: {}", semantic.suggestions.join(", "))?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(label: &str, word: &str, level: usize) -> TreeNode {
        let mut node = TreeNode::new(label, true, level);
        node.lexeme = Some(word.to_string());
        node
    }

    fn branch(label: &str, level: usize, children: Vec<TreeNode>) -> TreeNode {
        let mut node = TreeNode::new(label, false, level);
        node.children = children;
        node
    }

    #[test]
    fn test_connectors_and_prefixes() {
        let tree = SyntaxTree {
            root: branch(
                "S",
                0,
                vec![
                    branch(
                        "SN",
                        1,
                        vec![
                            branch("Det", 2, vec![leaf("art", "el", 3)]),
                            branch("N", 2, vec![leaf("sust", "balón", 3)]),
                        ],
                    ),
                    branch("SV", 1, vec![branch("V", 2, vec![leaf("verbo", "cuesta", 3)])]),
                ],
            ),
            derivation: vec![],
            approximate: false,
        };

        let expected = "\
S
├── SN
│   ├── Det
│   │   └── art \"el\"
│   └── N
│       └── sust \"balón\"
└── SV
    └── V
        └── verbo \"cuesta\"
";
        assert_eq!(to_treeviz_str(&tree), expected);
    }

    #[test]
    fn test_approximate_marker() {
        let tree = SyntaxTree {
            root: branch("S", 0, vec![]),
            derivation: vec![],
            approximate: true,
        };
        assert_eq!(to_treeviz_str(&tree), "S (approximate)\n");
    }
}
