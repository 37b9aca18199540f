//! Fallback tree for sentences the grammar could not derive.
//!
//! Splits the words into `S → SN SV` at the first verb and hangs each word
//! under a node for its category. The result is a guess, so it is always
//! flagged [`SyntaxTree::approximate`].

use super::node::{SyntaxTree, TreeNode};

/// Node label for a lexical category.
pub fn category_label(category: &str) -> &str {
    match category {
        "art" => "Det",
        "sust" => "N",
        "verbo" => "V",
        "adj" => "Adj",
        "adv" => "Adv",
        "prep" => "Prep",
        "pronom" => "Pron",
        "conj" => "Conj",
        "interr" => "Interr",
        "punt" => "Punt",
        "num" => "Num",
        other => other,
    }
}

/// Builds the approximate tree from `(word, category)` pairs.
pub fn heuristic_tree<'a, I>(words: I) -> SyntaxTree
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut subject = TreeNode::new("SN", false, 1);
    let mut predicate = TreeNode::new("SV", false, 1);
    let mut in_predicate = false;
    let mut lexemes = Vec::new();

    for (word, category) in words {
        if category == "verbo" {
            in_predicate = true;
        }
        let mut leaf = TreeNode::new(category, true, 3);
        leaf.lexeme = Some(word.to_string());
        let mut node = TreeNode::new(category_label(category), false, 2);
        node.children.push(leaf);
        if in_predicate {
            predicate.children.push(node);
        } else {
            subject.children.push(node);
        }
        lexemes.push(word);
    }

    let mut root = TreeNode::new("S", false, 0);
    root.children = vec![subject, predicate];

    let mut derivation = vec!["1. S".to_string(), "2. SN SV".to_string()];
    if !lexemes.is_empty() {
        derivation.push(format!("3. {}", lexemes.join(" ")));
    }

    SyntaxTree {
        root,
        derivation,
        approximate: true,
    }
}
