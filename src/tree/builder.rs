//! Replays a parse trace into a derivation tree.
//!
//! Nodes live in an arena while the tree grows. The frontier holds the open
//! (not yet expanded) nonterminal nodes in leftmost order. Each expand step
//! attaches its body to the leftmost open node with the expanded label and
//! splices that node's nonterminal children into the frontier where the node
//! was, so the frontier stays in leftmost order. An ε expansion closes its node
//! without children.
//!
//! The sentential form is rewritten the same way (leftmost occurrence) to
//! produce the numbered derivation strings.

use tracing::debug;

use super::node::{SyntaxTree, TreeNode};
use crate::grammar::Symbol;
use crate::parsing::{Action, ParsingStep};

const DEFAULT_ROOT: &str = "S";

struct ArenaNode {
    label: String,
    terminal: bool,
    level: usize,
    children: Vec<usize>,
}

struct Arena {
    nodes: Vec<ArenaNode>,
}

impl Arena {
    fn push(&mut self, label: &str, terminal: bool, level: usize) -> usize {
        self.nodes.push(ArenaNode {
            label: label.to_string(),
            terminal,
            level,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    fn into_tree(self, root: usize) -> TreeNode {
        let mut slots: Vec<Option<ArenaNode>> = self.nodes.into_iter().map(Some).collect();
        materialize(&mut slots, root)
    }
}

fn materialize(slots: &mut [Option<ArenaNode>], index: usize) -> TreeNode {
    let Some(node) = slots.get_mut(index).and_then(Option::take) else {
        return TreeNode::new(DEFAULT_ROOT, false, 0);
    };
    let mut tree = TreeNode::new(node.label, node.terminal, node.level);
    tree.children = node
        .children
        .into_iter()
        .map(|child| materialize(slots, child))
        .collect();
    tree
}

fn render_form(form: &[Symbol]) -> String {
    if form.is_empty() {
        "ε".to_string()
    } else {
        form.iter().map(Symbol::name).collect::<Vec<_>>().join(" ")
    }
}

/// Builds the tree described by `steps`. A partial trace (rejected parse)
/// yields the prefix that was expanded before the parser stopped.
pub fn build_tree(steps: &[ParsingStep]) -> SyntaxTree {
    let root_label = steps
        .first()
        .and_then(|step| match step.action {
            Action::Start => step.stack.first().cloned(),
            _ => None,
        })
        .unwrap_or_else(|| DEFAULT_ROOT.to_string());

    let mut arena = Arena { nodes: Vec::new() };
    let root = arena.push(&root_label, false, 0);
    let mut frontier: Vec<usize> = vec![root];
    let mut form = vec![Symbol::NonTerminal(root_label.clone())];
    let mut derivation = vec![format!("1. {}", root_label)];

    for step in steps {
        let Action::Expand { nonterminal, body } = &step.action else {
            continue;
        };
        let Some(slot) = frontier
            .iter()
            .position(|&id| arena.nodes[id].label == *nonterminal)
        else {
            debug!(%nonterminal, "expansion without an open node; stopping replay");
            break;
        };

        let parent = frontier.remove(slot);
        let level = arena.nodes[parent].level + 1;
        let mut opened = Vec::new();
        for symbol in body {
            let child = arena.push(symbol.name(), symbol.is_terminal(), level);
            arena.nodes[parent].children.push(child);
            if !symbol.is_terminal() {
                opened.push(child);
            }
        }
        frontier.splice(slot..slot, opened);

        if let Some(at) = form
            .iter()
            .position(|s| matches!(s, Symbol::NonTerminal(name) if name == nonterminal))
        {
            form.splice(at..=at, body.iter().cloned());
        }
        derivation.push(format!("{}. {}", derivation.len() + 1, render_form(&form)));
    }

    SyntaxTree {
        root: arena.into_tree(root),
        derivation,
        approximate: false,
    }
}
