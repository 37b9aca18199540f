//! Syntax tree nodes.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub label: String,
    pub terminal: bool,
    pub level: usize,
    /// Source word for terminal leaves, once attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexeme: Option<String>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>, terminal: bool, level: usize) -> Self {
        Self {
            label: label.into(),
            terminal,
            level,
            lexeme: None,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Label plus the attached word, e.g. `art "el"`.
    pub fn display_label(&self) -> String {
        match &self.lexeme {
            Some(lexeme) => format!("{} \"{}\"", self.label, lexeme),
            None => self.label.clone(),
        }
    }

    fn collect_terminals<'a>(&'a self, out: &mut Vec<&'a TreeNode>) {
        if self.terminal {
            out.push(self);
        }
        for child in &self.children {
            child.collect_terminals(out);
        }
    }

    fn attach<'l>(&mut self, lexemes: &mut impl Iterator<Item = &'l str>) {
        if self.terminal {
            self.lexeme = lexemes.next().map(str::to_string);
        }
        for child in &mut self.children {
            child.attach(lexemes);
        }
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }

    fn height(&self) -> usize {
        self.children.iter().map(TreeNode::height).max().map_or(0, |h| h + 1)
    }
}

/// A derivation tree plus its numbered derivation strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxTree {
    pub root: TreeNode,
    /// `"1. S"`, `"2. SN SV"`, ... one entry per sentential form.
    pub derivation: Vec<String>,
    /// Set for trees guessed from word categories instead of a parse trace.
    pub approximate: bool,
}

impl SyntaxTree {
    /// Terminal leaves in left-to-right order.
    pub fn terminals(&self) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        self.root.collect_terminals(&mut out);
        out
    }

    /// Terminal labels in left-to-right order.
    pub fn leaves(&self) -> Vec<&str> {
        self.terminals()
            .into_iter()
            .map(|n| n.label.as_str())
            .collect()
    }

    /// Pairs terminal leaves with source words, left to right.
    pub fn attach_lexemes<S: AsRef<str>>(&mut self, lexemes: &[S]) {
        let mut words = lexemes.iter().map(AsRef::as_ref);
        self.root.attach(&mut words);
    }

    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    pub fn height(&self) -> usize {
        self.root.height()
    }
}
