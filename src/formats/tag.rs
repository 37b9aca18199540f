//! XML-like tag serialization
//!
//! Tree nodes become tags named after their label; matched words are the text
//! content of terminal tags. Nodes without children are self-closing.
//!
//! ```text
//! <analysis status="accepted">
//!   <sentence>el balón cuesta</sentence>
//!   <tokens>
//!     <token category="art" type="id">el</token>
//!     ...
//!   </tokens>
//!   <tree>
//!     <S>
//!       <SN>
//!         <Det>
//!           <art>el</art>
//!         </Det>
//!         ...
//! ```

use super::registry::{FormatError, Formatter};
use crate::pipeline::Analysis;
use crate::tree::{SyntaxTree, TreeNode};

pub struct TagFormatter;

impl Formatter for TagFormatter {
    fn name(&self) -> &str {
        "tag"
    }

    fn serialize(&self, analysis: &Analysis) -> Result<String, FormatError> {
        Ok(serialize_analysis(analysis))
    }

    fn description(&self) -> &str {
        "XML-like nested tags"
    }
}

struct TagSerializer {
    output: String,
    indent_level: usize,
}

impl TagSerializer {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
        }
    }

    fn indent(&self) -> String {
        "  ".repeat(self.indent_level)
    }

    fn push_indent(&mut self, s: &str) {
        self.output.push_str(&self.indent());
        self.output.push_str(s);
    }

    fn open_tag(&mut self, tag: &str, attributes: &[(&str, &str)]) {
        self.push_indent(&format!("<{tag}{}>\n", render_attributes(attributes)));
        self.indent_level += 1;
    }

    fn close_tag(&mut self, tag: &str) {
        self.indent_level -= 1;
        self.push_indent(&format!("</{tag}>\n"));
    }

    fn empty_tag(&mut self, tag: &str, attributes: &[(&str, &str)]) {
        self.push_indent(&format!("<{tag}{}/>\n", render_attributes(attributes)));
    }

    fn tag_with_text(&mut self, tag: &str, attributes: &[(&str, &str)], text: &str) {
        self.push_indent(&format!(
            "<{tag}{}>{}</{tag}>\n",
            render_attributes(attributes),
            escape_xml(text)
        ));
    }

    fn visit_tree(&mut self, tag: &str, tree: &SyntaxTree) {
        let attributes: &[(&str, &str)] = if tree.approximate {
            &[("approximate", "true")]
        } else {
            &[]
        };
        self.open_tag(tag, attributes);
        self.visit_node(&tree.root);
        self.close_tag(tag);
    }

    fn visit_node(&mut self, node: &TreeNode) {
        match (&node.lexeme, node.children.is_empty()) {
            (Some(word), true) => self.tag_with_text(&node.label, &[], word),
            (None, true) => self.empty_tag(&node.label, &[]),
            _ => {
                self.open_tag(&node.label, &[]);
                for child in &node.children {
                    self.visit_node(child);
                }
                self.close_tag(&node.label);
            }
        }
    }
}

fn render_attributes(attributes: &[(&str, &str)]) -> String {
    attributes
        .iter()
        .map(|(key, value)| format!(" {key}=\"{}\"", escape_xml(value)))
        .collect()
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Serializes a whole analysis.
pub fn serialize_analysis(analysis: &Analysis) -> String {
    let mut s = TagSerializer::new();
    let status = if analysis.accepted() {
        "accepted"
    } else {
        "rejected"
    };
    s.open_tag("analysis", &[("status", status)]);
    s.tag_with_text("sentence", &[], &analysis.sentence);

    s.open_tag("tokens", &[]);
    for token in &analysis.tokens {
        let lexical_type = token.lexical_type.to_string();
        let mut attributes = vec![
            ("category", token.category.as_str()),
            ("type", lexical_type.as_str()),
        ];
        if !token.valid {
            attributes.push(("valid", "false"));
        }
        s.tag_with_text("token", &attributes, &token.lexeme);
    }
    s.close_tag("tokens");

    if let Some(error) = &analysis.parse.error {
        s.tag_with_text("error", &[], &error.to_string());
    }
    s.visit_tree("tree", &analysis.tree);
    if let Some(fallback) = &analysis.fallback {
        s.visit_tree("fallback", fallback);
    }

    s.open_tag("derivation", &[]);
    for line in &analysis.tree.derivation {
        s.tag_with_text("form", &[], line);
    }
    s.close_tag("derivation");

    if !analysis.semantic.is_empty() {
        s.open_tag("concepts", &[]);
        for m in &analysis.semantic.concepts {
            let score = m.score.to_string();
            s.tag_with_text("concept", &[("score", score.as_str())], &m.concept);
        }
        s.close_tag("concepts");
    }

    s.close_tag("analysis");
    s.output
}

/// Serializes only a tree.
pub fn serialize_tree(tree: &SyntaxTree) -> String {
    let mut s = TagSerializer::new();
    s.visit_tree("tree", tree);
    s.output
}
