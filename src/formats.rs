//! Output formats for analyses
//!
//! - treeviz: text tree, derivation and trace
//! - tag: XML-like nested tags
//! - json / yaml: serde dumps of the whole analysis

pub mod registry;
pub mod structured;
pub mod tag;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use structured::{JsonFormatter, YamlFormatter};
pub use tag::{
    serialize_analysis as serialize_analysis_tag, serialize_tree as serialize_tree_tag, TagFormatter,
};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
