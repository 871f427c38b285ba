//! Semantic comparison of XML node trees.
//!
//! [`Comparer`] walks two trees and reports namespace, attribute, and child
//! differences, with optional tolerance for namespace, ordering, comment,
//! and CDATA variation. Trees are consumed through the read-only [`Node`]
//! trait; [`parse`] builds the bundled [`XmlNode`] representation.

pub mod compare;
pub mod format;
pub mod parser;
pub mod tree;

pub use compare::{
    CompareError, CompareOptions, Comparer, Difference, DifferenceSource, DifferenceType,
    Differences, Side,
};
pub use format::{format_json, format_summary, format_text};
pub use parser::{parse, parse_file, ParseError};
pub use tree::{Node, NodeKind, XmlNode};
