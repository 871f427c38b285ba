use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::tree::NodeKind;

/// Which input of a comparison an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Errors that abort a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    /// An input node was not supplied.
    #[error("invalid argument: {0} node is absent")]
    InvalidArgument(Side),
    /// The two nodes are of different kinds.
    #[error("cannot compare {left} to {right}")]
    Uncomparable { left: NodeKind, right: NodeKind },
    /// A child node passed the kind filter but has no comparison.
    #[error("node kind {0} has no comparison; this is a bug")]
    UnsupportedNodeKind(NodeKind),
}
