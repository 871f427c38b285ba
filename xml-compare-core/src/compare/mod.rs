//! Semantic comparison of two node trees.

pub mod difference;
pub mod engine;
pub mod error;
mod matcher;
pub mod options;

pub use difference::{Difference, DifferenceSource, DifferenceType};
pub use engine::{Comparer, Differences};
pub use error::{CompareError, Side};
pub use options::CompareOptions;
