use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// How a compared aspect differs between left and right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DifferenceType {
    /// Present only on the right.
    Added,
    /// Present only on the left.
    Removed,
    /// Present on both sides with different content.
    Changed,
}

/// Which structural aspect of a node pair a difference concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DifferenceSource {
    NamespaceUri,
    NamespacePrefix,
    AttributeName,
    AttributeValue,
    ChildNode,
}

impl Display for DifferenceSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            DifferenceSource::NamespaceUri => "namespace-uri",
            DifferenceSource::NamespacePrefix => "namespace-prefix",
            DifferenceSource::AttributeName => "attribute-name",
            DifferenceSource::AttributeValue => "attribute-value",
            DifferenceSource::ChildNode => "child-node",
        };
        f.write_str(label)
    }
}

/// A single discrepancy between a left and a right node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Difference {
    #[serde(rename = "type")]
    pub difference_type: DifferenceType,
    pub source: DifferenceSource,
    pub left_hint: Option<String>,
    pub right_hint: Option<String>,
}

impl Difference {
    pub fn added(source: DifferenceSource, right_hint: impl Into<String>) -> Self {
        Self {
            difference_type: DifferenceType::Added,
            source,
            left_hint: None,
            right_hint: Some(right_hint.into()),
        }
    }

    pub fn removed(source: DifferenceSource, left_hint: impl Into<String>) -> Self {
        Self {
            difference_type: DifferenceType::Removed,
            source,
            left_hint: Some(left_hint.into()),
            right_hint: None,
        }
    }

    pub fn changed(
        source: DifferenceSource,
        left_hint: Option<&str>,
        right_hint: Option<&str>,
    ) -> Self {
        Self {
            difference_type: DifferenceType::Changed,
            source,
            left_hint: left_hint.map(ToString::to_string),
            right_hint: right_hint.map(ToString::to_string),
        }
    }

    /// The same difference seen from the other side.
    pub fn mirrored(&self) -> Self {
        let difference_type = match self.difference_type {
            DifferenceType::Added => DifferenceType::Removed,
            DifferenceType::Removed => DifferenceType::Added,
            DifferenceType::Changed => DifferenceType::Changed,
        };
        Self {
            difference_type,
            source: self.source,
            left_hint: self.right_hint.clone(),
            right_hint: self.left_hint.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Difference, DifferenceSource, DifferenceType};

    #[test]
    fn mirrored_swaps_added_and_removed_hints() {
        let added = Difference::added(DifferenceSource::AttributeName, "bar");
        let mirrored = added.mirrored();

        assert_eq!(mirrored.difference_type, DifferenceType::Removed);
        assert_eq!(mirrored.left_hint.as_deref(), Some("bar"));
        assert_eq!(mirrored.right_hint, None);
        assert_eq!(mirrored.mirrored(), added);
    }

    #[test]
    fn serializes_type_field() {
        let diff = Difference::changed(DifferenceSource::ChildNode, Some("a"), Some("b"));
        let json = serde_json::to_string(&diff).expect("serialize");
        assert!(json.contains(r#""type":"Changed""#));
        assert!(json.contains(r#""source":"ChildNode""#));
    }
}
