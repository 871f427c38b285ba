use serde::Deserialize;

/// Tolerances applied by a [`crate::Comparer`]. Everything is compared by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareOptions {
    /// Skip namespace-URI differences.
    pub ignore_namespace: bool,
    /// Skip namespace-prefix differences.
    pub ignore_prefix: bool,
    /// Match element children by local name instead of position.
    pub ignore_child_node_order: bool,
    /// Match attributes by local name instead of position.
    pub ignore_attribute_order: bool,
    /// Leave comment nodes out of child comparison.
    pub ignore_comments: bool,
    /// Leave CDATA nodes out of child comparison.
    pub ignore_cdata: bool,
}

#[cfg(test)]
mod tests {
    use super::CompareOptions;

    #[test]
    fn partial_table_keeps_defaults() {
        let opts: CompareOptions =
            serde_json::from_str(r#"{"ignore_comments": true}"#).expect("deserialize");
        assert_eq!(
            opts,
            CompareOptions {
                ignore_comments: true,
                ..CompareOptions::default()
            }
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<CompareOptions>(r#"{"ignore_whitespace": true}"#);
        assert!(result.is_err());
    }
}
