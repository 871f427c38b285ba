use crate::compare::{Difference, DifferenceType};

/// Format differences as plain text, one line each.
pub fn format_text(differences: &[Difference]) -> String {
    let mut lines = Vec::with_capacity(differences.len());
    for diff in differences {
        let left = hint(&diff.left_hint);
        let right = hint(&diff.right_hint);
        match diff.difference_type {
            DifferenceType::Added => lines.push(format!("+ {} {right}", diff.source)),
            DifferenceType::Removed => lines.push(format!("- {} {left}", diff.source)),
            DifferenceType::Changed => {
                lines.push(format!("~ {} {left} -> {right}", diff.source));
            }
        }
    }
    lines.join("\n")
}

/// Format a simple summary of difference counts.
pub fn format_summary(differences: &[Difference]) -> String {
    let mut added = 0;
    let mut removed = 0;
    let mut changed = 0;

    for diff in differences {
        match diff.difference_type {
            DifferenceType::Added => added += 1,
            DifferenceType::Removed => removed += 1,
            DifferenceType::Changed => changed += 1,
        }
    }

    format!(
        "differences={} added={added} removed={removed} changed={changed}",
        differences.len()
    )
}

fn hint(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("{v:?}"),
        None => "(none)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{format_summary, format_text};
    use crate::compare::{Difference, DifferenceSource};

    #[test]
    fn text_lines_are_prefixed_by_type() {
        let diffs = vec![
            Difference::added(DifferenceSource::AttributeName, "bar"),
            Difference::removed(DifferenceSource::ChildNode, "item"),
            Difference::changed(DifferenceSource::AttributeValue, Some("1"), Some("2")),
        ];

        assert_eq!(
            format_text(&diffs),
            "+ attribute-name \"bar\"\n- child-node \"item\"\n~ attribute-value \"1\" -> \"2\""
        );
        assert_eq!(
            format_summary(&diffs),
            "differences=3 added=1 removed=1 changed=1"
        );
    }
}
