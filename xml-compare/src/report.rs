use colored::Colorize;
use xml_compare_core::{format_summary, format_text, Difference};

/// Render differences for terminal output.
pub fn render_text(differences: &[Difference]) -> String {
    if differences.is_empty() {
        return "no differences".green().to_string();
    }

    let raw = format_text(differences);
    let mut out = Vec::new();

    for line in raw.lines() {
        let colored = if line.starts_with('+') {
            line.green().to_string()
        } else if line.starts_with('-') {
            line.red().to_string()
        } else if line.starts_with('~') {
            line.yellow().to_string()
        } else {
            line.to_string()
        };
        out.push(colored);
    }

    out.join("\n")
}

/// Render summary counts for terminal output.
pub fn render_summary(differences: &[Difference]) -> String {
    format_summary(differences).cyan().to_string()
}
