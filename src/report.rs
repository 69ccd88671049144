use colored::*;
use terminal_size::{Width, terminal_size};

use crate::check::{CheckReport, Severity};

/// Get the current terminal width, defaulting to 80 if unable to detect
fn get_terminal_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        w as usize
    } else {
        80 // Default fallback width
    }
}

/// Create a separator line that fits the terminal width
fn separator(width: usize) -> String {
    "─".repeat(width.min(120)) // Cap at 120 for very wide terminals
}

pub fn format_report(report: &CheckReport) -> String {
    let term_width = get_terminal_width();
    let sep_width = (term_width - 2).max(40);

    let mut formatted = String::new();

    if report.findings.is_empty() {
        formatted.push_str(&format!(
            "\n{} {}\n",
            "✅".green(),
            "Index is clean".green().bold()
        ));
        formatted.push_str(&format!(
            "   {} chunk(s), {} entr{}, {} page(s) scanned\n",
            report.chunks_checked,
            report.entries_checked,
            if report.entries_checked == 1 { "y" } else { "ies" },
            report.pages_scanned
        ));
        return formatted;
    }

    formatted.push_str(&format!(
        "\n{} {}\n",
        "💥".red(),
        "Index Check Failed".red().bold()
    ));

    for (idx, finding) in report.findings.iter().enumerate() {
        let (icon, heading) = match finding.severity {
            Severity::Error => ("❌", format!("Error #{}", idx + 1).red().bold()),
            Severity::Warning => ("⚠️", format!("Warning #{}", idx + 1).yellow().bold()),
        };

        formatted.push_str(&format!(
            "\n{} {}\n",
            heading,
            separator(sep_width.saturating_sub(12)).yellow()
        ));
        formatted.push_str(&format!("  {} {}\n", "📄".cyan(), finding.chunk.cyan()));
        if !finding.context.is_empty() {
            formatted.push_str(&format!(
                "  {} Entry {}\n",
                "📍".yellow(),
                finding.context.yellow().bold()
            ));
        }
        formatted.push_str(&format!("  {} {}\n", icon, finding.message.white()));
    }

    formatted.push_str(&format!("\n{}\n", separator(sep_width).yellow()));
    formatted.push_str(&format!(
        "{} {} error(s), {} warning(s) in {} chunk(s) ({} entries, {} pages scanned)\n",
        "📊".yellow(),
        report.error_count().to_string().red().bold(),
        report.warning_count().to_string().yellow().bold(),
        report.chunks_checked,
        report.entries_checked,
        report.pages_scanned
    ));

    if report.has_errors() {
        formatted.push_str(&format!(
            "{} Regenerate the documentation or fix the index, then check again.\n",
            "💡".cyan()
        ));
    }

    formatted
}
