//! Markdown report generation
//!
//! This module generates a human-readable markdown report of a crawl,
//! including run information, statistics and a table of broken links.

use crate::output::{CrawlReport, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report to a file
///
/// # Arguments
///
/// * `report` - The crawl report
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown report
/// * `Err(OutputError)` - Failed to write report
pub fn generate_markdown_report(report: &CrawlReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    tracing::info!("Wrote markdown report to {}", output_path.display());
    Ok(())
}

/// Formats a crawl report as markdown
pub fn format_markdown_report(report: &CrawlReport) -> String {
    let mut md = String::new();

    md.push_str("# Broken Link Report\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Start URL**: {}\n", report.run.start_url));
    md.push_str(&format!("- **Domain**: {}\n", report.run.domain));
    md.push_str(&format!("- **Max Depth**: {}\n", report.run.max_depth));
    md.push_str(&format!(
        "- **Started**: {}\n",
        report.run.started_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        report.duration.as_secs_f64()
    ));
    md.push_str(&format!("- **Status**: {}\n\n", report.status()));

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Pages Visited**: {}\n", report.pages_visited));
    md.push_str(&format!(
        "- **Broken Links**: {}\n\n",
        report.broken_count()
    ));

    if !report.has_broken_links() {
        md.push_str("No broken links found.\n");
        return md;
    }

    // Breakdown by failure kind, in order of first occurrence
    let mut by_kind: Vec<(&str, usize)> = Vec::new();
    for link in &report.broken {
        let label = link.reason.label();
        match by_kind.iter_mut().find(|(kind, _)| *kind == label) {
            Some((_, count)) => *count += 1,
            None => by_kind.push((label, 1)),
        }
    }

    md.push_str("## Failure Breakdown\n\n");
    md.push_str("| Kind | Count |\n");
    md.push_str("|------|-------|\n");
    for (kind, count) in by_kind {
        md.push_str(&format!("| {} | {} |\n", kind, count));
    }
    md.push('\n');

    md.push_str("## Broken Links\n\n");
    md.push_str("| URL | Found On | Status | Reason |\n");
    md.push_str("|-----|----------|--------|--------|\n");

    for link in &report.broken {
        let status = link
            .reason
            .status_code()
            .map_or_else(|| "-".to_string(), |code| code.to_string());
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            escape_cell(&link.url),
            escape_cell(&link.source),
            status,
            escape_cell(&link.reason.to_string())
        ));
    }
    md.push('\n');

    md
}

/// Escapes pipes so a value stays within one table cell
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
