//! Plain-text broken link report
//!
//! Produces the end-of-crawl summary printed to stdout.

use crate::output::CrawlReport;

/// Formats the broken link report
///
/// The first line always carries the count. When there are broken links,
/// a header follows and then one line per link in discovery order, with
/// the page it was found on unless `show_sources` is false.
///
/// # Arguments
///
/// * `report` - The crawl report
/// * `show_sources` - Whether to print where each link was found
pub fn format_report(report: &CrawlReport, show_sources: bool) -> String {
    let mut out = format!("Broken links encountered: {}\n", report.broken_count());

    if !report.has_broken_links() {
        return out;
    }

    out.push_str(if show_sources {
        "Broken links and their sources:\n"
    } else {
        "Broken links:\n"
    });

    for link in &report.broken {
        if show_sources {
            out.push_str(&format!("- {} (found on: {})\n", link.url, link.source));
        } else {
            out.push_str(&format!("- {}\n", link.url));
        }
    }

    out
}

/// Prints the broken link report to stdout
pub fn print_report(report: &CrawlReport, show_sources: bool) {
    print!("{}", format_report(report, show_sources));
}
