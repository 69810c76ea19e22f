//! Terminal output helpers
//!
//! Progress lines go to stdout; the end-of-run degradation report is
//! always printed, colored when the terminal allows it.

use colored::Colorize;
use docsmith_core::RunReport;

/// Print a per-step progress line
pub fn step(message: &str, use_color: bool) {
    if use_color {
        println!("{} {message}", "==>".cyan().bold());
    } else {
        println!("==> {message}");
    }
}

/// Print the structured end-of-run report
///
/// Enumerates every degraded item so a human can triage without blocking
/// the build; prints a clean line when there is nothing to report.
pub fn print_report(report: &RunReport, use_color: bool) {
    if report.is_clean() {
        let line = "No degraded items.";
        if use_color {
            println!("{}", line.green());
        } else {
            println!("{line}");
        }
        return;
    }
    let header = format!("{} degraded item(s):", report.len());
    if use_color {
        println!("{}", header.yellow().bold());
    } else {
        println!("{header}");
    }
    for item in report.items() {
        let line = format!(
            "  [{}] {} - {}: {}",
            item.code.label(),
            item.phase,
            item.subject,
            item.message
        );
        if use_color {
            println!("{}", line.yellow());
        } else {
            println!("{line}");
        }
    }
}
