//! Report formatting and printing.
//!
//! Kept separate from the engine so glossa can be used as a library without
//! printing side effects. Output follows the cargo error style: a colored
//! status per file, `error:`/`-->` blocks for failures, one summary line.

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::cli::run::RunOutcome;
use crate::engine::{FileFailure, FileReport};

/// Success mark for consistent output formatting
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓
/// Failure mark for consistent output formatting
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(outcome: &RunOutcome, verbose: bool) {
    let width = outcome
        .result
        .reports
        .iter()
        .map(|r| UnicodeWidthStr::width(r.target_path.as_str()))
        .max()
        .unwrap_or(0);

    for report in &outcome.result.reports {
        print_report_line(report, width, outcome.dry_run, verbose);
    }
    for failure in &outcome.result.failures {
        print_failure(failure);
    }
    print_summary(outcome);
}

fn print_report_line(report: &FileReport, width: usize, dry_run: bool, verbose: bool) {
    if report.up_to_date() && !verbose {
        return;
    }

    let padding = width.saturating_sub(UnicodeWidthStr::width(report.target_path.as_str()));
    let status = if report.up_to_date() {
        "up to date".dimmed().to_string()
    } else {
        let verb = if dry_run { "pending" } else { "translated" };
        let mut parts = vec![format!("{} {}", report.translated, verb)];
        if report.renamed > 0 {
            parts.push(format!("{} renamed", report.renamed));
        }
        if report.removed > 0 {
            parts.push(format!("{} removed", report.removed));
        }
        parts.join(", ")
    };

    println!(
        "{} {}{:padding$}  {}",
        SUCCESS_MARK.green(),
        report.target_path,
        "",
        status,
        padding = padding
    );
}

fn print_failure(failure: &FileFailure) {
    println!(
        "{}: {}  {}",
        "error".bold().red(),
        failure.error,
        format!("({})", failure.target_locale).dimmed()
    );
    println!("  {} {}", "-->".blue(), failure.source_path);
}

fn print_summary(outcome: &RunOutcome) {
    let result = &outcome.result;
    let failed = result.failures.len();

    if outcome.dry_run {
        let pending = result.pending();
        if failed > 0 {
            println!(
                "{} {} pending key(s), {} file(s) failed",
                FAILURE_MARK.red(),
                pending,
                failed
            );
        } else if pending > 0 {
            println!("{} key(s) pending translation", pending);
        } else {
            println!("{} All targets up to date", SUCCESS_MARK.green());
        }
        return;
    }

    if failed > 0 {
        println!(
            "{} {} file(s) translated, {} failed",
            FAILURE_MARK.red(),
            result.reports.len(),
            failed
        );
    } else if result.up_to_date() {
        println!("{} All targets up to date", SUCCESS_MARK.green());
    } else {
        println!(
            "{} {} key(s) translated across {} file(s)",
            SUCCESS_MARK.green(),
            result.reports.iter().map(|r| r.translated).sum::<usize>(),
            result.reports.len()
        );
    }
}
