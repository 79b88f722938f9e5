//! Shared report printing for audit results.

use anyhow::Result;

use a11ylint::{AuditOutcome, Severity};

use crate::OutputFormat;

/// Prints the audit report in the selected format.
///
/// Text and compact reports go to stderr so the repaired document can
/// stream to stdout; the JSON report goes to stdout.
pub fn print_report(outcome: &AuditOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(outcome),
        OutputFormat::Json => return print_json(outcome),
        OutputFormat::Compact => print_compact(outcome),
    }
    Ok(())
}

fn print_text(outcome: &AuditOutcome) {
    for result in &outcome.check_results {
        if result.issues.is_empty() {
            continue;
        }
        eprintln!("\n  {} ({}):", result.check_name, result.check_id);
        for issue in &result.issues {
            let status = if issue.fixed { " [FIXED]" } else { "" };
            let severity = match issue.severity {
                Severity::Error => "\x1b[31mERROR\x1b[0m",
                Severity::Warning => "\x1b[33mWARNING\x1b[0m",
            };
            eprintln!(
                "    {severity}: {} ({}){status}",
                issue.message, issue.location
            );
            if issue.fixed && !issue.fix_description.is_empty() {
                eprintln!("      = fix: {}", issue.fix_description);
            }
        }
    }

    print_analytics(outcome);

    let total = outcome.issue_count();
    if total > 0 {
        eprintln!(
            "\na11ylint: {} issue(s) found, {} fixed",
            total,
            outcome.fixed_count()
        );
    } else {
        eprintln!("a11ylint: no accessibility issues found");
    }
}

fn print_analytics(outcome: &AuditOutcome) {
    for result in &outcome.analyzer_results {
        if result.metrics.is_empty() {
            continue;
        }
        eprintln!("\n  {} ({}):", result.analyzer_name, result.analyzer_id);
        for metric in &result.metrics {
            let unit = if metric.unit.is_empty() {
                String::new()
            } else {
                format!(" {}", metric.unit)
            };
            eprintln!("    {}: {}{unit}", metric.display_name, metric.value);
            if !metric.interpretation.is_empty() {
                eprintln!("      ({})", metric.interpretation);
            }
        }
    }
}

fn print_json(outcome: &AuditOutcome) -> Result<()> {
    let json = serde_json::to_string_pretty(&outcome.report())?;
    println!("{json}");
    Ok(())
}

fn print_compact(outcome: &AuditOutcome) {
    for result in &outcome.check_results {
        for issue in &result.issues {
            eprintln!(
                "{}: {} [WCAG {}] {} ({})",
                issue.severity, result.check_id, issue.wcag_sc, issue.message, issue.location
            );
        }
    }
}
