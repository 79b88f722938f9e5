//! List-checks command implementation.

use a11ylint::analytics::enabled_analyzers;
use a11ylint::checks::{enabled_checks, CheckerContext};

/// Prints the available checks and analyzers.
pub fn run() {
    println!("Available checks:\n");
    for check in enabled_checks(&CheckerContext::default(), None, &[]) {
        println!(
            "  {:<22} {:<24} WCAG {}",
            check.check_id(),
            check.check_name(),
            check.wcag_sc()
        );
    }

    println!("\nAvailable analyzers:\n");
    for analyzer in enabled_analyzers(None, None, &[]) {
        println!(
            "  {:<22} {:<24} {}",
            analyzer.analyzer_id(),
            analyzer.analyzer_name(),
            analyzer.category()
        );
    }

    println!("\nDisable with --disable <id>, restrict with --enable <id>.");
}
