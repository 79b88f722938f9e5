//! Audit command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};

use a11ylint::{audit, AuditOptions, Config, JsonConverter};

use crate::OutputFormat;

/// Parsed arguments for the audit command.
pub struct AuditArgs {
    /// Input document path.
    pub input: PathBuf,
    /// Output file path, stdout when absent.
    pub output: Option<PathBuf>,
    /// Input format override.
    pub input_format: Option<String>,
    /// Output format override.
    pub output_format: Option<String>,
    /// Report without fixing.
    pub check_only: bool,
    /// Regenerate existing alt text.
    pub overwrite: bool,
    /// Run analytics.
    pub analytics: bool,
    /// Allow-list of check ids.
    pub enable_checks: Vec<String>,
    /// Deny-list of check ids.
    pub disable_checks: Vec<String>,
    /// Report format.
    pub format: OutputFormat,
    /// Explicit config path from the global flag.
    pub config: Option<PathBuf>,
}

/// Runs the audit command.
pub fn run(args: &AuditArgs) -> Result<()> {
    let input_dir = args
        .input
        .parent()
        .map_or_else(|| PathBuf::from("."), PathBuf::from);

    let source = crate::config_resolver::resolve(&input_dir, args.config.as_deref());
    let config = match source.path() {
        Some(p) => {
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
        None => Config::default(),
    };

    let document = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let options = build_options(args, &config, input_dir);

    let converter = JsonConverter::new();
    let outcome = audit(&document, &converter, &options).context("Audit failed")?;

    super::output::print_report(&outcome, args.format)?;

    if args.check_only {
        if outcome.issue_count() > 0 {
            std::process::exit(1);
        }
        return Ok(());
    }

    match &args.output {
        Some(path) => {
            std::fs::write(path, &outcome.output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => println!("{}", outcome.output),
    }

    // Unrepaired errors still fail the run so CI can gate on them.
    let unfixed_errors = outcome.check_results.iter().any(|r| {
        r.issues
            .iter()
            .any(|i| i.severity == a11ylint::Severity::Error && !i.fixed)
    });
    if unfixed_errors {
        std::process::exit(1);
    }

    Ok(())
}

/// Merges config defaults with CLI flags (flags win).
fn build_options(args: &AuditArgs, config: &Config, input_dir: PathBuf) -> AuditOptions {
    let mut disabled_checks = config.disabled_checks();
    disabled_checks.extend(args.disable_checks.iter().cloned());

    AuditOptions {
        input_format: args
            .input_format
            .clone()
            .unwrap_or_else(|| config.audit.input_format.clone()),
        output_format: args
            .output_format
            .clone()
            .unwrap_or_else(|| config.audit.output_format.clone()),
        fix: !args.check_only && config.audit.fix,
        overwrite: args.overwrite || config.audit.overwrite,
        analytics: args.analytics || config.audit.analytics,
        enabled_checks: if args.enable_checks.is_empty() {
            None
        } else {
            Some(args.enable_checks.clone())
        },
        disabled_checks,
        enabled_analyzers: None,
        disabled_analyzers: config.disabled_analyzers(),
        base_dir: config.audit.base_dir.clone().unwrap_or(input_dir),
        ..AuditOptions::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> AuditArgs {
        AuditArgs {
            input: PathBuf::from("doc.json"),
            output: None,
            input_format: None,
            output_format: None,
            check_only: false,
            overwrite: false,
            analytics: false,
            enable_checks: Vec::new(),
            disable_checks: vec!["color-contrast".to_string()],
            format: OutputFormat::Text,
            config: None,
        }
    }

    #[test]
    fn flags_merge_with_config() {
        let config = Config::parse(
            r#"
[audit]
analytics = true

[checks.link-text]
enabled = false
"#,
        )
        .unwrap();

        let options = build_options(&args(), &config, PathBuf::from("."));
        assert!(options.analytics);
        assert!(options.fix);
        assert!(options
            .disabled_checks
            .contains(&"link-text".to_string()));
        assert!(options
            .disabled_checks
            .contains(&"color-contrast".to_string()));
        assert_eq!(options.input_format, "json");
    }

    #[test]
    fn check_only_disables_fixing() {
        let mut a = args();
        a.check_only = true;
        let options = build_options(&a, &Config::default(), PathBuf::from("."));
        assert!(!options.fix);
    }

    #[test]
    fn explicit_formats_win_over_config() {
        let mut a = args();
        a.input_format = Some("html".to_string());
        let options = build_options(&a, &Config::default(), PathBuf::from("."));
        assert_eq!(options.input_format, "html");
    }
}
