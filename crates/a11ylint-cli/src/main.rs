//! a11ylint CLI tool.
//!
//! Usage:
//! ```bash
//! a11ylint audit [OPTIONS] <INPUT>
//! a11ylint list-checks
//! a11ylint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Accessibility auditor and repairer for structured documents
#[derive(Parser)]
#[command(name = "a11ylint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a document and optionally fix its accessibility issues
    Audit {
        /// Input document path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input format (default: from config, then "json")
        #[arg(long = "from")]
        input_format: Option<String>,

        /// Output format (default: from config, then "json")
        #[arg(long = "to")]
        output_format: Option<String>,

        /// Report issues without fixing them
        #[arg(long)]
        check: bool,

        /// Regenerate alt text even for images that already have it
        #[arg(long)]
        overwrite: bool,

        /// Run document analytics alongside the checks
        #[arg(long)]
        analytics: bool,

        /// Only run these checks (by id, repeatable)
        #[arg(long = "enable")]
        enable_checks: Vec<String>,

        /// Skip these checks (by id, repeatable)
        #[arg(long = "disable")]
        disable_checks: Vec<String>,

        /// Report format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List available checks and analyzers
    ListChecks,

    /// Initialize a configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Report output format.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report on stderr.
    #[default]
    Text,
    /// JSON report on stdout.
    Json,
    /// One-line-per-issue compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Audit {
            input,
            output,
            input_format,
            output_format,
            check,
            overwrite,
            analytics,
            enable_checks,
            disable_checks,
            format,
        } => commands::audit::run(&commands::audit::AuditArgs {
            input,
            output,
            input_format,
            output_format,
            check_only: check,
            overwrite,
            analytics,
            enable_checks,
            disable_checks,
            format,
            config: cli.config,
        }),
        Commands::ListChecks => {
            commands::list_checks::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
