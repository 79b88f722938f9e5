//! The audit pipeline: convert → engine → score → render.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use a11ylint_analytics::{enabled_analyzers, ReadabilityScorer, ScoreAggregator};
use a11ylint_checks::{enabled_checks, CheckerContext};
use a11ylint_core::{
    AnalyzerResult, CheckResult, ConvertError, DocumentConverter, Engine, GeneratorSet, Report,
};

/// Formats the converter treats as raw markup worth color extraction.
const MARKUP_FORMATS: [&str; 3] = ["html", "html5", "html4"];

/// Options controlling one audit run.
#[derive(Clone)]
pub struct AuditOptions {
    /// Input format handed to the converter.
    pub input_format: String,
    /// Output format handed to the converter.
    pub output_format: String,
    /// Apply fixes (false = report only).
    pub fix: bool,
    /// Regenerate alt text even for images that already carry it.
    pub overwrite: bool,
    /// Run document analytics and compute the composite score.
    pub analytics: bool,
    /// Optional allow-list of check ids.
    pub enabled_checks: Option<Vec<String>>,
    /// Deny-list of check ids (wins over the allow-list).
    pub disabled_checks: Vec<String>,
    /// Optional allow-list of analyzer ids.
    pub enabled_analyzers: Option<Vec<String>>,
    /// Deny-list of analyzer ids (wins over the allow-list).
    pub disabled_analyzers: Vec<String>,
    /// Directory for resolving relative image paths.
    pub base_dir: PathBuf,
    /// The configured external collaborators.
    pub generators: GeneratorSet,
    /// Optional readability scorer for the readability analyzer.
    pub readability_scorer: Option<Arc<dyn ReadabilityScorer>>,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            input_format: "json".to_string(),
            output_format: "json".to_string(),
            fix: true,
            overwrite: false,
            analytics: false,
            enabled_checks: None,
            disabled_checks: Vec::new(),
            enabled_analyzers: None,
            disabled_analyzers: Vec::new(),
            base_dir: PathBuf::from("."),
            generators: GeneratorSet::default(),
            readability_scorer: None,
        }
    }
}

/// Everything a completed audit produced.
#[derive(Debug)]
pub struct AuditOutcome {
    /// The rendered (possibly repaired) document.
    pub output: String,
    /// Per-check results in registration order.
    pub check_results: Vec<CheckResult>,
    /// Per-analyzer results, with the composite score appended when
    /// analytics ran.
    pub analyzer_results: Vec<AnalyzerResult>,
}

impl AuditOutcome {
    /// Builds the serializable report for this outcome.
    #[must_use]
    pub fn report(&self) -> Report {
        Report::new(&self.check_results, &self.analyzer_results)
    }

    /// Total number of issues across all checks.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.check_results.iter().map(|r| r.issues.len()).sum()
    }

    /// Number of issues marked fixed across all checks.
    #[must_use]
    pub fn fixed_count(&self) -> usize {
        self.check_results.iter().map(CheckResult::fixed_count).sum()
    }
}

/// Errors from the audit pipeline.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The converter failed to parse or render.
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Runs one full audit over `source`.
///
/// Parses with the given converter, runs the enabled checks and analyzers
/// through the engine, appends the composite score when analytics ran,
/// and renders the (possibly repaired) tree back to text.
///
/// # Errors
///
/// Returns [`AuditError`] when the converter rejects the input or output.
pub fn audit(
    source: &str,
    converter: &dyn DocumentConverter,
    options: &AuditOptions,
) -> Result<AuditOutcome, AuditError> {
    let mut doc = converter.parse(source, &options.input_format)?;

    let raw_markup = if MARKUP_FORMATS.contains(&options.input_format.as_str()) {
        source.to_string()
    } else {
        String::new()
    };

    let ctx = CheckerContext {
        base_dir: options.base_dir.clone(),
        overwrite: options.overwrite,
        raw_markup,
        generators: options.generators.clone(),
    };
    let checks = enabled_checks(&ctx, options.enabled_checks.as_deref(), &options.disabled_checks);

    let analyzers = if options.analytics {
        enabled_analyzers(
            options.readability_scorer.clone(),
            options.enabled_analyzers.as_deref(),
            &options.disabled_analyzers,
        )
    } else {
        Vec::new()
    };

    let mut engine = Engine::new(checks, analyzers);
    info!(handlers = engine.handler_count(), "auditing document");
    let outcome = engine.run(&mut doc, options.fix);

    let mut analyzer_results = outcome.analyzer_results;
    if options.analytics {
        let score = ScoreAggregator::new().compute(&outcome.check_results, &analyzer_results);
        analyzer_results.push(score);
    }

    let output = converter.render(&doc, &options.output_format)?;

    Ok(AuditOutcome {
        output,
        check_results: outcome.check_results,
        analyzer_results,
    })
}
