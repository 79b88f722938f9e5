//! Readability analyzer - grade-level metrics via an external scorer.
//!
//! The metric formulas live in an external library behind
//! [`ReadabilityScorer`]; when no scorer is configured the analyzer
//! degrades to a single "unavailable" notice, and documents under ten
//! words produce no metrics at all.

use std::sync::Arc;

use a11ylint_core::{
    Analyzer, AnalyzerResult, Document, ElementType, Metric, MetricCategory, NodeId,
};

/// Analyzer id for readability.
pub const ANALYZER_ID: &str = "readability";

/// Analyzer name for readability.
pub const ANALYZER_NAME: &str = "Readability Metrics";

/// Minimum word count before readability metrics are meaningful.
const MIN_WORDS: usize = 10;

/// The seven numeric readability metrics an external scorer provides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadabilityScores {
    /// US school grade needed to understand the text.
    pub flesch_kincaid_grade: f64,
    /// Flesch reading ease, 0-100, higher is easier.
    pub flesch_reading_ease: f64,
    /// Gunning fog index (years of education).
    pub gunning_fog: f64,
    /// SMOG index (years of education).
    pub smog_index: f64,
    /// Coleman-Liau index (grade level).
    pub coleman_liau_index: f64,
    /// Automated readability index (grade level).
    pub automated_readability_index: f64,
    /// Dale-Chall readability score.
    pub dale_chall: f64,
}

/// External readability-metric library boundary.
pub trait ReadabilityScorer: Send + Sync {
    /// Scores the text, or returns `None` when it cannot.
    fn score(&self, text: &str) -> Option<ReadabilityScores>;
}

/// Accumulates block text and emits readability metrics.
pub struct ReadabilityAnalyzer {
    scorer: Option<Arc<dyn ReadabilityScorer>>,
    text_parts: Vec<String>,
}

impl ReadabilityAnalyzer {
    /// Creates the analyzer; without a scorer it reports unavailability.
    #[must_use]
    pub fn new(scorer: Option<Arc<dyn ReadabilityScorer>>) -> Self {
        Self {
            scorer,
            text_parts: Vec::new(),
        }
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

impl Analyzer for ReadabilityAnalyzer {
    fn analyzer_id(&self) -> &'static str {
        ANALYZER_ID
    }

    fn analyzer_name(&self) -> &'static str {
        ANALYZER_NAME
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Readability
    }

    fn element_types(&self) -> &'static [ElementType] {
        &[ElementType::Para, ElementType::Plain, ElementType::Header]
    }

    fn analyze(&mut self, doc: &Document, node: NodeId) {
        let text = doc.stringify(node).trim().to_string();
        if !text.is_empty() {
            self.text_parts.push(text);
        }
    }

    fn finalize(&mut self, _doc: &Document) -> AnalyzerResult {
        let category = MetricCategory::Readability;
        let full_text = self.text_parts.join(" ");
        if full_text.split_whitespace().count() < MIN_WORDS {
            return AnalyzerResult::new(ANALYZER_ID, ANALYZER_NAME, category, vec![]);
        }

        let Some(scores) = self.scorer.as_ref().and_then(|s| s.score(&full_text)) else {
            return AnalyzerResult::new(
                ANALYZER_ID,
                ANALYZER_NAME,
                category,
                vec![Metric::new(
                    "readability_unavailable",
                    "Readability Unavailable",
                    "No readability scorer configured",
                    category,
                )],
            );
        };

        let metrics = vec![
            Metric::new(
                "flesch_kincaid_grade",
                "Flesch-Kincaid Grade Level",
                round1(scores.flesch_kincaid_grade),
                category,
            )
            .with_unit("grade level")
            .with_range(0.0, 18.0)
            .with_interpretation("US school grade level needed to understand the text"),
            Metric::new(
                "flesch_reading_ease",
                "Flesch Reading Ease",
                round1(scores.flesch_reading_ease),
                category,
            )
            .with_unit("score")
            .with_range(0.0, 100.0)
            .with_interpretation("Higher = easier. 60-70 = standard, 30-50 = college"),
            Metric::new("gunning_fog", "Gunning Fog Index", round1(scores.gunning_fog), category)
                .with_unit("grade level")
                .with_range(0.0, 20.0)
                .with_interpretation("Years of education needed. 12+ = hard to read"),
            Metric::new("smog_index", "SMOG Index", round1(scores.smog_index), category)
                .with_unit("grade level")
                .with_range(0.0, 20.0)
                .with_interpretation("Years of education needed to understand"),
            Metric::new(
                "coleman_liau_index",
                "Coleman-Liau Index",
                round1(scores.coleman_liau_index),
                category,
            )
            .with_unit("grade level")
            .with_range(0.0, 18.0),
            Metric::new(
                "ari",
                "Automated Readability Index",
                round1(scores.automated_readability_index),
                category,
            )
            .with_unit("grade level")
            .with_range(0.0, 18.0),
            Metric::new(
                "dale_chall",
                "Dale-Chall Readability Score",
                round1(scores.dale_chall),
                category,
            )
            .with_unit("score")
            .with_range(0.0, 10.0)
            .with_interpretation("4.9 or below = 4th grader. 9+ = college graduate"),
        ];
        AnalyzerResult::new(ANALYZER_ID, ANALYZER_NAME, category, metrics)
    }
}
