//! Composite accessibility score - folds checks and readability into 0-100.

use a11ylint_core::{AnalyzerResult, CheckResult, Metric, MetricCategory};

/// Analyzer id for the composite score.
pub const ANALYZER_ID: &str = "accessibility-score";

/// Analyzer name for the composite score.
pub const ANALYZER_NAME: &str = "Accessibility Score";

/// Point weight per check id. The seven categories sum to 90; readability
/// contributes the remaining 10.
const CHECK_WEIGHTS: [(&str, f64); 7] = [
    ("image-alt-text", 20.0),
    ("heading-hierarchy", 15.0),
    ("link-text", 15.0),
    ("table-accessibility", 10.0),
    ("document-language", 10.0),
    ("list-structure", 10.0),
    ("color-contrast", 10.0),
];

/// Weight for checks absent from the table.
const DEFAULT_WEIGHT: f64 = 5.0;

/// Weight of the readability grade contribution.
const READABILITY_WEIGHT: f64 = 10.0;

fn weight_for(check_id: &str) -> f64 {
    CHECK_WEIGHTS
        .iter()
        .find(|(id, _)| *id == check_id)
        .map_or(DEFAULT_WEIGHT, |(_, w)| *w)
}

/// Computes the composite 0-100 accessibility score.
///
/// Each check starts at full weight and loses
/// `min(unfixed_errors * weight / 5, weight)` points; a readability grade
/// of 8 or below earns the full readability weight, decaying linearly to
/// zero at grade 16. The final score normalizes over the weights actually
/// considered, so disabling checks does not penalize the document. The
/// penalty arithmetic is kept exactly as shipped for score compatibility.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreAggregator;

impl ScoreAggregator {
    /// Creates the aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes the score over a run's results.
    #[must_use]
    pub fn compute(
        &self,
        check_results: &[CheckResult],
        analyzer_results: &[AnalyzerResult],
    ) -> AnalyzerResult {
        let mut score = 0.0;
        let mut active_weight = 0.0;

        for cr in check_results {
            let weight = weight_for(&cr.check_id);
            active_weight += weight;
            if cr.issues.is_empty() {
                score += weight;
            } else {
                let unfixed = cr.error_count().saturating_sub(cr.fixed_count());
                let penalty = (unfixed as f64 * (weight / 5.0)).min(weight);
                score += (weight - penalty).max(0.0);
            }
        }

        let grade = analyzer_results
            .iter()
            .find_map(|ar| ar.metric("flesch_kincaid_grade"))
            .and_then(|m| m.value.as_f64());

        if let Some(grade) = grade {
            active_weight += READABILITY_WEIGHT;
            if grade <= 8.0 {
                score += READABILITY_WEIGHT;
            } else if grade <= 16.0 {
                score += READABILITY_WEIGHT * (1.0 - (grade - 8.0) / 8.0);
            }
        }

        let final_score = if active_weight > 0.0 {
            ((score / active_weight * 100.0) * 10.0).round() / 10.0
        } else {
            100.0
        };
        let final_score = final_score.clamp(0.0, 100.0);

        AnalyzerResult::new(
            ANALYZER_ID,
            ANALYZER_NAME,
            MetricCategory::AccessibilityScore,
            vec![Metric::new(
                "accessibility_score",
                "Overall Accessibility Score",
                final_score,
                MetricCategory::AccessibilityScore,
            )
            .with_unit("/ 100")
            .with_range(0.0, 100.0)
            .with_interpretation("Composite score across all checks and readability")],
        )
    }
}
