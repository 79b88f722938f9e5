//! Analytics registry - instantiates and filters the active analyzers.

use std::sync::Arc;

use tracing::debug;

use a11ylint_core::AnalyzerBox;

use crate::{
    content_structure, readability, text_statistics, writing_quality, ContentStructureAnalyzer,
    ReadabilityAnalyzer, ReadabilityScorer, TextStatisticsAnalyzer, WritingQualityAnalyzer,
};

/// Ids of every built-in analyzer, in registration order.
pub const ALL_ANALYZER_IDS: [&str; 4] = [
    text_statistics::ANALYZER_ID,
    readability::ANALYZER_ID,
    writing_quality::ANALYZER_ID,
    content_structure::ANALYZER_ID,
];

/// Instantiates the active analyzers.
///
/// `enabled` is an optional allow-list; `disabled` a deny-list applied
/// afterwards (deny wins). The readability scorer seam is handed to the
/// readability analyzer when configured.
#[must_use]
pub fn enabled_analyzers(
    scorer: Option<Arc<dyn ReadabilityScorer>>,
    enabled: Option<&[String]>,
    disabled: &[String],
) -> Vec<AnalyzerBox> {
    let active = |id: &str| {
        let allowed = enabled.map_or(true, |list| list.iter().any(|e| e == id));
        let denied = disabled.iter().any(|d| d == id);
        if !allowed || denied {
            debug!(analyzer_id = id, "skipping disabled analyzer");
        }
        allowed && !denied
    };

    let mut analyzers: Vec<AnalyzerBox> = Vec::new();
    if active(text_statistics::ANALYZER_ID) {
        analyzers.push(Box::new(TextStatisticsAnalyzer::new()));
    }
    if active(readability::ANALYZER_ID) {
        analyzers.push(Box::new(ReadabilityAnalyzer::new(scorer)));
    }
    if active(writing_quality::ANALYZER_ID) {
        analyzers.push(Box::new(WritingQualityAnalyzer::new()));
    }
    if active(content_structure::ANALYZER_ID) {
        analyzers.push(Box::new(ContentStructureAnalyzer::new()));
    }

    analyzers
}
