//! Text statistics analyzer - word counts, sentences, vocabulary diversity.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use a11ylint_core::{
    Analyzer, AnalyzerResult, Document, ElementKind, ElementType, Metric, MetricCategory, NodeId,
};

/// Analyzer id for text-statistics.
pub const ANALYZER_ID: &str = "text-statistics";

/// Analyzer name for text-statistics.
pub const ANALYZER_NAME: &str = "Text Statistics";

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"\b\w+\b").unwrap()
});
static SENTENCE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"[.!?]+").unwrap()
});

/// Accumulates word/sentence/paragraph statistics over the walk.
#[derive(Default)]
pub struct TextStatisticsAnalyzer {
    paragraphs: Vec<String>,
    all_words: Vec<String>,
}

impl TextStatisticsAnalyzer {
    /// Creates the analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Analyzer for TextStatisticsAnalyzer {
    fn analyzer_id(&self) -> &'static str {
        ANALYZER_ID
    }

    fn analyzer_name(&self) -> &'static str {
        ANALYZER_NAME
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::TextStatistics
    }

    fn element_types(&self) -> &'static [ElementType] {
        &[ElementType::Para, ElementType::Plain, ElementType::Header]
    }

    fn analyze(&mut self, doc: &Document, node: NodeId) {
        let text = doc.stringify(node).trim().to_string();
        if text.is_empty() {
            return;
        }
        if matches!(doc.kind(node), ElementKind::Para | ElementKind::Plain) {
            self.paragraphs.push(text.clone());
        }
        let lowered = text.to_lowercase();
        self.all_words
            .extend(WORD_PATTERN.find_iter(&lowered).map(|m| m.as_str().to_string()));
    }

    fn finalize(&mut self, _doc: &Document) -> AnalyzerResult {
        let word_count = self.all_words.len();
        let unique_words: HashSet<&str> = self.all_words.iter().map(String::as_str).collect();
        let ttr = if word_count > 0 {
            ((unique_words.len() as f64 / word_count as f64) * 1000.0).round() / 1000.0
        } else {
            0.0
        };

        let full_text = self.paragraphs.join(" ");
        let sentence_count = if full_text.is_empty() {
            0
        } else {
            SENTENCE_BOUNDARY.find_iter(&full_text).count().max(1)
        };

        let avg_sentence_len = if sentence_count > 0 {
            ((word_count as f64 / sentence_count as f64) * 10.0).round() / 10.0
        } else {
            0.0
        };

        let category = MetricCategory::TextStatistics;
        let metrics = vec![
            Metric::new("word_count", "Word Count", word_count, category).with_unit("words"),
            Metric::new("sentence_count", "Sentence Count", sentence_count, category)
                .with_unit("sentences"),
            Metric::new(
                "paragraph_count",
                "Paragraph Count",
                self.paragraphs.len(),
                category,
            )
            .with_unit("paragraphs"),
            Metric::new(
                "avg_sentence_length",
                "Avg Sentence Length",
                avg_sentence_len,
                category,
            )
            .with_unit("words/sentence")
            .with_interpretation("15-20 words is considered ideal for readability"),
            Metric::new("vocabulary_diversity", "Vocabulary Diversity (TTR)", ttr, category)
                .with_unit("ratio")
                .with_range(0.0, 1.0)
                .with_interpretation("Type-token ratio. Higher = more diverse vocabulary"),
        ];
        AnalyzerResult::new(ANALYZER_ID, ANALYZER_NAME, category, metrics)
    }
}
