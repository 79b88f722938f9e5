//! Writing quality analyzer - passive voice and sentence complexity.

use std::sync::LazyLock;

use regex::Regex;

use a11ylint_core::{
    Analyzer, AnalyzerResult, Document, ElementType, Metric, MetricCategory, NodeId,
};

/// Analyzer id for writing-quality.
pub const ANALYZER_ID: &str = "writing-quality";

/// Analyzer name for writing-quality.
pub const ANALYZER_NAME: &str = "Writing Quality";

static PASSIVE_REGULAR: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"(?i)\b(?:am|is|are|was|were|been|being|be)\b\s+\w+ed\b").unwrap()
});

static PASSIVE_IRREGULAR: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(concat!(
        r"(?i)\b(?:am|is|are|was|were|been|being|be)\b\s+",
        r"(?:made|done|given|taken|seen|known|found|told|shown|written|built|",
        r"held|kept|brought|bought|taught|thought|caught|sent|left|run|set|",
        r"put|cut|read|paid|said|lost|spent|grown|drawn|broken|chosen|",
        r"driven|eaten|fallen|forgotten|frozen|gotten|hidden|ridden|risen|",
        r"shaken|spoken|stolen|sworn|torn|woken|worn)\b",
    ))
    .unwrap()
});

static CLAUSE_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"(?i)\b(?:which|that|because|although|while|whereas|if|when|where|who|whom)\b")
        .unwrap()
});

static SENTENCE_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"[.!?]\s+").unwrap()
});

/// Words per sentence before it counts as complex.
const COMPLEX_WORD_THRESHOLD: usize = 25;

fn is_passive(sentence: &str) -> bool {
    PASSIVE_REGULAR.is_match(sentence) || PASSIVE_IRREGULAR.is_match(sentence)
}

fn is_complex(sentence: &str) -> bool {
    if sentence.split_whitespace().count() >= COMPLEX_WORD_THRESHOLD {
        return true;
    }
    CLAUSE_MARKERS.find_iter(sentence).count() >= 3
}

/// Accumulates sentences and scores passive/complex percentages.
#[derive(Default)]
pub struct WritingQualityAnalyzer {
    sentences: Vec<String>,
}

impl WritingQualityAnalyzer {
    /// Creates the analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

impl Analyzer for WritingQualityAnalyzer {
    fn analyzer_id(&self) -> &'static str {
        ANALYZER_ID
    }

    fn analyzer_name(&self) -> &'static str {
        ANALYZER_NAME
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::WritingQuality
    }

    fn element_types(&self) -> &'static [ElementType] {
        &[ElementType::Para, ElementType::Plain]
    }

    fn analyze(&mut self, doc: &Document, node: NodeId) {
        let text = doc.stringify(node).trim().to_string();
        if text.is_empty() {
            return;
        }
        for sentence in SENTENCE_SPLIT.split(&text) {
            let sentence = sentence.trim();
            if !sentence.is_empty() {
                self.sentences.push(sentence.to_string());
            }
        }
    }

    fn finalize(&mut self, _doc: &Document) -> AnalyzerResult {
        let category = MetricCategory::WritingQuality;
        let total = self.sentences.len();
        if total == 0 {
            return AnalyzerResult::new(ANALYZER_ID, ANALYZER_NAME, category, vec![]);
        }

        let passive_count = self.sentences.iter().filter(|s| is_passive(s)).count();
        let complex_count = self.sentences.iter().filter(|s| is_complex(s)).count();

        let metrics = vec![
            Metric::new(
                "passive_voice_pct",
                "Passive Voice",
                round1(passive_count as f64 / total as f64 * 100.0),
                category,
            )
            .with_unit("%")
            .with_range(0.0, 100.0)
            .with_interpretation("Below 10% is ideal for accessibility"),
            Metric::new(
                "complex_sentence_pct",
                "Complex Sentences",
                round1(complex_count as f64 / total as f64 * 100.0),
                category,
            )
            .with_unit("%")
            .with_range(0.0, 100.0)
            .with_interpretation("Sentences with 3+ clauses or 25+ words"),
            Metric::new("sentence_count_analyzed", "Sentences Analyzed", total, category)
                .with_unit("sentences"),
        ];
        AnalyzerResult::new(ANALYZER_ID, ANALYZER_NAME, category, metrics)
    }
}
