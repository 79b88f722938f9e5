//! Metric types for the document analytics system.

use serde::{Deserialize, Serialize};

/// Categories for organizing analytics metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    /// Readability grade/score metrics.
    Readability,
    /// Raw text statistics.
    TextStatistics,
    /// Writing quality heuristics.
    WritingQuality,
    /// Structural composition of the document.
    ContentStructure,
    /// The composite accessibility score.
    AccessibilityScore,
}

impl MetricCategory {
    /// Returns the snake_case identifier used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Readability => "readability",
            Self::TextStatistics => "text_statistics",
            Self::WritingQuality => "writing_quality",
            Self::ContentStructure => "content_structure",
            Self::AccessibilityScore => "accessibility_score",
        }
    }
}

impl std::fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metric value: integral, floating-point, or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Integral count.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Free-text value (e.g. an unavailability notice).
    Text(String),
}

impl MetricValue {
    /// Returns the numeric value, if any.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<usize> for MetricValue {
    fn from(v: usize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// A single computed metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    /// Programmatic name (e.g. "flesch_kincaid_grade").
    pub name: String,
    /// Human-readable name.
    pub display_name: String,
    /// Computed value.
    pub value: MetricValue,
    /// Unit label, empty when unitless.
    pub unit: String,
    /// Category this metric belongs to.
    pub category: MetricCategory,
    /// Lower bound of the expected range, if meaningful.
    pub range_min: Option<f64>,
    /// Upper bound of the expected range, if meaningful.
    pub range_max: Option<f64>,
    /// How to read the value, empty when self-evident.
    pub interpretation: String,
}

impl Metric {
    /// Creates a metric with no unit, range, or interpretation.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        value: impl Into<MetricValue>,
        category: MetricCategory,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            value: value.into(),
            unit: String::new(),
            category,
            range_min: None,
            range_max: None,
            interpretation: String::new(),
        }
    }

    /// Sets the unit label.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Sets the expected range.
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range_min = Some(min);
        self.range_max = Some(max);
        self
    }

    /// Sets the interpretation hint.
    #[must_use]
    pub fn with_interpretation(mut self, interpretation: impl Into<String>) -> Self {
        self.interpretation = interpretation.into();
        self
    }
}

/// Aggregated result from a single analyzer run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerResult {
    /// Stable analyzer identifier.
    pub analyzer_id: String,
    /// Human-readable analyzer name.
    pub analyzer_name: String,
    /// Category of the produced metrics.
    pub category: MetricCategory,
    /// Metrics in emission order.
    pub metrics: Vec<Metric>,
}

impl AnalyzerResult {
    /// Creates a result with the given metrics.
    #[must_use]
    pub fn new(
        analyzer_id: impl Into<String>,
        analyzer_name: impl Into<String>,
        category: MetricCategory,
        metrics: Vec<Metric>,
    ) -> Self {
        Self {
            analyzer_id: analyzer_id.into(),
            analyzer_name: analyzer_name.into(),
            category,
            metrics,
        }
    }

    /// Looks up a metric by its programmatic name.
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.name == name)
    }
}
