//! Analyzer trait for document quality metrics.

use crate::metrics::{AnalyzerResult, MetricCategory};
use crate::tree::{Document, ElementType, NodeId};

/// A stateless-accumulation document analyzer.
///
/// Analyzers mirror the [`crate::Check`] contract but never mutate the
/// tree: they accumulate observations during the walk and emit metrics in
/// [`Analyzer::finalize`]. The engine finalizes analyzers after all checker
/// finalizes, so metrics reflect the post-fix document.
pub trait Analyzer: Send + Sync {
    /// Returns the stable kebab-case identifier (e.g. "text-statistics").
    fn analyzer_id(&self) -> &'static str;

    /// Returns the human-readable analyzer name.
    fn analyzer_name(&self) -> &'static str;

    /// Returns the category of the produced metrics.
    fn category(&self) -> MetricCategory;

    /// Returns the element variants this analyzer wants to observe.
    fn element_types(&self) -> &'static [ElementType];

    /// Observes one element during the walk.
    fn analyze(&mut self, doc: &Document, node: NodeId);

    /// Emits the accumulated metrics. Called exactly once per run.
    fn finalize(&mut self, doc: &Document) -> AnalyzerResult;
}

/// Type alias for boxed [`Analyzer`] trait objects.
pub type AnalyzerBox = Box<dyn Analyzer>;
