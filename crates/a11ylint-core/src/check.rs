//! Checker trait for defining accessibility checks.

use crate::tree::{Document, ElementType, NodeId};
use crate::types::CheckResult;

/// A stateful accessibility checker.
///
/// A checker instance lives for exactly one document run: it observes
/// elements during the single tree walk via [`Check::check`], then reports
/// (and optionally repairs) in [`Check::finalize`]. Instances are created
/// per run and discarded afterwards.
///
/// # Example
///
/// ```ignore
/// use a11ylint_core::{Check, CheckResult, Document, ElementType, IssueList, NodeId};
///
/// pub struct NoEmptyParas {
///     issues: IssueList,
/// }
///
/// impl Check for NoEmptyParas {
///     fn check_id(&self) -> &'static str { "no-empty-paras" }
///     fn check_name(&self) -> &'static str { "No Empty Paragraphs" }
///     fn wcag_sc(&self) -> &'static str { "1.3.1" }
///     fn element_types(&self) -> &'static [ElementType] { &[ElementType::Para] }
///
///     fn check(&mut self, doc: &Document, node: NodeId) {
///         if doc.stringify(node).trim().is_empty() {
///             // record an issue
///         }
///     }
///
///     fn finalize(&mut self, _doc: &mut Document, _fix: bool) -> CheckResult {
///         std::mem::take(&mut self.issues).into_result(self.check_id(), self.check_name())
///     }
/// }
/// ```
pub trait Check: Send + Sync {
    /// Returns the stable kebab-case identifier (e.g. "heading-hierarchy").
    fn check_id(&self) -> &'static str;

    /// Returns the human-readable check name.
    fn check_name(&self) -> &'static str;

    /// Returns the WCAG success criterion this check maps to (e.g. "1.3.1").
    fn wcag_sc(&self) -> &'static str;

    /// Returns the element variants this checker wants to observe.
    ///
    /// [`ElementType::Doc`] requests a single pre-walk invocation with the
    /// document root instead of per-node dispatch.
    fn element_types(&self) -> &'static [ElementType];

    /// Observes one element during the walk.
    ///
    /// Must not mutate the tree; all repairs are deferred to
    /// [`Check::finalize`] so every handler sees the same walk order.
    fn check(&mut self, doc: &Document, node: NodeId);

    /// Reports accumulated issues and, when `fix` is set, repairs the tree.
    ///
    /// Called exactly once per run, after the walk completes.
    fn finalize(&mut self, doc: &mut Document, fix: bool) -> CheckResult;
}

/// Type alias for boxed [`Check`] trait objects.
pub type CheckBox = Box<dyn Check>;
