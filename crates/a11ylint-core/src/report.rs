//! Structured report built from check and analyzer results.

use serde::Serialize;

use crate::metrics::{AnalyzerResult, MetricValue};
use crate::types::{CheckResult, Severity};

/// The serializable audit report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Per-check summaries in run order.
    pub checks: Vec<CheckReport>,
    /// Per-analyzer summaries in run order.
    pub analytics: Vec<AnalyticsReport>,
}

/// Report entry for one check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Stable check id.
    pub check_id: String,
    /// Human-readable check name.
    pub check_name: String,
    /// Total issues reported.
    pub issue_count: usize,
    /// Error-severity issues.
    pub error_count: usize,
    /// Issues marked fixed.
    pub fixed_count: usize,
    /// Per-issue detail in report order.
    pub issues: Vec<IssueReport>,
}

/// Report entry for one issue.
#[derive(Debug, Clone, Serialize)]
pub struct IssueReport {
    /// Severity label.
    pub severity: Severity,
    /// Issue message.
    pub message: String,
    /// Free-text locator.
    pub location: String,
    /// WCAG success criterion.
    pub wcag_sc: String,
    /// Whether the issue was fixed.
    pub fixed: bool,
    /// Fix description, empty when unfixed.
    pub fix_description: String,
}

/// Report entry for one analyzer.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    /// Stable analyzer id.
    pub analyzer_id: String,
    /// Human-readable analyzer name.
    pub analyzer_name: String,
    /// Metric category label.
    pub category: String,
    /// Per-metric detail in emission order.
    pub metrics: Vec<MetricReport>,
}

/// Report entry for one metric.
#[derive(Debug, Clone, Serialize)]
pub struct MetricReport {
    /// Programmatic metric name.
    pub name: String,
    /// Display name.
    pub display_name: String,
    /// Metric value.
    pub value: MetricValue,
    /// Unit label.
    pub unit: String,
    /// Interpretation hint.
    pub interpretation: String,
}

impl Report {
    /// Builds the report from run results.
    #[must_use]
    pub fn new(check_results: &[CheckResult], analyzer_results: &[AnalyzerResult]) -> Self {
        Self {
            checks: check_results
                .iter()
                .map(|cr| CheckReport {
                    check_id: cr.check_id.clone(),
                    check_name: cr.check_name.clone(),
                    issue_count: cr.issues.len(),
                    error_count: cr.error_count(),
                    fixed_count: cr.fixed_count(),
                    issues: cr
                        .issues
                        .iter()
                        .map(|i| IssueReport {
                            severity: i.severity,
                            message: i.message.clone(),
                            location: i.location.clone(),
                            wcag_sc: i.wcag_sc.clone(),
                            fixed: i.fixed,
                            fix_description: i.fix_description.clone(),
                        })
                        .collect(),
                })
                .collect(),
            analytics: analyzer_results
                .iter()
                .map(|ar| AnalyticsReport {
                    analyzer_id: ar.analyzer_id.clone(),
                    analyzer_name: ar.analyzer_name.clone(),
                    category: ar.category.as_str().to_string(),
                    metrics: ar
                        .metrics
                        .iter()
                        .map(|m| MetricReport {
                            name: m.name.clone(),
                            display_name: m.display_name.clone(),
                            value: m.value.clone(),
                            unit: m.unit.clone(),
                            interpretation: m.interpretation.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
