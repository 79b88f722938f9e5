//! Core types for accessibility issues and check results.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};

/// Severity level for accessibility issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory finding that should be reviewed.
    Warning,
    /// Failure against a WCAG success criterion.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single accessibility issue found in a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Id of the check that produced this issue (e.g. "link-text").
    pub check_id: String,
    /// WCAG success criterion tag (e.g. "2.4.4").
    pub wcag_sc: String,
    /// Severity of this issue.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Free-text locator; stable for the lifetime of a run so a fix pass
    /// can re-identify the issue it repairs.
    pub location: String,
    /// Whether a fix was applied. Monotonic: set once, never cleared.
    pub fixed: bool,
    /// Description of the applied fix, empty when unfixed.
    pub fix_description: String,
}

impl Issue {
    /// Creates a new unfixed issue.
    #[must_use]
    pub fn new(
        check_id: impl Into<String>,
        wcag_sc: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            check_id: check_id.into(),
            wcag_sc: wcag_sc.into(),
            severity,
            message: message.into(),
            location: location.into(),
            fixed: false,
            fix_description: String::new(),
        }
    }

    /// Marks the issue as fixed with a description of the repair.
    pub fn mark_fixed(&mut self, description: impl Into<String>) {
        self.fixed = true;
        self.fix_description = description.into();
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.severity, self.message, self.location
        )?;
        if self.fixed {
            write!(f, " [FIXED]")?;
        }
        Ok(())
    }
}

/// Aggregated result from a single checker run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Stable check identifier.
    pub check_id: String,
    /// Human-readable check name.
    pub check_name: String,
    /// Issues in the order they were reported.
    pub issues: Vec<Issue>,
}

impl CheckResult {
    /// Creates a result with no issues.
    #[must_use]
    pub fn new(check_id: impl Into<String>, check_name: impl Into<String>) -> Self {
        Self {
            check_id: check_id.into(),
            check_name: check_name.into(),
            issues: Vec::new(),
        }
    }

    /// Number of error-severity issues. Computed, never stored.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Number of issues marked fixed. Computed, never stored.
    #[must_use]
    pub fn fixed_count(&self) -> usize {
        self.issues.iter().filter(|i| i.fixed).count()
    }
}

/// Issue accumulator shared by all checkers.
///
/// Checkers push issues during the walk and re-address them by index
/// during finalize, so fix bookkeeping never depends on message matching.
#[derive(Debug, Default)]
pub struct IssueList {
    issues: Vec<Issue>,
}

impl IssueList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an issue and returns its index.
    pub fn push(&mut self, issue: Issue) -> usize {
        self.issues.push(issue);
        self.issues.len() - 1
    }

    /// Marks the issue at `index` fixed.
    pub fn mark_fixed(&mut self, index: usize, description: impl Into<String>) {
        if let Some(issue) = self.issues.get_mut(index) {
            issue.mark_fixed(description);
        }
    }

    /// Returns the accumulated issues.
    #[must_use]
    pub fn as_slice(&self) -> &[Issue] {
        &self.issues
    }

    /// Returns mutable access to the accumulated issues.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Issue> {
        self.issues.iter_mut()
    }

    /// Number of accumulated issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether no issues were accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Drains the list into a [`CheckResult`].
    #[must_use]
    pub fn into_result(self, check_id: &str, check_name: &str) -> CheckResult {
        CheckResult {
            check_id: check_id.to_string(),
            check_name: check_name.to_string(),
            issues: self.issues,
        }
    }
}

/// Converts an [`Issue`] to a miette diagnostic for rich display.
#[allow(dead_code)] // Public API for miette integration
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct IssueDiagnostic {
    message: String,
    code: String,
    severity: Severity,
    help: Option<String>,
}

impl Diagnostic for IssueDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(format!("WCAG {}", self.code)))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h.clone()) as Box<dyn std::fmt::Display>)
    }
}

impl From<&Issue> for IssueDiagnostic {
    fn from(issue: &Issue) -> Self {
        Self {
            message: format!("{} ({})", issue.message, issue.location),
            code: issue.wcag_sc.clone(),
            severity: issue.severity,
            help: if issue.fix_description.is_empty() {
                None
            } else {
                Some(issue.fix_description.clone())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_issue(severity: Severity) -> Issue {
        Issue::new(
            "link-text",
            "2.4.4",
            severity,
            "Generic link text: 'click here'",
            "Link: 'click here'",
        )
    }

    #[test]
    fn counts_are_computed() {
        let mut result = CheckResult::new("link-text", "Link Text Quality");
        result.issues.push(make_issue(Severity::Error));
        result.issues.push(make_issue(Severity::Warning));
        let mut fixed = make_issue(Severity::Error);
        fixed.mark_fixed("Replaced with: 'Annual report'");
        result.issues.push(fixed);

        assert_eq!(result.error_count(), 2);
        assert_eq!(result.fixed_count(), 1);
    }

    #[test]
    fn mark_fixed_sets_description() {
        let mut issue = make_issue(Severity::Error);
        assert!(!issue.fixed);
        issue.mark_fixed("Replaced");
        assert!(issue.fixed);
        assert_eq!(issue.fix_description, "Replaced");
    }

    #[test]
    fn issue_list_addresses_by_index() {
        let mut list = IssueList::new();
        let first = list.push(make_issue(Severity::Error));
        let second = list.push(make_issue(Severity::Warning));
        list.mark_fixed(second, "done");

        let result = list.into_result("link-text", "Link Text Quality");
        assert!(!result.issues[first].fixed);
        assert!(result.issues[1].fixed);
        assert_eq!(result.fixed_count(), 1);
    }

    #[test]
    fn display_includes_fixed_marker() {
        let mut issue = make_issue(Severity::Error);
        issue.mark_fixed("Replaced");
        let rendered = format!("{issue}");
        assert!(rendered.contains("[FIXED]"));
        assert!(rendered.starts_with("error:"));
    }

    #[test]
    fn diagnostic_carries_wcag_code() {
        use miette::Diagnostic as _;
        let issue = make_issue(Severity::Warning);
        let diag = IssueDiagnostic::from(&issue);
        assert_eq!(diag.code().map(|c| c.to_string()), Some("WCAG 2.4.4".into()));
        assert_eq!(diag.severity(), Some(miette::Severity::Warning));
        assert!(diag.help().is_none());
    }
}
