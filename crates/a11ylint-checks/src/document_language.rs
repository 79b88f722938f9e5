//! Document language check - WCAG SC 3.1.1.
//!
//! Runs once against the document root (pre-walk). Fix mode detects the
//! dominant language over the first ~1000 characters of content via the
//! external detector, defaulting to "en" when none is configured.

use std::sync::Arc;

use tracing::warn;

use a11ylint_core::{
    Check, CheckResult, Document, ElementType, Issue, IssueList, LanguageDetector, NodeId,
    Severity,
};

/// Check code for document-language.
pub const CHECK_ID: &str = "document-language";

/// Check name for document-language.
pub const CHECK_NAME: &str = "Document Language";

/// WCAG success criterion for document-language.
pub const WCAG_SC: &str = "3.1.1";

/// Metadata key holding the document language tag.
pub const LANG_KEY: &str = "lang";

/// Fallback language code when detection is unavailable.
const DEFAULT_LANG: &str = "en";

/// Flags and repairs a missing document language tag.
pub struct DocumentLanguageCheck {
    issues: IssueList,
    detector: Option<Arc<dyn LanguageDetector>>,
    missing_lang: Option<usize>,
}

impl DocumentLanguageCheck {
    /// Creates the check; without a detector, fix mode writes "en".
    #[must_use]
    pub fn new(detector: Option<Arc<dyn LanguageDetector>>) -> Self {
        Self {
            issues: IssueList::new(),
            detector,
            missing_lang: None,
        }
    }

    fn detect_language(&self, doc: &Document) -> String {
        let sample: String = doc.stringify(doc.root()).chars().take(1000).collect();
        match &self.detector {
            Some(detector) => match detector.detect(&sample) {
                Ok(code) => code,
                Err(e) => {
                    warn!(error = %e, "language detection failed; defaulting to 'en'");
                    DEFAULT_LANG.to_string()
                }
            },
            None => DEFAULT_LANG.to_string(),
        }
    }
}

impl Check for DocumentLanguageCheck {
    fn check_id(&self) -> &'static str {
        CHECK_ID
    }

    fn check_name(&self) -> &'static str {
        CHECK_NAME
    }

    fn wcag_sc(&self) -> &'static str {
        WCAG_SC
    }

    fn element_types(&self) -> &'static [ElementType] {
        &[ElementType::Doc]
    }

    fn check(&mut self, doc: &Document, _node: NodeId) {
        let lang = doc.metadata.get(LANG_KEY).map(String::as_str).unwrap_or("");
        if lang.is_empty() {
            let idx = self.issues.push(Issue::new(
                CHECK_ID,
                WCAG_SC,
                Severity::Error,
                "Document missing 'lang' metadata attribute",
                "Document metadata",
            ));
            self.missing_lang = Some(idx);
        }
    }

    fn finalize(&mut self, doc: &mut Document, fix: bool) -> CheckResult {
        if fix {
            if let Some(issue_idx) = self.missing_lang {
                let detected = self.detect_language(doc);
                doc.metadata.insert(LANG_KEY.to_string(), detected.clone());
                self.issues
                    .mark_fixed(issue_idx, format!("Set lang='{detected}'"));
            }
        }
        std::mem::take(&mut self.issues).into_result(CHECK_ID, CHECK_NAME)
    }
}
