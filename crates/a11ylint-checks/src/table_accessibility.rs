//! Table accessibility check - WCAG SC 1.3.1.
//!
//! Flags tables without a caption and tables whose header region exists
//! but holds no content. Fix mode asks the external caption generator for
//! a one-sentence caption per uncaptioned table.

use std::sync::Arc;

use tracing::warn;

use a11ylint_core::{
    CaptionGenerator, Check, CheckResult, Document, ElementKind, ElementType, Issue, IssueList,
    NodeId, Severity,
};

/// Check code for table-accessibility.
pub const CHECK_ID: &str = "table-accessibility";

/// Check name for table-accessibility.
pub const CHECK_NAME: &str = "Table Accessibility";

/// WCAG success criterion for table-accessibility.
pub const WCAG_SC: &str = "1.3.1";

/// Flags uncaptioned and header-less tables; fixes captions via generator.
pub struct TableAccessibilityCheck {
    issues: IssueList,
    generator: Option<Arc<dyn CaptionGenerator>>,
    needing_caption: Vec<(NodeId, usize)>,
}

impl TableAccessibilityCheck {
    /// Creates the check; without a generator, fix mode leaves captions
    /// unfixed.
    #[must_use]
    pub fn new(generator: Option<Arc<dyn CaptionGenerator>>) -> Self {
        Self {
            issues: IssueList::new(),
            generator,
            needing_caption: Vec::new(),
        }
    }

    fn fix_captions(&mut self, doc: &mut Document) {
        let Some(generator) = self.generator.clone() else {
            return;
        };

        for (table, issue_idx) in &self.needing_caption {
            let table_text: String = doc.stringify(*table).chars().take(500).collect();
            match generator.caption(&table_text) {
                Ok(caption_text) => {
                    let caption_text = caption_text
                        .trim()
                        .trim_matches(|c| c == '"' || c == '\'')
                        .to_string();
                    if let ElementKind::Table { caption, .. } = doc.kind_mut(*table) {
                        *caption = Some(caption_text.clone());
                    }
                    let preview: String = caption_text.chars().take(50).collect();
                    self.issues
                        .mark_fixed(*issue_idx, format!("Added caption: '{preview}'"));
                }
                Err(e) => {
                    warn!(error = %e, "caption generation failed; table left uncaptioned");
                }
            }
        }
    }
}

impl Check for TableAccessibilityCheck {
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
        &[ElementType::Table]
    }

    fn check(&mut self, doc: &Document, node: NodeId) {
        let ElementKind::Table {
            caption, header, ..
        } = doc.kind(node)
        else {
            return;
        };

        let caption_text = caption.as_deref().unwrap_or("").trim();
        if caption_text.is_empty() {
            let idx = self.issues.push(Issue::new(
                CHECK_ID,
                WCAG_SC,
                Severity::Error,
                "Table missing caption",
                "Table",
            ));
            self.needing_caption.push((node, idx));
        }

        if let Some(header_rows) = header {
            let has_content = header_rows
                .iter()
                .any(|row| row.iter().any(|cell| !cell.trim().is_empty()));
            if !has_content {
                self.issues.push(Issue::new(
                    CHECK_ID,
                    WCAG_SC,
                    Severity::Error,
                    "Table has no header row",
                    "Table",
                ));
            }
        }
    }

    fn finalize(&mut self, doc: &mut Document, fix: bool) -> CheckResult {
        if fix && !self.needing_caption.is_empty() {
            self.fix_captions(doc);
        }
        std::mem::take(&mut self.issues).into_result(CHECK_ID, CHECK_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11ylint_core::GeneratorError;

    fn table(
        doc: &mut Document,
        caption: Option<&str>,
        header: Option<Vec<Vec<&str>>>,
    ) -> NodeId {
        let node = doc.alloc(ElementKind::Table {
            caption: caption.map(String::from),
            header: header.map(|rows| {
                rows.into_iter()
                    .map(|row| row.into_iter().map(String::from).collect())
                    .collect()
            }),
            rows: vec![vec!["2024".to_string(), "7".to_string()]],
        });
        let root = doc.root();
        doc.append_child(root, node);
        node
    }

    fn run(doc: &mut Document, check: &mut TableAccessibilityCheck, fix: bool) -> CheckResult {
        for node in doc.preorder() {
            if doc.kind(node).element_type() == ElementType::Table {
                check.check(doc, node);
            }
        }
        check.finalize(doc, fix)
    }

    #[test]
    fn missing_caption_is_flagged() {
        let mut doc = Document::new();
        table(&mut doc, None, Some(vec![vec!["Year", "Count"]]));
        let result = run(&mut doc, &mut TableAccessibilityCheck::new(None), false);
        assert_eq!(result.issues.len(), 1);
        assert!(result.issues[0].message.contains("missing caption"));
    }

    #[test]
    fn whitespace_caption_counts_as_missing() {
        let mut doc = Document::new();
        table(&mut doc, Some("   "), Some(vec![vec!["Year"]]));
        let result = run(&mut doc, &mut TableAccessibilityCheck::new(None), false);
        assert_eq!(result.issues.len(), 1);
    }

    #[test]
    fn empty_header_region_is_flagged_independently() {
        let mut doc = Document::new();
        table(&mut doc, None, Some(vec![vec!["", " "]]));
        let result = run(&mut doc, &mut TableAccessibilityCheck::new(None), false);
        assert_eq!(result.issues.len(), 2);
        assert!(result
            .issues
            .iter()
            .any(|i| i.message.contains("no header row")));
    }

    #[test]
    fn absent_header_region_is_not_flagged() {
        let mut doc = Document::new();
        table(&mut doc, Some("Totals"), None);
        let result = run(&mut doc, &mut TableAccessibilityCheck::new(None), false);
        assert!(result.issues.is_empty());
    }

    struct StubCaptioner;

    impl CaptionGenerator for StubCaptioner {
        fn caption(&self, _table_text: &str) -> Result<String, GeneratorError> {
            Ok("\"Annual totals by year.\"".to_string())
        }
    }

    struct FailingCaptioner;

    impl CaptionGenerator for FailingCaptioner {
        fn caption(&self, _table_text: &str) -> Result<String, GeneratorError> {
            Err(GeneratorError::Call("backend down".to_string()))
        }
    }

    #[test]
    fn fix_attaches_generated_caption() {
        let mut doc = Document::new();
        let node = table(&mut doc, None, Some(vec![vec!["Year"]]));

        let mut check = TableAccessibilityCheck::new(Some(Arc::new(StubCaptioner)));
        let result = run(&mut doc, &mut check, true);

        let ElementKind::Table { caption, .. } = doc.kind(node) else {
            panic!("table vanished");
        };
        assert_eq!(caption.as_deref(), Some("Annual totals by year."));
        assert!(result.issues[0].fixed);
        assert!(result.issues[0]
            .fix_description
            .starts_with("Added caption:"));
    }

    #[test]
    fn generator_failure_leaves_caption_unfixed() {
        let mut doc = Document::new();
        table(&mut doc, None, Some(vec![vec!["Year"]]));

        let mut check = TableAccessibilityCheck::new(Some(Arc::new(FailingCaptioner)));
        let result = run(&mut doc, &mut check, true);
        assert!(!result.issues[0].fixed);
    }
}
