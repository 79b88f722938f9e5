//! Heading hierarchy check - WCAG SC 1.3.1, 2.4.6.
//!
//! Flags missing H1, skipped heading levels, empty headings, and "fake
//! headings" (paragraphs whose only meaningful content is bold/emphasis).
//! Fix mode re-levels skipped headings and promotes fake headings to real
//! ones; re-leveling runs first so promotion reads corrected levels.

use a11ylint_core::{
    Check, CheckResult, Document, ElementKind, ElementType, Issue, IssueList, NodeId, Severity,
};

/// Check code for heading-hierarchy.
pub const CHECK_ID: &str = "heading-hierarchy";

/// Check name for heading-hierarchy.
pub const CHECK_NAME: &str = "Heading Hierarchy";

/// WCAG success criterion for heading-hierarchy.
pub const WCAG_SC: &str = "1.3.1";

/// Flags and repairs broken heading structure.
#[derive(Default)]
pub struct HeadingHierarchyCheck {
    issues: IssueList,
    headers: Vec<(NodeId, u8)>,
    fake_headings: Vec<(NodeId, usize)>,
}

impl HeadingHierarchyCheck {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push_issue(&mut self, severity: Severity, message: String, location: String) -> usize {
        self.issues
            .push(Issue::new(CHECK_ID, WCAG_SC, severity, message, location))
    }

    /// A paragraph is a fake heading when its meaningful inlines (ignoring
    /// spaces and soft breaks) are all Strong/Emph and at least one exists.
    fn is_fake_heading(doc: &Document, para: NodeId) -> bool {
        let mut meaningful = 0;
        for child in doc.children(para) {
            match doc.kind(*child) {
                ElementKind::Space | ElementKind::SoftBreak => {}
                ElementKind::Strong | ElementKind::Emph => meaningful += 1,
                _ => return false,
            }
        }
        meaningful > 0
    }

    /// Replaces a fake-heading paragraph with a real header one level below
    /// the last known heading, unwrapping emphasis into plain inlines.
    fn promote_fake_heading(&mut self, doc: &mut Document, para: NodeId, issue_idx: usize) {
        let last_level = self.headers.last().map(|(_, lvl)| *lvl);
        let new_level = match last_level {
            Some(lvl) => (lvl + 1).min(6),
            None => 2,
        };

        let mut content: Vec<NodeId> = Vec::new();
        for child in doc.children(para).to_vec() {
            match doc.kind(child) {
                ElementKind::Strong | ElementKind::Emph => {
                    content.extend(doc.children(child).to_vec());
                }
                _ => content.push(child),
            }
        }

        let Some((parent, index)) = doc.index_in_parent(para) else {
            return;
        };

        let header = doc.alloc(ElementKind::Header { level: new_level });
        for node in &content {
            doc.detach(*node);
        }
        doc.set_children(header, content);
        doc.replace_child_at(parent, index, header);

        self.headers.push((header, new_level));
        self.issues
            .mark_fixed(issue_idx, format!("Promoted to H{new_level}"));
    }
}

impl Check for HeadingHierarchyCheck {
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
        &[ElementType::Header, ElementType::Para]
    }

    fn check(&mut self, doc: &Document, node: NodeId) {
        match doc.kind(node) {
            ElementKind::Header { level } => {
                let level = *level;
                self.headers.push((node, level));
                if doc.stringify(node).trim().is_empty() {
                    self.push_issue(
                        Severity::Error,
                        "Empty heading".to_string(),
                        format!("H{level}"),
                    );
                }
            }
            ElementKind::Para if Self::is_fake_heading(doc, node) => {
                let preview: String = doc.stringify(node).chars().take(50).collect();
                let idx = self.push_issue(
                    Severity::Warning,
                    format!("Fake heading (bold-only paragraph): '{preview}'"),
                    "Para (bold-only)".to_string(),
                );
                self.fake_headings.push((node, idx));
            }
            _ => {}
        }
    }

    fn finalize(&mut self, doc: &mut Document, fix: bool) -> CheckResult {
        if !self.headers.is_empty() && !self.headers.iter().any(|(_, lvl)| *lvl == 1) {
            self.push_issue(
                Severity::Error,
                "Document has no H1 heading".to_string(),
                "Document".to_string(),
            );
        }

        // (header, expected level, issue index) for every skipped level.
        let mut skip_fixes: Vec<(NodeId, u8, usize)> = Vec::new();
        for i in 1..self.headers.len() {
            let prev_level = self.headers[i - 1].1;
            let (curr_node, curr_level) = self.headers[i];
            if curr_level > prev_level + 1 {
                let expected = prev_level + 1;
                let heading_text: String = doc.stringify(curr_node).chars().take(40).collect();
                let idx = self.push_issue(
                    Severity::Error,
                    format!(
                        "Skipped heading level: H{prev_level} -> H{curr_level} \
                         (expected H{expected})"
                    ),
                    format!("H{curr_level}: '{heading_text}'"),
                );
                skip_fixes.push((curr_node, expected, idx));
            }
        }

        if fix {
            for (node, new_level, issue_idx) in skip_fixes {
                if let ElementKind::Header { level } = doc.kind_mut(node) {
                    *level = new_level;
                }
                // Keep the in-memory level list consistent so fake-heading
                // promotion reads corrected levels.
                if let Some(entry) = self.headers.iter_mut().find(|(n, _)| *n == node) {
                    entry.1 = new_level;
                }
                self.issues
                    .mark_fixed(issue_idx, format!("Re-leveled to H{new_level}"));
            }

            for (para, issue_idx) in std::mem::take(&mut self.fake_headings) {
                self.promote_fake_heading(doc, para, issue_idx);
            }
        }

        std::mem::take(&mut self.issues).into_result(CHECK_ID, CHECK_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(doc: &mut Document, level: u8, text: &str) -> NodeId {
        let node = doc.alloc(ElementKind::Header { level });
        if !text.is_empty() {
            let s = doc.alloc_str(text);
            doc.append_child(node, s);
        }
        let root = doc.root();
        doc.append_child(root, node);
        node
    }

    fn run(doc: &mut Document, fix: bool) -> CheckResult {
        let mut check = HeadingHierarchyCheck::new();
        for node in doc.preorder() {
            if matches!(
                doc.kind(node).element_type(),
                ElementType::Header | ElementType::Para
            ) {
                check.check(doc, node);
            }
        }
        check.finalize(doc, fix)
    }

    #[test]
    fn missing_h1_is_flagged() {
        let mut doc = Document::new();
        header(&mut doc, 2, "Intro");
        header(&mut doc, 3, "Detail");

        let result = run(&mut doc, false);
        assert!(result
            .issues
            .iter()
            .any(|i| i.message.contains("no H1")));
    }

    #[test]
    fn skipped_level_names_expected() {
        let mut doc = Document::new();
        header(&mut doc, 1, "Title");
        header(&mut doc, 3, "Deep");

        let result = run(&mut doc, false);
        let skips: Vec<_> = result
            .issues
            .iter()
            .filter(|i| i.message.contains("Skipped heading level"))
            .collect();
        assert_eq!(skips.len(), 1);
        assert!(skips[0].message.contains("expected H2"));
    }

    #[test]
    fn fix_re_levels_skipped_heading() {
        let mut doc = Document::new();
        header(&mut doc, 1, "Title");
        let deep = header(&mut doc, 3, "Deep");

        let result = run(&mut doc, true);
        assert!(matches!(doc.kind(deep), ElementKind::Header { level: 2 }));
        let skip = result
            .issues
            .iter()
            .find(|i| i.message.contains("Skipped"))
            .unwrap();
        assert!(skip.fixed);
        assert_eq!(skip.fix_description, "Re-leveled to H2");
    }

    #[test]
    fn cascading_skips_are_each_re_leveled() {
        // H1 -> H3 -> H5: both gaps flagged from the scanned levels.
        let mut doc = Document::new();
        header(&mut doc, 1, "Title");
        let a = header(&mut doc, 3, "A");
        let b = header(&mut doc, 5, "B");

        run(&mut doc, true);
        assert!(matches!(doc.kind(a), ElementKind::Header { level: 2 }));
        assert!(matches!(doc.kind(b), ElementKind::Header { level: 4 }));
    }

    #[test]
    fn empty_heading_is_flagged() {
        let mut doc = Document::new();
        header(&mut doc, 1, "Title");
        header(&mut doc, 2, "");

        let result = run(&mut doc, false);
        assert!(result.issues.iter().any(|i| i.message == "Empty heading"));
    }

    #[test]
    fn fake_heading_is_promoted() {
        let mut doc = Document::new();
        header(&mut doc, 1, "Title");

        let para = doc.alloc(ElementKind::Para);
        let strong = doc.alloc(ElementKind::Strong);
        let text = doc.alloc_str("Looks like a heading");
        doc.append_child(strong, text);
        doc.append_child(para, strong);
        let root = doc.root();
        doc.append_child(root, para);

        let result = run(&mut doc, true);
        let fake = result
            .issues
            .iter()
            .find(|i| i.message.contains("Fake heading"))
            .unwrap();
        assert!(fake.fixed);
        assert_eq!(fake.fix_description, "Promoted to H2");

        // The paragraph was replaced by a real header with unwrapped text.
        let root_children = doc.children(doc.root()).to_vec();
        let promoted = root_children[1];
        assert!(matches!(doc.kind(promoted), ElementKind::Header { level: 2 }));
        assert_eq!(doc.stringify(promoted), "Looks like a heading");
        assert!(matches!(
            doc.kind(doc.children(promoted)[0]),
            ElementKind::Str(_)
        ));
    }

    #[test]
    fn fake_heading_defaults_to_h2_without_prior_heading() {
        let mut doc = Document::new();
        let para = doc.alloc(ElementKind::Para);
        let emph = doc.alloc(ElementKind::Emph);
        let text = doc.alloc_str("Standalone");
        doc.append_child(emph, text);
        doc.append_child(para, emph);
        let root = doc.root();
        doc.append_child(root, para);

        run(&mut doc, true);
        let promoted = doc.children(doc.root())[0];
        assert!(matches!(doc.kind(promoted), ElementKind::Header { level: 2 }));
    }

    #[test]
    fn mixed_content_paragraph_is_not_fake() {
        let mut doc = Document::new();
        let para = doc.alloc(ElementKind::Para);
        let strong = doc.alloc(ElementKind::Strong);
        let bold = doc.alloc_str("Bold");
        doc.append_child(strong, bold);
        let plain = doc.alloc_str("and plain");
        doc.append_child(para, strong);
        doc.append_child(para, plain);
        let root = doc.root();
        doc.append_child(root, para);

        let result = run(&mut doc, false);
        assert!(result
            .issues
            .iter()
            .all(|i| !i.message.contains("Fake heading")));
    }
}
