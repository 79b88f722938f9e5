//! Image alt-text check - WCAG SC 1.1.1, 1.4.5.
//!
//! Flags images without alt content (or every image when overwriting) and
//! delegates classify-and-describe to the external vision generator. The
//! returned classification drives the repair: decorative images get empty
//! alt plus a presentational role, complex images additionally get a long
//! description inserted after their containing block, everything else gets
//! plain alt text.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use a11ylint_core::{
    AltTextGenerator, AltTextRequest, Check, CheckResult, Document, ElementKind, ElementType,
    ImageClassification, Issue, IssueList, NodeId, Severity,
};

/// Check code for image-alt-text.
pub const CHECK_ID: &str = "image-alt-text";

/// Check name for image-alt-text.
pub const CHECK_NAME: &str = "Image Alt Text";

/// WCAG success criterion for image-alt-text.
pub const WCAG_SC: &str = "1.1.1";

/// Class attached to inserted long-description blocks.
pub const LONG_DESC_CLASS: &str = "a11ylint-long-desc";

/// Flags images lacking alt text and repairs them via the vision generator.
pub struct ImageAltTextCheck {
    issues: IssueList,
    generator: Option<Arc<dyn AltTextGenerator>>,
    base_dir: PathBuf,
    overwrite: bool,
    pending: Vec<(NodeId, usize)>,
    pending_long_desc: Vec<(NodeId, String)>,
}

impl ImageAltTextCheck {
    /// Creates the check.
    #[must_use]
    pub fn new(generator: Option<Arc<dyn AltTextGenerator>>, base_dir: PathBuf) -> Self {
        Self {
            issues: IssueList::new(),
            generator,
            base_dir,
            overwrite: false,
            pending: Vec::new(),
            pending_long_desc: Vec::new(),
        }
    }

    /// Regenerate alt text even for images that already carry it.
    #[must_use]
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    fn fix_image(&mut self, doc: &mut Document, node: NodeId, issue_idx: usize) {
        let Some(generator) = self.generator.clone() else {
            return;
        };
        let url = image_url(doc, node);
        let (is_functional, link_target) = enclosing_link(doc, node);
        let request = AltTextRequest {
            url: url.clone(),
            base_dir: self.base_dir.clone(),
            context: surrounding_context(doc, node, 300),
            is_functional,
            link_target,
        };

        let outcome = match generator.generate(&request) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(image = %url, error = %e, "could not process image");
                return;
            }
        };

        match outcome.classification {
            ImageClassification::Decorative => {
                doc.set_children(node, Vec::new());
                if let ElementKind::Image { title, attrs, .. } = doc.kind_mut(node) {
                    title.clear();
                    attrs.insert("role".to_string(), "presentation".to_string());
                }
                self.issues
                    .mark_fixed(issue_idx, "Marked as decorative (alt='')");
            }
            _ => {
                let alt = doc.alloc_str(outcome.alt_text.clone());
                doc.set_children(node, vec![alt]);
                let preview: String = outcome.alt_text.chars().take(60).collect();
                self.issues
                    .mark_fixed(issue_idx, format!("Set alt text: {preview}"));
            }
        }

        if let Some(desc) = outcome.long_description {
            self.pending_long_desc.push((node, desc));
        }
    }

    /// Inserts queued long descriptions as sibling blocks after the
    /// containing Para/Plain. Detached or oddly-placed images are skipped.
    fn insert_long_descriptions(&mut self, doc: &mut Document) {
        for (image, desc) in std::mem::take(&mut self.pending_long_desc) {
            let Some(block) = containing_block(doc, image) else {
                continue;
            };
            let Some((grandparent, idx)) = doc.index_in_parent(block) else {
                continue;
            };

            let div = doc.alloc(ElementKind::Div {
                classes: vec![LONG_DESC_CLASS.to_string()],
                attrs: [("role".to_string(), "note".to_string())].into(),
            });
            let para = doc.alloc(ElementKind::Para);
            let strong = doc.alloc(ElementKind::Strong);
            let label = doc.alloc_str("Image description: ");
            doc.append_child(strong, label);
            let text = doc.alloc_str(desc);
            doc.append_child(para, strong);
            doc.append_child(para, text);
            doc.append_child(div, para);
            doc.insert_child_at(grandparent, idx + 1, div);
        }
    }
}

impl Check for ImageAltTextCheck {
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
        &[ElementType::Image]
    }

    fn check(&mut self, doc: &Document, node: NodeId) {
        let has_alt = !doc.stringify(node).trim().is_empty();
        if has_alt && !self.overwrite {
            return;
        }

        let src = image_url(doc, node);
        if src.is_empty() {
            return;
        }

        let idx = self.issues.push(Issue::new(
            CHECK_ID,
            WCAG_SC,
            Severity::Error,
            format!("Image '{src}' missing alt text"),
            format!("Image: {src}"),
        ));
        self.pending.push((node, idx));
    }

    fn finalize(&mut self, doc: &mut Document, fix: bool) -> CheckResult {
        if fix {
            for (node, issue_idx) in std::mem::take(&mut self.pending) {
                self.fix_image(doc, node, issue_idx);
            }
            self.insert_long_descriptions(doc);
        }
        std::mem::take(&mut self.issues).into_result(CHECK_ID, CHECK_NAME)
    }
}

fn image_url(doc: &Document, node: NodeId) -> String {
    match doc.kind(node) {
        ElementKind::Image { url, .. } => url.clone(),
        _ => String::new(),
    }
}

/// Walks ancestors for a Link; returns (is_functional, link target).
fn enclosing_link(doc: &Document, node: NodeId) -> (bool, String) {
    let mut current = doc.parent(node);
    while let Some(ancestor) = current {
        if let ElementKind::Link { url, .. } = doc.kind(ancestor) {
            return (true, url.clone());
        }
        current = doc.parent(ancestor);
    }
    (false, String::new())
}

/// Gathers nearby plain text plus the enclosing section heading, if any.
fn surrounding_context(doc: &Document, node: NodeId, chars: usize) -> String {
    let mut parts = String::new();

    if let Some(heading) = enclosing_heading(doc, node) {
        parts.push_str(&format!("[Section: {}] ", doc.stringify(heading)));
    }

    if let Some(parent) = doc.parent(node) {
        for child in doc.children(parent) {
            match doc.kind(*child) {
                ElementKind::Str(text) => parts.push_str(text),
                ElementKind::Space => parts.push(' '),
                _ => {}
            }
        }
    }
    parts.chars().take(chars).collect()
}

fn enclosing_heading(doc: &Document, node: NodeId) -> Option<NodeId> {
    let mut current = doc.parent(node);
    while let Some(ancestor) = current {
        if matches!(doc.kind(ancestor), ElementKind::Header { .. }) {
            return Some(ancestor);
        }
        current = doc.parent(ancestor);
    }
    None
}

/// Nearest Para/Plain ancestor containing the image.
fn containing_block(doc: &Document, node: NodeId) -> Option<NodeId> {
    let mut current = doc.parent(node);
    while let Some(ancestor) = current {
        if matches!(doc.kind(ancestor), ElementKind::Para | ElementKind::Plain) {
            return Some(ancestor);
        }
        current = doc.parent(ancestor);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11ylint_core::{AltTextOutcome, GeneratorError};

    fn image(doc: &mut Document, url: &str, alt: &str) -> NodeId {
        let para = doc.alloc(ElementKind::Para);
        let node = doc.alloc(ElementKind::Image {
            url: url.to_string(),
            title: String::new(),
            attrs: Default::default(),
        });
        if !alt.is_empty() {
            let s = doc.alloc_str(alt);
            doc.append_child(node, s);
        }
        doc.append_child(para, node);
        let root = doc.root();
        doc.append_child(root, para);
        node
    }

    fn run(doc: &mut Document, check: &mut ImageAltTextCheck, fix: bool) -> CheckResult {
        for node in doc.preorder() {
            if doc.kind(node).element_type() == ElementType::Image {
                check.check(doc, node);
            }
        }
        check.finalize(doc, fix)
    }

    fn no_generator() -> ImageAltTextCheck {
        ImageAltTextCheck::new(None, PathBuf::from("."))
    }

    #[test]
    fn missing_alt_is_flagged() {
        let mut doc = Document::new();
        image(&mut doc, "chart.png", "");
        let result = run(&mut doc, &mut no_generator(), false);
        assert_eq!(result.issues.len(), 1);
        assert!(result.issues[0].message.contains("chart.png"));
    }

    #[test]
    fn existing_alt_passes_without_overwrite() {
        let mut doc = Document::new();
        image(&mut doc, "chart.png", "Quarterly revenue chart");
        let result = run(&mut doc, &mut no_generator(), false);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn overwrite_flags_every_image() {
        let mut doc = Document::new();
        image(&mut doc, "chart.png", "Existing alt");
        let mut check = no_generator().overwrite(true);
        let result = run(&mut doc, &mut check, false);
        assert_eq!(result.issues.len(), 1);
    }

    #[test]
    fn urlless_image_is_skipped() {
        let mut doc = Document::new();
        image(&mut doc, "", "");
        let result = run(&mut doc, &mut no_generator(), false);
        assert!(result.issues.is_empty());
    }

    struct StubVision {
        outcome: AltTextOutcome,
        expect_functional: Option<bool>,
    }

    impl AltTextGenerator for StubVision {
        fn generate(&self, request: &AltTextRequest) -> Result<AltTextOutcome, GeneratorError> {
            if let Some(expected) = self.expect_functional {
                assert_eq!(request.is_functional, expected);
            }
            Ok(self.outcome.clone())
        }
    }

    struct FailingVision;

    impl AltTextGenerator for FailingVision {
        fn generate(&self, _request: &AltTextRequest) -> Result<AltTextOutcome, GeneratorError> {
            Err(GeneratorError::Resource {
                resource: "chart.png".to_string(),
                message: "404".to_string(),
            })
        }
    }

    #[test]
    fn informative_image_gets_alt_text() {
        let mut doc = Document::new();
        let node = image(&mut doc, "photo.jpg", "");

        let mut check = ImageAltTextCheck::new(
            Some(Arc::new(StubVision {
                outcome: AltTextOutcome {
                    classification: ImageClassification::Informative,
                    alt_text: "A lighthouse at dusk".to_string(),
                    long_description: None,
                },
                expect_functional: Some(false),
            })),
            PathBuf::from("."),
        );
        let result = run(&mut doc, &mut check, true);

        assert_eq!(doc.stringify(node), "A lighthouse at dusk");
        assert!(result.issues[0].fixed);
        assert!(result.issues[0].fix_description.starts_with("Set alt text:"));
    }

    #[test]
    fn decorative_image_is_emptied_with_role() {
        let mut doc = Document::new();
        let node = image(&mut doc, "divider.png", "");

        let mut check = ImageAltTextCheck::new(
            Some(Arc::new(StubVision {
                outcome: AltTextOutcome {
                    classification: ImageClassification::Decorative,
                    alt_text: String::new(),
                    long_description: None,
                },
                expect_functional: None,
            })),
            PathBuf::from("."),
        );
        let result = run(&mut doc, &mut check, true);

        assert!(doc.children(node).is_empty());
        let ElementKind::Image { attrs, .. } = doc.kind(node) else {
            panic!("image vanished");
        };
        assert_eq!(attrs.get("role").map(String::as_str), Some("presentation"));
        assert_eq!(result.issues[0].fix_description, "Marked as decorative (alt='')");
    }

    #[test]
    fn complex_image_gets_long_description_block() {
        let mut doc = Document::new();
        let node = image(&mut doc, "chart.png", "");

        let mut check = ImageAltTextCheck::new(
            Some(Arc::new(StubVision {
                outcome: AltTextOutcome {
                    classification: ImageClassification::Complex,
                    alt_text: "Bar chart of quarterly revenue".to_string(),
                    long_description: Some("Q1 10, Q2 12, Q3 9, Q4 15.".to_string()),
                },
                expect_functional: None,
            })),
            PathBuf::from("."),
        );
        run(&mut doc, &mut check, true);

        assert_eq!(doc.stringify(node), "Bar chart of quarterly revenue");

        // A note Div follows the image's paragraph.
        let root_children = doc.children(doc.root()).to_vec();
        assert_eq!(root_children.len(), 2);
        let ElementKind::Div { classes, attrs } = doc.kind(root_children[1]) else {
            panic!("long description block missing");
        };
        assert_eq!(classes, &vec![LONG_DESC_CLASS.to_string()]);
        assert_eq!(attrs.get("role").map(String::as_str), Some("note"));
        assert!(doc
            .stringify(root_children[1])
            .contains("Image description:"));
    }

    #[test]
    fn image_inside_link_is_functional() {
        let mut doc = Document::new();
        let para = doc.alloc(ElementKind::Para);
        let link = doc.alloc(ElementKind::Link {
            url: "https://example.com/download".to_string(),
            title: String::new(),
        });
        let img = doc.alloc(ElementKind::Image {
            url: "button.png".to_string(),
            title: String::new(),
            attrs: Default::default(),
        });
        doc.append_child(link, img);
        doc.append_child(para, link);
        let root = doc.root();
        doc.append_child(root, para);

        let (functional, target) = enclosing_link(&doc, img);
        assert!(functional);
        assert_eq!(target, "https://example.com/download");

        let mut check = ImageAltTextCheck::new(
            Some(Arc::new(StubVision {
                outcome: AltTextOutcome {
                    classification: ImageClassification::Functional,
                    alt_text: "Download annual report".to_string(),
                    long_description: None,
                },
                expect_functional: Some(true),
            })),
            PathBuf::from("."),
        );
        let result = run(&mut doc, &mut check, true);
        assert!(result.issues[0].fixed);
    }

    #[test]
    fn generator_failure_continues_run() {
        let mut doc = Document::new();
        image(&mut doc, "a.png", "");
        image(&mut doc, "b.png", "");

        let mut check = ImageAltTextCheck::new(Some(Arc::new(FailingVision)), PathBuf::from("."));
        let result = run(&mut doc, &mut check, true);
        assert_eq!(result.issues.len(), 2);
        assert!(result.issues.iter().all(|i| !i.fixed));
    }
}
