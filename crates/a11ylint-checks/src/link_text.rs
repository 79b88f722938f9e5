//! Link text quality check - WCAG SC 2.4.4.
//!
//! Classifies each link by the first matching rule: no text, too short,
//! generic phrase, bare URL, duplicate text pointing at a different URL.
//! Fix mode sends all fixable links to the external generator in a single
//! batch and applies replacements positionally.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::warn;

use a11ylint_core::{
    Check, CheckResult, Document, ElementKind, ElementType, Issue, IssueList, LinkRewrite,
    LinkTextGenerator, NodeId, Severity,
};

/// Check code for link-text.
pub const CHECK_ID: &str = "link-text";

/// Check name for link-text.
pub const CHECK_NAME: &str = "Link Text Quality";

/// WCAG success criterion for link-text.
pub const WCAG_SC: &str = "2.4.4";

/// Generic phrases that say nothing about the link target.
const GENERIC_LINK_TEXT: [&str; 10] = [
    "click here",
    "here",
    "this link",
    "this",
    "link",
    "more",
    "read more",
    "learn more",
    "details",
    "info",
];

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"^https?://\S+$").unwrap()
});

/// Flags unhelpful link text and rewrites it via the external generator.
pub struct LinkTextCheck {
    issues: IssueList,
    generator: Option<Arc<dyn LinkTextGenerator>>,
    fixable: Vec<(NodeId, &'static str, usize)>,
    seen_texts: HashMap<String, String>,
}

impl LinkTextCheck {
    /// Creates the check; without a generator, fix mode leaves issues
    /// unfixed.
    #[must_use]
    pub fn new(generator: Option<Arc<dyn LinkTextGenerator>>) -> Self {
        Self {
            issues: IssueList::new(),
            generator,
            fixable: Vec::new(),
            seen_texts: HashMap::new(),
        }
    }

    fn push_issue(&mut self, severity: Severity, message: String, location: String) -> usize {
        self.issues
            .push(Issue::new(CHECK_ID, WCAG_SC, severity, message, location))
    }

    fn fix_links(&mut self, doc: &mut Document) {
        let Some(generator) = self.generator.clone() else {
            return;
        };

        let batch: Vec<LinkRewrite> = self
            .fixable
            .iter()
            .map(|&(node, reason, _)| LinkRewrite {
                url: link_url(doc, node),
                current_text: doc.stringify(node).trim().to_string(),
                reason,
                context: surrounding_text(doc, node, 200),
            })
            .collect();

        if batch.is_empty() {
            return;
        }

        let replacements = match generator.rewrite(&batch) {
            Ok(replacements) => replacements,
            Err(e) => {
                warn!(error = %e, "link text generation failed; leaving links unfixed");
                return;
            }
        };

        for (i, (node, _, issue_idx)) in self.fixable.iter().enumerate() {
            let Some(new_text) = replacements.get(i) else {
                break;
            };
            let text_node = doc.alloc_str(new_text.clone());
            doc.set_children(*node, vec![text_node]);
            self.issues
                .mark_fixed(*issue_idx, format!("Replaced with: '{new_text}'"));
        }
    }
}

impl Check for LinkTextCheck {
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
        &[ElementType::Link]
    }

    fn check(&mut self, doc: &Document, node: NodeId) {
        let link_text = doc.stringify(node).trim().to_string();
        let url = link_url(doc, node);

        if link_text.is_empty() {
            let truncated: String = url.chars().take(60).collect();
            let idx = self.push_issue(
                Severity::Error,
                format!("Link has no text: {url}"),
                format!("Link: {truncated}"),
            );
            self.fixable.push((node, "empty", idx));
            return;
        }

        if link_text.chars().count() <= 2 {
            let idx = self.push_issue(
                Severity::Warning,
                format!("Link text too short: '{link_text}' -> {url}"),
                format!("Link: '{link_text}'"),
            );
            self.fixable.push((node, "short", idx));
            return;
        }

        let normalized = link_text
            .to_lowercase()
            .trim_matches(|c| c == '.' || c == '!')
            .to_string();
        if GENERIC_LINK_TEXT.contains(&normalized.as_str()) {
            let idx = self.push_issue(
                Severity::Error,
                format!("Generic link text: '{link_text}' -> {url}"),
                format!("Link: '{link_text}'"),
            );
            self.fixable.push((node, "generic", idx));
            return;
        }

        if URL_PATTERN.is_match(&link_text) {
            let head: String = link_text.chars().take(60).collect();
            let loc: String = link_text.chars().take(40).collect();
            let idx = self.push_issue(
                Severity::Error,
                format!("Bare URL as link text: {head}"),
                format!("Link: {loc}"),
            );
            self.fixable.push((node, "bare_url", idx));
            return;
        }

        let text_lower = link_text.to_lowercase();
        if let Some(prev_url) = self.seen_texts.get(&text_lower) {
            if *prev_url != url {
                self.push_issue(
                    Severity::Warning,
                    format!(
                        "Duplicate link text '{link_text}' points to different URLs: \
                         {prev_url} and {url}"
                    ),
                    format!("Link: '{link_text}'"),
                );
            }
        } else {
            self.seen_texts.insert(text_lower, url);
        }
    }

    fn finalize(&mut self, doc: &mut Document, fix: bool) -> CheckResult {
        if fix && !self.fixable.is_empty() {
            self.fix_links(doc);
        }
        std::mem::take(&mut self.issues).into_result(CHECK_ID, CHECK_NAME)
    }
}

fn link_url(doc: &Document, node: NodeId) -> String {
    match doc.kind(node) {
        ElementKind::Link { url, .. } => url.clone(),
        _ => String::new(),
    }
}

/// Concatenates the plain text of the link's siblings for generator context.
fn surrounding_text(doc: &Document, node: NodeId, chars: usize) -> String {
    let Some(parent) = doc.parent(node) else {
        return String::new();
    };
    let mut parts = String::new();
    for child in doc.children(parent) {
        match doc.kind(*child) {
            ElementKind::Str(text) => parts.push_str(text),
            ElementKind::Space => parts.push(' '),
            _ => {}
        }
    }
    parts.chars().take(chars).collect()
}
