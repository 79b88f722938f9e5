//! List structure check - WCAG SC 1.3.1.
//!
//! Detects runs of consecutive paragraphs hand-written as list items
//! (bullet glyphs or `1.`/`1)` markers) and converts each run into a real
//! list element in fix mode. Isolated matches are left alone.

use std::sync::LazyLock;

use regex::Regex;

use a11ylint_core::{
    Check, CheckResult, Document, ElementKind, ElementType, Issue, IssueList, NodeId, Severity,
};

/// Check code for list-structure.
pub const CHECK_ID: &str = "list-structure";

/// Check name for list-structure.
pub const CHECK_NAME: &str = "List Structure";

/// WCAG success criterion for list-structure.
pub const WCAG_SC: &str = "1.3.1";

static BULLET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"^[\u{2022}\u{2023}\u{25E6}\u{2043}\u{2219}\u{25CF}\u{25CB}]\s+").unwrap()
});
static ORDERED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"^(\d+)[.)]\s+").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerType {
    Bullet,
    Ordered,
}

#[derive(Debug, Clone)]
struct Candidate {
    node: NodeId,
    marker: MarkerType,
    stripped: String,
}

/// Flags paragraph runs that fake a list and rebuilds them as real lists.
#[derive(Default)]
pub struct ListStructureCheck {
    issues: IssueList,
    candidates: Vec<Candidate>,
}

impl ListStructureCheck {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups candidates into runs of 2+ consecutive same-type adjacent
    /// siblings. Anything else is ignored.
    fn consecutive_groups(&self, doc: &Document) -> Vec<Vec<Candidate>> {
        let mut groups: Vec<Vec<Candidate>> = Vec::new();
        let Some(first) = self.candidates.first() else {
            return groups;
        };
        let mut current: Vec<Candidate> = vec![first.clone()];

        for window in self.candidates.windows(2) {
            let (prev, curr) = (&window[0], &window[1]);
            if curr.marker == prev.marker
                && doc.parent(prev.node) == doc.parent(curr.node)
                && doc.parent(prev.node).is_some()
                && are_adjacent(doc, prev.node, curr.node)
            {
                current.push(curr.clone());
            } else {
                if current.len() >= 2 {
                    groups.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
                current.push(curr.clone());
            }
        }
        if current.len() >= 2 {
            groups.push(current);
        }

        groups
    }

    /// Replaces a run of paragraphs with one real list element, returning
    /// the fix description on success.
    fn convert_to_list(doc: &mut Document, group: &[Candidate]) -> Option<String> {
        let list_kind = match group[0].marker {
            MarkerType::Bullet => ElementKind::BulletList,
            MarkerType::Ordered => ElementKind::OrderedList,
        };
        let list_node = doc.alloc(list_kind);
        for candidate in group {
            let item = doc.alloc(ElementKind::ListItem);
            let plain = doc.alloc(ElementKind::Plain);
            let text = doc.alloc_str(candidate.stripped.clone());
            doc.append_child(plain, text);
            doc.append_child(item, plain);
            doc.append_child(list_node, item);
        }

        let (parent, first_idx) = doc.index_in_parent(group[0].node)?;
        doc.replace_child_at(parent, first_idx, list_node);

        // Remove the remaining paragraphs back-to-front so indices hold.
        let mut indices: Vec<usize> = group[1..]
            .iter()
            .filter_map(|c| doc.index_in_parent(c.node).map(|(_, i)| i))
            .collect();
        indices.sort_unstable();
        for idx in indices.into_iter().rev() {
            doc.remove_child_at(parent, idx);
        }

        let kind_name = match group[0].marker {
            MarkerType::Bullet => "BulletList",
            MarkerType::Ordered => "OrderedList",
        };
        Some(format!(
            "Converted {} paragraphs to {kind_name}",
            group.len()
        ))
    }
}

impl Check for ListStructureCheck {
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
        &[ElementType::Para]
    }

    fn check(&mut self, doc: &Document, node: NodeId) {
        let text = doc.stringify(node).trim().to_string();

        if let Some(m) = BULLET_PATTERN.find(&text) {
            self.candidates.push(Candidate {
                node,
                marker: MarkerType::Bullet,
                stripped: text[m.end()..].to_string(),
            });
        } else if let Some(m) = ORDERED_PATTERN.find(&text) {
            self.candidates.push(Candidate {
                node,
                marker: MarkerType::Ordered,
                stripped: text[m.end()..].to_string(),
            });
        }
    }

    fn finalize(&mut self, doc: &mut Document, fix: bool) -> CheckResult {
        let groups = self.consecutive_groups(doc);

        for group in groups {
            let kind = match group[0].marker {
                MarkerType::Bullet => "bulleted",
                MarkerType::Ordered => "numbered",
            };
            let preview: String = group[0].stripped.chars().take(40).collect();
            let idx = self.issues.push(Issue::new(
                CHECK_ID,
                WCAG_SC,
                Severity::Warning,
                format!(
                    "{} consecutive paragraphs look like a {kind} list \
                     (starting with '{preview}...')",
                    group.len()
                ),
                "Para sequence",
            ));
            if fix {
                if let Some(desc) = Self::convert_to_list(doc, &group) {
                    self.issues.mark_fixed(idx, desc);
                }
            }
        }

        std::mem::take(&mut self.issues).into_result(CHECK_ID, CHECK_NAME)
    }
}

/// True when `b` immediately follows `a` in their shared parent.
fn are_adjacent(doc: &Document, a: NodeId, b: NodeId) -> bool {
    match (doc.index_in_parent(a), doc.index_in_parent(b)) {
        (Some((pa, ia)), Some((pb, ib))) => pa == pb && ib == ia + 1,
        _ => false,
    }
}
