//! Checker registry - instantiates and filters the active checks.
//!
//! Registration order here is the finalize order the engine guarantees,
//! so it is part of the repair contract (heading re-leveling precedes the
//! checks that read normalized levels).

use std::path::PathBuf;

use tracing::debug;

use a11ylint_core::{CheckBox, GeneratorSet};

use crate::{
    color_contrast, document_language, heading_hierarchy, image_alt_text, link_text,
    list_structure, table_accessibility, ColorContrastCheck, DocumentLanguageCheck,
    HeadingHierarchyCheck, ImageAltTextCheck, LinkTextCheck, ListStructureCheck,
    TableAccessibilityCheck,
};

/// Ids of every built-in check, in registration order.
pub const ALL_CHECK_IDS: [&str; 7] = [
    image_alt_text::CHECK_ID,
    heading_hierarchy::CHECK_ID,
    link_text::CHECK_ID,
    table_accessibility::CHECK_ID,
    document_language::CHECK_ID,
    list_structure::CHECK_ID,
    color_contrast::CHECK_ID,
];

/// Construction context shared by all checkers.
#[derive(Debug, Clone, Default)]
pub struct CheckerContext {
    /// Directory for resolving relative image paths.
    pub base_dir: PathBuf,
    /// Regenerate alt text even for images that already carry it.
    pub overwrite: bool,
    /// Raw markup for color extraction; empty for non-markup inputs.
    pub raw_markup: String,
    /// The configured external collaborators.
    pub generators: GeneratorSet,
}

/// Instantiates the active checks.
///
/// `enabled` is an optional allow-list of check ids; `disabled` is a
/// deny-list applied afterwards (deny wins). Unknown ids are ignored.
#[must_use]
pub fn enabled_checks(
    ctx: &CheckerContext,
    enabled: Option<&[String]>,
    disabled: &[String],
) -> Vec<CheckBox> {
    let active = |id: &str| {
        let allowed = enabled.map_or(true, |list| list.iter().any(|e| e == id));
        let denied = disabled.iter().any(|d| d == id);
        if !allowed || denied {
            debug!(check_id = id, "skipping disabled check");
        }
        allowed && !denied
    };

    let mut checks: Vec<CheckBox> = Vec::new();
    if active(image_alt_text::CHECK_ID) {
        checks.push(Box::new(
            ImageAltTextCheck::new(ctx.generators.alt_text.clone(), ctx.base_dir.clone())
                .overwrite(ctx.overwrite),
        ));
    }
    if active(heading_hierarchy::CHECK_ID) {
        checks.push(Box::new(HeadingHierarchyCheck::new()));
    }
    if active(link_text::CHECK_ID) {
        checks.push(Box::new(LinkTextCheck::new(
            ctx.generators.link_text.clone(),
        )));
    }
    if active(table_accessibility::CHECK_ID) {
        checks.push(Box::new(TableAccessibilityCheck::new(
            ctx.generators.captions.clone(),
        )));
    }
    if active(document_language::CHECK_ID) {
        checks.push(Box::new(DocumentLanguageCheck::new(
            ctx.generators.language.clone(),
        )));
    }
    if active(list_structure::CHECK_ID) {
        checks.push(Box::new(ListStructureCheck::new()));
    }
    if active(color_contrast::CHECK_ID) {
        checks.push(Box::new(ColorContrastCheck::new(ctx.raw_markup.clone())));
    }

    checks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_checks_enabled_by_default() {
        let checks = enabled_checks(&CheckerContext::default(), None, &[]);
        assert_eq!(checks.len(), 7);
        let ids: Vec<_> = checks.iter().map(|c| c.check_id()).collect();
        assert_eq!(ids, ALL_CHECK_IDS);
    }

    #[test]
    fn allow_list_filters() {
        let enabled = vec!["link-text".to_string(), "list-structure".to_string()];
        let checks = enabled_checks(&CheckerContext::default(), Some(enabled.as_slice()), &[]);
        let ids: Vec<_> = checks.iter().map(|c| c.check_id()).collect();
        assert_eq!(ids, vec!["link-text", "list-structure"]);
    }

    #[test]
    fn deny_wins_over_allow() {
        let enabled = vec!["link-text".to_string()];
        let disabled = vec!["link-text".to_string()];
        let checks = enabled_checks(&CheckerContext::default(), Some(enabled.as_slice()), &disabled);
        assert!(checks.is_empty());
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let enabled = vec!["no-such-check".to_string()];
        let checks = enabled_checks(&CheckerContext::default(), Some(enabled.as_slice()), &[]);
        assert!(checks.is_empty());
    }
}
