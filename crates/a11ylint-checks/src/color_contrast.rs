//! Color contrast check - WCAG SC 1.4.3, 1.4.11.
//!
//! Works on the raw markup handed in at construction, not the tree: color
//! pairs are extracted once during the pre-walk pass, checked against the
//! text-size-dependent ratio thresholds, and probed under all three CVD
//! simulations. Fix mode is advisory only - it records a nudged
//! replacement color without touching document content.

use a11ylint_color::{
    check_contrast, colors_distinguishable, extract_color_pairs, rgb_hex, suggest_replacement,
    ColorPair, CvdType,
};
use a11ylint_core::{
    Check, CheckResult, Document, ElementType, Issue, IssueList, NodeId, Severity,
};

/// Check code for color-contrast.
pub const CHECK_ID: &str = "color-contrast";

/// Check name for color-contrast.
pub const CHECK_NAME: &str = "Color Contrast";

/// WCAG success criterion for color-contrast.
pub const WCAG_SC: &str = "1.4.3";

/// Required ratio for large text.
const LARGE_TEXT_RATIO: f64 = 3.0;

/// Required ratio for normal text.
const NORMAL_TEXT_RATIO: f64 = 4.5;

/// Flags insufficient contrast and CVD-indistinguishable color pairs.
pub struct ColorContrastCheck {
    issues: IssueList,
    raw_markup: String,
    pairs: Vec<ColorPair>,
    failing: Vec<(usize, usize)>,
}

impl ColorContrastCheck {
    /// Creates the check over the document's raw markup. An empty string
    /// disables extraction (non-markup inputs have no inline colors).
    #[must_use]
    pub fn new(raw_markup: impl Into<String>) -> Self {
        Self {
            issues: IssueList::new(),
            raw_markup: raw_markup.into(),
            pairs: Vec::new(),
            failing: Vec::new(),
        }
    }

    fn required_ratio(pair: &ColorPair) -> f64 {
        if pair.is_large_text {
            LARGE_TEXT_RATIO
        } else {
            NORMAL_TEXT_RATIO
        }
    }
}

impl Check for ColorContrastCheck {
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

    fn check(&mut self, _doc: &Document, _node: NodeId) {
        if self.raw_markup.is_empty() {
            return;
        }

        self.pairs = extract_color_pairs(&self.raw_markup);

        for pair_idx in 0..self.pairs.len() {
            let pair = self.pairs[pair_idx].clone();
            let result = check_contrast(pair.foreground, pair.background);
            let required = Self::required_ratio(&pair);

            if result.ratio < required {
                let idx = self.issues.push(Issue::new(
                    CHECK_ID,
                    WCAG_SC,
                    Severity::Error,
                    format!(
                        "Insufficient contrast ratio {}:1 (requires {required}:1) for fg={} on bg={}",
                        result.ratio,
                        rgb_hex(pair.foreground),
                        rgb_hex(pair.background),
                    ),
                    pair.location.clone(),
                ));
                self.failing.push((pair_idx, idx));
            }

            for cvd_type in CvdType::ALL {
                if !colors_distinguishable(pair.foreground, pair.background, cvd_type) {
                    self.issues.push(Issue::new(
                        CHECK_ID,
                        WCAG_SC,
                        Severity::Warning,
                        format!(
                            "Colors indistinguishable under {cvd_type}: fg={} bg={}",
                            rgb_hex(pair.foreground),
                            rgb_hex(pair.background),
                        ),
                        pair.location.clone(),
                    ));
                }
            }
        }
    }

    fn finalize(&mut self, _doc: &mut Document, fix: bool) -> CheckResult {
        if fix {
            // Advisory fix: record the nudged color, leave content alone.
            for (pair_idx, issue_idx) in std::mem::take(&mut self.failing) {
                let pair = &self.pairs[pair_idx];
                let required = Self::required_ratio(pair);
                let new_fg = suggest_replacement(pair.foreground, pair.background, required);
                let new_ratio = check_contrast(new_fg, pair.background).ratio;
                self.issues.mark_fixed(
                    issue_idx,
                    format!(
                        "Suggested: change fg to {} (contrast {new_ratio}:1)",
                        rgb_hex(new_fg)
                    ),
                );
            }
        }
        std::mem::take(&mut self.issues).into_result(CHECK_ID, CHECK_NAME)
    }
}
