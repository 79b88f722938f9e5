//! Qualitative palette catalog and accessible palette suggestion.

use crate::contrast::contrast_ratio;
use crate::cvd::{colors_distinguishable, CvdType};
use crate::Rgb;

/// Subset of the ColorBrewer2 qualitative palettes (public domain,
/// <https://colorbrewer2.org/> by Cynthia Brewer).
pub const COLORBREWER_QUALITATIVE: [(&str, [Rgb; 8]); 5] = [
    (
        "Set2",
        [
            (102, 194, 165),
            (252, 141, 98),
            (141, 160, 203),
            (231, 138, 195),
            (166, 216, 84),
            (255, 217, 47),
            (229, 196, 148),
            (179, 179, 179),
        ],
    ),
    (
        "Dark2",
        [
            (27, 158, 119),
            (217, 95, 2),
            (117, 112, 179),
            (231, 41, 138),
            (102, 166, 30),
            (230, 171, 2),
            (166, 118, 29),
            (102, 102, 102),
        ],
    ),
    (
        "Paired",
        [
            (166, 206, 227),
            (31, 120, 180),
            (178, 223, 138),
            (51, 160, 44),
            (251, 154, 153),
            (227, 26, 28),
            (253, 191, 111),
            (255, 127, 0),
        ],
    ),
    (
        "Set1",
        [
            (228, 26, 28),
            (55, 126, 184),
            (77, 175, 74),
            (152, 78, 163),
            (255, 127, 0),
            (255, 255, 51),
            (166, 86, 40),
            (247, 129, 191),
        ],
    ),
    (
        "Accent",
        [
            (127, 201, 127),
            (190, 174, 212),
            (253, 192, 134),
            (255, 255, 153),
            (56, 108, 176),
            (240, 2, 127),
            (191, 91, 23),
            (102, 102, 102),
        ],
    ),
];

/// Okabe-Ito palette, widely recommended for color-blind accessibility.
pub const OKABE_ITO: [Rgb; 8] = [
    (0, 114, 178),   // blue
    (230, 159, 0),   // orange
    (0, 158, 115),   // green
    (204, 121, 167), // pink
    (86, 180, 233),  // sky blue
    (213, 94, 0),    // vermillion
    (240, 228, 66),  // yellow
    (0, 0, 0),       // black
];

/// A palette that meets the requested accessibility constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteSuggestion {
    /// Palette name (e.g. "Okabe-Ito").
    pub name: String,
    /// The first `n` colors of the palette.
    pub colors: Vec<Rgb>,
    /// Minimum contrast of any color against the background, 2 decimals.
    pub min_contrast: f64,
    /// Whether every color pair survives all three CVD simulations.
    pub cvd_safe: bool,
}

/// Minimum contrast ratio of any palette entry against the background.
fn palette_min_contrast(colors: &[Rgb], background: Rgb) -> f64 {
    colors
        .iter()
        .map(|c| contrast_ratio(*c, background))
        .fold(f64::INFINITY, f64::min)
}

/// Checks if all color pairs stay distinguishable under every CVD type.
fn palette_cvd_safe(colors: &[Rgb]) -> bool {
    for cvd_type in CvdType::ALL {
        for (i, c1) in colors.iter().enumerate() {
            for c2 in &colors[i + 1..] {
                if !colors_distinguishable(*c1, *c2, cvd_type) {
                    return false;
                }
            }
        }
    }
    true
}

/// Suggests palettes meeting contrast and CVD requirements.
///
/// Palettes with fewer than `num_colors` entries are skipped; the rest are
/// truncated to the first `num_colors`, filtered by minimum background
/// contrast (and pairwise CVD distinguishability when `cvd_safe` is
/// requested), and sorted by descending minimum contrast.
#[must_use]
pub fn suggest_accessible_palette(
    num_colors: usize,
    background: Rgb,
    min_contrast: f64,
    cvd_safe: bool,
) -> Vec<PaletteSuggestion> {
    let mut candidates: Vec<(&str, &[Rgb])> = COLORBREWER_QUALITATIVE
        .iter()
        .map(|(name, colors)| (*name, colors.as_slice()))
        .collect();
    candidates.push(("Okabe-Ito", OKABE_ITO.as_slice()));

    let mut suggestions: Vec<PaletteSuggestion> = Vec::new();
    for (name, full_palette) in candidates {
        if full_palette.len() < num_colors {
            continue;
        }
        let subset = &full_palette[..num_colors];
        let mc = palette_min_contrast(subset, background);
        let is_cvd_safe = palette_cvd_safe(subset);

        if mc >= min_contrast && (!cvd_safe || is_cvd_safe) {
            suggestions.push(PaletteSuggestion {
                name: name.to_string(),
                colors: subset.to_vec(),
                min_contrast: (mc * 100.0).round() / 100.0,
                cvd_safe: is_cvd_safe,
            });
        }
    }

    suggestions.sort_by(|a, b| {
        b.min_contrast
            .partial_cmp(&a.min_contrast)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    suggestions
}

/// Finds an accessible color close to `failing_fg` by adjusting lightness.
///
/// Determines direction from the background luminance (darken on light
/// backgrounds, lighten on dark ones), then steps all three channels one
/// unit at a time until the contrast meets `min_contrast` or the channels
/// saturate. Returns the first passing color, or the most extreme
/// candidate attempted when none passes.
#[must_use]
pub fn suggest_replacement(failing_fg: Rgb, bg: Rgb, min_contrast: f64) -> Rgb {
    let (r, g, b) = failing_fg;
    if contrast_ratio(failing_fg, bg) >= min_contrast {
        return failing_fg;
    }

    let bg_luminance = 0.2126 * (f64::from(bg.0) / 255.0)
        + 0.7152 * (f64::from(bg.1) / 255.0)
        + 0.0722 * (f64::from(bg.2) / 255.0);
    let should_darken = bg_luminance > 0.5;

    let mut best = failing_fg;
    for step in 1..=255u8 {
        let candidate = if should_darken {
            (
                r.saturating_sub(step),
                g.saturating_sub(step),
                b.saturating_sub(step),
            )
        } else {
            (
                r.saturating_add(step),
                g.saturating_add(step),
                b.saturating_add(step),
            )
        };

        if contrast_ratio(candidate, bg) >= min_contrast {
            return candidate;
        }
        best = candidate;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb = (255, 255, 255);

    #[test]
    fn impossible_contrast_yields_nothing() {
        assert!(suggest_accessible_palette(8, WHITE, 21.0, false).is_empty());
    }

    #[test]
    fn trivial_contrast_yields_palettes() {
        let suggestions = suggest_accessible_palette(8, WHITE, 1.0, false);
        assert!(!suggestions.is_empty());
        // Sorted by descending minimum contrast.
        for pair in suggestions.windows(2) {
            assert!(pair[0].min_contrast >= pair[1].min_contrast);
        }
    }

    #[test]
    fn oversized_request_skips_all_palettes() {
        assert!(suggest_accessible_palette(9, WHITE, 1.0, false).is_empty());
    }

    #[test]
    fn suggestion_carries_requested_color_count() {
        let suggestions = suggest_accessible_palette(3, WHITE, 1.0, false);
        assert!(suggestions.iter().all(|s| s.colors.len() == 3));
    }

    #[test]
    fn replacement_reaches_target_on_white() {
        let fixed = suggest_replacement((200, 200, 200), WHITE, 4.5);
        assert!(contrast_ratio(fixed, WHITE) >= 4.5);
        // Light background means the color was darkened.
        assert!(fixed.0 < 200);
    }

    #[test]
    fn replacement_lightens_on_dark_background() {
        let fixed = suggest_replacement((40, 40, 40), (0, 0, 0), 4.5);
        assert!(contrast_ratio(fixed, (0, 0, 0)) >= 4.5);
        assert!(fixed.0 > 40);
    }

    #[test]
    fn passing_color_is_returned_unchanged() {
        assert_eq!(suggest_replacement((0, 0, 0), WHITE, 4.5), (0, 0, 0));
    }

    #[test]
    fn unreachable_target_returns_most_extreme() {
        // 22:1 can never be met; the walk ends at black.
        assert_eq!(suggest_replacement((10, 10, 10), WHITE, 22.0), (0, 0, 0));
    }
}
