//! WCAG 2.1 contrast computation.

use crate::Rgb;

/// Converts an sRGB channel (0-255) to linear RGB.
#[must_use]
pub fn linearize(c: u8) -> f64 {
    let s = f64::from(c) / 255.0;
    if s <= 0.04045 {
        s / 12.92
    } else {
        ((s + 0.055) / 1.055).powf(2.4)
    }
}

/// Computes relative luminance per the WCAG 2.1 definition.
///
/// See <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>.
#[must_use]
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let (r, g, b) = rgb;
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Computes the WCAG contrast ratio between two sRGB colors.
///
/// Symmetric in its arguments; ranges from 1.0 (identical) to 21.0
/// (black on white).
#[must_use]
pub fn contrast_ratio(color1: Rgb, color2: Rgb) -> f64 {
    let l1 = relative_luminance(color1);
    let l2 = relative_luminance(color2);
    let lighter = l1.max(l2);
    let darker = l1.min(l2);
    (lighter + 0.05) / (darker + 0.05)
}

/// Result of a WCAG contrast check between two colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastResult {
    /// Foreground color.
    pub foreground: Rgb,
    /// Background color.
    pub background: Rgb,
    /// Contrast ratio, rounded to two decimals.
    pub ratio: f64,
    /// Meets AA for normal text (>= 4.5:1).
    pub aa_normal: bool,
    /// Meets AA for large text (>= 3:1).
    pub aa_large: bool,
    /// Meets AAA for normal text (>= 7:1).
    pub aaa_normal: bool,
    /// Meets AAA for large text (>= 4.5:1).
    pub aaa_large: bool,
}

/// Checks a foreground/background pair against all WCAG thresholds.
#[must_use]
pub fn check_contrast(fg: Rgb, bg: Rgb) -> ContrastResult {
    let ratio = (contrast_ratio(fg, bg) * 100.0).round() / 100.0;
    ContrastResult {
        foreground: fg,
        background: bg,
        ratio,
        aa_normal: ratio >= 4.5,
        aa_large: ratio >= 3.0,
        aaa_normal: ratio >= 7.0,
        aaa_large: ratio >= 4.5,
    }
}
