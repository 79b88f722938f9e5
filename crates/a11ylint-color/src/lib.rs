//! # a11ylint-color
//!
//! Color science for accessibility auditing: WCAG contrast computation,
//! color-vision-deficiency simulation, qualitative palette suggestion,
//! and color extraction from raw markup.
//!
//! Everything in this crate is pure and tree-free; the color-contrast
//! checker composes these functions into document issues.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod contrast;
mod cvd;
mod extract;
mod palettes;

pub use contrast::{check_contrast, contrast_ratio, linearize, relative_luminance, ContrastResult};
pub use cvd::{colors_distinguishable, simulate_cvd, CvdType, DISTINGUISHABLE_RATIO};
pub use extract::{extract_color_pairs, parse_color, ColorPair};
pub use palettes::{
    suggest_accessible_palette, suggest_replacement, PaletteSuggestion, COLORBREWER_QUALITATIVE,
    OKABE_ITO,
};

/// An 8-bit sRGB triple.
pub type Rgb = (u8, u8, u8);

/// Formats a color as a lowercase `#rrggbb` hex string.
#[must_use]
pub fn rgb_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.0, rgb.1, rgb.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formatting() {
        assert_eq!(rgb_hex((255, 128, 0)), "#ff8000");
        assert_eq!(rgb_hex((0, 0, 0)), "#000000");
    }
}
