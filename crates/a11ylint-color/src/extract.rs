//! Color extraction from raw markup - inline styles and legacy attributes.

use std::sync::LazyLock;

use regex::Regex;

use crate::Rgb;

/// CSS named colors (most common subset).
const CSS_NAMED_COLORS: [(&str, Rgb); 40] = [
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("cyan", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("silver", (192, 192, 192)),
    ("maroon", (128, 0, 0)),
    ("olive", (128, 128, 0)),
    ("lime", (0, 255, 0)),
    ("aqua", (0, 255, 255)),
    ("teal", (0, 128, 128)),
    ("navy", (0, 0, 128)),
    ("fuchsia", (255, 0, 255)),
    ("purple", (128, 0, 128)),
    ("orange", (255, 165, 0)),
    ("pink", (255, 192, 203)),
    ("brown", (165, 42, 42)),
    ("coral", (255, 127, 80)),
    ("crimson", (220, 20, 60)),
    ("darkblue", (0, 0, 139)),
    ("darkgreen", (0, 100, 0)),
    ("darkred", (139, 0, 0)),
    ("gold", (255, 215, 0)),
    ("indigo", (75, 0, 130)),
    ("ivory", (255, 255, 240)),
    ("khaki", (240, 230, 140)),
    ("lavender", (230, 230, 250)),
    ("lightblue", (173, 216, 230)),
    ("lightgray", (211, 211, 211)),
    ("lightgreen", (144, 238, 144)),
    ("lightyellow", (255, 255, 224)),
    ("tomato", (255, 99, 71)),
    ("turquoise", (64, 224, 208)),
    ("violet", (238, 130, 238)),
    ("wheat", (245, 222, 179)),
];

static HEX3: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F])([0-9a-fA-F])([0-9a-fA-F])$").unwrap());
static HEX6: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$").unwrap());
static RGB_FN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})").unwrap());

static STYLE_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|;)\s*color\s*:\s*([^;]+)").unwrap());
static STYLE_BG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|;)\s*background(?:-color)?\s*:\s*([^;]+)").unwrap());
static INLINE_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)style\s*=\s*"([^"]*)""#).unwrap());
static BGCOLOR_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)bgcolor\s*=\s*"([^"]*)""#).unwrap());
static FONT_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<font[^>]+color\s*=\s*"([^"]*)""#).unwrap());

/// Parses a CSS color value to an RGB triple.
///
/// Supports `#rgb`, `#rrggbb`, `rgb()`/`rgba()`, and named colors.
/// Returns `None` for anything unparseable.
#[must_use]
pub fn parse_color(color_str: &str) -> Option<Rgb> {
    let color_str = color_str.trim().to_lowercase();

    if let Some((_, rgb)) = CSS_NAMED_COLORS.iter().find(|(name, _)| *name == color_str) {
        return Some(*rgb);
    }

    if let Some(caps) = HEX6.captures(&color_str) {
        return Some((
            u8::from_str_radix(&caps[1], 16).ok()?,
            u8::from_str_radix(&caps[2], 16).ok()?,
            u8::from_str_radix(&caps[3], 16).ok()?,
        ));
    }

    if let Some(caps) = HEX3.captures(&color_str) {
        let expand = |digit: &str| u8::from_str_radix(&digit.repeat(2), 16).ok();
        return Some((expand(&caps[1])?, expand(&caps[2])?, expand(&caps[3])?));
    }

    if let Some(caps) = RGB_FN.captures(&color_str) {
        let channel = |s: &str| s.parse::<u16>().ok().filter(|v| *v <= 255).map(|v| v as u8);
        return Some((channel(&caps[1])?, channel(&caps[2])?, channel(&caps[3])?));
    }

    None
}

/// A foreground/background color pair found in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPair {
    /// Foreground color.
    pub foreground: Rgb,
    /// Background color (white assumed when unspecified).
    pub background: Rgb,
    /// Stable locator naming the source attribute and its ordinal.
    pub location: String,
    /// Whether the pair styles large text. The extractor currently never
    /// sets this; callers keep the normal-text threshold.
    pub is_large_text: bool,
}

const DEFAULT_BG: Rgb = (255, 255, 255);

/// Extracts foreground/background color pairs from raw markup.
///
/// Scans inline `style` attributes, legacy `bgcolor` attributes, and
/// `<font color>` tags. Unparseable values are dropped silently.
#[must_use]
pub fn extract_color_pairs(html: &str) -> Vec<ColorPair> {
    let mut pairs = Vec::new();

    for (i, caps) in INLINE_STYLE.captures_iter(html).enumerate() {
        let style = &caps[1];
        let fg = STYLE_COLOR
            .captures(style)
            .and_then(|m| parse_color(&m[1]));
        let bg = STYLE_BG.captures(style).and_then(|m| parse_color(&m[1]));

        if let Some(fg) = fg {
            pairs.push(ColorPair {
                foreground: fg,
                background: bg.unwrap_or(DEFAULT_BG),
                location: format!("inline style #{}", i + 1),
                is_large_text: false,
            });
        }
    }

    for (i, caps) in BGCOLOR_ATTR.captures_iter(html).enumerate() {
        if let Some(bg) = parse_color(&caps[1]) {
            pairs.push(ColorPair {
                foreground: (0, 0, 0),
                background: bg,
                location: format!("bgcolor #{}", i + 1),
                is_large_text: false,
            });
        }
    }

    for (i, caps) in FONT_COLOR.captures_iter(html).enumerate() {
        if let Some(fg) = parse_color(&caps[1]) {
            pairs.push(ColorPair {
                foreground: fg,
                background: DEFAULT_BG,
                location: format!("font color #{}", i + 1),
                is_large_text: false,
            });
        }
    }

    pairs
}
