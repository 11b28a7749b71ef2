//! Symbol colors.
//!
//! A color spec is either a name from a small fixed table or a `#hex`
//! string. Anything that does not resolve falls back to white.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Named colors understood in definitions. Matched case-insensitively.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 255, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("orange", Color::rgb(255, 200, 0)),
    ("gray", Color::rgb(128, 128, 128)),
    ("white", Color::rgb(255, 255, 255)),
];

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Color used for symbols without a (valid) color spec.
    pub const FALLBACK: Color = Color::WHITE;

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Look up a name in the fixed color table.
    pub fn named(name: &str) -> Option<Color> {
        NAMED_COLORS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, c)| c)
    }

    /// Decode `#` followed by hex digits as one integer and keep its low
    /// 24 bits as `0xRRGGBB`. `#0f0` is therefore `(0, 0, 15)`, not CSS
    /// green, and `#7f000080` is `(0, 0, 128)`.
    ///
    /// Values above `i32::MAX`, signs and non-hex digits are rejected.
    pub fn from_hex(spec: &str) -> Option<Color> {
        let digits = spec.strip_prefix('#')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        if value > i32::MAX as u32 {
            return None;
        }
        let [_, r, g, b] = value.to_be_bytes();
        Some(Color::rgb(r, g, b))
    }

    /// Parse a CSS color (`navy`, `#abc`, `rgb(1, 2, 3)`, ...) as SVG
    /// viewers read it. Alpha is dropped.
    ///
    /// This is for output settings such as the background. Symbol colors in
    /// definitions go through [`Color::parse`].
    pub fn from_css(spec: &str) -> Option<Color> {
        svgtypes::Color::from_str(&spec.trim().to_ascii_lowercase())
            .ok()
            .map(|c| Color::rgb(c.red, c.green, c.blue))
    }

    /// Parse a symbol color spec: `#hex` strings take the hex path,
    /// everything else goes through the name table. No trimming: `" red"`
    /// is not a color.
    pub fn parse(spec: &str) -> Option<Color> {
        if spec.starts_with('#') {
            Color::from_hex(spec)
        } else {
            Color::named(spec)
        }
    }

    /// Parse a color spec, falling back to [`Color::FALLBACK`].
    pub fn resolve(spec: &str) -> Color {
        Color::parse(spec).unwrap_or(Color::FALLBACK)
    }

    /// Lowercase `#rrggbb` form, as used in SVG output.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::FALLBACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Resolved symbol → color table.
///
/// Built once per definition so the interpreter never re-parses specs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    colors: BTreeMap<char, Color>,
}

impl Palette {
    /// Resolve every spec up front. Unresolvable specs map to the fallback.
    pub fn from_specs(specs: &BTreeMap<char, String>) -> Self {
        let colors = specs
            .iter()
            .map(|(&symbol, spec)| {
                let color = Color::parse(spec).unwrap_or_else(|| {
                    tracing::debug!(%symbol, spec = %spec, "unrecognized color, using fallback");
                    Color::FALLBACK
                });
                (symbol, color)
            })
            .collect();
        Self { colors }
    }

    /// Color for `symbol`, or the fallback when none was assigned.
    #[inline]
    pub fn color_for(&self, symbol: char) -> Color {
        self.colors.get(&symbol).copied().unwrap_or(Color::FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_table_matches_ignoring_case() {
        assert_eq!(Color::parse("red"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(Color::parse("Green"), Some(Color::rgb(0, 255, 0)));
        assert_eq!(Color::parse("ORANGE"), Some(Color::rgb(255, 200, 0)));
        assert_eq!(Color::parse("gray"), Some(Color::rgb(128, 128, 128)));
    }

    #[test]
    fn unknown_name_falls_back_to_white() {
        assert_eq!(Color::parse("chartreuse"), None);
        assert_eq!(Color::resolve("chartreuse"), Color::WHITE);
        assert_eq!(Color::resolve(""), Color::WHITE);
    }

    #[test]
    fn hex_keeps_low_24_bits() {
        assert_eq!(Color::parse("#1a2B3c"), Some(Color::rgb(0x1a, 0x2b, 0x3c)));
        assert_eq!(Color::resolve("#0f0"), Color::rgb(0, 0, 15));
        assert_eq!(Color::resolve("#12345"), Color::rgb(1, 35, 69));
        assert_eq!(Color::resolve("#7f000080"), Color::rgb(0, 0, 128));
        assert_eq!(Color::resolve("#00000000ff"), Color::rgb(0, 0, 255));
    }

    #[test]
    fn malformed_hex_falls_back() {
        assert_eq!(Color::resolve("#gg0000"), Color::WHITE);
        assert_eq!(Color::resolve("#"), Color::WHITE);
        assert_eq!(Color::resolve("#+ff"), Color::WHITE);
        // Does not fit in a signed 32-bit integer.
        assert_eq!(Color::resolve("#80000000"), Color::WHITE);
        assert_eq!(Color::resolve("#7fffffff"), Color::rgb(255, 255, 255));
    }

    #[test]
    fn specs_are_not_trimmed() {
        assert_eq!(Color::parse(" red"), None);
        assert_eq!(Color::resolve("red "), Color::WHITE);
        assert_eq!(Color::resolve(" #ff0000"), Color::WHITE);
    }

    #[test]
    fn css_colors_for_output_settings() {
        assert_eq!(Color::from_css("navy"), Some(Color::rgb(0, 0, 128)));
        assert_eq!(Color::from_css("#0f0"), Some(Color::rgb(0, 255, 0)));
        assert_eq!(Color::from_css(" Black "), Some(Color::BLACK));
        assert_eq!(Color::from_css("mauve"), None);
    }

    #[test]
    fn hex_output_round_trips_through_parse() {
        let c = Color::rgb(12, 200, 7);
        assert_eq!(c.to_hex(), "#0cc807");
        assert_eq!(Color::parse(&c.to_hex()), Some(c));
    }

    #[test]
    fn palette_defaults_missing_symbols() {
        let mut specs = BTreeMap::new();
        specs.insert('F', "green".to_string());
        specs.insert('G', "not-a-color".to_string());
        let palette = Palette::from_specs(&specs);

        assert_eq!(palette.color_for('F'), Color::rgb(0, 255, 0));
        assert_eq!(palette.color_for('G'), Color::WHITE);
        assert_eq!(palette.color_for('X'), Color::WHITE);
    }
}
