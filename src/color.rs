use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};

/// Color used for rows without a category.
pub const UNCATEGORISED_COLOR: &str = "#7f7f7f";

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues, as `#rrggbb`.
pub fn generate_palette(n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

/// Parse `#rrggbb` into its channels.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

// ---------------------------------------------------------------------------
// Color mapping: category label → colour
// ---------------------------------------------------------------------------

/// Maps category labels to distinct colours.
///
/// Built from every category of the main rows, so a category keeps its colour
/// while the filters change.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, String>,
}

impl ColorMap {
    pub fn new<S: AsRef<str>>(categories: &[S]) -> Self {
        let palette = generate_palette(categories.len());
        let mapping = categories
            .iter()
            .zip(palette)
            .map(|(c, color)| (c.as_ref().to_string(), color))
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a category; missing or unknown → grey.
    pub fn color_for(&self, category: Option<&str>) -> String {
        category
            .and_then(|c| self.mapping.get(c))
            .cloned()
            .unwrap_or_else(|| UNCATEGORISED_COLOR.to_string())
    }
}
