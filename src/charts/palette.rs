//! Categorical palette used for series and donut wedges
//!
//! Colors repeat after exhausting the list.

use plotters::style::RGBColor;

/// matplotlib "tab10"
const CATEGORICAL_PALETTE: [&str; 10] = [
    "#1F77B4", "#FF7F0E", "#2CA02C", "#D62728", "#9467BD", "#8C564B", "#E377C2", "#7F7F7F",
    "#BCBD22", "#17BECF",
];

/// Fill of the scatter markers
pub const SCATTER_FILL: RGBColor = RGBColor(255, 165, 0);

/// Light gray used for grid lines
pub const GRID_COLOR: RGBColor = RGBColor(210, 210, 210);

const FALLBACK: RGBColor = RGBColor(128, 128, 128);

/// Get a color by index (wraps around)
pub fn categorical_color(index: usize) -> RGBColor {
    let hex = CATEGORICAL_PALETTE[index % CATEGORICAL_PALETTE.len()];
    parse_hex_color(hex)
        .map(|[r, g, b]| RGBColor(r, g, b))
        .unwrap_or(FALLBACK)
}

/// Parse a hex color string to RGB array
///
/// Supports `#RRGGBB`, `#RRGGBBAA` (alpha ignored) and both without `#`.
fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }

    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;

    Some([r, g, b])
}
