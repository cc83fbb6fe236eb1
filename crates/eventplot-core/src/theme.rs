// File: crates/eventplot-core/src/theme.rs
// Summary: Fixed chart styling (neutral tones, fill opacities) and the per-event color palette.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub background: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub annotation: skia::Color,
    /// Line and fill tone of "Accounts Invited".
    pub invited: skia::Color,
    pub invited_fill_alpha: f32,
    pub achieved_fill_alpha: f32,
}

impl Theme {
    /// Transparent background with white axis text; meant for dark slides.
    pub fn transparent_dark() -> Self {
        Self {
            background: skia::Color::TRANSPARENT,
            axis_line: skia::Color::WHITE,
            axis_label: skia::Color::WHITE,
            annotation: skia::Color::WHITE,
            invited: skia::Color::from_rgb(0x80, 0x80, 0x80), // grey
            invited_fill_alpha: 0.3,
            achieved_fill_alpha: 0.85,
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::transparent_dark() }
}

/// Event colors, assigned by first-seen position and cycling past the end.
pub const PALETTE: [(u8, u8, u8); 8] = [
    (0xDA, 0xA5, 0x20), // goldenrod
    (0x26, 0x8B, 0xD2), // blue
    (0x2A, 0xA1, 0x98), // cyan
    (0xCB, 0x4B, 0x16), // orange
    (0x85, 0x99, 0x00), // green
    (0xD3, 0x36, 0x82), // magenta
    (0x6C, 0x71, 0xC4), // violet
    (0xDC, 0x32, 0x2F), // red
];

pub fn event_color(index: usize) -> skia::Color {
    let (r, g, b) = PALETTE[index % PALETTE.len()];
    skia::Color::from_rgb(r, g, b)
}

/// Same color with its alpha channel set from `alpha` in `[0, 1]`.
pub fn with_alpha(color: skia::Color, alpha: f32) -> skia::Color {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    skia::Color::from_argb(a, color.r(), color.g(), color.b())
}
