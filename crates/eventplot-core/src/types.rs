// File: crates/eventplot-core/src/types.rs
// Summary: Shared types and constants (image size, plot insets, font sizes).

/// Default image width in pixels (12 in at 100 dpi).
pub const WIDTH: i32 = 1200;
/// Default image height in pixels (6 in at 100 dpi).
pub const HEIGHT: i32 = 600;

/// Screen margins around the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    /// Room for 20 pt y labels on the left and rotated date labels below.
    fn default() -> Self {
        Self::new(96, 40, 30, 84)
    }
}

/// Font sizes in points (1 pt == 1 px at the default scale).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSizes {
    pub x_labels: f32,
    pub y_labels: f32,
    pub annotations: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self { x_labels: 14.0, y_labels: 20.0, annotations: 13.5 }
    }
}
