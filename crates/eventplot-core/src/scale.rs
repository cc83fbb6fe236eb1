// File: crates/eventplot-core/src/scale.rs
// Summary: Linear data-to-pixel mapping for the x (row position) and y (count) axes.

/// Maps a data interval onto a pixel interval. `px_end` may be smaller than `px_start`
/// (the y axis grows upward on a y-down canvas).
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    pub px_start: f32,
    pub px_end: f32,
    pub vmin: f64,
    pub vmax: f64,
}

impl LinearScale {
    pub fn new(px_start: f32, px_end: f32, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { px_start, px_end, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.px_start + ((v - self.vmin) / span) as f32 * (self.px_end - self.px_start)
    }
}
