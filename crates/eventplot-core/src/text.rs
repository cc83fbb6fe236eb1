// File: crates/eventplot-core/src/text.rs
// Summary: Bold label shaping/drawing with Skia textlayout: anchored, centered, and rotated text.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

/// Chart labels are bold Arial where available.
const FAMILIES: [&str; 5] = ["Arial", "Helvetica", "Liberation Sans", "DejaVu Sans", "sans-serif"];

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_style(skia::FontStyle::bold());
        ts.set_font_families(&FAMILIES[..]);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// (width of the longest line, total height).
    pub fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        let p = self.layout(text, size, skia::Color::TRANSPARENT);
        (p.longest_line(), p.height())
    }

    /// Draw with the paragraph's top-left corner at `(x, y)`.
    pub fn draw_top_left(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color) {
        let mut p = self.layout(text, size, color);
        p.paint(canvas, (x, y));
    }

    /// Draw with the paragraph's right edge at `x`, vertically centered on `y`.
    pub fn draw_right_middle(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color) {
        let mut p = self.layout(text, size, color);
        p.paint(canvas, (x - p.longest_line(), y - p.height() * 0.5));
    }

    /// Draw centered on `(cx, cy)` after rotating by `degrees` (clockwise on screen).
    pub fn draw_rotated_centered(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        cx: f32,
        cy: f32,
        degrees: f32,
        size: f32,
        color: skia::Color,
    ) {
        let mut p = self.layout(text, size, color);
        let (w, h) = (p.longest_line(), p.height());
        canvas.save();
        canvas.translate((cx, cy));
        canvas.rotate(degrees, None);
        p.paint(canvas, (-w * 0.5, -h * 0.5));
        canvas.restore();
    }
}
