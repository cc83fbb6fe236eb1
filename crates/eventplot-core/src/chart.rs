// File: crates/eventplot-core/src/chart.rs
// Summary: Per-event chart: pure layout (ranges, ticks, annotations) and headless PNG rendering
// on a Skia CPU raster surface.

use std::io::Cursor;

use anyhow::{anyhow, Result};
use skia_safe as skia;

use crate::axis::{self, XTick, YAxis, YTick};
use crate::error::EventError;
use crate::geometry::{clamp, PlotRect};
use crate::scale::LinearScale;
use crate::series::EventSeries;
use crate::text::TextShaper;
use crate::theme::{with_alpha, Theme};
use crate::types::{FontSizes, Insets, HEIGHT, WIDTH};

pub const SIGN_UPS_LABEL: &str = "Sign-Ups";
pub const INVITED_LABEL: &str = "Accounts-invited";
/// Gap between the lowest achieved value and the "Sign-Ups" label, in data units.
pub const SIGN_UPS_OFFSET: f64 = 5.0;
/// Gap between the highest invited value and the "Accounts-invited" label, in data units.
pub const INVITED_OFFSET: f64 = 3.0;
/// Rotation of the x tick labels (counter-clockwise on screen).
pub const X_LABEL_ROTATION: f32 = 45.0;

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub fonts: FontSizes,
    pub theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            fonts: FontSizes::default(),
            theme: Theme::default(),
        }
    }
}

/// Which edge of the label sits on the anchor y value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAnchor {
    /// Label hangs below the anchor.
    Top,
    /// Label sits on top of the anchor.
    Bottom,
}

/// Text placed in data coordinates, horizontally centered on `x`.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub text: &'static str,
    pub x: f64,
    pub y: f64,
    pub anchor: VAnchor,
}

/// Everything needed to draw one event's chart, computed without touching pixels.
#[derive(Clone, Debug)]
pub struct ChartLayout {
    pub event: String,
    pub color: skia::Color,
    /// X range is `[0, x_max]`; the trailing end-date tick sits at `x_max`.
    pub x_max: f64,
    pub x_ticks: Vec<XTick>,
    pub y_axis: YAxis,
    pub achieved: Vec<(f64, f64)>,
    pub invited: Vec<(f64, f64)>,
    pub sign_ups: Annotation,
    pub accounts_invited: Annotation,
}

impl ChartLayout {
    pub fn compute(series: &EventSeries, color: skia::Color) -> Result<Self, EventError> {
        let render_err = |reason: &str| EventError::Render {
            event: series.event.clone(),
            reason: reason.to_string(),
        };
        let (Some(max_invited), Some(last_achieved), Some(min_achieved), Some(max_achieved), Some(median)) = (
            series.max_invited(),
            series.last_achieved(),
            series.min_achieved(),
            series.max_achieved(),
            series.median_x(),
        ) else {
            return Err(render_err("no rows with both achieved and accounts invited"));
        };

        let mut y_axis = YAxis::for_counts(series.completion_target, max_invited, last_achieved);
        y_axis.include(max_invited.max(max_achieved));

        let sign_ups = Annotation {
            text: SIGN_UPS_LABEL,
            x: median,
            y: (min_achieved - SIGN_UPS_OFFSET).max(0.0),
            anchor: VAnchor::Top,
        };
        let accounts_invited = Annotation {
            text: INVITED_LABEL,
            x: median,
            y: (max_invited + INVITED_OFFSET).min(y_axis.max),
            anchor: VAnchor::Bottom,
        };

        Ok(Self {
            event: series.event.clone(),
            color,
            x_max: series.len() as f64,
            x_ticks: axis::x_ticks(series),
            y_axis,
            achieved: series.points.iter().map(|p| (p.x as f64, p.achieved)).collect(),
            invited: series.points.iter().map(|p| (p.x as f64, p.invited)).collect(),
            sign_ups,
            accounts_invited,
        })
    }

    pub fn y_ticks(&self) -> &[YTick] { &self.y_axis.ticks }

    /// Ticks inside `[0, y_axis.max]`. The reference tick can sit above a small axis and is
    /// kept in the layout but not drawn.
    pub fn visible_y_ticks(&self) -> impl Iterator<Item = &YTick> {
        let max = self.y_axis.max;
        self.y_axis.ticks.iter().filter(move |t| t.value >= 0.0 && t.value <= max)
    }

    pub fn x_labels(&self) -> Vec<&str> {
        self.x_ticks.iter().map(|t| t.label.as_str()).collect()
    }
}

/// Paints layouts onto a CPU raster surface and encodes them as PNG.
pub struct ChartRenderer {
    pub opts: RenderOptions,
    shaper: TextShaper,
}

impl ChartRenderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts, shaper: TextShaper::new() }
    }

    /// Render to PNG bytes held in memory.
    pub fn render_png(&self, layout: &ChartLayout) -> Result<Vec<u8>> {
        let (w, h) = (self.opts.width, self.opts.height);
        if w <= 0 || h <= 0 {
            return Err(anyhow!("invalid image size {w}x{h}"));
        }
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow!("failed to create raster surface"))?;
        {
            let canvas = surface.canvas();
            canvas.clear(self.opts.theme.background);
            self.paint(canvas, layout);
        }

        // Read back unpremultiplied RGBA and encode with `image` so output bytes are stable.
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let row_bytes = w as usize * 4;
        let mut pixels = vec![0u8; row_bytes * h as usize];
        if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(anyhow!("failed to read back raster pixels"));
        }
        let img = image::RgbaImage::from_raw(w as u32, h as u32, pixels)
            .ok_or_else(|| anyhow!("pixel buffer does not match {w}x{h}"))?;
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)?;
        Ok(out.into_inner())
    }

    fn paint(&self, canvas: &skia::Canvas, layout: &ChartLayout) {
        let plot = PlotRect::within(self.opts.width, self.opts.height, &self.opts.insets);
        let sx = LinearScale::new(plot.left, plot.right, 0.0, layout.x_max);
        let sy = LinearScale::new(plot.bottom, plot.top, 0.0, layout.y_axis.max);
        let theme = &self.opts.theme;

        // Areas: invited below, achieved on top
        draw_area(canvas, &sx, &sy, &layout.invited, with_alpha(theme.invited, theme.invited_fill_alpha));
        draw_area(canvas, &sx, &sy, &layout.achieved, with_alpha(layout.color, theme.achieved_fill_alpha));

        // Lines
        draw_line(canvas, &sx, &sy, &layout.achieved, layout.color);
        draw_line(canvas, &sx, &sy, &layout.invited, theme.invited);

        self.draw_frame(canvas, &plot, &sx, &sy, layout);
        self.draw_annotation(canvas, &plot, &sx, &sy, &layout.sign_ups);
        self.draw_annotation(canvas, &plot, &sx, &sy, &layout.accounts_invited);
    }

    fn draw_frame(&self, canvas: &skia::Canvas, plot: &PlotRect, sx: &LinearScale, sy: &LinearScale, layout: &ChartLayout) {
        let theme = &self.opts.theme;
        let fonts = &self.opts.fonts;
        let mut axis_paint = skia::Paint::default();
        axis_paint.set_color(theme.axis_line);
        axis_paint.set_anti_alias(true);
        axis_paint.set_stroke_width(1.0);

        // Left and bottom spines only
        canvas.draw_line((plot.left, plot.top), (plot.left, plot.bottom), &axis_paint);
        canvas.draw_line((plot.left, plot.bottom), (plot.right, plot.bottom), &axis_paint);

        const TICK_LEN: f32 = 6.0;
        const PAD: f32 = 4.0;

        for tick in layout.visible_y_ticks() {
            let y = sy.to_px(tick.value);
            canvas.draw_line((plot.left - TICK_LEN, y), (plot.left, y), &axis_paint);
            let color = if tick.highlighted { layout.color } else { theme.axis_label };
            self.shaper
                .draw_right_middle(canvas, &tick.label, plot.left - TICK_LEN - PAD, y, fonts.y_labels, color);
        }

        for tick in &layout.x_ticks {
            let x = sx.to_px(tick.position);
            canvas.draw_line((x, plot.bottom), (x, plot.bottom + TICK_LEN), &axis_paint);
            if tick.label.is_empty() {
                continue;
            }
            // center the rotated label's bounding box under the tick
            let (w, h) = self.shaper.measure(&tick.label, fonts.x_labels);
            let (sin, cos) = X_LABEL_ROTATION.to_radians().sin_cos();
            let box_h = w * sin + h * cos;
            let cy = plot.bottom + TICK_LEN + PAD + box_h * 0.5;
            self.shaper.draw_rotated_centered(
                canvas,
                &tick.label,
                x,
                cy,
                -X_LABEL_ROTATION,
                fonts.x_labels,
                theme.axis_label,
            );
        }
    }

    fn draw_annotation(&self, canvas: &skia::Canvas, plot: &PlotRect, sx: &LinearScale, sy: &LinearScale, note: &Annotation) {
        let size = self.opts.fonts.annotations;
        let (w, h) = self.shaper.measure(note.text, size);
        let left = clamp(sx.to_px(note.x) - w * 0.5, 0.0, (self.opts.width as f32 - w).max(0.0));
        let anchor_y = sy.to_px(note.y);
        let top = match note.anchor {
            VAnchor::Top => anchor_y,
            VAnchor::Bottom => anchor_y - h,
        };
        let top = clamp(top, 0.0, (plot.bottom - h).max(0.0));
        self.shaper.draw_top_left(canvas, note.text, left, top, size, self.opts.theme.annotation);
    }
}

fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Fill);
    p.set_color(color);
    p
}

fn draw_area(canvas: &skia::Canvas, sx: &LinearScale, sy: &LinearScale, data: &[(f64, f64)], color: skia::Color) {
    if data.len() < 2 {
        return;
    }
    let base = sy.to_px(0.0);
    let mut path = skia::Path::new();
    path.move_to((sx.to_px(data[0].0), base));
    for &(x, y) in data {
        path.line_to((sx.to_px(x), sy.to_px(y)));
    }
    path.line_to((sx.to_px(data[data.len() - 1].0), base));
    path.close();
    canvas.draw_path(&path, &fill_paint(color));
}

fn draw_line(canvas: &skia::Canvas, sx: &LinearScale, sy: &LinearScale, data: &[(f64, f64)], color: skia::Color) {
    let Some(&(x0, y0)) = data.first() else { return };
    if data.len() == 1 {
        // a single observation has no segment; mark it
        canvas.draw_circle((sx.to_px(x0), sy.to_px(y0)), 3.0, &fill_paint(color));
        return;
    }

    let mut path = skia::Path::new();
    path.move_to((sx.to_px(x0), sy.to_px(y0)));
    for &(x, y) in data.iter().skip(1) {
        path.line_to((sx.to_px(x), sy.to_px(y)));
    }

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(2.0);
    stroke.set_color(color);

    canvas.draw_path(&path, &stroke);
}
