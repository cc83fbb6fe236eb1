// File: crates/eventplot-core/tests/smoke.rs
// Purpose: Render a real chart and check the PNG: header, size, transparent background, painted pixels.

mod common;

use chrono::NaiveDate;
use eventplot_core::geometry::PlotRect;
use eventplot_core::pipeline::GenerateConfig;
use eventplot_core::theme::event_color;
use eventplot_core::{generate_from_bytes, ChartLayout, ChartRenderer, EventSeries, RenderOptions, SeriesPoint};

#[test]
fn render_smoke_png() {
    let report = generate_from_bytes(&common::launch_and_renewal(), &GenerateConfig::default()).expect("run");
    let chart = report.rendered().next().expect("at least one chart");
    assert!(chart.png.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let img = image::load_from_memory(&chart.png).expect("decode png").to_rgba8();
    assert_eq!(img.dimensions(), (1200, 600));
    // background is fully transparent
    assert_eq!(img.get_pixel(0, 0)[3], 0);
    assert_eq!(img.get_pixel(1199, 0)[3], 0);
    // something was drawn
    let opaque = img.pixels().filter(|p| p[3] > 0).count();
    assert!(opaque > 1000, "only {opaque} painted pixels");

    // write it out for eyeballing like the other render tests do
    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();
    std::fs::write(&out, &chart.png).unwrap();
}

#[test]
fn custom_size_is_honored() {
    let report = generate_from_bytes(&common::launch_and_renewal(), &GenerateConfig::default()).expect("run");
    let layout = &report.rendered().next().unwrap().layout;

    let opts = RenderOptions { width: 640, height: 360, ..RenderOptions::default() };
    let bytes = ChartRenderer::new(opts).render_png(layout).expect("render");
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (640, 360));

    let bad = RenderOptions { width: 0, ..RenderOptions::default() };
    assert!(ChartRenderer::new(bad).render_png(layout).is_err());
}

#[test]
fn achieved_fill_uses_event_color() {
    let report = generate_from_bytes(&common::launch_and_renewal(), &GenerateConfig::default()).expect("run");
    let img = image::load_from_memory(&report.rendered().next().unwrap().png).unwrap().to_rgba8();
    // goldenrod-ish pixels exist somewhere in the plot body
    let gold = img.pixels().filter(|p| p[3] > 200 && p[0] > 180 && p[1] > 130 && p[1] < 190 && p[2] < 80).count();
    assert!(gold > 100, "only {gold} goldenrod pixels");
}

#[test]
fn ticks_above_small_axis_are_not_drawn() {
    // target 20 with everything below it: axis tops out at 24, the reference tick 25 is outside
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let series = EventSeries {
        event: "Small".into(),
        completion_target: 20,
        end_date: NaiveDate::from_ymd_opt(2024, 3, 15),
        points: vec![
            SeriesPoint { x: 0, date: Some(start), achieved: 5.0, invited: 10.0 },
            SeriesPoint { x: 1, date: start.succ_opt(), achieved: 8.0, invited: 15.0 },
        ],
        source_rows: 2,
    };
    let layout = ChartLayout::compute(&series, event_color(0)).expect("layout");
    assert!(layout.y_axis.max < 25.0);

    let opts = RenderOptions::default();
    let bytes = ChartRenderer::new(opts).render_png(&layout).expect("render");
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();

    let plot = PlotRect::within(opts.width, opts.height, &opts.insets);
    let mut painted = 0;
    for y in 0..plot.top as u32 {
        for x in 0..plot.left as u32 {
            if img.get_pixel(x, y)[3] > 0 {
                painted += 1;
            }
        }
    }
    assert_eq!(painted, 0, "{painted} pixels painted in the gutter above the plot");
}
