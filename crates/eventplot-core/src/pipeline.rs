// File: crates/eventplot-core/src/pipeline.rs
// Summary: One generation run: load -> group -> build series -> lay out -> render -> package.
// Notes:
// - File-level failures abort before any chart work.
// - Per-event failures are recorded in the report and the run moves on.

use std::path::Path;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::chart::{ChartLayout, ChartRenderer, RenderOptions};
use crate::error::{EventError, Result};
use crate::grouper::{group_by_event, EventGroup};
use crate::loader::{self, LoadedSheet};
use crate::package::ArchiveBuilder;
use crate::record::{EndDateSource, SchemaMode};
use crate::series::EventSeries;
use crate::theme::event_color;

/// Sheet the tracking export is read from unless configured otherwise.
pub const DEFAULT_SHEET: &str = "Sheet2";

#[derive(Clone, Debug)]
pub struct GenerateConfig {
    pub sheet: String,
    pub schema: SchemaMode,
    pub render: RenderOptions,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self { sheet: DEFAULT_SHEET.to_string(), schema: SchemaMode::Auto, render: RenderOptions::default() }
    }
}

/// A chart that made it into the archive.
#[derive(Clone, Debug)]
pub struct RenderedChart {
    pub file_name: String,
    pub png: Vec<u8>,
    pub layout: ChartLayout,
}

/// Outcome for one event, in first-seen order.
#[derive(Clone, Debug)]
pub struct EventReport {
    pub event: String,
    pub rows: usize,
    pub usable_rows: usize,
    pub completion_target: Option<i64>,
    pub end_date: Option<NaiveDate>,
    pub outcome: std::result::Result<RenderedChart, EventError>,
}

impl EventReport {
    pub fn chart(&self) -> Option<&RenderedChart> { self.outcome.as_ref().ok() }

    pub fn error(&self) -> Option<&EventError> { self.outcome.as_ref().err() }
}

#[derive(Clone, Debug)]
pub struct RunReport {
    pub source: EndDateSource,
    pub events: Vec<EventReport>,
    /// `plots.zip` contents.
    pub archive: Vec<u8>,
}

impl RunReport {
    pub fn rendered(&self) -> impl Iterator<Item = &RenderedChart> {
        self.events.iter().filter_map(EventReport::chart)
    }

    pub fn failures(&self) -> impl Iterator<Item = &EventError> {
        self.events.iter().filter_map(EventReport::error)
    }
}

/// Run generation on the workbook at `path`.
pub fn generate_from_path(path: &Path, cfg: &GenerateConfig) -> Result<RunReport> {
    let sheet = loader::load_path(path, &cfg.sheet, cfg.schema)?;
    generate_from_sheet(sheet, cfg)
}

/// Run generation on an in-memory workbook.
pub fn generate_from_bytes(bytes: &[u8], cfg: &GenerateConfig) -> Result<RunReport> {
    let sheet = loader::load_bytes(bytes, &cfg.sheet, cfg.schema)?;
    generate_from_sheet(sheet, cfg)
}

/// Load and group without rendering; for dry runs.
pub fn inspect_path(path: &Path, cfg: &GenerateConfig) -> Result<(EndDateSource, Vec<EventGroup>)> {
    let sheet = loader::load_path(path, &cfg.sheet, cfg.schema)?;
    Ok((sheet.source, group_by_event(sheet.rows)))
}

fn generate_from_sheet(sheet: LoadedSheet, cfg: &GenerateConfig) -> Result<RunReport> {
    let source = sheet.source;
    let groups = group_by_event(sheet.rows);
    info!(events = groups.len(), %source, "generating charts");

    let renderer = ChartRenderer::new(cfg.render);
    let mut archive = ArchiveBuilder::new();
    let mut events = Vec::with_capacity(groups.len());

    for (index, group) in groups.iter().enumerate() {
        let mut completion_target = None;
        let mut end_date = None;
        let outcome = EventSeries::build(group).and_then(|series| {
            completion_target = Some(series.completion_target);
            end_date = series.end_date;
            let layout = ChartLayout::compute(&series, event_color(index))?;
            let png = renderer.render_png(&layout).map_err(|e| EventError::Render {
                event: group.event.clone(),
                reason: format!("{e:#}"),
            })?;
            // only charts that made it this far hold a name
            let file_name = archive.claim(&group.event)?;
            Ok(RenderedChart { file_name, png, layout })
        });

        match &outcome {
            Ok(chart) => {
                archive.write(&chart.file_name, &chart.png)?;
                info!(event = %group.event, file = %chart.file_name, bytes = chart.png.len(), "rendered chart");
            }
            Err(e) => warn!(event = %group.event, error = %e, "skipping event"),
        }
        events.push(EventReport {
            event: group.event.clone(),
            rows: group.rows.len(),
            usable_rows: group.rows.iter().filter(|r| r.is_usable()).count(),
            completion_target,
            end_date,
            outcome,
        });
    }

    let rendered = archive.entries().len();
    let archive = archive.finish()?;
    info!(rendered, failed = events.len() - rendered, bytes = archive.len(), "archive ready");
    Ok(RunReport { source, events, archive })
}
