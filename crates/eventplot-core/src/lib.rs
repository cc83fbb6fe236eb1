// File: crates/eventplot-core/src/lib.rs
// Summary: Core library entry point; turns an event-tracking workbook into per-event charts and a zip.

pub mod axis;
pub mod calendar;
pub mod chart;
pub mod error;
pub mod geometry;
pub mod grouper;
pub mod loader;
pub mod package;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod scale;
pub mod series;
pub mod text;
pub mod theme;
pub mod types;

pub use chart::{ChartLayout, ChartRenderer, RenderOptions};
pub use error::{Error, EventError, LoadError, Result, SchemaError};
pub use grouper::{group_by_event, EventGroup};
pub use package::{plot_file_name, ArchiveBuilder, ARCHIVE_NAME};
pub use pipeline::{generate_from_bytes, generate_from_path, GenerateConfig, RunReport};
pub use record::{EndDateSource, Row, RowEnd, SchemaMode};
pub use report::REPORT_NAME;
pub use series::{EventSeries, SeriesPoint};
pub use theme::Theme;
