// File: crates/eventplot-core/src/package.rs
// Summary: Bundles per-event PNGs into one deflate zip with collision-checked entry names.

use std::collections::HashMap;
use std::io::{Cursor, Write};

use tracing::warn;
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::EventError;

pub const ARCHIVE_NAME: &str = "plots.zip";

/// File name for an event's chart: `<event>_plot.png` after sanitizing.
pub fn plot_file_name(event: &str) -> String {
    format!("{}_plot.png", sanitize_file_stem(event))
}

/// Replace path separators, reserved, and control characters with `_`; trim surrounding
/// whitespace and dots. An empty result becomes `event`.
pub fn sanitize_file_stem(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = replaced.trim().trim_matches('.').trim();
    if trimmed.is_empty() {
        "event".to_string()
    } else {
        trimmed.to_string()
    }
}

/// In-memory zip writer. Entries keep insertion order and carry a fixed timestamp, so the same
/// inputs always give the same archive bytes.
pub struct ArchiveBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    /// entry name -> event that claimed it
    claimed: HashMap<String, String>,
    entries: Vec<String>,
}

impl Default for ArchiveBuilder {
    fn default() -> Self { Self::new() }
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            claimed: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Claim the entry name for `event` without writing anything.
    ///
    /// A second, different event mapping to a claimed name is a `DuplicateName` error and
    /// leaves the first claim untouched.
    pub fn claim(&mut self, event: &str) -> Result<String, EventError> {
        let file_name = plot_file_name(event);
        if let Some(first) = self.claimed.get(&file_name) {
            warn!(event, first = %first, file_name, "file name collision");
            return Err(EventError::DuplicateName {
                event: event.to_string(),
                file_name,
                first: first.clone(),
            });
        }
        self.claimed.insert(file_name.clone(), event.to_string());
        Ok(file_name)
    }

    /// Write `bytes` under a previously claimed `file_name`.
    pub fn write(&mut self, file_name: &str, bytes: &[u8]) -> ZipResult<()> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());
        self.zip.start_file(file_name, options)?;
        self.zip.write_all(bytes)?;
        self.entries.push(file_name.to_string());
        Ok(())
    }

    pub fn entries(&self) -> &[String] { &self.entries }

    pub fn finish(self) -> ZipResult<Vec<u8>> {
        Ok(self.zip.finish()?.into_inner())
    }
}
