// File: crates/eventplot-core/src/report.rs
// Summary: CSV summary of a run, one line per event in first-seen order.

use crate::pipeline::RunReport;

pub const REPORT_NAME: &str = "report.csv";

const HEADER: [&str; 8] = [
    "event",
    "status",
    "rows",
    "usable_rows",
    "completion_target",
    "end_date",
    "file",
    "error",
];

impl RunReport {
    pub fn to_csv(&self) -> csv::Result<Vec<u8>> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(HEADER)?;
        for e in &self.events {
            let (status, file, error) = match &e.outcome {
                Ok(chart) => ("rendered", chart.file_name.clone(), String::new()),
                Err(err) => (err.kind(), String::new(), err.to_string()),
            };
            wtr.write_record([
                e.event.clone(),
                status.to_string(),
                e.rows.to_string(),
                e.usable_rows.to_string(),
                e.completion_target.map(|t| t.to_string()).unwrap_or_default(),
                e.end_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
                file,
                error,
            ])?;
        }
        wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))
    }
}
