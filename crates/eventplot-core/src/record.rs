// File: crates/eventplot-core/src/record.rs
// Summary: Fixed-schema row record and the column names of the tracking sheet.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

pub const COL_DATE: &str = "Datum";
pub const COL_EVENT: &str = "Event";
pub const COL_ACHIEVED: &str = "Achieved";
pub const COL_COMPLETION: &str = "Completion";
pub const COL_INVITED: &str = "Accounts Invited";
pub const COL_REMAINING_DAYS: &str = "Remaining Business Days";
pub const COL_END_DATE: &str = "Enddate";

/// Columns required in every schema mode.
pub const BASE_COLUMNS: [&str; 5] = [COL_DATE, COL_EVENT, COL_ACHIEVED, COL_COMPLETION, COL_INVITED];

/// How the schema mode is chosen for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchemaMode {
    /// Use whichever of the two end-date columns is present; both or neither is an error.
    #[default]
    Auto,
    BusinessDays,
    EndDate,
}

impl FromStr for SchemaMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(SchemaMode::Auto),
            "business-days" | "business_days" | "bdays" => Ok(SchemaMode::BusinessDays),
            "end-date" | "end_date" | "enddate" => Ok(SchemaMode::EndDate),
            other => Err(format!("unknown schema mode '{other}'")),
        }
    }
}

/// Where a row's end date comes from, once the schema mode is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndDateSource {
    /// `Datum` advanced by `Remaining Business Days`.
    BusinessDays,
    /// The `Enddate` column, read as-is.
    Column,
}

impl EndDateSource {
    pub fn column(self) -> &'static str {
        match self {
            EndDateSource::BusinessDays => COL_REMAINING_DAYS,
            EndDateSource::Column => COL_END_DATE,
        }
    }
}

impl fmt::Display for EndDateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndDateSource::BusinessDays => f.write_str("business-days"),
            EndDateSource::Column => f.write_str("end-date"),
        }
    }
}

/// End-date input carried by a row; the variant matches the resolved schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowEnd {
    RemainingBusinessDays(Option<i64>),
    EndDate(Option<NaiveDate>),
}

/// One observation from the tracking sheet. Missing cells are `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub date: Option<NaiveDate>,
    pub event: String,
    pub achieved: Option<f64>,
    pub completion: Option<f64>,
    pub accounts_invited: Option<f64>,
    pub end: RowEnd,
}

impl Row {
    /// Both plotted metrics are present.
    pub fn is_usable(&self) -> bool {
        self.achieved.is_some() && self.accounts_invited.is_some()
    }
}
