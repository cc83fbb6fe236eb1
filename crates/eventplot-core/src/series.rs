// File: crates/eventplot-core/src/series.rs
// Summary: Per-event series model: completion target, end date, and the gap-free plotted points.
// Notes:
// - The completion target is taken from the first date-sorted row *before* rows with missing
//   metrics are dropped, so later gaps never move the target.
// - X positions are ranks in the filtered sequence, not calendar offsets.

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::add_business_days;
use crate::error::EventError;
use crate::grouper::EventGroup;
use crate::record::{Row, RowEnd};

/// One plotted observation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesPoint {
    pub x: usize,
    pub date: Option<NaiveDate>,
    pub achieved: f64,
    pub invited: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EventSeries {
    pub event: String,
    pub completion_target: i64,
    /// Latest known end date among the plotted rows.
    pub end_date: Option<NaiveDate>,
    pub points: Vec<SeriesPoint>,
    /// Row count before missing-value filtering.
    pub source_rows: usize,
}

impl EventSeries {
    /// Build the series for one sorted group.
    pub fn build(group: &EventGroup) -> Result<Self, EventError> {
        let completion_target = completion_target(&group.event, group.rows.first())?;

        let usable: Vec<&Row> = group.rows.iter().filter(|r| r.is_usable()).collect();
        let end_date = usable.iter().filter_map(|r| row_end_date(r)).max();
        let points = usable
            .iter()
            .enumerate()
            .filter_map(|(x, r)| {
                Some(SeriesPoint { x, date: r.date, achieved: r.achieved?, invited: r.accounts_invited? })
            })
            .collect::<Vec<_>>();

        debug!(
            event = %group.event,
            completion_target,
            rows = group.rows.len(),
            usable = points.len(),
            ?end_date,
            "built series"
        );
        Ok(Self {
            event: group.event.clone(),
            completion_target,
            end_date,
            points,
            source_rows: group.rows.len(),
        })
    }

    pub fn len(&self) -> usize { self.points.len() }

    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    pub fn max_invited(&self) -> Option<f64> {
        self.points.iter().map(|p| p.invited).reduce(f64::max)
    }

    pub fn min_achieved(&self) -> Option<f64> {
        self.points.iter().map(|p| p.achieved).reduce(f64::min)
    }

    pub fn max_achieved(&self) -> Option<f64> {
        self.points.iter().map(|p| p.achieved).reduce(f64::max)
    }

    pub fn last_achieved(&self) -> Option<f64> {
        self.points.last().map(|p| p.achieved)
    }

    /// Median of the x positions `0..len`.
    pub fn median_x(&self) -> Option<f64> {
        (!self.is_empty()).then(|| (self.len() - 1) as f64 / 2.0)
    }
}

/// `ceil(achieved / completion)` of the first sorted row.
fn completion_target(event: &str, first: Option<&Row>) -> Result<i64, EventError> {
    let invalid = |reason: &str| EventError::InvalidTarget {
        event: event.to_string(),
        reason: reason.to_string(),
    };
    let first = first.ok_or_else(|| invalid("event has no rows"))?;
    let completion = first.completion.ok_or_else(|| invalid("completion is missing on the first row"))?;
    if completion == 0.0 {
        return Err(invalid("completion is zero on the first row"));
    }
    let achieved = first.achieved.ok_or_else(|| invalid("achieved is missing on the first row"))?;
    let target = (achieved / completion).ceil();
    if !target.is_finite() || target.abs() > i64::MAX as f64 {
        return Err(invalid("achieved / completion is not a finite number"));
    }
    Ok(target as i64)
}

fn row_end_date(row: &Row) -> Option<NaiveDate> {
    match row.end {
        RowEnd::RemainingBusinessDays(days) => add_business_days(row.date?, days?),
        RowEnd::EndDate(date) => date,
    }
}
