// File: crates/eventplot-core/src/axis.rs
// Summary: Axis rules: y range and ticks from the completion target, x ticks from row dates.

use chrono::NaiveDate;

use crate::series::EventSeries;

/// Fixed reference tick shown on every chart.
pub const REFERENCE_TICK: f64 = 25.0;
/// Headroom factor applied to the y-axis peak.
pub const HEADROOM: f64 = 1.2;

#[derive(Clone, Debug, PartialEq)]
pub struct YTick {
    pub value: f64,
    pub label: String,
    /// Drawn in the event color instead of the neutral label tone.
    pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct XTick {
    pub position: f64,
    pub label: String,
}

/// Y axis spanning `[0, max]`.
#[derive(Clone, Debug, PartialEq)]
pub struct YAxis {
    pub max: f64,
    pub ticks: Vec<YTick>,
}

impl YAxis {
    /// Apply the scaling rule.
    ///
    /// When the largest invited count and the latest achieved count are both below `target`,
    /// the axis is sized from the target and only `{25, target}` are ticked. Otherwise it is
    /// sized from the larger of the two and all four values are ticked.
    pub fn for_counts(target: i64, max_invited: f64, last_achieved: f64) -> Self {
        let target = target as f64;
        let (max, values) = if max_invited < target && last_achieved < target {
            (target * HEADROOM, vec![REFERENCE_TICK, target])
        } else {
            let peak = max_invited.max(last_achieved);
            (peak * HEADROOM, vec![REFERENCE_TICK, target, max_invited, last_achieved])
        };
        Self { max, ticks: tick_set(values) }
    }

    /// Widen the axis so `value` stays inside the plot. The ticks are left as they are.
    pub fn include(&mut self, value: f64) {
        if value > self.max {
            self.max = value * HEADROOM;
        }
        if self.max <= 0.0 {
            self.max = 1.0;
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.ticks.iter().map(|t| t.label.as_str()).collect()
    }
}

/// Deduplicate and sort ascending; build labels.
fn tick_set(mut values: Vec<f64>) -> Vec<YTick> {
    values.retain(|v| v.is_finite());
    values.sort_by(|a, b| a.total_cmp(b));
    values.dedup();
    values
        .into_iter()
        .map(|value| YTick { value, label: format_tick_value(value), highlighted: highlight(value) })
        .collect()
}

/// Integer part above the reference tick.
fn highlight(value: f64) -> bool {
    value.trunc() > REFERENCE_TICK
}

/// `20` for whole numbers, otherwise up to two decimals without trailing zeros (`12.5`).
pub fn format_tick_value(v: f64) -> String {
    if v.fract() == 0.0 {
        return format!("{}", v as i64);
    }
    let s = format!("{v:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// `dd.mm.`; empty when the date is unknown.
pub fn format_day_month(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d.%m.").to_string()).unwrap_or_default()
}

/// One tick per plotted row plus a trailing tick at `len` for the end date.
pub fn x_ticks(series: &EventSeries) -> Vec<XTick> {
    series
        .points
        .iter()
        .map(|p| XTick { position: p.x as f64, label: format_day_month(p.date) })
        .chain(std::iter::once(XTick {
            position: series.len() as f64,
            label: format_day_month(series.end_date),
        }))
        .collect()
}
