// File: crates/eventplot-core/src/calendar.rs
// Summary: Business-day arithmetic (Mon-Fri, no holiday calendar).

use chrono::{Datelike, Days, NaiveDate, Weekday};

#[inline]
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Advance `date` by `n` business days.
///
/// Each step moves one calendar day and only weekdays count, so a Saturday start plus one is the
/// following Monday and minus one is the preceding Friday. `n == 0` rolls a weekend date forward
/// to Monday and leaves weekdays unchanged. Returns `None` on calendar overflow.
pub fn add_business_days(date: NaiveDate, n: i64) -> Option<NaiveDate> {
    let mut d = date;
    if n == 0 {
        while !is_business_day(d) {
            d = d.succ_opt()?;
        }
        return Some(d);
    }

    // Anchor on the weekday the first step would have left from: Friday going forward,
    // Monday going back. Whole weeks are then exactly seven calendar days.
    while !is_business_day(d) {
        d = if n > 0 { d.pred_opt()? } else { d.succ_opt()? };
    }
    let steps = n.unsigned_abs();
    let weeks = Days::new((steps / 5).checked_mul(7)?);
    d = if n > 0 { d.checked_add_days(weeks)? } else { d.checked_sub_days(weeks)? };

    let mut remaining = steps % 5;
    while remaining > 0 {
        d = if n > 0 { d.succ_opt()? } else { d.pred_opt()? };
        if is_business_day(d) {
            remaining -= 1;
        }
    }
    Some(d)
}
