//! Day-of-period ordinals: "3rd day" badges and start/middle/end flags.

use chrono::{Duration, NaiveDate};

use crate::models::{PeriodDayInfo, PeriodRecord};

/// Position of `date` within the period containing it, or `None` when no
/// period does.
///
/// Containment is always judged against `[start, start + period_length - 1]`
/// from the supplied length, ignoring stored ends, so an edited average
/// period length reflows day numbering retroactively. When spans overlap the
/// most recently started period wins.
pub fn resolve(
    date: NaiveDate,
    periods: &[PeriodRecord],
    period_length: i64,
) -> Option<PeriodDayInfo> {
    if period_length <= 0 {
        return None;
    }

    let record = periods
        .iter()
        .filter(|p| {
            p.start_date <= date && date < p.start_date + Duration::days(period_length)
        })
        .max_by_key(|p| p.start_date)?;

    let day_number = (date - record.start_date).num_days() + 1;
    if day_number > period_length {
        return None;
    }

    Some(PeriodDayInfo {
        day_number,
        day_label: ordinal_label(day_number),
        period_length,
        is_start: day_number == 1,
        is_middle: day_number > 1 && day_number < period_length,
        is_end: day_number == period_length,
    })
}

/// "1st day", "2nd day", "3rd day", then "{n}th day" for everything after.
fn ordinal_label(day_number: i64) -> String {
    match day_number {
        1 => "1st day".to_string(),
        2 => "2nd day".to_string(),
        3 => "3rd day".to_string(),
        n => format!("{n}th day"),
    }
}
