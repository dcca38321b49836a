//! Month-view aggregation: one call that runs the whole engine for every
//! day of a calendar month, so screens never re-derive prediction logic
//! themselves.

use chrono::{Duration, NaiveDate};

use crate::history;
use crate::models::{CycleSettings, DayOverview, MonthOverview, PeriodRecord};
use crate::period_day;
use crate::phase;
use crate::prediction::{self, DEFAULT_HORIZON_MONTHS};
use crate::stats;

/// Classify every day of `year`/`month` and bundle the month-independent
/// prediction, statistics, and projected windows alongside.
///
/// Returns `None` only for an invalid year/month pair.
pub fn month_overview(
    year: i32,
    month: u32,
    periods: &[PeriodRecord],
    settings: &CycleSettings,
    today: NaiveDate,
) -> Option<MonthOverview> {
    let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last_day = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }? - Duration::days(1);

    let effective = history::effective_history(periods, Some(settings));
    let statistics = stats::estimate(&effective, settings);
    let prediction = prediction::predict(&effective, settings, today);
    let projected =
        prediction::project_periods(&effective, settings, today, DEFAULT_HORIZON_MONTHS);

    let mut days = Vec::with_capacity(31);
    let mut date = first_day;
    while date <= last_day {
        days.push(DayOverview {
            date,
            category: phase::day_category(date, &effective, &prediction, settings, today),
            phase: phase::classify(date, &effective, &prediction, settings, today),
            period_day: period_day::resolve(date, &effective, prediction.period_length),
        });
        date += Duration::days(1);
    }

    Some(MonthOverview {
        year,
        month,
        days,
        prediction,
        statistics,
        projected,
    })
}
