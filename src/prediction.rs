//! Next-period prediction and future period projection.

use chrono::{Duration, Months, NaiveDate};

use crate::history;
use crate::models::{
    CyclePrediction, CycleSettings, DateWindow, PeriodRecord, ProjectedPeriod,
};
use crate::stats;

/// Ovulation is assumed a fixed 14 days before the next period start.
pub const LUTEAL_PHASE_DAYS: i64 = 14;
/// The fertile window opens this many days before ovulation.
pub const FERTILE_WINDOW_DAYS: i64 = 5;
/// The PMS window covers this many days before the next period.
pub const PMS_WINDOW_DAYS: i64 = 5;
/// Default projection horizon.
pub const DEFAULT_HORIZON_MONTHS: u32 = 6;

/// Upper bound on projected windows per call. Keeps projection finite even
/// with pathological cycle-length inputs.
const PROJECTION_CAP: usize = 100;

/// Predict the next period, ovulation day, fertile window, and PMS window.
///
/// `today` anchors the prediction; the next period start is always strictly
/// after it, however far in the past the last logged period lies. With no
/// usable history every date field is `None` and only the resolved lengths
/// and a low confidence tier are returned.
pub fn predict(
    periods: &[PeriodRecord],
    settings: &CycleSettings,
    today: NaiveDate,
) -> CyclePrediction {
    let effective = history::effective_history(periods, Some(settings));
    let statistics = stats::estimate(&effective, settings);

    let Some(last) = history::latest(&effective) else {
        return CyclePrediction {
            next_period_start: None,
            next_period_end: None,
            ovulation_date: None,
            fertile_window: None,
            pms_window: None,
            cycle_length: statistics.cycle_length,
            period_length: statistics.period_length,
            confidence: statistics.confidence,
        };
    };

    let next_start = next_period_start(last.start_date, statistics.cycle_length, today);
    let ovulation = next_start - Duration::days(LUTEAL_PHASE_DAYS);

    CyclePrediction {
        next_period_start: Some(next_start),
        next_period_end: Some(next_start + Duration::days(statistics.period_length - 1)),
        ovulation_date: Some(ovulation),
        fertile_window: Some(DateWindow {
            start: ovulation - Duration::days(FERTILE_WINDOW_DAYS),
            end: ovulation,
        }),
        pms_window: Some(DateWindow {
            start: next_start - Duration::days(PMS_WINDOW_DAYS),
            end: next_start - Duration::days(1),
        }),
        cycle_length: statistics.cycle_length,
        period_length: statistics.period_length,
        confidence: statistics.confidence,
    }
}

/// First period start strictly after `today`, advancing from `anchor` by
/// whole cycle lengths.
pub(crate) fn next_period_start(anchor: NaiveDate, cycle_length: i64, today: NaiveDate) -> NaiveDate {
    let cycle_length = cycle_length.max(1);
    let candidate = anchor + Duration::days(cycle_length);
    if candidate > today {
        return candidate;
    }
    // Anchor is at least one full cycle in the past; skip the elapsed whole
    // cycles in one step instead of looping.
    let elapsed_cycles = (today - anchor).num_days() / cycle_length + 1;
    anchor + Duration::days(elapsed_cycles * cycle_length)
}

/// Enumerate predicted period windows from the last period start out to
/// `today + horizon_months`.
///
/// Each advance of one estimated cycle length emits a
/// `[start, start + period_length - 1]` window. Iteration stops past the
/// horizon or at a safety cap, so a degenerate cycle length can never hang
/// the caller.
pub fn project_periods(
    periods: &[PeriodRecord],
    settings: &CycleSettings,
    today: NaiveDate,
    horizon_months: u32,
) -> Vec<ProjectedPeriod> {
    let effective = history::effective_history(periods, Some(settings));
    let Some(last) = history::latest(&effective) else {
        return Vec::new();
    };
    let statistics = stats::estimate(&effective, settings);
    let step = statistics.cycle_length.max(1);

    let horizon = today
        .checked_add_months(Months::new(horizon_months))
        .unwrap_or(NaiveDate::MAX);

    let mut windows = Vec::new();
    let mut anchor = last.start_date;
    for _ in 0..PROJECTION_CAP {
        anchor += Duration::days(step);
        if anchor > horizon {
            break;
        }
        windows.push(ProjectedPeriod {
            start_date: anchor,
            end_date: anchor + Duration::days(statistics.period_length - 1),
        });
    }
    windows
}
