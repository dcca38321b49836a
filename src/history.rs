//! History normalization: every downstream component works on an "effective"
//! period list that is guaranteed to carry an anchor point whenever the user
//! has supplied one, either by logging a period or through onboarding
//! settings.

use chrono::Duration;
use uuid::Uuid;

use crate::models::{CycleSettings, PeriodRecord, DEFAULT_PERIOD_LENGTH};

/// Return the period list to feed the rest of the engine.
///
/// A non-empty list passes through unchanged (as an owned copy). An empty
/// list with a last-known period date in the settings yields exactly one
/// synthesized record anchored on that date. The synthesized record uses the
/// nil UUID so that identical inputs always produce identical output.
pub fn effective_history(
    periods: &[PeriodRecord],
    settings: Option<&CycleSettings>,
) -> Vec<PeriodRecord> {
    if !periods.is_empty() {
        return periods.to_vec();
    }

    let Some(settings) = settings else {
        return Vec::new();
    };
    let Some(start) = settings.last_period_date else {
        return Vec::new();
    };

    let length = if settings.average_period_length > 0 {
        settings.average_period_length
    } else {
        DEFAULT_PERIOD_LENGTH
    };

    vec![PeriodRecord {
        id: Uuid::nil(),
        start_date: start,
        end_date: Some(start + Duration::days(length - 1)),
        flow_level: None,
    }]
}

/// Most recent record by start date, if any.
pub fn latest(periods: &[PeriodRecord]) -> Option<&PeriodRecord> {
    periods.iter().max_by_key(|p| p.start_date)
}

/// Copy of the history sorted by start date, newest first. The caller's
/// slice is never reordered.
pub fn sorted_desc(periods: &[PeriodRecord]) -> Vec<PeriodRecord> {
    let mut copy = periods.to_vec();
    copy.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    copy
}
