//! Phase classification: which of the four cycle phases an arbitrary
//! calendar date falls into, and whether that is an observed fact or an
//! extrapolation.
//!
//! Precedence, first match wins:
//! 1. a date inside any logged period is menstrual, always;
//! 2. past dates with no logged period stay unclassified;
//! 3. a date inside a projected future period window is predicted menstrual;
//! 4. beyond the immediately next calendar month only rule 3 applies;
//! 5. within the current and next month the full fertile / ovulation /
//!    luteal / follicular ordering is evaluated.

use chrono::{Datelike, Duration, NaiveDate};

use crate::history;
use crate::models::{
    CyclePhase, CyclePrediction, CycleSettings, DateWindow, DayCategory, PeriodRecord,
    PhaseClassification, DEFAULT_CYCLE_LENGTH,
};
use crate::prediction::{
    self, DEFAULT_HORIZON_MONTHS, FERTILE_WINDOW_DAYS, LUTEAL_PHASE_DAYS,
};

/// Classify `date` against the logged history and a prediction.
///
/// Returns `None` for past days with no logged period (the engine never
/// retroactively predicts) and for far-future days outside any projected
/// period window.
pub fn classify(
    date: NaiveDate,
    periods: &[PeriodRecord],
    prediction: &CyclePrediction,
    settings: &CycleSettings,
    today: NaiveDate,
) -> Option<PhaseClassification> {
    let effective = history::effective_history(periods, Some(settings));

    // 1. A logged period wins over every prediction, across all records.
    if let Some(record) = effective
        .iter()
        .find(|p| p.spans(date, prediction.period_length))
    {
        return Some(PhaseClassification {
            phase: CyclePhase::Menstrual,
            is_predicted: date >= today,
            starts_on: Some(record.start_date),
            ends_on: Some(record.derived_end(prediction.period_length)),
        });
    }

    // 2. Unlogged past days stay unclassified.
    if date < today {
        return None;
    }

    // 3. Projected future periods.
    let projected =
        prediction::project_periods(&effective, settings, today, DEFAULT_HORIZON_MONTHS);
    if let Some(window) = projected
        .iter()
        .find(|w| w.start_date <= date && date <= w.end_date)
    {
        return Some(PhaseClassification {
            phase: CyclePhase::Menstrual,
            is_predicted: true,
            starts_on: Some(window.start_date),
            ends_on: Some(window.end_date),
        });
    }

    // 4. Full-cycle phase boundaries are only extrapolated one cycle out.
    if month_index(date) > month_index(today) + 1 {
        return None;
    }

    // 5. Fertile / ovulation / luteal / follicular for the near term.
    classify_near_term(date, &effective, prediction, settings, today)
}

/// Months since year zero; comparing indices ignores the day of month.
fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn classify_near_term(
    date: NaiveDate,
    effective: &[PeriodRecord],
    prediction: &CyclePrediction,
    settings: &CycleSettings,
    today: NaiveDate,
) -> Option<PhaseClassification> {
    let (next_start, ovulation) = ovulation_reference(effective, prediction, settings, today)?;

    // (a) Fertile window, the prediction's when it carries one.
    let fertile = prediction.fertile_window.unwrap_or(DateWindow {
        start: ovulation - Duration::days(FERTILE_WINDOW_DAYS),
        end: ovulation,
    });
    if fertile.contains(date) {
        return Some(PhaseClassification {
            phase: CyclePhase::Ovulation,
            is_predicted: true,
            starts_on: Some(fertile.start),
            ends_on: Some(fertile.end),
        });
    }

    // (b) The ovulation day itself, when the supplied window missed it.
    if date == ovulation {
        return Some(PhaseClassification {
            phase: CyclePhase::Ovulation,
            is_predicted: true,
            starts_on: Some(ovulation),
            ends_on: Some(ovulation),
        });
    }

    // (c) Luteal: day after ovulation up to the day before the next period.
    let luteal_start = ovulation + Duration::days(1);
    let luteal_end = next_start.map(|n| n - Duration::days(1));
    if date >= luteal_start && luteal_end.map_or(true, |end| date <= end) {
        return Some(PhaseClassification {
            phase: CyclePhase::Luteal,
            is_predicted: true,
            starts_on: Some(luteal_start),
            ends_on: luteal_end,
        });
    }

    // (d) Follicular: day after the last period's end up to the day before
    // ovulation. Days inside the fertile window never reach this check.
    if let Some(last) = history::latest(effective) {
        let follicular_start = last.derived_end(prediction.period_length) + Duration::days(1);
        let follicular_end = ovulation - Duration::days(1);
        if date >= follicular_start && date <= follicular_end {
            return Some(PhaseClassification {
                phase: CyclePhase::Follicular,
                is_predicted: true,
                starts_on: Some(follicular_start),
                ends_on: Some(follicular_end),
            });
        }
    }

    None
}

/// The next-period/ovulation reference pair for near-term classification.
///
/// Prefers the prediction's own dates; estimates ovulation via the fixed
/// 14-day rule when only a next-period date exists; with neither, re-anchors
/// on the last period and the settings cycle length. `None` only when there
/// is no history at all.
fn ovulation_reference(
    effective: &[PeriodRecord],
    prediction: &CyclePrediction,
    settings: &CycleSettings,
    today: NaiveDate,
) -> Option<(Option<NaiveDate>, NaiveDate)> {
    match (prediction.next_period_start, prediction.ovulation_date) {
        (next, Some(ovulation)) => Some((next, ovulation)),
        (Some(next), None) => Some((Some(next), next - Duration::days(LUTEAL_PHASE_DAYS))),
        (None, None) => {
            let last = history::latest(effective)?;
            let cycle_length = if settings.average_cycle_length > 0 {
                settings.average_cycle_length
            } else {
                DEFAULT_CYCLE_LENGTH
            };
            let next = prediction::next_period_start(last.start_date, cycle_length, today);
            Some((Some(next), next - Duration::days(LUTEAL_PHASE_DAYS)))
        }
    }
}

/// Coarse per-day bucket over [`classify`], for callers that only need the
/// historical period / predicted-period / fertile / pms / normal vocabulary.
pub fn day_category(
    date: NaiveDate,
    periods: &[PeriodRecord],
    prediction: &CyclePrediction,
    settings: &CycleSettings,
    today: NaiveDate,
) -> DayCategory {
    let Some(classification) = classify(date, periods, prediction, settings, today) else {
        return DayCategory::Normal;
    };

    match classification.phase {
        CyclePhase::Menstrual if classification.is_predicted => DayCategory::PredictedPeriod,
        CyclePhase::Menstrual => DayCategory::Period,
        CyclePhase::Ovulation => DayCategory::Fertile,
        CyclePhase::Luteal
            if prediction
                .pms_window
                .map_or(false, |w| w.contains(date)) =>
        {
            DayCategory::Pms
        }
        CyclePhase::Luteal | CyclePhase::Follicular => DayCategory::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::predict;
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(start: &str, end: Option<&str>) -> PeriodRecord {
        PeriodRecord {
            id: Uuid::new_v4(),
            start_date: date(start),
            end_date: end.map(date),
            flow_level: None,
        }
    }

    /// Two clean 28-day cycles ending Jan 29; "today" mid-February.
    fn fixture() -> (Vec<PeriodRecord>, CycleSettings, NaiveDate) {
        let periods = vec![
            record("2024-01-01", Some("2024-01-05")),
            record("2024-01-29", Some("2024-02-02")),
        ];
        (periods, CycleSettings::default(), date("2024-02-20"))
    }

    fn classify_on(
        day: &str,
        periods: &[PeriodRecord],
        settings: &CycleSettings,
        today: NaiveDate,
    ) -> Option<PhaseClassification> {
        let prediction = predict(periods, settings, today);
        classify(date(day), periods, &prediction, settings, today)
    }

    #[test]
    fn logged_period_day_is_actual_menstrual() {
        let (periods, settings, today) = fixture();
        let got = classify_on("2024-01-30", &periods, &settings, today).unwrap();
        assert_eq!(got.phase, CyclePhase::Menstrual);
        assert!(!got.is_predicted);
        assert_eq!(got.starts_on, Some(date("2024-01-29")));
        assert_eq!(got.ends_on, Some(date("2024-02-02")));
    }

    #[test]
    fn older_logged_periods_match_too() {
        let (periods, settings, today) = fixture();
        let got = classify_on("2024-01-03", &periods, &settings, today).unwrap();
        assert_eq!(got.phase, CyclePhase::Menstrual);
        assert!(!got.is_predicted);
    }

    #[test]
    fn unlogged_past_day_is_unclassified() {
        let (periods, settings, today) = fixture();
        assert_eq!(classify_on("2024-01-20", &periods, &settings, today), None);
    }

    #[test]
    fn projected_window_is_predicted_menstrual() {
        let (periods, settings, today) = fixture();
        // Next projected period: Feb 26 .. Mar 1.
        let got = classify_on("2024-02-27", &periods, &settings, today).unwrap();
        assert_eq!(got.phase, CyclePhase::Menstrual);
        assert!(got.is_predicted);
        assert_eq!(got.starts_on, Some(date("2024-02-26")));
        assert_eq!(got.ends_on, Some(date("2024-03-01")));
    }

    #[test]
    fn far_future_non_period_day_is_unclassified() {
        let (periods, settings, today) = fixture();
        // April is two months past February: projected periods only.
        assert_eq!(classify_on("2024-04-10", &periods, &settings, today), None);
        let projected = classify_on("2024-04-23", &periods, &settings, today).unwrap();
        assert_eq!(projected.phase, CyclePhase::Menstrual);
        assert!(projected.is_predicted);
    }

    #[test]
    fn luteal_between_ovulation_and_next_period() {
        let (periods, settings, today) = fixture();
        // Ovulation Feb 12; next period Feb 26; today Feb 20.
        let got = classify_on("2024-02-21", &periods, &settings, today).unwrap();
        assert_eq!(got.phase, CyclePhase::Luteal);
        assert_eq!(got.starts_on, Some(date("2024-02-13")));
        assert_eq!(got.ends_on, Some(date("2024-02-25")));
    }

    #[test]
    fn fertile_window_classifies_as_ovulation() {
        let periods = vec![
            record("2024-01-01", Some("2024-01-05")),
            record("2024-01-29", Some("2024-02-02")),
        ];
        let settings = CycleSettings::default();
        // Earlier "today" so the fertile window (Feb 7..Feb 12) is ahead.
        let today = date("2024-02-05");
        let got = classify_on("2024-02-10", &periods, &settings, today).unwrap();
        assert_eq!(got.phase, CyclePhase::Ovulation);
        assert_eq!(got.starts_on, Some(date("2024-02-07")));
        assert_eq!(got.ends_on, Some(date("2024-02-12")));
    }

    #[test]
    fn follicular_between_period_end_and_fertile_window() {
        let periods = vec![
            record("2024-01-01", Some("2024-01-05")),
            record("2024-01-29", Some("2024-02-02")),
        ];
        let settings = CycleSettings::default();
        let today = date("2024-02-03");
        let got = classify_on("2024-02-04", &periods, &settings, today).unwrap();
        assert_eq!(got.phase, CyclePhase::Follicular);
        assert_eq!(got.starts_on, Some(date("2024-02-03")));
        assert_eq!(got.ends_on, Some(date("2024-02-11")));
    }

    #[test]
    fn logged_period_beats_fertile_window() {
        // A logged period sitting inside what would be the fertile window.
        let periods = vec![
            record("2024-01-01", Some("2024-01-05")),
            record("2024-01-29", Some("2024-02-02")),
            record("2024-02-08", Some("2024-02-11")),
        ];
        let settings = CycleSettings::default();
        let today = date("2024-02-05");
        let got = classify_on("2024-02-10", &periods, &settings, today).unwrap();
        assert_eq!(got.phase, CyclePhase::Menstrual);
    }

    #[test]
    fn today_inside_logged_period_counts_as_predicted() {
        let periods = vec![record("2024-02-18", Some("2024-02-22"))];
        let settings = CycleSettings::default();
        let today = date("2024-02-20");
        let got = classify_on("2024-02-20", &periods, &settings, today).unwrap();
        assert_eq!(got.phase, CyclePhase::Menstrual);
        assert!(got.is_predicted);
    }

    #[test]
    fn no_history_at_all_classifies_nothing() {
        let settings = CycleSettings::default();
        assert_eq!(classify_on("2024-02-21", &[], &settings, date("2024-02-20")), None);
    }

    #[test]
    fn empty_prediction_falls_back_to_settings_estimate() {
        // History exists but the caller supplies a prediction with no dates:
        // the classifier re-anchors on the last period and the settings
        // cycle length.
        let periods = vec![record("2024-01-29", Some("2024-02-02"))];
        let settings = CycleSettings::default();
        let today = date("2024-02-20");
        let empty = CyclePrediction {
            next_period_start: None,
            next_period_end: None,
            ovulation_date: None,
            fertile_window: None,
            pms_window: None,
            cycle_length: 28,
            period_length: 5,
            confidence: crate::models::Confidence::Low,
        };
        // Estimated next period Feb 26, ovulation Feb 12, so Feb 21 is luteal.
        let got = classify(date("2024-02-21"), &periods, &empty, &settings, today).unwrap();
        assert_eq!(got.phase, CyclePhase::Luteal);
    }

    #[test]
    fn day_category_maps_phases_to_coarse_buckets() {
        let (periods, settings, today) = fixture();
        let prediction = predict(&periods, &settings, today);

        // Logged period day.
        assert_eq!(
            day_category(date("2024-01-30"), &periods, &prediction, &settings, today),
            DayCategory::Period
        );
        // Projected period day.
        assert_eq!(
            day_category(date("2024-02-27"), &periods, &prediction, &settings, today),
            DayCategory::PredictedPeriod
        );
        // Luteal day inside the PMS window (Feb 21..Feb 25).
        assert_eq!(
            day_category(date("2024-02-22"), &periods, &prediction, &settings, today),
            DayCategory::Pms
        );
        // Luteal day before the PMS window.
        assert_eq!(
            day_category(date("2024-02-20"), &periods, &prediction, &settings, today),
            DayCategory::Normal
        );
        // Unclassified past day.
        assert_eq!(
            day_category(date("2024-01-20"), &periods, &prediction, &settings, today),
            DayCategory::Normal
        );
    }

    #[test]
    fn day_category_fertile_from_ovulation_phase() {
        let periods = vec![
            record("2024-01-01", Some("2024-01-05")),
            record("2024-01-29", Some("2024-02-02")),
        ];
        let settings = CycleSettings::default();
        let today = date("2024-02-05");
        let prediction = predict(&periods, &settings, today);
        assert_eq!(
            day_category(date("2024-02-10"), &periods, &prediction, &settings, today),
            DayCategory::Fertile
        );
    }
}
