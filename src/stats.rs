//! Statistical estimation of cycle and period length from the effective
//! history.

use crate::history;
use crate::models::{
    Confidence, CycleSettings, CycleStatistics, PeriodRecord, DEFAULT_CYCLE_LENGTH,
    DEFAULT_PERIOD_LENGTH,
};

/// Derive average cycle and period length from the effective history.
///
/// Cycle length is the mean day difference between consecutive period
/// starts, rounded to the nearest whole day. With fewer than two periods the
/// settings value applies; any non-positive resolved value falls back to the
/// crate default. Period length averages the explicit span of each period
/// (`end - start + 1`), substituting the settings value for open-ended
/// records.
pub fn estimate(periods: &[PeriodRecord], settings: &CycleSettings) -> CycleStatistics {
    let sorted = history::sorted_desc(periods);

    // Day differences between consecutive starts, newest pair first.
    let intervals: Vec<i64> = sorted
        .windows(2)
        .map(|w| (w[0].start_date - w[1].start_date).num_days().abs())
        .collect();
    let interval_samples: Vec<f64> = intervals.iter().map(|&d| d as f64).collect();

    let cycle_length = if interval_samples.is_empty() {
        settings.average_cycle_length
    } else {
        mean(&interval_samples).round() as i64
    };
    let cycle_length = if cycle_length > 0 {
        cycle_length
    } else {
        DEFAULT_CYCLE_LENGTH
    };

    let period_samples: Vec<f64> = sorted
        .iter()
        .map(|p| match p.end_date {
            Some(end) => (end - p.start_date).num_days() as f64 + 1.0,
            None => settings.average_period_length as f64,
        })
        .collect();
    let period_length = if period_samples.is_empty() {
        settings.average_period_length
    } else {
        mean(&period_samples).round() as i64
    };
    let period_length = if period_length > 0 {
        period_length
    } else {
        DEFAULT_PERIOD_LENGTH
    };

    let confidence = if intervals.len() >= 3 {
        Confidence::High
    } else if !intervals.is_empty() {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    let regularity = {
        let avg = mean(&interval_samples);
        if interval_samples.len() < 2 {
            0.5
        } else if avg <= 0.0 {
            0.1
        } else {
            (1.0 - (std_deviation(&interval_samples) / avg) as f32).clamp(0.1, 0.95)
        }
    };

    CycleStatistics {
        cycle_length,
        period_length,
        confidence,
        cycle_samples: intervals.len(),
        total_periods: sorted.len(),
        shortest_cycle: intervals.iter().copied().min(),
        longest_cycle: intervals.iter().copied().max(),
        regularity,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_deviation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
