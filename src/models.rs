use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback cycle length in days when history and settings give nothing usable.
pub const DEFAULT_CYCLE_LENGTH: i64 = 28;
/// Fallback period length in days.
pub const DEFAULT_PERIOD_LENGTH: i64 = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlowLevel {
    Light,
    Medium,
    Heavy,
}

/// A logged bleeding interval. Created and deleted by the user elsewhere;
/// the engine only ever reads these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecord {
    pub id: Uuid,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub flow_level: Option<FlowLevel>,
}

impl PeriodRecord {
    /// Inclusive end of this period: the stored end when present, otherwise
    /// `start + period_length - 1`.
    pub fn derived_end(&self, period_length: i64) -> NaiveDate {
        self.end_date
            .unwrap_or_else(|| self.start_date + Duration::days((period_length - 1).max(0)))
    }

    /// Whether `date` falls inside `[start, derived_end]`.
    pub fn spans(&self, date: NaiveDate, period_length: i64) -> bool {
        self.start_date <= date && date <= self.derived_end(period_length)
    }
}

/// User cycle settings, an immutable snapshot supplied per call.
/// Absent wire fields fall back to the documented defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CycleSettings {
    #[serde(default = "default_cycle_length")]
    pub average_cycle_length: i64,
    #[serde(default = "default_period_length")]
    pub average_period_length: i64,
    #[serde(default)]
    pub last_period_date: Option<NaiveDate>,
}

fn default_cycle_length() -> i64 {
    DEFAULT_CYCLE_LENGTH
}

fn default_period_length() -> i64 {
    DEFAULT_PERIOD_LENGTH
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            average_cycle_length: DEFAULT_CYCLE_LENGTH,
            average_period_length: DEFAULT_PERIOD_LENGTH,
            last_period_date: None,
        }
    }
}

/// Qualitative reliability of predictions, by how many cycle intervals were
/// observed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Output of the statistics estimator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CycleStatistics {
    /// Resolved average cycle length in days, always positive.
    pub cycle_length: i64,
    /// Resolved average period length in days, always positive.
    pub period_length: i64,
    pub confidence: Confidence,
    /// Number of start-to-start intervals the cycle length was averaged over.
    pub cycle_samples: usize,
    pub total_periods: usize,
    pub shortest_cycle: Option<i64>,
    pub longest_cycle: Option<i64>,
    /// How regular the observed cycles are, in `[0.1, 0.95]`; 0.5 when fewer
    /// than two intervals were observed.
    pub regularity: f32,
}

/// Derived prediction for the cycle in progress. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CyclePrediction {
    pub next_period_start: Option<NaiveDate>,
    pub next_period_end: Option<NaiveDate>,
    pub ovulation_date: Option<NaiveDate>,
    pub fertile_window: Option<DateWindow>,
    pub pms_window: Option<DateWindow>,
    pub cycle_length: i64,
    pub period_length: i64,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

/// Which phase a calendar date falls into, and whether that is an observed
/// fact or an extrapolation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhaseClassification {
    pub phase: CyclePhase,
    pub is_predicted: bool,
    /// First day of the phase, when known.
    pub starts_on: Option<NaiveDate>,
    /// Last day of the phase; `None` when open-ended.
    pub ends_on: Option<NaiveDate>,
}

/// Position of a date within a period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDayInfo {
    /// 1-based ordinal within the period.
    pub day_number: i64,
    pub day_label: String,
    pub period_length: i64,
    pub is_start: bool,
    pub is_middle: bool,
    pub is_end: bool,
}

/// A predicted future period window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Coarse per-day bucket for callers that don't need full phase detail.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayCategory {
    Period,
    PredictedPeriod,
    Fertile,
    Pms,
    Normal,
}

/// Everything the engine knows about one day of a month view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayOverview {
    pub date: NaiveDate,
    pub category: DayCategory,
    pub phase: Option<PhaseClassification>,
    pub period_day: Option<PeriodDayInfo>,
}

/// Engine output for a whole calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthOverview {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayOverview>,
    pub prediction: CyclePrediction,
    pub statistics: CycleStatistics,
    pub projected: Vec<ProjectedPeriod>,
}
