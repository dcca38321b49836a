//! Cycle prediction and phase-classification engine.
//!
//! Pure functions over a logged period history, a settings snapshot, and an
//! explicit `today` anchor: no I/O, no system clock, no shared state. The
//! same inputs always produce the same outputs, so results are reproducible
//! and safe to compute from any number of callers concurrently.
//!
//! Data flows one way: [`history`] normalizes the period list, [`stats`]
//! estimates cycle and period length from it, [`prediction`] extrapolates
//! the next period, ovulation, fertile and PMS windows, and [`phase`] /
//! [`period_day`] classify individual calendar dates against those results.
//! [`calendar`] bundles all of it per month for view code, and [`input`]
//! guards the JSON boundary.
//!
//! "Today" is always a parameter. Resolve it once at the outermost call
//! site (e.g. `chrono::Local::now().date_naive()`) and pass it down.

pub mod calendar;
pub mod history;
pub mod input;
pub mod models;
pub mod period_day;
pub mod phase;
pub mod prediction;
pub mod stats;

pub use calendar::month_overview;
pub use history::effective_history;
pub use input::{periods_from_json, settings_from_json, InputError};
pub use models::{
    Confidence, CyclePhase, CyclePrediction, CycleSettings, CycleStatistics, DateWindow,
    DayCategory, DayOverview, FlowLevel, MonthOverview, PeriodDayInfo, PeriodRecord,
    PhaseClassification, ProjectedPeriod,
};
pub use period_day::resolve as resolve_period_day;
pub use phase::{classify as classify_phase, day_category};
pub use prediction::{predict, project_periods, DEFAULT_HORIZON_MONTHS};
pub use stats::estimate as estimate_statistics;
