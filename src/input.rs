//! Parsing and validation of the wire-format inputs.
//!
//! The engine proper assumes well-formed records and never fails; this
//! module is the upstream guard that enforces it. Callers deserializing
//! period lists or settings from JSON should go through here rather than
//! feeding raw payloads to the engine.

use uuid::Uuid;

use crate::models::{CycleSettings, PeriodRecord};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("malformed input: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("period {id} ends before it starts")]
    EndBeforeStart { id: Uuid },
}

/// Deserialize a period list, rejecting records whose end precedes their
/// start.
pub fn periods_from_json(json: &str) -> Result<Vec<PeriodRecord>, InputError> {
    let periods: Vec<PeriodRecord> = serde_json::from_str(json)?;
    for period in &periods {
        if let Some(end) = period.end_date {
            if end < period.start_date {
                return Err(InputError::EndBeforeStart { id: period.id });
            }
        }
    }
    Ok(periods)
}

/// Deserialize cycle settings; absent fields take the documented defaults.
pub fn settings_from_json(json: &str) -> Result<CycleSettings, InputError> {
    Ok(serde_json::from_str(json)?)
}
