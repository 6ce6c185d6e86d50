//! Request validation, run by callers before handing a request to the engine.
//!
//! The engine itself tolerates degenerate input (it simply finds no slots);
//! these checks exist so an HTTP or CLI layer can reject malformed input with
//! a useful message instead of returning an empty schedule.

use std::collections::HashSet;

use chrono::Duration;

use crate::engine::{EngineConfig, ScheduleRequest};
use crate::error::ValidationError;
use crate::preference::{EnergyProfile, WorkloadProfile};
use crate::zone::{weekday_name, DailyWindow, Zone};

/// Longest horizon accepted.
pub const MAX_HORIZON_DAYS: u32 = 366;

/// Validate engine settings.
pub fn validate_config(config: &EngineConfig) -> Result<(), ValidationError> {
    if config.slot_duration <= Duration::zero() || config.slot_duration > Duration::hours(24) {
        return Err(ValidationError::InvalidSlotDuration {
            minutes: config.slot_duration.num_minutes(),
        });
    }
    if config.horizon_days > MAX_HORIZON_DAYS {
        return Err(ValidationError::InvalidHorizon {
            days: config.horizon_days,
            max: MAX_HORIZON_DAYS,
        });
    }
    validate_window("default", &config.default_fallback)?;
    validate_energy(&config.preferences.energy)?;
    validate_workload(&config.preferences.workload)
}

/// Validate a request against `config`. Returns the first problem found.
pub fn validate_request(
    request: &ScheduleRequest,
    config: &EngineConfig,
) -> Result<(), ValidationError> {
    validate_config(config)?;

    let mut task_ids = HashSet::new();
    for task in &request.tasks {
        if !task_ids.insert(task.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                kind: "task",
                id: task.id.clone(),
            });
        }
        if let Some(priority) = task.priority {
            if !(1..=5).contains(&priority) {
                return Err(ValidationError::InvalidPriority {
                    task: task.id.clone(),
                    priority,
                });
            }
        }
    }

    let mut zone_ids = HashSet::new();
    for zone in &request.zones {
        if !zone_ids.insert(zone.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                kind: "zone",
                id: zone.id.clone(),
            });
        }
        validate_zone(zone)?;
    }

    for commitment in &request.commitments {
        if commitment.end < commitment.start {
            return Err(ValidationError::InvalidTimeRange {
                start: commitment.start,
                end: commitment.end,
            });
        }
    }

    if let Some(energy) = &request.energy {
        validate_energy(energy)?;
    }
    if let Some(workload) = &request.workload {
        validate_workload(workload)?;
    }

    Ok(())
}

/// A zone's own window must be non-empty, except on `non_zone` zones where
/// only the fallback window matters.
pub fn validate_zone(zone: &Zone) -> Result<(), ValidationError> {
    match zone.fallback_window() {
        Some(fallback) => validate_window(&zone.id, fallback),
        None => validate_window(&zone.id, &zone.daily_window()),
    }
}

fn validate_window(zone: &str, window: &DailyWindow) -> Result<(), ValidationError> {
    if window.end <= window.start {
        return Err(ValidationError::InvalidZoneWindow {
            zone: zone.to_string(),
            start: window.start.format("%H:%M").to_string(),
            end: window.end.format("%H:%M").to_string(),
        });
    }
    Ok(())
}

fn validate_energy(energy: &EnergyProfile) -> Result<(), ValidationError> {
    for (hour, level) in energy.entries() {
        if !(1..=10).contains(&level) {
            return Err(ValidationError::InvalidProfileValue {
                profile: "energy",
                key: hour.to_string(),
                message: format!("level {level} outside 1-10"),
            });
        }
    }
    Ok(())
}

fn validate_workload(workload: &WorkloadProfile) -> Result<(), ValidationError> {
    for (day, level) in workload.entries() {
        if !(1..=10).contains(&level) {
            return Err(ValidationError::InvalidProfileValue {
                profile: "workload",
                key: weekday_name(day).to_string(),
                message: format!("level {level} outside 1-10"),
            });
        }
    }
    Ok(())
}
