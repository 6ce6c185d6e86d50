//! Core error types for zonesched-core.
//!
//! The scheduling engine itself never fails: degenerate windows yield no
//! slots and unplaced tasks are reported, not raised. Errors only arise on the
//! caller side of the engine, when loading configuration or validating a
//! request before it is handed over.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Core error type for zonesched-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors raised before a request reaches the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: end_time ({end}) must be greater than start_time ({start})")]
    InvalidTimeRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A zone (or its fallback window) ends before it starts
    #[error("Invalid window on zone '{zone}': end ({end}) must be after start ({start})")]
    InvalidZoneWindow {
        zone: String,
        start: String,
        end: String,
    },

    /// Slot duration outside (0, 24h]
    #[error("Invalid slot duration: {minutes} minutes")]
    InvalidSlotDuration { minutes: i64 },

    /// Horizon beyond the supported range
    #[error("Invalid horizon: {days} days (max {max})")]
    InvalidHorizon { days: u32, max: u32 },

    /// Task priority outside 1-5
    #[error("Invalid priority {priority} on task '{task}' (expected 1-5)")]
    InvalidPriority { task: String, priority: i32 },

    /// Energy/workload profile entry out of range
    #[error("Invalid {profile} profile entry '{key}': {message}")]
    InvalidProfileValue {
        profile: &'static str,
        key: String,
        message: String,
    },

    /// Two records share an id
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
}

/// A chosen slot that collides with a commitment written after the snapshot
/// was taken.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Slot {start}..{end} overlaps commitment {commitment_start}..{commitment_end}")]
pub struct ScheduleConflict {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub commitment_start: DateTime<Utc>,
    pub commitment_end: DateTime<Utc>,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
