//! Half-open interval overlap detection.
//!
//! A candidate `[start, end)` conflicts with an existing interval iff
//! `start < existing.end && end > existing.start`. Back-to-back intervals
//! (one ending exactly when the next begins) do not conflict.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleConflict;

/// Anything occupying a `[start, end)` span on the calendar.
pub trait Span {
    fn start(&self) -> DateTime<Utc>;
    fn end(&self) -> DateTime<Utc>;

    /// Check if this span overlaps a time range
    fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end() && end > self.start()
    }
}

/// An existing scheduled occupancy the engine must route around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Commitment {
    /// Create an anonymous commitment
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: None,
            start,
            end,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Span for Commitment {
    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// A concrete interval on a specific date, e.g. a zone's window on a Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// A window whose end is not after its start holds no time at all.
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }
}

impl Span for TimeWindow {
    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// Returns true if `[start, end)` overlaps any of `existing`.
pub fn overlaps<T: Span>(start: DateTime<Utc>, end: DateTime<Utc>, existing: &[T]) -> bool {
    existing.iter().any(|e| e.overlaps(start, end))
}

/// Re-check a chosen slot against a fresh commitment snapshot.
///
/// Callers persisting placements optimistically run this right before the
/// write; on `Err` they should pick another slot.
pub fn ensure_slot_free<S: Span, T: Span>(
    slot: &S,
    commitments: &[T],
) -> Result<(), ScheduleConflict> {
    match commitments
        .iter()
        .find(|c| c.overlaps(slot.start(), slot.end()))
    {
        Some(c) => Err(ScheduleConflict {
            start: slot.start(),
            end: slot.end(),
            commitment_start: c.start(),
            commitment_end: c.end(),
        }),
        None => Ok(()),
    }
}
