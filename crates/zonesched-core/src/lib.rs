//! # zonesched Core Library
//!
//! Places tasks into calendar slots according to user-defined zones.
//! Everything here is a pure, synchronous computation over an in-memory
//! snapshot; fetching inputs and persisting placements belong to the caller.
//!
//! ## Architecture
//!
//! - **Conflict detection**: half-open overlap checks against commitments
//! - **Zones**: recurring daily windows with whitelist/blacklist admission
//! - **Slots**: fixed-duration candidates inside zones and in the non-zone
//!   fallback window
//! - **Hybrid orchestration**: zone discovery first, fallback when short
//! - **Preferences**: energy/workload scoring and greedy assignment
//!
//! ## Key Components
//!
//! - [`SchedulingEngine`]: one-call facade over discovery and assignment
//! - [`HybridOrchestrator`]: builds the candidate pool
//! - [`GreedyAssigner`]: places tasks into the pool
//! - [`Config`]: TOML-backed engine defaults
//!
//! ## Concurrency
//!
//! The engine holds no state, so concurrent calls are safe. A caller that
//! reads commitments, schedules, and writes placements must serialize that
//! span per user, or re-check each chosen slot with
//! [`conflict::ensure_slot_free`] right before persisting.

pub mod conflict;
pub mod engine;
pub mod error;
pub mod hybrid;
pub mod preference;
pub mod priority;
pub mod slots;
pub mod storage;
pub mod task;
pub mod validation;
pub mod zone;

pub use conflict::{ensure_slot_free, overlaps, Commitment, Span, TimeWindow};
pub use engine::{EngineConfig, ScheduleOutcome, ScheduleRequest, SchedulingEngine};
pub use error::{ConfigError, CoreError, Result, ScheduleConflict, ValidationError};
pub use hybrid::{CandidatePool, FallbackReason, HybridOrchestrator, PoolStats};
pub use preference::{
    Assignment, EnergyProfile, GreedyAssigner, Placement, PreferenceModel, WorkloadProfile,
};
pub use priority::{prioritize_tasks, task_score};
pub use slots::{CandidateSlot, SlotGenerator, SlotOrigin};
pub use storage::Config;
pub use task::Task;
pub use validation::{validate_request, validate_zone};
pub use zone::{
    default_categories, is_task_admitted, resolve_fallback_window, DailyWindow, DaySet,
    SchedulingMode, Zone,
};
