//! Preference scoring and greedy slot assignment.

mod assigner;
mod profile;

pub use assigner::{Assignment, GreedyAssigner, Placement};
pub use profile::{EnergyProfile, WorkloadProfile};

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Energy and workload profiles used to rank slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceModel {
    #[serde(default)]
    pub energy: EnergyProfile,
    #[serde(default)]
    pub workload: WorkloadProfile,
}

impl PreferenceModel {
    pub fn new(energy: EnergyProfile, workload: WorkloadProfile) -> Self {
        Self { energy, workload }
    }

    /// Score a slot by its start: `energy * 2 + (10 - workload)`.
    ///
    /// A missing hour or day contributes nothing to its term.
    pub fn score(&self, start: DateTime<Utc>) -> i32 {
        let energy = self
            .energy
            .level(start.hour())
            .map_or(0, |e| i32::from(e) * 2);
        let workload = self
            .workload
            .level(start.weekday())
            .map_or(0, |w| 10 - i32::from(w));
        energy + workload
    }
}
