//! Scheduling engine facade.
//!
//! Wires the hybrid orchestrator and the greedy assigner together. One call
//! is one self-contained, synchronous computation over the request snapshot;
//! nothing is retained between calls and nothing is persisted.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::conflict::Commitment;
use crate::hybrid::{CandidatePool, HybridOrchestrator, PoolStats};
use crate::preference::{EnergyProfile, GreedyAssigner, Placement, PreferenceModel, WorkloadProfile};
use crate::slots::SlotGenerator;
use crate::task::Task;
use crate::zone::{DailyWindow, Zone};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Length of every candidate slot
    pub slot_duration: Duration,
    /// Number of calendar days searched, starting with the start date
    pub horizon_days: u32,
    /// Fallback window when no active `non_zone` zone supplies one
    pub default_fallback: DailyWindow,
    /// Profiles used when a request carries none
    pub preferences: PreferenceModel,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            slot_duration: Duration::hours(1),
            horizon_days: 7,
            default_fallback: DailyWindow::default(),
            preferences: PreferenceModel::default(),
        }
    }
}

/// Everything one invocation needs, already fetched by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// In placement order: the first task gets first choice
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub commitments: Vec<Commitment>,
    #[serde(default)]
    pub energy: Option<EnergyProfile>,
    #[serde(default)]
    pub workload: Option<WorkloadProfile>,
}

impl ScheduleRequest {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    pub fn with_zones(mut self, zones: Vec<Zone>) -> Self {
        self.zones = zones;
        self
    }

    pub fn with_commitments(mut self, commitments: Vec<Commitment>) -> Self {
        self.commitments = commitments;
        self
    }

    pub fn with_energy(mut self, energy: EnergyProfile) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn with_workload(mut self, workload: WorkloadProfile) -> Self {
        self.workload = Some(workload);
        self
    }
}

/// Result of one invocation. Fewer placements than tasks is expected, not
/// an error: the rest are listed in `unplaced`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub placements: Vec<Placement>,
    pub unplaced: Vec<String>,
    pub pool_stats: PoolStats,
}

/// Zone-aware scheduling engine
pub struct SchedulingEngine {
    config: EngineConfig,
}

impl SchedulingEngine {
    /// Create an engine with default config
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Profiles for `request`: its own where given, config otherwise.
    pub fn preferences_for(&self, request: &ScheduleRequest) -> PreferenceModel {
        PreferenceModel::new(
            request
                .energy
                .clone()
                .unwrap_or_else(|| self.config.preferences.energy.clone()),
            request
                .workload
                .clone()
                .unwrap_or_else(|| self.config.preferences.workload.clone()),
        )
    }

    /// Discover candidate slots without assigning them.
    pub fn candidate_pool(&self, request: &ScheduleRequest, start: NaiveDate) -> CandidatePool {
        HybridOrchestrator::new(
            &request.zones,
            &self.config.default_fallback,
            SlotGenerator::new(self.config.slot_duration),
        )
        .discover(
            &request.tasks,
            &request.commitments,
            start,
            self.config.horizon_days,
        )
    }

    /// Discover slots and place `request.tasks` in order.
    pub fn schedule(&self, request: &ScheduleRequest, start: NaiveDate) -> ScheduleOutcome {
        let pool = self.candidate_pool(request, start);
        let preferences = self.preferences_for(request);
        let assignment =
            GreedyAssigner::new(&preferences, &request.zones).assign(&request.tasks, pool.slots);

        info!(
            tasks = request.tasks.len(),
            placed = assignment.placements.len(),
            unplaced = assignment.unplaced.len(),
            "schedule computed"
        );

        ScheduleOutcome {
            placements: assignment.placements,
            unplaced: assignment.unplaced,
            pool_stats: pool.stats,
        }
    }

    /// [`schedule`](Self::schedule) starting from today's UTC date.
    pub fn schedule_from_today(&self, request: &ScheduleRequest) -> ScheduleOutcome {
        self.schedule(request, Utc::now().date_naive())
    }
}

impl Default for SchedulingEngine {
    fn default() -> Self {
        Self::new()
    }
}
