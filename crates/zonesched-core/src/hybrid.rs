//! Two-phase candidate discovery.
//!
//! Phase 1 asks each active whitelist/blacklist zone whether it admits any
//! of the tasks and, if so, collects its free slots over the horizon. Legacy
//! zones contribute directly when their flag allows it. Phase 2 walks the
//! fallback window outside all zones, and only runs when phase 1 came up
//! short. The orchestrator returns the pool; assignment happens elsewhere.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::conflict::Commitment;
use crate::slots::{CandidateSlot, SlotGenerator};
use crate::task::Task;
use crate::zone::{admitted_tasks, resolve_fallback_window, DailyWindow, SchedulingMode, Zone};

/// Why the non-zone phase ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No active zone enables scheduling at all
    NoSchedulingZone,
    /// Zones exist but produced no free slots
    NoZoneSlots,
    /// Fewer zone slots than tasks
    InsufficientZoneSlots { zone_slots: usize, tasks: usize },
}

impl FallbackReason {
    pub fn label(&self) -> &'static str {
        match self {
            FallbackReason::NoSchedulingZone => "no_scheduling_zone",
            FallbackReason::NoZoneSlots => "no_zone_slots",
            FallbackReason::InsufficientZoneSlots { .. } => "insufficient_zone_slots",
        }
    }
}

/// Bookkeeping about how a pool was assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    pub zone_slots: usize,
    pub non_zone_slots: usize,
    pub fallback: Option<FallbackReason>,
}

/// Candidate slots in discovery order: zone slots first, then fallback slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePool {
    pub slots: Vec<CandidateSlot>,
    pub stats: PoolStats,
}

impl CandidatePool {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Runs zone discovery, then non-zone fallback when needed, over an
/// immutable zone snapshot.
pub struct HybridOrchestrator<'a> {
    zones: &'a [Zone],
    default_fallback: &'a DailyWindow,
    generator: SlotGenerator,
}

impl<'a> HybridOrchestrator<'a> {
    pub fn new(
        zones: &'a [Zone],
        default_fallback: &'a DailyWindow,
        generator: SlotGenerator,
    ) -> Self {
        Self {
            zones,
            default_fallback,
            generator,
        }
    }

    /// Build the candidate pool for `tasks` over `days` days from `start`.
    pub fn discover(
        &self,
        tasks: &[Task],
        commitments: &[Commitment],
        start: NaiveDate,
        days: u32,
    ) -> CandidatePool {
        let mut slots = self.zone_phase(tasks, commitments, start, days);
        let zone_slots = slots.len();

        let fallback = self.fallback_reason(tasks.len(), zone_slots);
        let mut non_zone_slots = 0;

        if let Some(reason) = fallback {
            let window = resolve_fallback_window(self.zones, self.default_fallback);
            let extra = self
                .generator
                .non_zone_slots(window, start, days, commitments, self.zones);
            non_zone_slots = extra.len();
            slots.extend(extra);
            info!(
                zone_slots,
                non_zone_slots,
                reason = ?reason,
                "non-zone fallback added slots"
            );
        } else {
            info!(zone_slots, tasks = tasks.len(), "zone slots sufficient, no fallback");
        }

        CandidatePool {
            slots,
            stats: PoolStats {
                zone_slots,
                non_zone_slots,
                fallback,
            },
        }
    }

    fn zone_phase(
        &self,
        tasks: &[Task],
        commitments: &[Commitment],
        start: NaiveDate,
        days: u32,
    ) -> Vec<CandidateSlot> {
        let mut slots = Vec::new();

        for zone in self.zones.iter().filter(|z| z.is_active) {
            let contributes = match &zone.scheduling {
                SchedulingMode::None | SchedulingMode::NonZone { .. } => false,
                SchedulingMode::Whitelist { .. } | SchedulingMode::Blacklist { .. } => {
                    let admitted = admitted_tasks(tasks, zone).len();
                    debug!(
                        zone = %zone.id,
                        mode = zone.scheduling.label(),
                        admitted,
                        "zone admission"
                    );
                    admitted > 0
                }
                SchedulingMode::Legacy { allow_scheduling } => *allow_scheduling,
            };

            if !contributes {
                continue;
            }

            let found = self.generator.zone_slots(zone, start, days, commitments);
            debug!(zone = %zone.id, slots = found.len(), "zone slots");
            slots.extend(found);
        }

        slots
    }

    /// Decide whether the fallback phase runs.
    ///
    /// The sufficiency check compares total zone slots against total tasks,
    /// not per-task feasibility.
    fn fallback_reason(&self, task_count: usize, zone_slots: usize) -> Option<FallbackReason> {
        let has_scheduling_zone = self
            .zones
            .iter()
            .any(|z| z.is_active && z.scheduling.enables_scheduling());

        if !has_scheduling_zone {
            Some(FallbackReason::NoSchedulingZone)
        } else if zone_slots == 0 {
            Some(FallbackReason::NoZoneSlots)
        } else if zone_slots < task_count {
            Some(FallbackReason::InsufficientZoneSlots {
                zone_slots,
                tasks: task_count,
            })
        } else {
            None
        }
    }
}
