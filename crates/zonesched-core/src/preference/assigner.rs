//! Greedy, first-come assignment of tasks to pooled slots.
//!
//! Tasks are visited in the order given. Each takes the highest-scoring slot
//! it may occupy (first slot wins ties), and that slot leaves the pool before
//! the next task is considered. Earlier choices are never revisited.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::PreferenceModel;
use crate::conflict::Span;
use crate::slots::{CandidateSlot, SlotOrigin};
use crate::task::Task;
use crate::zone::{is_task_admitted, Zone};

/// A task bound to a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub task_id: String,
    pub slot: CandidateSlot,
    pub score: i32,
    /// Always true for engine output; callers flip it for manual edits.
    pub auto_generated: bool,
}

/// Placements plus the ids of tasks that got none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub placements: Vec<Placement>,
    pub unplaced: Vec<String>,
}

/// Greedy assigner over a candidate pool.
pub struct GreedyAssigner<'a> {
    model: &'a PreferenceModel,
    zones: HashMap<&'a str, &'a Zone>,
}

impl<'a> GreedyAssigner<'a> {
    /// `zones` is the same snapshot the pool was discovered from; it is used
    /// to keep tasks out of zone slots whose zone does not admit them.
    pub fn new(model: &'a PreferenceModel, zones: &'a [Zone]) -> Self {
        let mut by_id = HashMap::with_capacity(zones.len());
        for zone in zones {
            by_id.entry(zone.id.as_str()).or_insert(zone);
        }
        Self {
            model,
            zones: by_id,
        }
    }

    /// Whether `task` may take `slot`. Fallback slots are open to every task.
    pub fn may_occupy(&self, task: &Task, slot: &CandidateSlot) -> bool {
        match &slot.origin {
            SlotOrigin::NonZone => true,
            SlotOrigin::Zone { zone_id } => self
                .zones
                .get(zone_id.as_str())
                .is_some_and(|zone| is_task_admitted(task, zone)),
        }
    }

    /// Index and score of the best slot for `task`, first on ties.
    fn best_slot(&self, task: &Task, pool: &[CandidateSlot]) -> Option<(usize, i32)> {
        let mut best: Option<(usize, i32)> = None;
        for (idx, slot) in pool.iter().enumerate() {
            if !self.may_occupy(task, slot) {
                continue;
            }
            let score = self.model.score(slot.start);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((idx, score)),
            }
        }
        best
    }

    /// Place `tasks` in order, consuming `pool`.
    pub fn assign(&self, tasks: &[Task], mut pool: Vec<CandidateSlot>) -> Assignment {
        let mut assignment = Assignment::default();

        for (position, task) in tasks.iter().enumerate() {
            if pool.is_empty() {
                warn!(
                    remaining = tasks.len() - position,
                    "candidate pool exhausted, remaining tasks unplaced"
                );
                assignment
                    .unplaced
                    .extend(tasks[position..].iter().map(|t| t.id.clone()));
                break;
            }

            let Some((idx, score)) = self.best_slot(task, &pool) else {
                warn!(task = %task.id, "no admissible slot for task");
                assignment.unplaced.push(task.id.clone());
                continue;
            };

            let chosen = pool[idx].clone();
            // Duplicates discovered by several zones, and any overlapping
            // step from a zone with a different alignment, go with it.
            pool.retain(|s| !s.same_interval(&chosen) && !s.overlaps(chosen.start, chosen.end));

            debug!(
                task = %task.id,
                start = %chosen.start,
                end = %chosen.end,
                score,
                "placed task"
            );
            assignment.placements.push(Placement {
                task_id: task.id.clone(),
                slot: chosen,
                score,
                auto_generated: true,
            });
        }

        assignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};

    use crate::zone::SchedulingMode;

    fn at(day: u32, h: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
            .and_utc()
    }

    fn free(day: u32, h: u32) -> CandidateSlot {
        CandidateSlot::new(at(day, h), at(day, h) + Duration::hours(1), SlotOrigin::NonZone)
    }

    fn zoned(zone: &str, day: u32, h: u32) -> CandidateSlot {
        CandidateSlot::new(
            at(day, h),
            at(day, h) + Duration::hours(1),
            SlotOrigin::Zone { zone_id: zone.into() },
        )
    }

    #[test]
    fn test_picks_highest_score() {
        let model = PreferenceModel::default();
        let assigner = GreedyAssigner::new(&model, &[]);
        // Monday 10 (3), Monday 15 (17), Monday 9 (19)
        let pool = vec![free(19, 10), free(19, 15), free(19, 9)];

        let result = assigner.assign(&[Task::new("t", "work", "x")], pool);
        assert_eq!(result.placements.len(), 1);
        assert_eq!(result.placements[0].slot.start.hour(), 9);
        assert_eq!(result.placements[0].score, 19);
        assert!(result.placements[0].auto_generated);
    }

    #[test]
    fn test_ties_go_to_first_slot() {
        let model = PreferenceModel::default();
        let assigner = GreedyAssigner::new(&model, &[]);
        // 10:00 and 11:00 on Monday both score 3
        let pool = vec![free(19, 11), free(19, 10)];

        let result = assigner.assign(&[Task::new("t", "work", "x")], pool);
        assert_eq!(result.placements[0].slot.start.hour(), 11);
    }

    #[test]
    fn test_slots_are_not_reused() {
        let model = PreferenceModel::default();
        let assigner = GreedyAssigner::new(&model, &[]);
        let pool = vec![free(19, 9), free(19, 15)];
        let tasks = vec![Task::new("a", "w", "x"), Task::new("b", "w", "x")];

        let result = assigner.assign(&tasks, pool);
        assert_eq!(result.placements[0].task_id, "a");
        assert_eq!(result.placements[0].slot.start.hour(), 9);
        assert_eq!(result.placements[1].task_id, "b");
        assert_eq!(result.placements[1].slot.start.hour(), 15);
        assert!(result.unplaced.is_empty());
    }

    #[test]
    fn test_exhausted_pool_reports_unplaced() {
        let model = PreferenceModel::default();
        let assigner = GreedyAssigner::new(&model, &[]);
        let tasks = vec![
            Task::new("a", "w", "x"),
            Task::new("b", "w", "x"),
            Task::new("c", "w", "x"),
        ];

        let result = assigner.assign(&tasks, vec![free(19, 9)]);
        assert_eq!(result.placements.len(), 1);
        assert_eq!(result.unplaced, vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_duplicate_intervals_removed_together() {
        let model = PreferenceModel::default();
        let assigner = GreedyAssigner::new(&model, &[]);
        let pool = vec![free(19, 9), free(19, 9), free(19, 15)];
        let tasks = vec![Task::new("a", "w", "x"), Task::new("b", "w", "x")];

        let result = assigner.assign(&tasks, pool);
        assert_eq!(result.placements[1].slot.start.hour(), 15);
    }

    #[test]
    fn test_zone_slots_only_for_admitted_tasks() {
        let zones = vec![Zone::new(
            "work",
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        )
        .with_mode(SchedulingMode::whitelist_categories(["work"]))];
        let model = PreferenceModel::default();
        let assigner = GreedyAssigner::new(&model, &zones);

        // The personal task is first in line but must leave the zone slot.
        let pool = vec![zoned("work", 19, 9), free(19, 12)];
        let tasks = vec![Task::new("p", "personal", "x"), Task::new("w", "work", "x")];

        let result = assigner.assign(&tasks, pool);
        assert_eq!(result.placements[0].task_id, "p");
        assert_eq!(result.placements[0].slot.start.hour(), 12);
        assert_eq!(result.placements[1].task_id, "w");
        assert_eq!(result.placements[1].slot.zone_id(), Some("work"));
    }

    #[test]
    fn test_task_without_admissible_slot_is_skipped() {
        let zones = vec![Zone::new(
            "work",
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        )
        .with_mode(SchedulingMode::whitelist_categories(["work"]))];
        let model = PreferenceModel::default();
        let assigner = GreedyAssigner::new(&model, &zones);

        let tasks = vec![Task::new("p", "personal", "x"), Task::new("w", "work", "x")];
        let result = assigner.assign(&tasks, vec![zoned("work", 19, 9)]);

        assert_eq!(result.unplaced, vec!["p".to_string()]);
        assert_eq!(result.placements.len(), 1);
        assert_eq!(result.placements[0].task_id, "w");
    }

    #[test]
    fn test_overlapping_misaligned_slots_are_dropped() {
        let model = PreferenceModel::default();
        let assigner = GreedyAssigner::new(&model, &[]);
        let half_past = CandidateSlot::new(
            at(19, 9) + Duration::minutes(30),
            at(19, 10) + Duration::minutes(30),
            SlotOrigin::NonZone,
        );
        let pool = vec![free(19, 9), half_past, free(19, 11)];
        let tasks = vec![Task::new("a", "w", "x"), Task::new("b", "w", "x")];

        let result = assigner.assign(&tasks, pool);
        assert_eq!(result.placements[0].slot.start.hour(), 9);
        assert_eq!(result.placements[1].slot.start.hour(), 11);
    }
}
