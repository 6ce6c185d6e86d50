//! Candidate slot generation.
//!
//! Windows are walked in fixed, non-overlapping `duration` steps from start to
//! end. A trailing partial step is dropped, and any step that overlaps a
//! commitment is skipped whole. Fallback (non-zone) windows use the same walk
//! but additionally reject steps that overlap any active zone's window on that
//! day, so fallback slots always sit outside zone coverage.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::conflict::{overlaps, Commitment, Span, TimeWindow};
use crate::zone::{DailyWindow, Zone};

/// Where a candidate slot was discovered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SlotOrigin {
    /// Inside the named zone's window
    Zone { zone_id: String },
    /// Inside the fallback window, outside every zone
    NonZone,
}

/// A fixed-duration, conflict-free interval eligible for placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub origin: SlotOrigin,
}

impl CandidateSlot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, origin: SlotOrigin) -> Self {
        Self { start, end, origin }
    }

    /// Identity used for pool removal: same start and same end.
    pub fn same_interval(&self, other: &CandidateSlot) -> bool {
        self.start == other.start && self.end == other.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Zone id this slot came from, if any.
    pub fn zone_id(&self) -> Option<&str> {
        match &self.origin {
            SlotOrigin::Zone { zone_id } => Some(zone_id),
            SlotOrigin::NonZone => None,
        }
    }
}

impl Span for CandidateSlot {
    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// The calendar days covered by a horizon: `start` plus the next `days - 1`.
pub fn horizon_dates(start: NaiveDate, days: u32) -> impl Iterator<Item = NaiveDate> {
    (0..i64::from(days)).filter_map(move |offset| start.checked_add_signed(Duration::days(offset)))
}

/// Windows of every active zone on `date`, whatever its mode. These are the
/// spans fallback slots must avoid. Empty windows (such as the `00:00-00:00`
/// bounds usually carried by a `non_zone` zone) cover nothing.
pub fn zone_coverage(zones: &[Zone], date: NaiveDate) -> Vec<TimeWindow> {
    zones
        .iter()
        .filter(|z| z.is_active)
        .filter_map(|z| z.window_on(date))
        .filter(|w| !w.is_degenerate())
        .collect()
}

/// Walks windows into fixed-duration candidate slots.
#[derive(Debug, Clone, Copy)]
pub struct SlotGenerator {
    duration: Duration,
}

impl SlotGenerator {
    /// Create a generator emitting slots of `duration`.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// One-hour slots.
    pub fn hourly() -> Self {
        Self::new(Duration::hours(1))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Full-duration steps inside `window`, in chronological order.
    ///
    /// A non-positive duration or a degenerate window yields nothing.
    pub fn walk(&self, window: TimeWindow) -> Vec<TimeWindow> {
        let mut steps = Vec::new();
        if self.duration <= Duration::zero() || window.is_degenerate() {
            return steps;
        }

        let mut current = window.start;
        while let Some(step_end) = current.checked_add_signed(self.duration) {
            if step_end > window.end {
                break;
            }
            steps.push(TimeWindow::new(current, step_end));
            current = step_end;
        }
        steps
    }

    /// Free slots inside `zone`'s window on `date`.
    pub fn zone_slots_for_day(
        &self,
        zone: &Zone,
        date: NaiveDate,
        commitments: &[Commitment],
    ) -> Vec<CandidateSlot> {
        let Some(window) = zone.window_on(date) else {
            return Vec::new();
        };

        self.walk(window)
            .into_iter()
            .filter(|step| !overlaps(step.start, step.end, commitments))
            .map(|step| {
                CandidateSlot::new(
                    step.start,
                    step.end,
                    SlotOrigin::Zone {
                        zone_id: zone.id.clone(),
                    },
                )
            })
            .collect()
    }

    /// Free slots inside `zone` for each day of the horizon.
    pub fn zone_slots(
        &self,
        zone: &Zone,
        start: NaiveDate,
        days: u32,
        commitments: &[Commitment],
    ) -> Vec<CandidateSlot> {
        horizon_dates(start, days)
            .flat_map(|date| self.zone_slots_for_day(zone, date, commitments))
            .collect()
    }

    /// Free slots inside `fallback` on `date` that avoid every zone's window.
    pub fn non_zone_slots_for_day(
        &self,
        fallback: &DailyWindow,
        date: NaiveDate,
        commitments: &[Commitment],
        zones: &[Zone],
    ) -> Vec<CandidateSlot> {
        let Some(window) = fallback.on(date) else {
            return Vec::new();
        };
        let coverage = zone_coverage(zones, date);

        self.walk(window)
            .into_iter()
            .filter(|step| !overlaps(step.start, step.end, &coverage))
            .filter(|step| !overlaps(step.start, step.end, commitments))
            .map(|step| CandidateSlot::new(step.start, step.end, SlotOrigin::NonZone))
            .collect()
    }

    /// Fallback slots for each day of the horizon.
    pub fn non_zone_slots(
        &self,
        fallback: &DailyWindow,
        start: NaiveDate,
        days: u32,
        commitments: &[Commitment],
        zones: &[Zone],
    ) -> Vec<CandidateSlot> {
        horizon_dates(start, days)
            .flat_map(|date| self.non_zone_slots_for_day(fallback, date, commitments, zones))
            .collect()
    }
}

impl Default for SlotGenerator {
    fn default() -> Self {
        Self::hourly()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Timelike};

    use crate::zone::{DaySet, SchedulingMode};

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // Monday
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn at(date: NaiveDate, h: u32, m: u32) -> DateTime<Utc> {
        date.and_time(hm(h, m)).and_utc()
    }

    fn work_zone() -> Zone {
        Zone::new("work", hm(9, 0), hm(12, 0))
            .with_days(DaySet::weekdays())
            .with_mode(SchedulingMode::whitelist_categories(["work"]))
    }

    #[test]
    fn test_walk_discards_partial_step() {
        let gen = SlotGenerator::hourly();
        let window = TimeWindow::new(at(monday(), 9, 0), at(monday(), 11, 30));
        let steps = gen.walk(window);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].end, at(monday(), 11, 0));
    }

    #[test]
    fn test_walk_degenerate_and_zero_duration() {
        let window = TimeWindow::new(at(monday(), 12, 0), at(monday(), 9, 0));
        assert!(SlotGenerator::hourly().walk(window).is_empty());

        let window = TimeWindow::new(at(monday(), 9, 0), at(monday(), 12, 0));
        assert!(SlotGenerator::new(Duration::zero()).walk(window).is_empty());
    }

    #[test]
    fn test_zone_slots_skip_conflicts() {
        let gen = SlotGenerator::hourly();
        let commitments = vec![Commitment::new(at(monday(), 10, 30), at(monday(), 10, 45))];

        let slots = gen.zone_slots_for_day(&work_zone(), monday(), &commitments);
        let starts: Vec<_> = slots.iter().map(|s| s.start.hour()).collect();
        assert_eq!(starts, vec![9, 11]);
        assert!(slots
            .iter()
            .all(|s| s.origin == SlotOrigin::Zone { zone_id: "work".into() }));
    }

    #[test]
    fn test_zone_slots_respect_weekdays() {
        let gen = SlotGenerator::hourly();
        // Mon..Sun: five weekdays with three slots each
        let slots = gen.zone_slots(&work_zone(), monday(), 7, &[]);
        assert_eq!(slots.len(), 15);

        let saturday = NaiveDate::from_ymd_opt(2026, 10, 24).unwrap();
        assert!(gen.zone_slots_for_day(&work_zone(), saturday, &[]).is_empty());
    }

    #[test]
    fn test_half_hour_duration() {
        let gen = SlotGenerator::new(Duration::minutes(30));
        let slots = gen.zone_slots_for_day(&work_zone(), monday(), &[]);
        assert_eq!(slots.len(), 6);
        assert!(slots.iter().all(|s| s.duration_minutes() == 30));
    }

    #[test]
    fn test_non_zone_slots_avoid_zone_windows() {
        let gen = SlotGenerator::hourly();
        let zones = vec![work_zone()];
        let slots = gen.non_zone_slots_for_day(&DailyWindow::default(), monday(), &[], &zones);

        let starts: Vec<_> = slots.iter().map(|s| s.start.hour()).collect();
        assert_eq!(starts, vec![12, 13, 14, 15, 16, 17]);
        assert!(slots.iter().all(|s| s.origin == SlotOrigin::NonZone));
    }

    #[test]
    fn test_non_zone_guard_ignores_inactive_zones() {
        let gen = SlotGenerator::hourly();
        let zones = vec![work_zone().inactive()];
        let slots = gen.non_zone_slots_for_day(&DailyWindow::default(), monday(), &[], &zones);
        assert_eq!(slots.len(), 9);
    }

    #[test]
    fn test_non_zone_guard_with_unaligned_zone() {
        let gen = SlotGenerator::hourly();
        let zones = vec![Zone::new("gym", hm(13, 30), hm(14, 15)).with_mode(SchedulingMode::None)];
        let slots = gen.non_zone_slots_for_day(&DailyWindow::default(), monday(), &[], &zones);

        let starts: Vec<_> = slots.iter().map(|s| s.start.hour()).collect();
        assert_eq!(starts, vec![9, 10, 11, 12, 15, 16, 17]);
    }

    #[test]
    fn test_non_zone_guard_includes_non_zone_zone_window() {
        let gen = SlotGenerator::hourly();
        let fallback = DailyWindow::new(hm(9, 0), hm(18, 0), DaySet::every_day());
        let zones = vec![
            Zone::new("prefs", hm(12, 0), hm(13, 0)).with_mode(SchedulingMode::NonZone {
                fallback: fallback.clone(),
            }),
        ];
        let slots = gen.non_zone_slots_for_day(&fallback, monday(), &[], &zones);

        let starts: Vec<_> = slots.iter().map(|s| s.start.hour()).collect();
        assert_eq!(starts, vec![9, 10, 11, 13, 14, 15, 16, 17]);
    }

    #[test]
    fn test_empty_non_zone_window_covers_nothing() {
        let gen = SlotGenerator::hourly();
        let fallback = DailyWindow::new(hm(9, 0), hm(18, 0), DaySet::every_day());
        let zones = vec![
            Zone::new("prefs", hm(0, 0), hm(0, 0)).with_mode(SchedulingMode::NonZone {
                fallback: fallback.clone(),
            }),
        ];
        assert_eq!(gen.non_zone_slots_for_day(&fallback, monday(), &[], &zones).len(), 9);
    }

    #[test]
    fn test_non_zone_respects_fallback_days() {
        let gen = SlotGenerator::hourly();
        let saturday = NaiveDate::from_ymd_opt(2026, 10, 24).unwrap();
        assert!(gen
            .non_zone_slots_for_day(&DailyWindow::default(), saturday, &[], &[])
            .is_empty());

        let slots = gen.non_zone_slots(&DailyWindow::default(), monday(), 7, &[], &[]);
        assert_eq!(slots.len(), 45);
    }

    #[test]
    fn test_horizon_dates() {
        let dates: Vec<_> = horizon_dates(monday(), 3).collect();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(2026, 10, 21).unwrap());
        assert_eq!(horizon_dates(monday(), 0).count(), 0);
    }
}
