//! Calendar zones: recurring daily windows with an admission policy.
//!
//! A zone's scheduling mode is a closed enum. Allow and block lists only
//! exist on the whitelist/blacklist variants, the fallback window only on
//! `NonZone`, and the `allow_scheduling` flag only on zones that predate
//! scheduling modes.

pub mod admission;
pub mod calendar;

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::conflict::TimeWindow;

pub use admission::{admitted_tasks, is_task_admitted};
pub use calendar::{hhmm, parse_time_of_day, weekday_name, DailyWindow, DaySet};

/// Admission policy attached to a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SchedulingMode {
    /// Never hosts tasks
    None,
    /// Only listed categories/types. An empty list leaves that dimension open.
    Whitelist {
        #[serde(default)]
        allowed_categories: BTreeSet<String>,
        #[serde(default)]
        allowed_types: BTreeSet<String>,
    },
    /// Everything except listed categories/types
    Blacklist {
        #[serde(default)]
        blocked_categories: BTreeSet<String>,
        #[serde(default)]
        blocked_types: BTreeSet<String>,
    },
    /// Hosts nothing itself; carries the fallback window used outside zones
    NonZone {
        #[serde(default)]
        fallback: DailyWindow,
    },
    /// Zones without a mode fall back to a single on/off flag
    Legacy {
        #[serde(default)]
        allow_scheduling: bool,
    },
}

impl Default for SchedulingMode {
    fn default() -> Self {
        SchedulingMode::Legacy {
            allow_scheduling: false,
        }
    }
}

impl SchedulingMode {
    /// Convenience constructor for a whitelist over categories.
    pub fn whitelist_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SchedulingMode::Whitelist {
            allowed_categories: categories.into_iter().map(Into::into).collect(),
            allowed_types: BTreeSet::new(),
        }
    }

    /// Convenience constructor for a blacklist over categories.
    pub fn blacklist_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SchedulingMode::Blacklist {
            blocked_categories: categories.into_iter().map(Into::into).collect(),
            blocked_types: BTreeSet::new(),
        }
    }

    /// Whether this mode hosts tasks at all (ignoring task filters).
    pub fn enables_scheduling(&self) -> bool {
        match self {
            SchedulingMode::Whitelist { .. } | SchedulingMode::Blacklist { .. } => true,
            SchedulingMode::Legacy { allow_scheduling } => *allow_scheduling,
            SchedulingMode::None | SchedulingMode::NonZone { .. } => false,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SchedulingMode::None => "none",
            SchedulingMode::Whitelist { .. } => "whitelist",
            SchedulingMode::Blacklist { .. } => "blacklist",
            SchedulingMode::NonZone { .. } => "non_zone",
            SchedulingMode::Legacy { .. } => "legacy",
        }
    }
}

/// A recurring, user-defined daily window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub days_of_week: DaySet,
    /// Ranks zones against each other; not scored
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default)]
    pub scheduling: SchedulingMode,
}

fn default_true() -> bool {
    true
}

fn default_priority() -> i32 {
    5
}

impl Zone {
    /// Create an active zone with the given daily bounds, every day, legacy mode.
    pub fn new(id: impl Into<String>, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            id: id.into(),
            owner: String::new(),
            name: String::new(),
            category: String::new(),
            is_active: true,
            start_time,
            end_time,
            days_of_week: DaySet::every_day(),
            priority: default_priority(),
            scheduling: SchedulingMode::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn with_days(mut self, days: DaySet) -> Self {
        self.days_of_week = days;
        self
    }

    pub fn with_mode(mut self, mode: SchedulingMode) -> Self {
        self.scheduling = mode;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// The zone's own recurring window.
    pub fn daily_window(&self) -> DailyWindow {
        DailyWindow::new(self.start_time, self.end_time, self.days_of_week.clone())
    }

    /// Concrete window for `date`, or `None` when the weekday is excluded.
    pub fn window_on(&self, date: NaiveDate) -> Option<TimeWindow> {
        self.daily_window().on(date)
    }

    /// The fallback window, only present on `NonZone` zones.
    pub fn fallback_window(&self) -> Option<&DailyWindow> {
        match &self.scheduling {
            SchedulingMode::NonZone { fallback } => Some(fallback),
            _ => None,
        }
    }

    /// Check if an instant falls within this zone (bounds inclusive).
    pub fn is_time_in_zone(&self, at: DateTime<Utc>) -> bool {
        if !self.is_active || !self.days_of_week.applies_on(at.weekday()) {
            return false;
        }
        let minutes = at.hour() * 60 + at.minute();
        let start = self.start_time.hour() * 60 + self.start_time.minute();
        let end = self.end_time.hour() * 60 + self.end_time.minute();
        minutes >= start && minutes <= end
    }
}

/// A predefined zone category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneCategory {
    pub name: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

/// Categories offered when a user first sets up zones.
pub fn default_categories() -> Vec<ZoneCategory> {
    vec![
        ZoneCategory {
            name: "work",
            description: "Work and professional activities",
            color: "#3b82f6",
        },
        ZoneCategory {
            name: "study",
            description: "Learning and educational activities",
            color: "#10b981",
        },
        ZoneCategory {
            name: "personal",
            description: "Personal and leisure activities",
            color: "#f59e0b",
        },
        ZoneCategory {
            name: "exercise",
            description: "Physical activities and workouts",
            color: "#ef4444",
        },
        ZoneCategory {
            name: "family",
            description: "Family time and commitments",
            color: "#8b5cf6",
        },
        ZoneCategory {
            name: "health",
            description: "Medical appointments and health activities",
            color: "#06b6d4",
        },
        ZoneCategory {
            name: "creative",
            description: "Creative and artistic activities",
            color: "#ec4899",
        },
        ZoneCategory {
            name: "social",
            description: "Social events and gatherings",
            color: "#84cc16",
        },
    ]
}

/// First active `NonZone` zone's fallback window, or `default` if none.
pub fn resolve_fallback_window<'a>(zones: &'a [Zone], default: &'a DailyWindow) -> &'a DailyWindow {
    zones
        .iter()
        .filter(|z| z.is_active)
        .find_map(Zone::fallback_window)
        .unwrap_or(default)
}
