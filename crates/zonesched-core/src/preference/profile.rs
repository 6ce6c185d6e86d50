//! Energy and workload profiles.
//!
//! Energy is keyed by hour of day, workload by weekday. Both serialize as
//! string-keyed maps (`{"9": 8}`, `{"monday": 7}`) so they fit JSON and TOML
//! alike.

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::zone::calendar::{parse_weekday, weekday_name};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Hour of day (0-23) to energy level (1-10).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u8>", into = "BTreeMap<String, u8>")]
pub struct EnergyProfile {
    levels: [Option<u8>; 24],
}

impl EnergyProfile {
    /// A profile with no hours set.
    pub fn empty() -> Self {
        Self { levels: [None; 24] }
    }

    pub fn from_pairs(pairs: &[(u32, u8)]) -> Self {
        let mut profile = Self::empty();
        for &(hour, level) in pairs {
            profile.set(hour, level);
        }
        profile
    }

    /// Set an hour's level. Hours past 23 are ignored.
    pub fn set(&mut self, hour: u32, level: u8) {
        if let Some(slot) = self.levels.get_mut(hour as usize) {
            *slot = Some(level);
        }
    }

    pub fn level(&self, hour: u32) -> Option<u8> {
        self.levels.get(hour as usize).copied().flatten()
    }

    /// Hours that carry a level, ascending.
    pub fn entries(&self) -> impl Iterator<Item = (u32, u8)> + '_ {
        self.levels
            .iter()
            .enumerate()
            .filter_map(|(hour, level)| level.map(|l| (hour as u32, l)))
    }
}

impl Default for EnergyProfile {
    fn default() -> Self {
        Self::from_pairs(&[(6, 3), (9, 8), (12, 6), (15, 7), (18, 5), (21, 2)])
    }
}

impl TryFrom<BTreeMap<String, u8>> for EnergyProfile {
    type Error = String;

    fn try_from(map: BTreeMap<String, u8>) -> Result<Self, Self::Error> {
        let mut profile = Self::empty();
        for (key, level) in map {
            let hour: u32 = key
                .trim()
                .parse()
                .map_err(|_| format!("energy hour '{key}' is not a number"))?;
            if hour > 23 {
                return Err(format!("energy hour {hour} out of range 0-23"));
            }
            profile.set(hour, level);
        }
        Ok(profile)
    }
}

impl From<EnergyProfile> for BTreeMap<String, u8> {
    fn from(profile: EnergyProfile) -> Self {
        profile.entries().map(|(h, l)| (h.to_string(), l)).collect()
    }
}

/// Weekday to workload score (1-10, higher is busier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u8>", into = "BTreeMap<String, u8>")]
pub struct WorkloadProfile {
    by_day: [Option<u8>; 7],
}

impl WorkloadProfile {
    pub fn empty() -> Self {
        Self { by_day: [None; 7] }
    }

    pub fn from_pairs(pairs: &[(Weekday, u8)]) -> Self {
        let mut profile = Self::empty();
        for &(day, level) in pairs {
            profile.set(day, level);
        }
        profile
    }

    pub fn set(&mut self, day: Weekday, level: u8) {
        self.by_day[day.num_days_from_monday() as usize] = Some(level);
    }

    pub fn level(&self, day: Weekday) -> Option<u8> {
        self.by_day[day.num_days_from_monday() as usize]
    }

    /// Days that carry a level, Monday first.
    pub fn entries(&self) -> impl Iterator<Item = (Weekday, u8)> + '_ {
        WEEK.iter()
            .filter_map(|day| self.level(*day).map(|l| (*day, l)))
    }
}

impl Default for WorkloadProfile {
    fn default() -> Self {
        Self::from_pairs(&[
            (Weekday::Mon, 7),
            (Weekday::Tue, 8),
            (Weekday::Wed, 6),
            (Weekday::Thu, 8),
            (Weekday::Fri, 5),
            (Weekday::Sat, 3),
            (Weekday::Sun, 2),
        ])
    }
}

impl TryFrom<BTreeMap<String, u8>> for WorkloadProfile {
    type Error = String;

    fn try_from(map: BTreeMap<String, u8>) -> Result<Self, Self::Error> {
        let mut profile = Self::empty();
        for (key, level) in map {
            profile.set(parse_weekday(&key)?, level);
        }
        Ok(profile)
    }
}

impl From<WorkloadProfile> for BTreeMap<String, u8> {
    fn from(profile: WorkloadProfile) -> Self {
        profile
            .entries()
            .map(|(d, l)| (weekday_name(d).to_string(), l))
            .collect()
    }
}
