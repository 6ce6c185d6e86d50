//! Wall-clock building blocks shared by zones and the fallback window.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::conflict::TimeWindow;

/// Lowercase English weekday name, as used on the wire.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Parse a weekday name ("mon", "Monday", ...).
pub fn parse_weekday(raw: &str) -> Result<Weekday, String> {
    raw.trim()
        .parse::<Weekday>()
        .map_err(|_| format!("unknown weekday: {raw}"))
}

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, String> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| format!("invalid time of day '{raw}' (expected HH:MM)"))
}

/// Serde adapter for `NaiveTime` as `HH:MM`.
pub mod hhmm {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        let text = if time.second() == 0 {
            time.format("%H:%M").to_string()
        } else {
            time.format("%H:%M:%S").to_string()
        };
        s.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_time_of_day(&raw).map_err(serde::de::Error::custom)
    }
}

/// Set of weekdays a window recurs on. Empty means every day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct DaySet(Vec<Weekday>);

impl DaySet {
    /// Every day of the week.
    pub fn every_day() -> Self {
        Self(Vec::new())
    }

    pub fn weekdays() -> Self {
        Self(vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ])
    }

    pub fn of(days: &[Weekday]) -> Self {
        let mut set = Vec::with_capacity(days.len());
        for day in days {
            if !set.contains(day) {
                set.push(*day);
            }
        }
        Self(set)
    }

    pub fn applies_on(&self, day: Weekday) -> bool {
        self.0.is_empty() || self.0.contains(&day)
    }

    pub fn days(&self) -> &[Weekday] {
        &self.0
    }

    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<String>> for DaySet {
    type Error = String;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        let days = names
            .iter()
            .map(|n| parse_weekday(n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::of(&days))
    }
}

impl From<DaySet> for Vec<String> {
    fn from(set: DaySet) -> Self {
        set.0.iter().map(|d| weekday_name(*d).to_string()).collect()
    }
}

/// A recurring daily window: time-of-day bounds plus the days it applies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWindow {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    #[serde(default)]
    pub days: DaySet,
}

impl DailyWindow {
    pub fn new(start: NaiveTime, end: NaiveTime, days: DaySet) -> Self {
        Self { start, end, days }
    }

    /// The window placed on `date`, or `None` if it does not recur that day.
    pub fn on(&self, date: NaiveDate) -> Option<TimeWindow> {
        use chrono::Datelike;

        if !self.days.applies_on(date.weekday()) {
            return None;
        }
        Some(TimeWindow::new(
            date.and_time(self.start).and_utc(),
            date.and_time(self.end).and_utc(),
        ))
    }
}

impl Default for DailyWindow {
    /// 09:00-18:00, Monday through Friday.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
            days: DaySet::weekdays(),
        }
    }
}
