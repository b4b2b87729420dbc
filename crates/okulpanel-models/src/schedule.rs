//! Lesson schedule entries and learning gains.
//!
//! Schedules come back as a flat list of lesson slots. Screens show them
//! grouped by weekday (Monday first) and, within a day, by lesson start
//! time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::RecordId;
use crate::serde::deserialize_lenient_string;

/// Weekday names in week order, as the platform spells them.
pub const DAY_ORDER: [&str; 7] = [
    "Pazartesi",
    "Salı",
    "Çarşamba",
    "Perşembe",
    "Cuma",
    "Cumartesi",
    "Pazar",
];

/// One lesson slot (`/schedule/get`, `/teacher/schedule`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleEntry {
    #[serde(
        rename = "Gun",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub day: Option<String>,
    /// Lesson hour range such as `"08:30-09:10"`.
    #[serde(
        rename = "DersSaati",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub hours: Option<String>,
    #[serde(
        rename = "Ders",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub lesson: Option<String>,
    #[serde(
        rename = "Sinif",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub class_name: Option<String>,
    #[serde(rename = "ProgramID", skip_serializing_if = "Option::is_none")]
    pub program_id: Option<RecordId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScheduleEntry {
    /// Start of the lesson in minutes after midnight.
    pub fn start_minutes(&self) -> Option<u32> {
        let start = self.hours.as_deref()?.split('-').next()?.trim();
        let (hours, minutes) = start.split_once(':')?;
        let hours: u32 = hours.trim().parse().ok()?;
        let minutes: u32 = minutes.trim().parse().ok()?;
        Some(hours * 60 + minutes)
    }
}

/// Lessons of a single weekday.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySchedule {
    pub day: String,
    pub entries: Vec<ScheduleEntry>,
}

/// Groups lesson slots by weekday in week order.
///
/// Days outside [`DAY_ORDER`] (including a missing day) follow the known
/// ones in order of first appearance. Within a day, lessons are ordered by
/// start time; slots without a readable start time keep their relative
/// order after the timed ones.
pub fn group_by_day(entries: Vec<ScheduleEntry>) -> Vec<DaySchedule> {
    let mut groups: Vec<DaySchedule> = Vec::new();

    for entry in entries {
        let day = entry.day.clone().unwrap_or_default();
        match groups.iter_mut().find(|g| g.day == day) {
            Some(group) => group.entries.push(entry),
            None => groups.push(DaySchedule {
                day,
                entries: vec![entry],
            }),
        }
    }

    groups.sort_by_key(|g| {
        DAY_ORDER
            .iter()
            .position(|d| *d == g.day)
            .unwrap_or(DAY_ORDER.len())
    });

    for group in &mut groups {
        group
            .entries
            .sort_by_key(|e| e.start_minutes().unwrap_or(u32::MAX));
    }

    groups
}

/// A learning gain that can be recorded for a lesson (`/schedule/gain`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gain {
    #[serde(
        rename = "kazanim",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,
    /// Teaching week the gain belongs to.
    #[serde(
        rename = "Hafta",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub week: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Orders gains by teaching week. Gains without a numeric week come first.
pub fn sort_gains(gains: &mut [Gain]) {
    gains.sort_by_key(|g| {
        g.week
            .as_deref()
            .and_then(|w| w.trim().parse::<i64>().ok())
            .unwrap_or(0)
    });
}

/// Joins selected gains into the single text `/schedule/gainadd` expects.
pub fn join_gains<'a, I>(gains: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    gains
        .into_iter()
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
