//! Timetable parser
//!
//! The server sends timetables normalized: every lesson ("atom") refers to
//! hours, groups, subjects, teachers, rooms and cycles by id, and the
//! referenced entities are listed once in lookup tables next to `Days`.
//! Parsing resolves every reference. An unknown hour, group or cycle makes
//! the whole response invalid; an unknown subject, teacher, room or class is
//! left empty.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{BakalariError, Result};
use crate::parser::common::WireRef;
use crate::parser::de;
use crate::types::{Change, Class, Cycle, Day, DayType, Group, Hour, Lesson, Room, Subject, Teacher};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireTimetable {
    #[serde(default, deserialize_with = "de::null_as_empty")]
    hours: Vec<Hour>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    classes: Vec<Class>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    groups: Vec<WireGroup>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    subjects: Vec<WireRef>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    teachers: Vec<WireRef>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    rooms: Vec<Room>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    cycles: Vec<Cycle>,
    days: Vec<WireDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireGroup {
    id: String,
    #[serde(default, deserialize_with = "de::trimmed")]
    class_id: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    abbrev: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireDay {
    day_of_week: u32,
    #[serde(deserialize_with = "de::date")]
    date: NaiveDate,
    #[serde(default, deserialize_with = "de::non_empty")]
    day_description: Option<String>,
    day_type: DayType,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    atoms: Vec<WireAtom>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireAtom {
    hour_id: u32,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    group_ids: Vec<String>,
    #[serde(default, deserialize_with = "de::trimmed")]
    subject_id: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed")]
    teacher_id: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed")]
    room_id: Option<String>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    cycle_ids: Vec<String>,
    #[serde(default)]
    change: Option<Change>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    homework_ids: Vec<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    theme: Option<String>,
}

/// Id-indexed lookup tables of one timetable response
struct Tables {
    hours: HashMap<u32, Hour>,
    groups: HashMap<String, Group>,
    subjects: HashMap<String, Subject>,
    teachers: HashMap<String, Teacher>,
    rooms: HashMap<String, Room>,
    cycles: HashMap<String, Cycle>,
}

impl Tables {
    fn build(timetable: &mut WireTimetable) -> Self {
        let classes: HashMap<String, Class> = timetable
            .classes
            .drain(..)
            .map(|class| (class.id.clone(), class))
            .collect();

        let groups = timetable
            .groups
            .drain(..)
            .map(|group| {
                let resolved = Group {
                    id: group.id.clone(),
                    abbreviation: group.abbrev,
                    name: group.name,
                    class: lookup(&classes, "class", group.class_id.as_deref()),
                };
                (group.id, resolved)
            })
            .collect();

        Self {
            hours: timetable.hours.drain(..).map(|h| (h.id, h)).collect(),
            groups,
            subjects: timetable
                .subjects
                .drain(..)
                .map(|s| (s.id.clone(), s.into_subject(None)))
                .collect(),
            teachers: timetable
                .teachers
                .drain(..)
                .map(|t| (t.id.clone(), t.into_teacher()))
                .collect(),
            rooms: timetable.rooms.drain(..).map(|r| (r.id.clone(), r)).collect(),
            cycles: timetable.cycles.drain(..).map(|c| (c.id.clone(), c)).collect(),
        }
    }

    fn lesson(&self, atom: WireAtom) -> Result<Lesson> {
        let hour = self
            .hours
            .get(&atom.hour_id)
            .cloned()
            .ok_or_else(|| dangling("hour", &atom.hour_id.to_string()))?;

        let groups = atom
            .group_ids
            .iter()
            .map(|id| resolve(&self.groups, "group", id).cloned())
            .collect::<Result<Vec<_>>>()?;
        let cycles = atom
            .cycle_ids
            .iter()
            .map(|id| resolve(&self.cycles, "cycle", id).cloned())
            .collect::<Result<Vec<_>>>()?;

        Ok(Lesson {
            hour,
            groups,
            subject: lookup(&self.subjects, "subject", atom.subject_id.as_deref()),
            teacher: lookup(&self.teachers, "teacher", atom.teacher_id.as_deref()),
            room: lookup(&self.rooms, "room", atom.room_id.as_deref()),
            cycles,
            homework: atom.homework_ids,
            change: atom.change,
            theme: atom.theme,
        })
    }
}

fn dangling(kind: &str, id: &str) -> BakalariError {
    BakalariError::Deserialization(format!("timetable references unknown {kind} {id:?}"))
}

fn resolve<'a, T>(table: &'a HashMap<String, T>, kind: &str, id: &str) -> Result<&'a T> {
    table.get(id).ok_or_else(|| dangling(kind, id))
}

/// Resolve an optional reference; unknown ids become `None`.
fn lookup<T: Clone>(table: &HashMap<String, T>, kind: &str, id: Option<&str>) -> Option<T> {
    let id = id?;
    let found = table.get(id).cloned();
    if found.is_none() {
        tracing::warn!(kind, id, "timetable references unknown entry, left empty");
    }
    found
}

/// Parse `/api/3/timetable/actual` or `/api/3/timetable/permanent`.
///
/// Days and lessons keep the order in which the server lists them.
pub fn parse_timetable(body: &str) -> Result<Vec<Day>> {
    let mut timetable: WireTimetable = serde_json::from_str(body)?;
    let tables = Tables::build(&mut timetable);

    let days = timetable
        .days
        .into_iter()
        .map(|day| -> Result<Day> {
            let lessons = day
                .atoms
                .into_iter()
                .map(|atom| tables.lesson(atom))
                .collect::<Result<Vec<_>>>()?;
            Ok(Day {
                day_of_week: day.day_of_week,
                date: day.date,
                description: day.day_description,
                day_type: day.day_type,
                lessons,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(days = days.len(), "parsed timetable");
    Ok(days)
}
