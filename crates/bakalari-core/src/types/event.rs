use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::parser::de;
use crate::types::{Class, Room, Student, Teacher};

/// When an event takes place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct EventTime {
    /// The event takes the entire day
    pub whole_day: bool,
    #[serde(deserialize_with = "de::datetime")]
    pub start_time: DateTime<FixedOffset>,
    #[serde(deserialize_with = "de::datetime")]
    pub end_time: DateTime<FixedOffset>,
}

/// Category of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct EventType {
    pub id: String,
    #[serde(
        rename(deserialize = "Abbrev"),
        alias = "Abbreviation",
        default,
        deserialize_with = "de::non_empty"
    )]
    pub abbreviation: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub name: Option<String>,
}

/// A calendar event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub event_type: EventType,
    pub date_changed: DateTime<FixedOffset>,
    pub description: Option<String>,
    pub times: Vec<EventTime>,
    pub teachers: Vec<Teacher>,
    pub classes: Vec<Class>,
    pub rooms: Vec<Room>,
    pub students: Vec<Student>,
    pub note: Option<String>,
}

impl Event {
    /// Earliest start among the event's times.
    pub fn starts_at(&self) -> Option<DateTime<FixedOffset>> {
        self.times.iter().map(|time| time.start_time).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_accepts_both_abbreviation_keys() {
        let a: EventType = serde_json::from_str(r#"{"Id":"1","Abbrev":"EX","Name":"Exkurze"}"#).unwrap();
        let b: EventType =
            serde_json::from_str(r#"{"Id":"1","Abbreviation":"EX","Name":"Exkurze"}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.abbreviation.as_deref(), Some("EX"));
    }

    #[test]
    fn test_event_time_deserialize() {
        let time: EventTime = serde_json::from_str(
            r#"{"WholeDay":false,"StartTime":"2022-06-20T08:00:00+02:00","EndTime":"2022-06-20T12:00:00+02:00"}"#,
        )
        .unwrap();
        assert!(!time.whole_day);
        assert!(time.start_time < time.end_time);
    }
}
