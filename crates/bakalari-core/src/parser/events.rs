use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::error::Result;
use crate::parser::common::WireRef;
use crate::parser::de;
use crate::types::{Class, Event, EventTime, EventType, Room, Student};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EventsEnvelope {
    #[serde(deserialize_with = "de::null_as_empty")]
    events: Vec<WireEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireEvent {
    id: String,
    title: String,
    #[serde(default, deserialize_with = "de::non_empty")]
    description: Option<String>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    times: Vec<EventTime>,
    event_type: EventType,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    classes: Vec<Class>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    teachers: Vec<WireRef>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    rooms: Vec<Room>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    students: Vec<Student>,
    #[serde(default, deserialize_with = "de::non_empty")]
    note: Option<String>,
    #[serde(deserialize_with = "de::datetime")]
    date_changed: DateTime<FixedOffset>,
}

impl From<WireEvent> for Event {
    fn from(wire: WireEvent) -> Self {
        Event {
            id: wire.id,
            title: wire.title,
            event_type: wire.event_type,
            date_changed: wire.date_changed,
            description: wire.description,
            times: wire.times,
            teachers: wire.teachers.into_iter().map(WireRef::into_teacher).collect(),
            classes: wire.classes,
            rooms: wire.rooms,
            students: wire.students,
            note: wire.note,
        }
    }
}

/// Parse `/api/3/events`, `/api/3/events/my` or `/api/3/events/public`.
pub fn parse_events(body: &str) -> Result<Vec<Event>> {
    let envelope: EventsEnvelope = serde_json::from_str(body)?;
    Ok(envelope.events.into_iter().map(Event::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENTS_JSON: &str = r#"{"Events":[{
        "Id":"E1",
        "Title":"Exkurze do Techmanie",
        "Description":"",
        "Times":[
            {"WholeDay":false,"StartTime":"2022-06-21T10:00:00+02:00","EndTime":"2022-06-21T14:00:00+02:00"},
            {"WholeDay":false,"StartTime":"2022-06-20T08:00:00+02:00","EndTime":"2022-06-20T12:00:00+02:00"}
        ],
        "EventType":{"Id":"3","Abbrev":"EX","Name":"Exkurze"},
        "Classes":[{"Id":"ZL","Abbrev":"4.A","Name":"4.A"}],
        "ClassSets":[],
        "Teachers":[{"Id":"U1","Abbrev":"Nov","Name":"Jan Novák"}],
        "TeacherSets":[],
        "Rooms":null,
        "RoomSets":[],
        "Students":[],
        "Note":null,
        "DateChanged":"2022-06-01T09:30:00+02:00"
    }]}"#;

    #[test]
    fn test_parse_events() {
        let events = parse_events(EVENTS_JSON).unwrap();
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.title, "Exkurze do Techmanie");
        assert_eq!(event.description, None);
        assert_eq!(event.event_type.name.as_deref(), Some("Exkurze"));
        assert_eq!(event.teachers[0].name, "Jan Novák");
        assert!(event.rooms.is_empty());
        assert_eq!(event.times.len(), 2);
    }

    #[test]
    fn test_event_starts_at_earliest_time() {
        let events = parse_events(EVENTS_JSON).unwrap();
        let start = events[0].starts_at().unwrap();
        assert_eq!(start.to_rfc3339(), "2022-06-20T08:00:00+02:00");
    }

    #[test]
    fn test_parse_events_missing_type() {
        let body = EVENTS_JSON.replace(r#""EventType":{"Id":"3","Abbrev":"EX","Name":"Exkurze"},"#, "");
        assert!(parse_events(&body).unwrap_err().is_deserialization());
    }
}
