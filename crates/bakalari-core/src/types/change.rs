use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::parser::de;

/// Kind of a timetable change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    /// The lesson was canceled
    Canceled,
    /// The lesson was added into the timetable
    Added,
    /// The lesson was removed from the timetable
    Removed,
    /// The lesson moved to another room
    RoomChanged,
    /// Another teacher substitutes the lesson
    Substitution,
}

/// A substitution or cancellation notice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct Change {
    #[serde(rename(deserialize = "Day"), deserialize_with = "de::datetime")]
    pub date: DateTime<FixedOffset>,
    /// Affected timetable hours, e.g. "3" or "3-4"
    pub hours: String,
    pub change_type: ChangeType,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub description: Option<String>,
    pub time: String,
    #[serde(rename(deserialize = "TypeAbbrev"), default, deserialize_with = "de::non_empty")]
    pub type_abbreviation: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub type_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_deserialize() {
        let json = r#"{
            "ChangedLesson": null,
            "Day": "2022-06-17T00:00:00+02:00",
            "Hours": "3",
            "ChangeType": "Canceled",
            "Description": "Zrušeno (M, Novák Jan)",
            "Time": "9:55 - 10:40",
            "TypeAbbrev": null,
            "TypeName": null
        }"#;
        let change: Change = serde_json::from_str(json).unwrap();
        assert_eq!(change.change_type, ChangeType::Canceled);
        assert_eq!(change.hours, "3");
        assert_eq!(change.time, "9:55 - 10:40");
        assert_eq!(change.type_name, None);
    }

    #[test]
    fn test_change_type_values() {
        for (text, expected) in [
            ("\"Added\"", ChangeType::Added),
            ("\"Removed\"", ChangeType::Removed),
            ("\"RoomChanged\"", ChangeType::RoomChanged),
            ("\"Substitution\"", ChangeType::Substitution),
        ] {
            assert_eq!(serde_json::from_str::<ChangeType>(text).unwrap(), expected);
        }
    }

    #[test]
    fn test_unknown_change_type_is_error() {
        assert!(serde_json::from_str::<ChangeType>("\"Teleported\"").is_err());
    }
}
