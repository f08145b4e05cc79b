use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::parser::de;
use crate::types::Teacher;

/// A school subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    /// Short name, whitespace trimmed
    pub abbreviation: String,
    pub teacher: Option<Teacher>,
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// One taught lesson of a subject, as recorded in the class register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct SubjectLessonEntry {
    #[serde(deserialize_with = "de::datetime")]
    pub date: DateTime<FixedOffset>,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub theme: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub note: Option<String>,
    /// Timetable hour caption, e.g. "3"
    pub hour_caption: String,
    /// Sequential lesson label, e.g. "42"
    pub lesson_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_entry_deserialize() {
        let json = r#"{"Date":"2022-06-13T00:00:00+02:00","Theme":"Kvadratické rovnice","Note":"","HourCaption":"2","LessonLabel":"118"}"#;
        let entry: SubjectLessonEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.theme.as_deref(), Some("Kvadratické rovnice"));
        assert_eq!(entry.note, None);
        assert_eq!(entry.hour_caption, "2");
        assert_eq!(entry.lesson_label, "118");
    }

    #[test]
    fn test_subject_display() {
        let subject = Subject {
            id: "1".to_string(),
            name: "Matematika".to_string(),
            abbreviation: "M".to_string(),
            teacher: None,
        };
        assert_eq!(subject.to_string(), "Matematika");
    }
}
