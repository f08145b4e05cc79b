use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::parser::de;

/// Absence counts for a single day, in lessons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct AbsenceEntry {
    #[serde(deserialize_with = "de::date")]
    pub date: NaiveDate,
    /// Not yet excused
    pub unsolved: u32,
    /// Excused
    pub ok: u32,
    /// Unexcused
    pub missed: u32,
    /// Arrived late
    pub late: u32,
    /// Left early
    pub soon: u32,
    /// Away on a school event
    pub school: u32,
    pub distance_teaching: u32,
}

impl AbsenceEntry {
    /// Lessons that count as missed (excused, unexcused or unresolved).
    pub fn counted(&self) -> u32 {
        self.unsolved + self.ok + self.missed
    }
}

/// Absence summary for one subject
///
/// `lesson_count` is the number of lessons that took place, not the number
/// of lessons missed; that is `base`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct AbsencePerSubjectEntry {
    #[serde(rename(deserialize = "SubjectName"))]
    pub subject: String,
    #[serde(rename(deserialize = "LessonsCount"))]
    pub lesson_count: u32,
    pub base: u32,
    pub late: u32,
    pub soon: u32,
    pub school: u32,
    pub distance_teaching: u32,
}

impl AbsencePerSubjectEntry {
    /// Missed share of the subject's lessons in percent.
    pub fn percentage(&self) -> f64 {
        if self.lesson_count == 0 {
            return 0.0;
        }
        f64::from(self.base) * 100.0 / f64::from(self.lesson_count)
    }
}

/// Attendance data of the logged-in student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct AbsenceData {
    /// School's threshold for too many absences, as a fraction
    pub percentage_threshold: f64,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub absences: Vec<AbsenceEntry>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub absences_per_subject: Vec<AbsencePerSubjectEntry>,
}
