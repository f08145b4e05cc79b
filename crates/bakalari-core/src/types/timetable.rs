use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::{Change, Cycle, Group, Room, Subject, Teacher};

/// Kind of a timetable day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayType {
    WorkDay,
    /// Usually does not appear
    Weekend,
    /// State holiday or other important day
    Celebration,
    Holiday,
    /// Day off given by the headmaster
    #[serde(rename = "DirectorDay")]
    HeadmasterDay,
    /// Usually does not appear
    Undefined,
}

/// A timetable period with its clock times
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct Hour {
    pub id: u32,
    /// Period label, e.g. "1"
    pub caption: String,
    /// e.g. "8:00"
    pub begin_time: String,
    /// e.g. "8:45"
    pub end_time: String,
}

/// A single lesson slot of a day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lesson {
    pub hour: Hour,
    pub groups: Vec<Group>,
    pub subject: Option<Subject>,
    pub teacher: Option<Teacher>,
    pub room: Option<Room>,
    pub cycles: Vec<Cycle>,
    /// IDs of homework due in this lesson
    pub homework: Vec<String>,
    pub change: Option<Change>,
    pub theme: Option<String>,
}

/// One day of a timetable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Day {
    /// 1 = Monday ... 7 = Sunday
    pub day_of_week: u32,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub day_type: DayType,
    /// Lessons in the order the server lists them
    pub lessons: Vec<Lesson>,
}

/// A Monday-to-Sunday calendar week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    pub monday: NaiveDate,
    pub sunday: NaiveDate,
}

impl Week {
    /// The week that contains `date`.
    ///
    /// # Example
    /// ```
    /// use bakalari_core::Week;
    /// use chrono::NaiveDate;
    ///
    /// let friday = NaiveDate::from_ymd_opt(2022, 6, 17).unwrap();
    /// let week = Week::containing(friday);
    /// assert_eq!(week.monday, NaiveDate::from_ymd_opt(2022, 6, 13).unwrap());
    /// assert_eq!(week.sunday, NaiveDate::from_ymd_opt(2022, 6, 19).unwrap());
    /// ```
    pub fn containing(date: NaiveDate) -> Self {
        let offset = u64::from(date.weekday().num_days_from_monday());
        let monday = date - Days::new(offset);
        Self {
            monday,
            sunday: monday + Days::new(6),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.monday <= date && date <= self.sunday
    }
}
