use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::types::{Attachment, Class, Group, Subject, Teacher};

/// A homework assignment
///
/// `date_award`, `date_control` and `date_done` are only sent by servers
/// running API 3.13.0 or lower; `finished` only by newer ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Homework {
    pub id: String,
    pub assigned_at: DateTime<FixedOffset>,
    pub due_at: DateTime<FixedOffset>,
    /// Marked done by the student
    pub done: bool,
    /// Closed by the teacher
    pub closed: bool,
    /// Handed in electronically
    pub electronic: bool,
    /// Timetable hour the homework is due in
    pub hour: u32,
    pub class: Option<Class>,
    pub group: Option<Group>,
    /// Subject, with `teacher` filled when known
    pub subject: Option<Subject>,
    pub teacher: Option<Teacher>,
    pub details: Option<String>,
    pub notice: Option<String>,
    pub finished: Option<bool>,
    pub date_award: Option<DateTime<FixedOffset>>,
    pub date_control: Option<DateTime<FixedOffset>>,
    pub date_done: Option<DateTime<FixedOffset>>,
    pub attachments: Vec<Attachment>,
}
