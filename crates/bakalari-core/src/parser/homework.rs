use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::error::Result;
use crate::parser::common::WireRef;
use crate::parser::de;
use crate::types::{Attachment, Class, Group, Homework};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HomeworksEnvelope {
    #[serde(deserialize_with = "de::null_as_empty")]
    homeworks: Vec<WireHomework>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireHomework {
    #[serde(rename = "ID")]
    id: String,
    #[serde(deserialize_with = "de::datetime")]
    date_start: DateTime<FixedOffset>,
    #[serde(deserialize_with = "de::datetime")]
    date_end: DateTime<FixedOffset>,
    done: bool,
    closed: bool,
    electronic: bool,
    hour: u32,
    #[serde(default)]
    class: Option<Class>,
    #[serde(default)]
    group: Option<Group>,
    #[serde(default)]
    subject: Option<WireRef>,
    #[serde(default)]
    teacher: Option<WireRef>,
    #[serde(default, deserialize_with = "de::non_empty")]
    content: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    notice: Option<String>,
    #[serde(default)]
    finished: Option<bool>,
    #[serde(default, deserialize_with = "de::optional_datetime")]
    date_award: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "de::optional_datetime")]
    date_control: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "de::optional_datetime")]
    date_done: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    attachments: Vec<Attachment>,
}

impl From<WireHomework> for Homework {
    fn from(wire: WireHomework) -> Self {
        let teacher = wire.teacher.map(WireRef::into_teacher);
        let subject = wire.subject.map(|s| s.into_subject(teacher.clone()));

        Homework {
            id: wire.id,
            assigned_at: wire.date_start,
            due_at: wire.date_end,
            done: wire.done,
            closed: wire.closed,
            electronic: wire.electronic,
            hour: wire.hour,
            class: wire.class,
            group: wire.group,
            subject,
            teacher,
            details: wire.content,
            notice: wire.notice,
            finished: wire.finished,
            date_award: wire.date_award,
            date_control: wire.date_control,
            date_done: wire.date_done,
            attachments: wire.attachments,
        }
    }
}

/// Parse `/api/3/homeworks`.
pub fn parse_homework(body: &str) -> Result<Vec<Homework>> {
    let envelope: HomeworksEnvelope = serde_json::from_str(body)?;
    let homework: Vec<Homework> = envelope.homeworks.into_iter().map(Homework::from).collect();
    tracing::debug!(count = homework.len(), "parsed homework");
    Ok(homework)
}
