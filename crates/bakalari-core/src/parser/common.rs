//! Parsers for small, flat responses

use serde::Deserialize;

use crate::error::Result;
use crate::parser::de;
use crate::types::{
    AbsenceData, ApiInformation, Change, Commissioner, Subject, Teacher, User,
};

/// `{Id, Abbrev, Name}` reference to a teacher or subject, as embedded in
/// most payloads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WireRef {
    pub id: String,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub abbrev: Option<String>,
    #[serde(alias = "TeacherName")]
    pub name: String,
}

impl WireRef {
    pub fn into_teacher(self) -> Teacher {
        Teacher::new(self.id, self.name, self.abbrev)
    }

    pub fn into_subject(self, teacher: Option<Teacher>) -> Subject {
        Subject {
            id: self.id,
            name: self.name,
            abbreviation: self.abbrev.map(|a| a.trim().to_string()).unwrap_or_default(),
            teacher,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CommissionersEnvelope {
    #[serde(deserialize_with = "de::null_as_empty")]
    commissioners: Vec<Commissioner>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ChangesEnvelope {
    #[serde(deserialize_with = "de::null_as_empty")]
    changes: Vec<Change>,
}

/// Parse `/api/3/user`.
pub fn parse_user(body: &str) -> Result<User> {
    Ok(serde_json::from_str(body)?)
}

/// Parse `/api/3`.
pub fn parse_api_information(body: &str) -> Result<ApiInformation> {
    Ok(serde_json::from_str(body)?)
}

/// Parse `/api`, which lists every deployed API version.
pub fn parse_api_versions(body: &str) -> Result<Vec<ApiInformation>> {
    Ok(serde_json::from_str(body)?)
}

pub fn parse_commissioners(body: &str) -> Result<Vec<Commissioner>> {
    let envelope: CommissionersEnvelope = serde_json::from_str(body)?;
    Ok(envelope.commissioners)
}

pub fn parse_absence(body: &str) -> Result<AbsenceData> {
    Ok(serde_json::from_str(body)?)
}

/// Parse `/api/3/substitutions`.
pub fn parse_changes(body: &str) -> Result<Vec<Change>> {
    let envelope: ChangesEnvelope = serde_json::from_str(body)?;
    Ok(envelope.changes)
}

/// Parse a bare number such as the new-marks counter.
pub fn parse_count(body: &str) -> Result<u32> {
    Ok(serde_json::from_str(body.trim())?)
}
