//! Parsers for the subject list and subject themes

use serde::Deserialize;

use crate::error::{BakalariError, Result};
use crate::parser::de;
use crate::types::{Subject, SubjectLessonEntry, Teacher};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SubjectsEnvelope {
    #[serde(deserialize_with = "de::null_as_empty")]
    subjects: Vec<WireSubject>,
}

/// Subject with its teacher flattened into `Teacher*` keys
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireSubject {
    #[serde(rename = "SubjectID")]
    subject_id: String,
    subject_name: String,
    subject_abbrev: String,
    #[serde(rename = "TeacherID", default, deserialize_with = "de::trimmed")]
    teacher_id: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    teacher_name: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    teacher_abbrev: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    teacher_email: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    teacher_web: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    teacher_school_phone: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    teacher_home_phone: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    teacher_mobile_phone: Option<String>,
}

impl WireSubject {
    fn into_subject(self) -> Result<Subject> {
        let teacher = match self.teacher_id {
            Some(id) => {
                let name = self.teacher_name.ok_or_else(|| {
                    BakalariError::Deserialization(format!("teacher {id} has no name"))
                })?;
                Some(Teacher {
                    id,
                    name,
                    abbreviation: self.teacher_abbrev,
                    email: self.teacher_email,
                    web: self.teacher_web,
                    school_phone: self.teacher_school_phone,
                    home_phone: self.teacher_home_phone,
                    mobile_phone: self.teacher_mobile_phone,
                })
            }
            None => None,
        };

        Ok(Subject {
            id: self.subject_id,
            name: self.subject_name,
            abbreviation: self.subject_abbrev.trim().to_string(),
            teacher,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ThemesEnvelope {
    #[serde(deserialize_with = "de::null_as_empty")]
    themes: Vec<SubjectLessonEntry>,
}

/// Parse `/api/3/subjects`.
pub fn parse_subjects(body: &str) -> Result<Vec<Subject>> {
    let envelope: SubjectsEnvelope = serde_json::from_str(body)?;
    envelope
        .subjects
        .into_iter()
        .map(WireSubject::into_subject)
        .collect()
}

/// Parse `/api/3/subjects/themes/{id}`.
pub fn parse_subject_lessons(body: &str) -> Result<Vec<SubjectLessonEntry>> {
    let envelope: ThemesEnvelope = serde_json::from_str(body)?;
    Ok(envelope.themes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBJECTS_JSON: &str = r#"{"Subjects":[
        {"SubjectID":"12","SubjectName":"Matematika","SubjectAbbrev":"M ","TeacherID":"U1","TeacherName":"Jan Novák","TeacherAbbrev":"Nov","TeacherEmail":"novak@skola.cz","TeacherWeb":"","TeacherSchoolPhone":"123","TeacherHomePhone":null,"TeacherMobilePhone":""},
        {"SubjectID":"30","SubjectName":"Třídnická hodina","SubjectAbbrev":"TH","TeacherID":" "}
    ]}"#;

    #[test]
    fn test_parse_subjects() {
        let subjects = parse_subjects(SUBJECTS_JSON).unwrap();
        assert_eq!(subjects.len(), 2);

        let math = &subjects[0];
        assert_eq!(math.abbreviation, "M");
        let teacher = math.teacher.as_ref().unwrap();
        assert_eq!(teacher.name, "Jan Novák");
        assert_eq!(teacher.email.as_deref(), Some("novak@skola.cz"));
        assert_eq!(teacher.web, None);
        assert_eq!(teacher.school_phone.as_deref(), Some("123"));
        assert_eq!(teacher.mobile_phone, None);

        assert_eq!(subjects[1].teacher, None);
    }

    #[test]
    fn test_parse_subjects_teacher_without_name() {
        let body = r#"{"Subjects":[{"SubjectID":"1","SubjectName":"M","SubjectAbbrev":"M","TeacherID":"U1"}]}"#;
        assert!(parse_subjects(body).unwrap_err().is_deserialization());
    }

    #[test]
    fn test_parse_subject_lessons() {
        let body = r#"{"Themes":[{"Date":"2022-06-13T00:00:00+02:00","Theme":"Integrály","Note":null,"HourCaption":"3","LessonLabel":"101"}]}"#;
        let lessons = parse_subject_lessons(body).unwrap();
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].theme.as_deref(), Some("Integrály"));
    }
}
