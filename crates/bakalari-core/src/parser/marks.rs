//! Parsers for marks, final marks, pedagogical measures and predictions

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{BakalariError, Result};
use crate::parser::common::WireRef;
use crate::parser::de;
use crate::types::{
    FinalMark, Mark, MarkPrediction, PedagogicalMeasure, Subject, SubjectMarkData, TermMarkData,
};

/// Parse a decimal written with a comma separator, e.g. "1,50".
///
/// # Examples
/// ```
/// use bakalari_core::parser::parse_decimal;
///
/// assert_eq!(parse_decimal("1,50"), Some(1.5));
/// assert_eq!(parse_decimal("2.25"), Some(2.25));
/// assert_eq!(parse_decimal("N"), None);
/// ```
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim().replace(',', ".").parse().ok()
}

fn decimal_field(text: Option<String>, field: &str) -> Result<Option<f64>> {
    text.map(|t| {
        parse_decimal(&t)
            .ok_or_else(|| BakalariError::Deserialization(format!("invalid {field}: {t:?}")))
    })
    .transpose()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MarksEnvelope {
    #[serde(deserialize_with = "de::null_as_empty")]
    subjects: Vec<WireSubjectMarks>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireSubjectMarks {
    #[serde(default, deserialize_with = "de::null_as_empty")]
    marks: Vec<WireMark>,
    subject: WireRef,
    #[serde(default, deserialize_with = "de::non_empty")]
    average_text: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    temporary_mark: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    subject_note: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    temporary_mark_note: Option<String>,
    points_only: bool,
    mark_prediction_enabled: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireMark {
    id: String,
    #[serde(deserialize_with = "de::datetime")]
    mark_date: DateTime<FixedOffset>,
    #[serde(deserialize_with = "de::datetime")]
    edit_date: DateTime<FixedOffset>,
    mark_text: String,
    weight: u32,
    is_new: bool,
    is_points: bool,
    max_points: u32,
    #[serde(default, deserialize_with = "de::non_empty")]
    caption: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed")]
    theme: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed")]
    teacher_id: Option<String>,
    #[serde(rename = "Type", default, deserialize_with = "de::non_empty")]
    mark_type: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    type_note: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    calculated_mark_text: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    class_rank_text: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed")]
    points_text: Option<String>,
}

impl WireMark {
    fn into_mark(self, subject: &Subject) -> Result<Mark> {
        let points = self
            .points_text
            .map(|text| {
                text.parse::<u32>().map_err(|_| {
                    BakalariError::Deserialization(format!("invalid PointsText: {text:?}"))
                })
            })
            .transpose()?;

        Ok(Mark {
            id: self.id,
            subject: subject.clone(),
            date: self.mark_date,
            edited_at: self.edit_date,
            text: self.mark_text,
            weight: self.weight,
            is_new: self.is_new,
            is_points: self.is_points,
            max_points: self.max_points,
            caption: self.caption,
            theme: self.theme,
            teacher_id: self.teacher_id,
            mark_type: self.mark_type,
            type_note: self.type_note,
            calculated_mark_text: self.calculated_mark_text,
            class_rank_text: self.class_rank_text,
            points,
        })
    }
}

impl WireSubjectMarks {
    fn into_mark_data(self) -> Result<SubjectMarkData> {
        let subject = self.subject.into_subject(None);
        let marks = self
            .marks
            .into_iter()
            .map(|mark| mark.into_mark(&subject))
            .collect::<Result<Vec<_>>>()?;

        Ok(SubjectMarkData {
            average: decimal_field(self.average_text, "AverageText")?,
            subject,
            temporary_mark: self.temporary_mark,
            subject_note: self.subject_note,
            temporary_mark_note: self.temporary_mark_note,
            points_only: self.points_only,
            mark_prediction_enabled: self.mark_prediction_enabled,
            marks,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FinalMarksEnvelope {
    #[serde(deserialize_with = "de::null_as_empty")]
    certificate_terms: Vec<WireTerm>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireTerm {
    #[serde(default, deserialize_with = "de::null_as_empty")]
    final_marks: Vec<WireFinalMark>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    subjects: Vec<WireRef>,
    grade_name: String,
    grade: u32,
    year_in_school: u32,
    school_year: String,
    semester: String,
    semester_name: String,
    repeated: bool,
    closed: bool,
    #[serde(default, deserialize_with = "de::non_empty")]
    achievement_text: Option<String>,
    #[serde(default)]
    marks_average: Option<f64>,
    absent_hours: u32,
    not_excused_hours: u32,
    #[serde(default, deserialize_with = "de::optional_datetime")]
    certificate_date: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireFinalMark {
    id: String,
    #[serde(deserialize_with = "de::datetime")]
    mark_date: DateTime<FixedOffset>,
    #[serde(deserialize_with = "de::datetime")]
    edit_date: DateTime<FixedOffset>,
    mark_text: String,
    subject_id: String,
}

impl WireTerm {
    fn into_term(self) -> TermMarkData {
        let subjects: Vec<Subject> = self
            .subjects
            .into_iter()
            .map(|s| s.into_subject(None))
            .collect();

        let marks = self
            .final_marks
            .into_iter()
            .filter_map(|mark| {
                let Some(subject) = subjects.iter().find(|s| s.id == mark.subject_id) else {
                    tracing::warn!(mark_id = %mark.id, subject_id = %mark.subject_id, "final mark for unlisted subject skipped");
                    return None;
                };
                Some(FinalMark {
                    id: mark.id,
                    subject: subject.clone(),
                    date: mark.mark_date,
                    edited_at: mark.edit_date,
                    text: mark.mark_text,
                })
            })
            .collect();

        TermMarkData {
            grade_name: self.grade_name,
            grade: self.grade,
            year_in_school: self.year_in_school,
            school_year: self.school_year,
            semester: self.semester,
            semester_name: self.semester_name,
            repeated: self.repeated,
            closed: self.closed,
            achievement_text: self.achievement_text,
            marks_average: self.marks_average,
            absent_hours: self.absent_hours,
            not_excused_hours: self.not_excused_hours,
            certificate_date: self.certificate_date,
            marks,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MeasuresEnvelope {
    #[serde(deserialize_with = "de::null_as_empty")]
    pedagogical_measures: Vec<PedagogicalMeasure>,
}

/// One mark of a what-if request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WhatIfMark<'a> {
    id: Option<&'a str>,
    mark_text: &'a str,
    weight: u32,
    max_points: u32,
    subject_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PredictionResponse {
    average_text: String,
}

/// Parse `/api/3/marks`.
pub fn parse_marks(body: &str) -> Result<Vec<SubjectMarkData>> {
    let envelope: MarksEnvelope = serde_json::from_str(body)?;
    envelope
        .subjects
        .into_iter()
        .map(WireSubjectMarks::into_mark_data)
        .collect()
}

/// Parse `/api/3/marks/final`.
///
/// Final marks whose subject is not listed in the term are skipped.
pub fn parse_term_marks(body: &str) -> Result<Vec<TermMarkData>> {
    let envelope: FinalMarksEnvelope = serde_json::from_str(body)?;
    Ok(envelope
        .certificate_terms
        .into_iter()
        .map(WireTerm::into_term)
        .collect())
}

/// Parse `/api/3/marks/measures`.
pub fn parse_pedagogical_measures(body: &str) -> Result<Vec<PedagogicalMeasure>> {
    let envelope: MeasuresEnvelope = serde_json::from_str(body)?;
    Ok(envelope.pedagogical_measures)
}

/// Parse the `/api/3/marks/what-if` response into the predicted average.
pub fn parse_prediction(body: &str) -> Result<f64> {
    let response: PredictionResponse = serde_json::from_str(body)?;
    decimal_field(Some(response.average_text), "AverageText")?
        .ok_or_else(|| BakalariError::Deserialization("missing AverageText".to_string()))
}

pub(crate) fn what_if_payload(prediction: &MarkPrediction) -> Vec<WhatIfMark<'_>> {
    prediction
        .marks()
        .iter()
        .map(|mark| WhatIfMark {
            id: mark.id.as_deref(),
            mark_text: &mark.text,
            weight: mark.weight,
            max_points: mark.max_points,
            subject_id: prediction.subject_id(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MARKS_JSON: &str = r#"{"Subjects":[{
        "Marks":[
            {"MarkDate":"2022-06-01T00:00:00+02:00","EditDate":"2022-06-02T10:15:00+02:00","Caption":"Písemka",
             "Theme":"Goniometrie\n","MarkText":"1-","TeacherId":"U1 ","Type":"T","TypeNote":"","Weight":10,
             "SubjectId":"12","IsNew":true,"IsPoints":false,"CalculatedMarkText":"","ClassRankText":null,
             "Id":"M1","PointsText":"","MaxPoints":0},
            {"MarkDate":"2022-06-08T00:00:00+02:00","EditDate":"2022-06-08T00:00:00+02:00","Caption":"Test",
             "Theme":"","MarkText":"18","Weight":5,"SubjectId":"12","IsNew":false,"IsPoints":true,
             "Id":"M2","PointsText":"18","MaxPoints":20}
        ],
        "Subject":{"Id":"12","Abbrev":"M","Name":"Matematika"},
        "AverageText":"1,33",
        "TemporaryMark":"",
        "SubjectNote":"",
        "TemporaryMarkNote":"",
        "PointsOnly":false,
        "MarkPredictionEnabled":true
    }]}"#;

    #[test]
    fn test_parse_marks() {
        let data = parse_marks(MARKS_JSON).unwrap();
        assert_eq!(data.len(), 1);

        let subject = &data[0];
        assert_eq!(subject.subject.name, "Matematika");
        assert_eq!(subject.average, Some(1.33));
        assert_eq!(subject.temporary_mark, None);
        assert!(subject.mark_prediction_enabled);
        assert_eq!(subject.marks.len(), 2);

        let first = &subject.marks[0];
        assert_eq!(first.text, "1-");
        assert_eq!(first.weight, 10);
        assert_eq!(first.theme.as_deref(), Some("Goniometrie"));
        assert_eq!(first.teacher_id.as_deref(), Some("U1"));
        assert_eq!(first.mark_type.as_deref(), Some("T"));
        assert_eq!(first.points, None);
        assert_eq!(first.subject.id, "12");

        let second = &subject.marks[1];
        assert!(second.is_points);
        assert_eq!(second.points, Some(18));
        assert_eq!(second.theme, None);
    }

    #[test]
    fn test_parse_marks_invalid_average() {
        let body = MARKS_JSON.replace("\"1,33\"", "\"abc\"");
        let err = parse_marks(&body).unwrap_err();
        assert!(err.to_string().contains("AverageText"));
    }

    #[test]
    fn test_parse_marks_missing_weight() {
        let body = MARKS_JSON.replace("\"Weight\":10,", "");
        assert!(parse_marks(&body).unwrap_err().is_deserialization());
    }

    #[test]
    fn test_parse_term_marks() {
        let body = r#"{"CertificateTerms":[{
            "FinalMarks":[
                {"MarkDate":"2022-06-30T00:00:00+02:00","EditDate":"2022-06-24T00:00:00+02:00","MarkText":"1","SubjectId":"12","Id":"F1"},
                {"MarkDate":"2022-06-30T00:00:00+02:00","EditDate":"2022-06-24T00:00:00+02:00","MarkText":"2","SubjectId":"99","Id":"F2"}
            ],
            "Subjects":[{"Id":"12","Abbrev":"M","Name":"Matematika"}],
            "GradeName":"4.A","Grade":4,"YearInSchool":4,"SchoolYear":"2021/2022","Semester":"2",
            "SemesterName":"2. pololetí","Repeated":false,"Closed":true,"AchievementText":"prospěl s vyznamenáním",
            "MarksAverage":1.2,"AbsentHours":40,"NotExcusedHours":0,"CertificateDate":"2022-06-30T00:00:00+02:00"
        }]}"#;
        let terms = parse_term_marks(body).unwrap();
        assert_eq!(terms.len(), 1);

        let term = &terms[0];
        assert_eq!(term.semester_name, "2. pololetí");
        assert_eq!(term.marks_average, Some(1.2));
        assert!(term.certificate_date.is_some());
        // F2 references a subject that is not listed
        assert_eq!(term.marks.len(), 1);
        assert_eq!(term.marks[0].subject.name, "Matematika");
        assert_eq!(term.marks[0].to_string(), "1");
    }

    #[test]
    fn test_parse_pedagogical_measures_empty() {
        let measures = parse_pedagogical_measures(r#"{"PedagogicalMeasures":[]}"#).unwrap();
        assert!(measures.is_empty());
    }

    #[test]
    fn test_parse_prediction() {
        assert_eq!(parse_prediction(r#"{"AverageText":"1,50"}"#).unwrap(), 1.5);
        assert!(parse_prediction(r#"{"AverageText":""}"#).is_err());
        assert!(parse_prediction(r#"{}"#).is_err());
    }

    #[test]
    fn test_what_if_payload() {
        let data = parse_marks(MARKS_JSON).unwrap();
        let mut prediction = data[0].prediction();
        prediction.add_mark("3", 8);

        let payload = serde_json::to_value(what_if_payload(&prediction)).unwrap();
        assert_eq!(payload[0]["Id"], "M1");
        assert_eq!(payload[0]["MarkText"], "1-");
        assert_eq!(payload[0]["Weight"], 10);
        assert_eq!(payload[0]["SubjectId"], "12");
        assert!(payload[2]["Id"].is_null());
        assert_eq!(payload[2]["MarkText"], "3");
        assert_eq!(payload[2]["MaxPoints"], 0);
    }

    proptest! {
        #[test]
        fn prop_decimal_comma_matches_dot(whole in 0u32..100, frac in 0u32..100) {
            let comma = format!("{whole},{frac:02}");
            let dot: f64 = format!("{whole}.{frac:02}").parse().unwrap();
            prop_assert_eq!(parse_decimal(&comma), Some(dot));
        }
    }
}
