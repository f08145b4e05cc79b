//! Grading records and the what-if average prediction

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{BakalariError, Result};
use crate::parser::de;
use crate::types::Subject;

/// A single mark
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    pub id: String,
    pub subject: Subject,
    /// When the mark was given
    pub date: DateTime<FixedOffset>,
    pub edited_at: DateTime<FixedOffset>,
    /// Mark as shown, e.g. "1-" or "N"
    pub text: String,
    pub weight: u32,
    pub is_new: bool,
    /// Graded in points rather than marks
    pub is_points: bool,
    pub max_points: u32,
    pub caption: Option<String>,
    pub theme: Option<String>,
    pub teacher_id: Option<String>,
    pub mark_type: Option<String>,
    pub type_note: Option<String>,
    pub calculated_mark_text: Option<String>,
    pub class_rank_text: Option<String>,
    /// Points received, for point-graded marks
    pub points: Option<u32>,
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// A final (certificate) mark
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalMark {
    pub id: String,
    pub subject: Subject,
    pub date: DateTime<FixedOffset>,
    pub edited_at: DateTime<FixedOffset>,
    pub text: String,
}

impl std::fmt::Display for FinalMark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Marks of one subject together with averages and notes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectMarkData {
    pub subject: Subject,
    pub average: Option<f64>,
    pub temporary_mark: Option<String>,
    pub subject_note: Option<String>,
    pub temporary_mark_note: Option<String>,
    pub points_only: bool,
    pub mark_prediction_enabled: bool,
    pub marks: Vec<Mark>,
}

impl SubjectMarkData {
    /// Start a what-if prediction from the current marks.
    pub fn prediction(&self) -> MarkPrediction {
        let marks: Vec<PredictionMark> = self
            .marks
            .iter()
            .map(|mark| PredictionMark {
                id: Some(mark.id.clone()),
                text: mark.text.clone(),
                weight: mark.weight,
                max_points: mark.max_points,
            })
            .collect();

        MarkPrediction {
            subject_id: self.subject.id.clone(),
            original: marks.clone(),
            marks,
        }
    }
}

/// Final marks and summary of one term
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermMarkData {
    pub grade_name: String,
    pub grade: u32,
    pub year_in_school: u32,
    pub school_year: String,
    pub semester: String,
    pub semester_name: String,
    pub repeated: bool,
    pub closed: bool,
    pub achievement_text: Option<String>,
    pub marks_average: Option<f64>,
    pub absent_hours: u32,
    pub not_excused_hours: u32,
    pub certificate_date: Option<DateTime<FixedOffset>>,
    pub marks: Vec<FinalMark>,
}

/// A pedagogical measure (commendation or reprimand)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct PedagogicalMeasure {
    pub school_year: String,
    pub semester: String,
    pub type_id: String,
    pub type_label: String,
    #[serde(deserialize_with = "de::datetime")]
    pub date: DateTime<FixedOffset>,
    pub text: String,
}

/// One entry of a what-if prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionMark {
    /// ID of the real mark; `None` for hypothetical marks
    pub id: Option<String>,
    pub text: String,
    pub weight: u32,
    pub max_points: u32,
}

impl PredictionMark {
    pub fn is_hypothetical(&self) -> bool {
        self.id.is_none()
    }
}

/// Editable working copy of a subject's marks, sent to the server's
/// what-if endpoint by `Client::predict_average`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkPrediction {
    subject_id: String,
    marks: Vec<PredictionMark>,
    #[serde(skip)]
    original: Vec<PredictionMark>,
}

impl MarkPrediction {
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn marks(&self) -> &[PredictionMark] {
        &self.marks
    }

    /// Append a hypothetical mark such as "1" or "2-".
    pub fn add_mark(&mut self, text: impl Into<String>, weight: u32) {
        self.marks.push(PredictionMark {
            id: None,
            text: text.into(),
            weight,
            max_points: 0,
        });
    }

    /// Change the text and/or weight of the mark at `index`.
    ///
    /// # Errors
    /// `BakalariError::MarkIndexOutOfRange` if there is no mark at `index`.
    pub fn edit_mark(&mut self, index: usize, text: Option<String>, weight: Option<u32>) -> Result<()> {
        let mark = self
            .marks
            .get_mut(index)
            .ok_or(BakalariError::MarkIndexOutOfRange(index))?;
        if let Some(text) = text {
            mark.text = text;
        }
        if let Some(weight) = weight {
            mark.weight = weight;
        }
        Ok(())
    }

    /// Remove the hypothetical mark at `index`.
    ///
    /// Real marks and out-of-range indices are left alone.
    pub fn remove_prediction_mark(&mut self, index: usize) {
        if self.marks.get(index).is_some_and(PredictionMark::is_hypothetical) {
            self.marks.remove(index);
        }
    }

    /// Drop all edits and hypothetical marks.
    pub fn reset(&mut self) {
        self.marks = self.original.clone();
    }
}
