//! JSON parsers for Bakaláři API responses
//!
//! Each parser takes the raw response body and returns records. Where the
//! wire shape differs from the record (flattened teachers, normalized
//! timetables, comma decimals) a private wire struct is deserialized first
//! and converted.
//!
//! - `common`: user, API information, absence, substitutions, counters
//! - `subjects`: subject list and subject themes
//! - `timetable`: actual and permanent timetables
//! - `marks`: marks, final marks, measures and predictions
//! - `homework`, `events`, `komens`

pub(crate) mod de;

pub mod common;
pub mod events;
pub mod homework;
pub mod komens;
pub mod marks;
pub mod subjects;
pub mod timetable;

pub use common::{
    parse_absence, parse_api_information, parse_api_versions, parse_changes, parse_commissioners,
    parse_count, parse_user,
};
pub use de::{parse_date, parse_datetime};
pub use events::parse_events;
pub use homework::parse_homework;
pub use komens::parse_messages;
pub use marks::{
    parse_decimal, parse_marks, parse_pedagogical_measures, parse_prediction, parse_term_marks,
};
pub use subjects::{parse_subject_lessons, parse_subjects};
pub use timetable::parse_timetable;
