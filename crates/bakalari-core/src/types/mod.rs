//! Record types returned by the Bakaláři API
//!
//! Every record is a plain value built from a single response. Records never
//! hold a handle to the client; operations that need the network (downloading
//! an attachment, marking homework done, predicting an average) are methods
//! on `Client` taking the record by reference.
//!
//! Records serialize in snake_case. Types that mirror the wire format
//! one-to-one also implement `Deserialize`, reading the server's PascalCase
//! keys.

pub mod absence;
pub mod change;
pub mod common;
pub mod event;
pub mod homework;
pub mod komens;
pub mod marks;
pub mod subject;
pub mod timetable;

pub use absence::{AbsenceData, AbsenceEntry, AbsencePerSubjectEntry};
pub use change::{Change, ChangeType};
pub use common::{ApiInformation, Class, Commissioner, Cycle, Group, Room, Student, Teacher, User};
pub use event::{Event, EventTime, EventType};
pub use homework::Homework;
pub use komens::{Attachment, Message};
pub use marks::{
    FinalMark, Mark, MarkPrediction, PedagogicalMeasure, PredictionMark, SubjectMarkData,
    TermMarkData,
};
pub use subject::{Subject, SubjectLessonEntry};
pub use timetable::{Day, DayType, Hour, Lesson, Week};
