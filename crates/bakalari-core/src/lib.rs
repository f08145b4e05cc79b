//! Bakaláři Client Core Library
//!
//! This crate provides an async client for the JSON API of Bakaláři, the
//! school information system used by Czech and Slovak schools.
//!
//! # Features
//! - Password login with manual session refresh
//! - Timetables, substitutions, subjects and absence
//! - Marks, final marks, pedagogical measures and what-if average prediction
//! - Homework, calendar events and Komens messages with attachments

pub mod client;
pub mod error;
pub mod http;
pub mod parser;
pub mod routes;
pub mod types;

// Re-export main types for convenience
pub use client::Client;
pub use error::{BakalariError, Result};
pub use http::{ClientConfig, Session};
pub use routes::{EventScope, Route, TimetableKind};
pub use types::{
    AbsenceData, AbsenceEntry, AbsencePerSubjectEntry, ApiInformation, Attachment, Change,
    ChangeType, Class, Commissioner, Cycle, Day, DayType, Event, EventTime, EventType, FinalMark,
    Group, Homework, Hour, Lesson, Mark, MarkPrediction, Message, PedagogicalMeasure,
    PredictionMark, Room, Student, Subject, SubjectLessonEntry, SubjectMarkData, Teacher,
    TermMarkData, User, Week,
};
