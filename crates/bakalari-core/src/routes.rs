//! Remote endpoints of the Bakaláři API
//!
//! Each `Route` knows its HTTP method and its path relative to the school's
//! base URL. Path parameters are percent-encoded.

use reqwest::Method;

/// Which event listing to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventScope {
    /// All events visible to the user
    All,
    /// Events the user is attached to
    My,
    /// Public school events
    Public,
}

/// Timetable variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimetableKind {
    /// Timetable of a concrete week including changes
    Actual,
    /// The regular, permanent timetable
    Permanent,
}

/// A single endpoint of the Bakaláři API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    ApiVersions,
    ApiV3,
    User,
    Subjects,
    SubjectThemes { subject_id: String },
    Absence,
    Events(EventScope),
    GdprCommissioners,
    Homeworks,
    HomeworkCountActual,
    HomeworkDone { homework_id: String, done: bool },
    Marks,
    MarksFinal,
    MarksMeasures,
    MarksCountNew,
    MarksWhatIf,
    Substitutions,
    Timetable(TimetableKind),
    ReceivedMessages,
    Noticeboard,
    Attachment { attachment_id: String },
}

impl Route {
    pub fn method(&self) -> Method {
        match self {
            Route::Login
            | Route::MarksWhatIf
            | Route::ReceivedMessages
            | Route::Noticeboard => Method::POST,
            Route::HomeworkDone { .. } => Method::PUT,
            _ => Method::GET,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/api/login".to_string(),
            Route::ApiVersions => "/api".to_string(),
            Route::ApiV3 => "/api/3".to_string(),
            Route::User => "/api/3/user".to_string(),
            Route::Subjects => "/api/3/subjects".to_string(),
            Route::SubjectThemes { subject_id } => {
                format!("/api/3/subjects/themes/{}", urlencoding::encode(subject_id))
            }
            Route::Absence => "/api/3/absence/student".to_string(),
            Route::Events(EventScope::All) => "/api/3/events".to_string(),
            Route::Events(EventScope::My) => "/api/3/events/my".to_string(),
            Route::Events(EventScope::Public) => "/api/3/events/public".to_string(),
            Route::GdprCommissioners => "/api/3/gdpr/commissioners".to_string(),
            Route::Homeworks => "/api/3/homeworks".to_string(),
            Route::HomeworkCountActual => "/api/3/homework/count-actual".to_string(),
            Route::HomeworkDone { homework_id, done } => format!(
                "/api/3/homeworks/{}/student-done/{}",
                urlencoding::encode(homework_id),
                done
            ),
            Route::Marks => "/api/3/marks".to_string(),
            Route::MarksFinal => "/api/3/marks/final".to_string(),
            Route::MarksMeasures => "/api/3/marks/measures".to_string(),
            Route::MarksCountNew => "/api/3/marks/count-new".to_string(),
            Route::MarksWhatIf => "/api/3/marks/what-if".to_string(),
            Route::Substitutions => "/api/3/substitutions".to_string(),
            Route::Timetable(TimetableKind::Actual) => "/api/3/timetable/actual".to_string(),
            Route::Timetable(TimetableKind::Permanent) => {
                "/api/3/timetable/permanent".to_string()
            }
            Route::ReceivedMessages => "/api/3/komens/messages/received".to_string(),
            Route::Noticeboard => "/api/3/komens/messages/noticeboard".to_string(),
            Route::Attachment { attachment_id } => format!(
                "/api/3/komens/attachment/{}",
                urlencoding::encode(attachment_id)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_route() {
        assert_eq!(Route::Login.method(), Method::POST);
        assert_eq!(Route::Login.path(), "/api/login");
    }

    #[test]
    fn test_event_scopes() {
        assert_eq!(Route::Events(EventScope::All).path(), "/api/3/events");
        assert_eq!(Route::Events(EventScope::My).path(), "/api/3/events/my");
        assert_eq!(Route::Events(EventScope::Public).path(), "/api/3/events/public");
    }

    #[test]
    fn test_homework_done_route() {
        let route = Route::HomeworkDone {
            homework_id: "Z1ABC".to_string(),
            done: true,
        };
        assert_eq!(route.method(), Method::PUT);
        assert_eq!(route.path(), "/api/3/homeworks/Z1ABC/student-done/true");

        let route = Route::HomeworkDone {
            homework_id: "Z1ABC".to_string(),
            done: false,
        };
        assert_eq!(route.path(), "/api/3/homeworks/Z1ABC/student-done/false");
    }

    #[test]
    fn test_path_parameters_are_encoded() {
        let route = Route::SubjectThemes {
            subject_id: "a b/c".to_string(),
        };
        assert_eq!(route.path(), "/api/3/subjects/themes/a%20b%2Fc");
    }

    #[test]
    fn test_komens_routes_are_post() {
        assert_eq!(Route::ReceivedMessages.method(), Method::POST);
        assert_eq!(Route::Noticeboard.method(), Method::POST);
        assert_eq!(
            Route::Attachment {
                attachment_id: "42".to_string()
            }
            .method(),
            Method::GET
        );
    }

    #[test]
    fn test_timetable_routes() {
        assert_eq!(
            Route::Timetable(TimetableKind::Actual).path(),
            "/api/3/timetable/actual"
        );
        assert_eq!(
            Route::Timetable(TimetableKind::Permanent).path(),
            "/api/3/timetable/permanent"
        );
    }
}
