//! Main Bakaláři client API
//!
//! This module provides the high-level API for the Bakaláři school system.
//! It combines the HTTP transport with the JSON parsers and returns plain
//! record values.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::NaiveDate;

use crate::error::{BakalariError, Result};
use crate::http::{ClientConfig, HttpClient, Session};
use crate::parser::marks::what_if_payload;
use crate::parser::{
    parse_absence, parse_api_information, parse_api_versions, parse_changes, parse_commissioners,
    parse_count, parse_events, parse_homework, parse_marks, parse_messages,
    parse_pedagogical_measures, parse_prediction, parse_subject_lessons, parse_subjects,
    parse_term_marks, parse_timetable, parse_user,
};
use crate::routes::{EventScope, Route, TimetableKind};
use crate::types::{
    AbsenceData, ApiInformation, Attachment, Change, Commissioner, Day, Event, Homework,
    MarkPrediction, Message, PedagogicalMeasure, Subject, SubjectLessonEntry, SubjectMarkData,
    TermMarkData, User, Week,
};

/// Format used for `date`, `from` and `to` query parameters
const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Async client for one school's Bakaláři deployment
///
/// Every operation except `login` needs a session and fails with
/// `BakalariError::NotLoggedIn` without one.
///
/// # Example
/// ```no_run
/// use bakalari_core::Client;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut client = Client::new("https://bakalari.example.cz")?;
///     client.login("novak", "heslo").await?;
///
///     let user = client.get_user().await?;
///     println!("{} ({})", user.name, user.class.id);
///
///     Ok(())
/// }
/// ```
pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Create a client for `route` with default configuration.
    ///
    /// # Errors
    /// - `BakalariError::InvalidUrl` if the route is not an absolute URL
    ///
    /// # Example
    /// ```
    /// use bakalari_core::Client;
    ///
    /// let client = Client::new("https://bakalari.example.cz/").expect("valid route");
    /// assert!(!client.is_logged_in());
    /// ```
    pub fn new(route: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(route))
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::with_config(&config)?,
        })
    }

    /// Base URL of the school, without a trailing slash
    pub fn route(&self) -> &str {
        self.http.base_url()
    }

    pub fn session(&self) -> Option<&Session> {
        self.http.session()
    }

    pub fn is_logged_in(&self) -> bool {
        self.http.session().is_some()
    }

    /// API version reported at login
    pub fn api_version(&self) -> Option<&str> {
        self.http.session().and_then(Session::api_version)
    }

    /// Log in with a username and password.
    ///
    /// Returns the access token. The session is kept by the client and used
    /// for every later call.
    ///
    /// # Errors
    /// - `BakalariError::Authentication` if the credentials are rejected
    /// - `BakalariError::Http` on transport failure
    ///
    /// # Example
    /// ```no_run
    /// use bakalari_core::Client;
    ///
    /// # async fn example() -> Result<(), bakalari_core::BakalariError> {
    /// let mut client = Client::new("https://bakalari.example.cz")?;
    /// let token = client.login("novak", "heslo").await?;
    /// println!("API {:?}", client.api_version());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn login(&mut self, username: &str, password: &str) -> Result<String> {
        let session = self.http.login(username, password).await?;
        tracing::info!(api_version = ?session.api_version(), "logged in");
        Ok(session.access_token().to_string())
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Sessions are never refreshed in the background; call this when
    /// `Session::is_expired` reports true or a call fails with
    /// `BakalariError::Unauthorized`.
    pub async fn refresh_session(&mut self) -> Result<String> {
        let session = self.http.refresh().await?;
        tracing::info!(api_version = ?session.api_version(), "session refreshed");
        Ok(session.access_token().to_string())
    }

    /// Forget the session. Later calls fail with `NotLoggedIn`.
    pub fn logout(&mut self) {
        if self.http.session().is_some() {
            tracing::info!("logged out");
        }
        self.http.clear_session();
    }

    pub async fn get_user(&self) -> Result<User> {
        let body = self.http.get_json(Route::User, &[]).await?;
        parse_user(&body)
    }

    /// Get the timetable of the week containing `date`.
    ///
    /// Without a date the current week is returned. The date is always sent
    /// explicitly, using the local calendar date when `None`.
    ///
    /// # Example
    /// ```no_run
    /// use bakalari_core::Client;
    /// use chrono::NaiveDate;
    ///
    /// # async fn example(client: Client) -> Result<(), bakalari_core::BakalariError> {
    /// let date = NaiveDate::from_ymd_opt(2022, 6, 17).unwrap();
    /// for day in client.get_actual_timetable(Some(date)).await? {
    ///     println!("{} {} lessons", day.date, day.lessons.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_actual_timetable(&self, date: Option<NaiveDate>) -> Result<Vec<Day>> {
        let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
        let week = Week::containing(date);
        tracing::debug!(monday = %week.monday, sunday = %week.sunday, "fetching actual timetable");

        let query = [("date", date.format(QUERY_DATE_FORMAT).to_string())];
        let body = self
            .http
            .get_json(Route::Timetable(TimetableKind::Actual), &query)
            .await?;
        parse_timetable(&body)
    }

    /// Get the regular timetable without changes.
    pub async fn get_permanent_timetable(&self) -> Result<Vec<Day>> {
        let body = self
            .http
            .get_json(Route::Timetable(TimetableKind::Permanent), &[])
            .await?;
        parse_timetable(&body)
    }

    /// Get substitutions and other timetable changes.
    pub async fn get_timetable_changes(
        &self,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<Vec<Change>> {
        let body = self
            .http
            .get_json(Route::Substitutions, &range_query(since, until))
            .await?;
        parse_changes(&body)
    }

    pub async fn get_subjects(&self) -> Result<Vec<Subject>> {
        let body = self.http.get_json(Route::Subjects, &[]).await?;
        parse_subjects(&body)
    }

    /// Get the lesson themes taught so far in `subject`.
    pub async fn get_subject_lessons(&self, subject: &Subject) -> Result<Vec<SubjectLessonEntry>> {
        let route = Route::SubjectThemes {
            subject_id: subject.id.clone(),
        };
        let body = self.http.get_json(route, &[]).await?;
        parse_subject_lessons(&body)
    }

    pub async fn get_absences(&self) -> Result<AbsenceData> {
        let body = self.http.get_json(Route::Absence, &[]).await?;
        parse_absence(&body)
    }

    /// Get marks grouped by subject.
    pub async fn get_marks(&self) -> Result<Vec<SubjectMarkData>> {
        let body = self.http.get_json(Route::Marks, &[]).await?;
        parse_marks(&body)
    }

    /// Get final marks of every finished term.
    pub async fn get_term_marks(&self) -> Result<Vec<TermMarkData>> {
        let body = self.http.get_json(Route::MarksFinal, &[]).await?;
        parse_term_marks(&body)
    }

    pub async fn get_pedagogical_measures(&self) -> Result<Vec<PedagogicalMeasure>> {
        let body = self.http.get_json(Route::MarksMeasures, &[]).await?;
        parse_pedagogical_measures(&body)
    }

    /// Number of marks not yet seen by the user.
    pub async fn get_new_marks_count(&self) -> Result<u32> {
        let body = self.http.get_json(Route::MarksCountNew, &[]).await?;
        parse_count(&body)
    }

    /// Ask the server for the average a prediction would result in.
    ///
    /// # Example
    /// ```no_run
    /// # async fn example(client: bakalari_core::Client) -> Result<(), bakalari_core::BakalariError> {
    /// let marks = client.get_marks().await?;
    /// let mut prediction = marks[0].prediction();
    /// prediction.add_mark("1", 10);
    /// let average = client.predict_average(&prediction).await?;
    /// println!("With another 1 the average would be {average:.2}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn predict_average(&self, prediction: &MarkPrediction) -> Result<f64> {
        let payload = what_if_payload(prediction);
        let body = self.http.send_json(Route::MarksWhatIf, &payload).await?;
        parse_prediction(&body)
    }

    pub async fn get_all_events(
        &self,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<Vec<Event>> {
        self.events(EventScope::All, since, until).await
    }

    /// Events the user takes part in.
    pub async fn get_my_events(
        &self,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<Vec<Event>> {
        self.events(EventScope::My, since, until).await
    }

    pub async fn get_public_events(
        &self,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<Vec<Event>> {
        self.events(EventScope::Public, since, until).await
    }

    async fn events(
        &self,
        scope: EventScope,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<Vec<Event>> {
        let body = self
            .http
            .get_json(Route::Events(scope), &range_query(since, until))
            .await?;
        parse_events(&body)
    }

    /// Get homework assigned in a date range.
    ///
    /// Without bounds the server picks its own default window.
    pub async fn get_homework(
        &self,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<Vec<Homework>> {
        let body = self
            .http
            .get_json(Route::Homeworks, &range_query(since, until))
            .await?;
        parse_homework(&body)
    }

    /// Number of homework assignments not yet closed.
    pub async fn get_unclosed_homework_count(&self) -> Result<u32> {
        let body = self.http.get_json(Route::HomeworkCountActual, &[]).await?;
        parse_count(&body)
    }

    /// Mark `homework` as done or not done by the student.
    ///
    /// The passed record is not updated; fetch the homework again to see the
    /// new state.
    pub async fn set_homework_done(&self, homework: &Homework, done: bool) -> Result<()> {
        let route = Route::HomeworkDone {
            homework_id: homework.id.clone(),
            done,
        };
        self.http.send_action(route).await
    }

    pub async fn get_received_messages(&self) -> Result<Vec<Message>> {
        let body = self.http.send_empty(Route::ReceivedMessages).await?;
        parse_messages(&body)
    }

    pub async fn get_noticeboard_messages(&self) -> Result<Vec<Message>> {
        let body = self.http.send_empty(Route::Noticeboard).await?;
        parse_messages(&body)
    }

    /// Download the content of an attachment.
    pub async fn download_attachment(&self, attachment: &Attachment) -> Result<Bytes> {
        let route = Route::Attachment {
            attachment_id: attachment.id.clone(),
        };
        self.http.get_raw(route).await
    }

    /// Download an attachment into `dir`.
    ///
    /// The file is named `name`, or the attachment's own name when `None`.
    /// Only the final path component of the name is used.
    ///
    /// # Returns
    /// The path of the written file
    ///
    /// # Errors
    /// - `BakalariError::NotLoggedIn` without a session, whatever the name
    /// - `BakalariError::Io` if the name has no file component or writing fails
    pub async fn save_attachment(
        &self,
        attachment: &Attachment,
        dir: impl AsRef<Path>,
        name: Option<&str>,
    ) -> Result<PathBuf> {
        if !self.is_logged_in() {
            return Err(BakalariError::NotLoggedIn);
        }

        let name = name.unwrap_or(&attachment.name);
        let file_name = Path::new(name).file_name().ok_or_else(|| {
            BakalariError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid file name: {name:?}"),
            ))
        })?;
        let path = dir.as_ref().join(file_name);

        let data = self.download_attachment(attachment).await?;
        tokio::fs::write(&path, &data).await?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "attachment saved");
        Ok(path)
    }

    /// Get the school's GDPR commissioners.
    pub async fn get_gdpr_commissioners(&self) -> Result<Vec<Commissioner>> {
        let body = self.http.get_json(Route::GdprCommissioners, &[]).await?;
        parse_commissioners(&body)
    }

    /// List every API version deployed on the server.
    pub async fn get_api_information(&self) -> Result<Vec<ApiInformation>> {
        let body = self.http.get_json(Route::ApiVersions, &[]).await?;
        parse_api_versions(&body)
    }

    pub async fn get_api_v3_information(&self) -> Result<ApiInformation> {
        let body = self.http.get_json(Route::ApiV3, &[]).await?;
        parse_api_information(&body)
    }
}

/// Build `from`/`to` query parameters, omitting missing bounds.
fn range_query(since: Option<NaiveDate>, until: Option<NaiveDate>) -> Vec<(&'static str, String)> {
    [("from", since), ("to", until)]
        .into_iter()
        .filter_map(|(key, date)| date.map(|d| (key, d.format(QUERY_DATE_FORMAT).to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = Client::new("https://bakalari.example.cz/").unwrap();
        assert_eq!(client.route(), "https://bakalari.example.cz");
        assert!(!client.is_logged_in());
        assert_eq!(client.api_version(), None);
    }

    #[test]
    fn test_client_invalid_route() {
        assert!(matches!(
            Client::new("bakalari"),
            Err(BakalariError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_range_query() {
        assert!(range_query(None, None).is_empty());
        assert_eq!(
            range_query(Some(date(2022, 6, 1)), None),
            vec![("from", "2022-06-01".to_string())]
        );
        assert_eq!(
            range_query(Some(date(2022, 6, 1)), Some(date(2022, 6, 30))),
            vec![("from", "2022-06-01".to_string()), ("to", "2022-06-30".to_string())]
        );
        assert_eq!(
            range_query(None, Some(date(2022, 6, 30))),
            vec![("to", "2022-06-30".to_string())]
        );
    }

    #[test]
    fn test_logout_without_session() {
        let mut client = Client::new("https://bakalari.example.cz").unwrap();
        client.logout();
        assert!(!client.is_logged_in());
    }

    #[tokio::test]
    async fn test_get_user_requires_login() {
        let client = Client::new("https://bakalari.example.cz").unwrap();
        assert!(matches!(
            client.get_user().await,
            Err(BakalariError::NotLoggedIn)
        ));
    }

    #[tokio::test]
    async fn test_refresh_requires_login() {
        let mut client = Client::new("https://bakalari.example.cz").unwrap();
        assert!(matches!(
            client.refresh_session().await,
            Err(BakalariError::NotLoggedIn)
        ));
    }

    #[tokio::test]
    async fn test_save_attachment_requires_login_for_any_name() {
        let client = Client::new("https://bakalari.example.cz").unwrap();
        let attachment = Attachment {
            id: "A1".to_string(),
            name: "..".to_string(),
            size: 0,
            mime_type: "text/plain".to_string(),
        };
        let result = client.save_attachment(&attachment, std::env::temp_dir(), None).await;
        assert!(matches!(result, Err(BakalariError::NotLoggedIn)));

        let result = client
            .save_attachment(&attachment, std::env::temp_dir(), Some("/"))
            .await;
        assert!(matches!(result, Err(BakalariError::NotLoggedIn)));
    }
}
