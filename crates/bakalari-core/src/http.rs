//! HTTP transport for the Bakaláři API
//!
//! This module owns the underlying `reqwest::Client`, the session obtained
//! from `/api/login`, and the mapping of HTTP statuses and content types to
//! `BakalariError`. Requests are sent once; failures surface to the caller.

use std::fmt;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{BakalariError, Result};
use crate::routes::Route;

/// Default User-Agent sent with every request
const DEFAULT_USER_AGENT: &str = concat!("bakalari-core/", env!("CARGO_PKG_VERSION"));

/// Default Accept-Language header for Czech content
const DEFAULT_ACCEPT_LANGUAGE: &str = "cs-CZ,cs;q=0.9,en;q=0.8";

/// OAuth client id the Bakaláři mobile apps log in with
const DEFAULT_CLIENT_ID: &str = "ANDR";

const JSON_CONTENT_TYPE: &str = "application/json";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Configuration for the Bakaláři client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the school's Bakaláři deployment
    pub route: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User-Agent header value
    pub user_agent: String,
    /// OAuth client id used at login (default: "ANDR")
    pub client_id: String,
}

impl ClientConfig {
    /// Create a configuration for `route` with default settings.
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
        }
    }
}

/// Authenticated session state held after a successful login.
#[derive(Clone)]
pub struct Session {
    access_token: String,
    refresh_token: String,
    api_version: Option<String>,
    expires_at: Instant,
}

impl Session {
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// API version reported by the server at login, e.g. "3.13.0"
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// Whether the access token's lifetime has passed.
    ///
    /// Expired sessions are not refreshed automatically; call
    /// `Client::refresh_session`.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: u64,
    #[serde(rename = "bak:ApiVersion", default)]
    api_version: Option<String>,
}

/// Error body returned by the token endpoint and the API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    #[serde(rename = "Message")]
    message: Option<String>,
}

/// HTTP client bound to one Bakaláři route.
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    client_id: String,
    session: Option<Session>,
}

impl HttpClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    /// - `BakalariError::InvalidUrl` if the route is not an absolute URL
    /// - `BakalariError::Http` if the HTTP client cannot be created
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let base_url = config.route.trim_end_matches('/').to_string();
        url::Url::parse(&base_url)
            .map_err(|e| BakalariError::InvalidUrl(format!("{}: {}", config.route, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            client_id: config.client_id.clone(),
            session: None,
        })
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn clear_session(&mut self) {
        self.session = None;
    }

    /// Exchange a username and password for a session.
    ///
    /// # Errors
    /// - `BakalariError::Authentication` if the server rejects the credentials
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&Session> {
        let form = [
            ("client_id", self.client_id.as_str()),
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
        ];
        let token = self.request_token(&form).await?;
        let session = Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            api_version: token.api_version,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        };
        Ok(&*self.session.insert(session))
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// # Errors
    /// - `BakalariError::NotLoggedIn` if there is no session to refresh
    /// - `BakalariError::Authentication` if the refresh token was rejected
    pub async fn refresh(&mut self) -> Result<&Session> {
        let (refresh_token, api_version) = match &self.session {
            Some(session) => (session.refresh_token.clone(), session.api_version.clone()),
            None => return Err(BakalariError::NotLoggedIn),
        };

        let form = [
            ("client_id", self.client_id.as_str()),
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
        ];
        let token = self.request_token(&form).await?;
        let session = Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            api_version: token.api_version.or(api_version),
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        };
        Ok(&*self.session.insert(session))
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse> {
        let route = Route::Login;
        let url = self.url(&route);
        let response = self
            .client
            .request(route.method(), &url)
            .form(form)
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            let body = response.text().await?;
            let message = error_message(&body);
            tracing::warn!(status = status.as_u16(), reason = %message, "authentication rejected");
            return Err(BakalariError::Authentication(message));
        }

        let response = check_status(response, &route, &url).await?;
        let body = read_json_body(response, &url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET a JSON resource, returning the raw body.
    pub async fn get_json(&self, route: Route, query: &[(&str, String)]) -> Result<String> {
        let builder = self.authorized(&route)?.query(query);
        self.execute(builder, &route).await
    }

    /// Send a request without a payload and return the JSON body.
    ///
    /// Bodiless POST and PUT calls are sent as an empty form.
    pub async fn send_empty(&self, route: Route) -> Result<String> {
        let builder = self
            .authorized(&route)?
            .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(Vec::new());
        self.execute(builder, &route).await
    }

    /// Send a request without a payload and discard the response body.
    pub async fn send_action(&self, route: Route) -> Result<()> {
        let url = self.url(&route);
        let response = self
            .authorized(&route)?
            .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(Vec::new())
            .send()
            .await?;
        check_status(response, &route, &url).await?;
        Ok(())
    }

    /// Send `payload` as a JSON body and return the JSON body of the response.
    pub async fn send_json<T: Serialize + ?Sized>(&self, route: Route, payload: &T) -> Result<String> {
        let builder = self.authorized(&route)?.json(payload);
        self.execute(builder, &route).await
    }

    /// GET a binary resource.
    pub async fn get_raw(&self, route: Route) -> Result<Bytes> {
        let url = self.url(&route);
        let response = self.authorized(&route)?.send().await?;
        let response = check_status(response, &route, &url).await?;
        Ok(response.bytes().await?)
    }

    fn url(&self, route: &Route) -> String {
        format!("{}{}", self.base_url, route.path())
    }

    fn authorized(&self, route: &Route) -> Result<RequestBuilder> {
        let session = self.session.as_ref().ok_or(BakalariError::NotLoggedIn)?;
        Ok(self
            .client
            .request(route.method(), self.url(route))
            .bearer_auth(&session.access_token))
    }

    async fn execute(&self, builder: RequestBuilder, route: &Route) -> Result<String> {
        let url = self.url(route);
        let response = builder.send().await?;
        let response = check_status(response, route, &url).await?;
        read_json_body(response, &url).await
    }
}

/// Map a non-200 response to the matching error variant.
async fn check_status(response: Response, route: &Route, url: &str) -> Result<Response> {
    let status = response.status();
    tracing::debug!(method = %route.method(), url = %url, status = status.as_u16(), "request finished");

    if status == StatusCode::OK {
        return Ok(response);
    }

    let body = response.text().await?;
    let message = error_message(&body);
    Err(match status {
        StatusCode::BAD_REQUEST => BakalariError::BadRequest(message),
        StatusCode::UNAUTHORIZED => BakalariError::Unauthorized(message),
        StatusCode::NOT_FOUND => BakalariError::NotFound(if message.is_empty() {
            url.to_string()
        } else {
            message
        }),
        _ => BakalariError::UnexpectedStatus {
            status: status.as_u16(),
            message,
        },
    })
}

async fn read_json_body(response: Response, url: &str) -> Result<String> {
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if !content_type.starts_with(JSON_CONTENT_TYPE) {
        tracing::debug!(url = %url, content_type = %content_type, "non-JSON response");
        return Err(BakalariError::UnexpectedContentType(content_type));
    }

    Ok(response.text().await?)
}

/// Pull a human readable message out of an error body.
///
/// The token endpoint uses `error_description`, the API uses `Message`.
/// Anything else is passed through verbatim.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error_description: Some(message),
            ..
        })
        | Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        _ => body.trim().to_string(),
    }
}
