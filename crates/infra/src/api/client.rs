//! REST API client
//!
//! Joins endpoint paths onto the configured base URL, injects the session
//! credential and classifies responses:
//!
//! | Status            | Error                                     |
//! |-------------------|-------------------------------------------|
//! | 401, 403          | [`ApiError::Auth`]                        |
//! | 404               | [`ApiError::NotFound`]                    |
//! | other 4xx         | [`ApiError::Validation`] (body message)   |
//! | 5xx               | [`ApiError::Server`] (cause logged)       |
//! | network / parse   | [`ApiError::Network`] / [`ApiError::Decode`] |

use std::sync::Arc;

use pathwise_common::{Credential, SessionStore};
use pathwise_domain::ApiConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use super::errors::ApiError;
use crate::http::HttpClient;

/// Source of the credential attached to outgoing requests
pub trait CredentialProvider: Send + Sync {
    fn credential(&self) -> Option<Credential>;
}

impl CredentialProvider for SessionStore {
    fn credential(&self) -> Option<Credential> {
        SessionStore::credential(self)
    }
}

/// Query string as ordered key/value pairs; keys may repeat.
pub type Query = [(&'static str, String)];

/// API client for the Pathwise REST API
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    auth_scheme: String,
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl ApiClient {
    /// Create an anonymous client from configuration.
    ///
    /// # Errors
    /// Returns `ApiError::Config` when the base URL is not an absolute
    /// http(s) URL or the transport cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = HttpClient::new(config).map_err(ApiError::from)?;
        Self::with_http(http, config)
    }

    /// Create an anonymous client over an existing transport.
    pub fn with_http(http: HttpClient, config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = validate_base_url(&config.base_url)?;
        Ok(Self { http, base_url, auth_scheme: config.auth_scheme.clone(), credentials: None })
    }

    /// Attach a credential source; every later request carries its credential.
    #[must_use]
    pub fn with_credentials(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(provider);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(Method::GET, path, &[], None, self.current_credential()).await
    }

    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
    ) -> Result<T, ApiError> {
        self.execute(Method::GET, path, query, None, self.current_credential()).await
    }

    /// GET with an explicit credential instead of the attached provider.
    #[instrument(skip(self, credential), fields(path = %path))]
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        path: &str,
        credential: &Credential,
    ) -> Result<T, ApiError> {
        self.execute(Method::GET, path, &[], None, Some(credential.clone())).await
    }

    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.execute(Method::POST, path, &[], Some(body), self.current_credential()).await
    }

    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn patch<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.execute(Method::PATCH, path, &[], Some(body), self.current_credential()).await
    }

    fn current_credential(&self) -> Option<Credential> {
        self.credentials.as_ref().and_then(|provider| provider.credential())
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<Value>,
        credential: Option<Credential>,
    ) -> Result<R, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, url = %url, authenticated = credential.is_some(), "API request");

        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(credential) = credential.as_ref().filter(|c| !c.is_empty()) {
            request =
                request.header(AUTHORIZATION, format!("{} {}", self.auth_scheme, credential.expose()));
        }
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").json(&body);
        }

        let response = self.http.send(request).await.map_err(|err| {
            warn!(%method, url = %url, error = %err, "API request failed");
            ApiError::from(err)
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|err| {
            warn!(%method, url = %url, %status, error = %err, "Failed to read API response");
            ApiError::Network(err.to_string())
        })?;

        if !status.is_success() {
            return Err(map_status_error(status, &url, &bytes));
        }

        decode_body(status, &bytes).map_err(|err| {
            warn!(%method, url = %url, %status, error = %err, "Unexpected API response shape");
            err
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("auth_scheme", &self.auth_scheme)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

fn validate_base_url(raw: &str) -> Result<String, ApiError> {
    let parsed = Url::parse(raw)
        .map_err(|e| ApiError::Config(format!("Invalid API base URL '{raw}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::Config(format!(
            "API base URL must use http or https, got '{}'",
            parsed.scheme()
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Config(format!("Failed to serialize body: {e}")))
}

/// Empty bodies (204/205 or a bare 201) decode as JSON `null`.
fn decode_body<R: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> Result<R, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(Value::Null).map_err(|_| {
            ApiError::Decode(format!("empty {} response where a body was expected", status.as_u16()))
        });
    }
    serde_json::from_slice(bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

fn map_status_error(status: StatusCode, url: &str, body: &[u8]) -> ApiError {
    let fallback = || status.canonical_reason().unwrap_or("Request failed").to_string();

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ApiError::Auth(extract_message(body).unwrap_or_else(fallback))
        }
        StatusCode::NOT_FOUND => ApiError::NotFound(extract_message(body).unwrap_or_else(fallback)),
        s if s.is_client_error() => {
            ApiError::Validation(extract_message(body).unwrap_or_else(fallback))
        }
        _ => {
            let text = String::from_utf8_lossy(body);
            warn!(url, %status, body = %text, "API server error");
            ApiError::Server(format!("{url} returned status {status}"))
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks at `error`, then `detail`, then `non_field_errors[0]`, then the
/// first field error in body order.
pub fn extract_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let object = match &value {
        Value::Object(map) => map,
        other => return first_text(other),
    };

    for key in ["error", "detail", "non_field_errors"] {
        if let Some(message) = object.get(key).and_then(first_text) {
            return Some(message);
        }
    }
    object.values().find_map(first_text)
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_messages_in_priority_order() {
        assert_eq!(
            extract_message(br#"{"detail": "Invalid token.", "error": "Preferred"}"#).as_deref(),
            Some("Preferred")
        );
        assert_eq!(
            extract_message(br#"{"detail": "Authentication credentials were not provided."}"#)
                .as_deref(),
            Some("Authentication credentials were not provided.")
        );
        assert_eq!(
            extract_message(br#"{"non_field_errors": ["Unable to log in with provided credentials."]}"#)
                .as_deref(),
            Some("Unable to log in with provided credentials.")
        );
        assert_eq!(
            extract_message(br#"{"username": ["A user with that username already exists."], "email": ["Enter a valid email address."]}"#)
                .as_deref(),
            Some("A user with that username already exists.")
        );
        assert_eq!(extract_message(br#"["Select at most 4."]"#).as_deref(), Some("Select at most 4."));
        assert_eq!(extract_message(b"<html>Bad Request</html>"), None);
        assert_eq!(extract_message(br#"{"count": 3}"#), None);
    }

    #[test]
    fn status_mapping() {
        let url = "http://localhost:8000/api/users/me/";
        assert!(matches!(
            map_status_error(StatusCode::FORBIDDEN, url, b""),
            ApiError::Auth(msg) if msg == "Forbidden"
        ));
        assert!(matches!(
            map_status_error(StatusCode::NOT_FOUND, url, br#"{"detail": "Not found."}"#),
            ApiError::NotFound(msg) if msg == "Not found."
        ));
        assert!(matches!(
            map_status_error(StatusCode::BAD_REQUEST, url, b""),
            ApiError::Validation(msg) if msg == "Bad Request"
        ));
        assert!(matches!(
            map_status_error(StatusCode::BAD_GATEWAY, url, b"upstream"),
            ApiError::Server(_)
        ));
    }

    #[test]
    fn empty_body_decodes_as_unit() {
        let unit: Result<(), _> = decode_body(StatusCode::NO_CONTENT, b"");
        assert!(unit.is_ok());
        let missing: Result<Vec<i64>, _> = decode_body(StatusCode::OK, b"");
        assert!(matches!(missing, Err(ApiError::Decode(_))));
    }

    #[test]
    fn rejects_non_http_base_urls() {
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("not a url").is_err());
        assert_eq!(validate_base_url("http://localhost:8000/").unwrap(), "http://localhost:8000");
    }
}
