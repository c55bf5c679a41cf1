//! HTTP client wrapper for the FeedFactory API.

use std::fmt;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Url};
use serde_json::{Map, Value};
use tracing::debug;

use crate::endpoint::{resolve_endpoint, ResourceKind};
use crate::error::{ApiError, Error, Result};
use crate::models::document::json_type_name;
use crate::models::{Resource, ResourceDocument, SearchResult};
use crate::query::QueryParams;

/// Base URL for the FeedFactory API.
pub const BASE_URL: &str = "https://app.thefeedfactory.nl/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Builder for configuring a [`FeedFactoryClient`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use feedfactory_api::client::FeedFactoryClientBuilder;
///
/// let client = FeedFactoryClientBuilder::new("your-api-token")
///     .request_timeout(Duration::from_secs(60))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FeedFactoryClientBuilder {
    token: String,
    base_url: String,
    request_timeout: Duration,
}

impl FeedFactoryClientBuilder {
    /// Creates a new builder with the given API token and default settings.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets a custom base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the timeout applied to each request.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] if the HTTP client cannot be initialised and
    /// [`Error::InvalidUrl`] if the base URL cannot be parsed.
    pub fn build(self) -> Result<FeedFactoryClient> {
        Url::parse(&self.base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        let http_client = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()?;

        Ok(FeedFactoryClient {
            token: self.token,
            http_client,
            base_url: self.base_url,
            request_timeout: self.request_timeout,
        })
    }
}

/// Client for the FeedFactory REST API.
///
/// Each operation issues exactly one request, except
/// [`publish`](FeedFactoryClient::publish) and
/// [`unpublish`](FeedFactoryClient::unpublish), which fetch the document and
/// write it back.
#[derive(Clone)]
pub struct FeedFactoryClient {
    token: String,
    http_client: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
}

impl FeedFactoryClient {
    /// Creates a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        FeedFactoryClientBuilder::new(token).build()
    }

    /// Returns a builder for custom configuration.
    pub fn builder(token: impl Into<String>) -> FeedFactoryClientBuilder {
        FeedFactoryClientBuilder::new(token)
    }

    /// Creates a client against a custom base URL (for testing).
    #[cfg(test)]
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        FeedFactoryClientBuilder::new(token).base_url(base_url).build()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    // ------------------------------------------------------------------
    // Resources
    // ------------------------------------------------------------------

    /// Fetches one page of `kind` as the raw response body.
    pub async fn list_raw(&self, kind: ResourceKind, query: &QueryParams) -> Result<Vec<u8>> {
        let url = self.url(&[kind.path()])?;
        self.send(self.request(Method::GET, url).query(query.as_slice()))
            .await
    }

    /// Fetches one page of `kind`.
    pub async fn list(&self, kind: ResourceKind, query: &QueryParams) -> Result<SearchResult> {
        let body = self.list_raw(kind, query).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Downloads an export of `kind`. The query should come from
    /// [`build_export_query`](crate::query::build_export_query).
    pub async fn export(&self, kind: ResourceKind, query: &QueryParams) -> Result<Vec<u8>> {
        self.list_raw(kind, query).await
    }

    /// Fetches a single resource as the raw response body.
    pub async fn get_resource(&self, kind: ResourceKind, id: &str) -> Result<Vec<u8>> {
        let url = self.url(&[kind.path(), id])?;
        self.send(self.request(Method::GET, url)).await
    }

    /// Fetches and reconciles a single resource.
    pub async fn resource(&self, kind: ResourceKind, id: &str) -> Result<Resource> {
        let body = self.get_resource(kind, id).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetches a single resource as an open document.
    pub async fn document(&self, kind: ResourceKind, id: &str) -> Result<ResourceDocument> {
        let body = self.get_resource(kind, id).await?;
        ResourceDocument::from_slice(&body)
    }

    /// Replaces a resource with `document`.
    pub async fn update_resource(
        &self,
        kind: ResourceKind,
        id: &str,
        document: &ResourceDocument,
    ) -> Result<()> {
        let url = self.url(&[kind.path(), id])?;
        self.send(self.request(Method::PUT, url).json(document))
            .await
            .map(drop)
    }

    pub async fn delete_resource(&self, kind: ResourceKind, id: &str) -> Result<()> {
        let url = self.url(&[kind.path(), id])?;
        self.send(self.request(Method::DELETE, url)).await.map(drop)
    }

    pub async fn publish(&self, kind: ResourceKind, id: &str) -> Result<()> {
        self.set_published(kind, id, true).await
    }

    pub async fn unpublish(&self, kind: ResourceKind, id: &str) -> Result<()> {
        self.set_published(kind, id, false).await
    }

    /// Fetches the document, sets `published`, and writes the whole document
    /// back. Concurrent edits between the two requests are overwritten.
    pub async fn set_published(&self, kind: ResourceKind, id: &str, published: bool) -> Result<()> {
        let mut document = self.document(kind, id).await?;
        document.set_published(published);
        debug!(kind = %kind, id, published, "writing back document");
        self.update_resource(kind, id, &document).await
    }

    // ------------------------------------------------------------------
    // Comments and revisions
    // ------------------------------------------------------------------

    pub async fn comments(&self, kind: ResourceKind, id: &str) -> Result<Vec<u8>> {
        let url = self.url(&[kind.path(), id, "comments"])?;
        self.send(self.request(Method::GET, url)).await
    }

    pub async fn add_comment(&self, kind: ResourceKind, id: &str, text: &str) -> Result<()> {
        let url = self.url(&[kind.path(), id, "comments"])?;
        let body = serde_json::json!({ "text": text });
        self.send(self.request(Method::POST, url).json(&body))
            .await
            .map(drop)
    }

    pub async fn revisions(&self, kind: ResourceKind, id: &str) -> Result<Vec<u8>> {
        let url = self.url(&[kind.path(), id, "revisions"])?;
        self.send(self.request(Method::GET, url)).await
    }

    // ------------------------------------------------------------------
    // Accounts and dictionaries
    // ------------------------------------------------------------------

    /// Fetches an arbitrary endpoint, resolving resource names to paths.
    pub async fn get_raw(&self, endpoint: &str) -> Result<Vec<u8>> {
        let resolved = resolve_endpoint(endpoint);
        let segments: Vec<&str> = resolved.split('/').filter(|s| !s.is_empty()).collect();
        let url = self.url(&segments)?;
        self.send(self.request(Method::GET, url)).await
    }

    /// Information about the authenticated user.
    pub async fn account_me(&self) -> Result<Vec<u8>> {
        self.get_raw("accounts/me").await
    }

    /// Accounts available to the authenticated user.
    pub async fn accounts(&self) -> Result<Vec<u8>> {
        self.get_raw("accounts").await
    }

    /// The first account as an open map. Keywords, markers and the ontology
    /// are stored on it.
    pub async fn account_data(&self) -> Result<Map<String, Value>> {
        let body = self.accounts().await?;
        first_account(serde_json::from_slice(&body)?)
    }

    /// The keyword dictionary for `kind` (`{stem}Keywords` on the account).
    pub async fn dictionary_keywords(&self, kind: ResourceKind) -> Result<Value> {
        let key = format!("{}Keywords", kind.dictionary_stem());
        self.account_field(&key, "keywords").await
    }

    /// The marker dictionary for `kind` (`{stem}Markers` on the account).
    pub async fn dictionary_markers(&self, kind: ResourceKind) -> Result<Value> {
        let key = format!("{}Markers", kind.dictionary_stem());
        self.account_field(&key, "markers").await
    }

    /// The categorization ontology (`categorizationOntology` on the account).
    pub async fn ontology(&self) -> Result<Value> {
        self.account_field("categorizationOntology", "ontology")
            .await
    }

    async fn account_field(&self, key: &str, what: &str) -> Result<Value> {
        let mut account = self.account_data().await?;
        account
            .remove(key)
            .ok_or_else(|| Error::MissingField(format!("no {} field \"{}\" found on account", what, key)))
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    /// Joins `segments` onto the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "sending request");
        self.http_client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
    }

    /// Sends the request and returns the body of a successful response.
    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "response received");

        if status.is_success() {
            return Ok(response.bytes().await?.to_vec());
        }

        Err(self.parse_error_response(response).await)
    }

    /// Parses an error response into our error types.
    async fn parse_error_response(&self, response: reqwest::Response) -> Error {
        let status = response.status();
        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);

        let api_error = match status.as_u16() {
            401 | 403 => ApiError::Auth {
                message: non_empty_or(message, "invalid or missing access token"),
            },
            404 => ApiError::NotFound { path, message },
            400 => ApiError::Validation {
                message: non_empty_or(message, "bad request"),
            },
            code => ApiError::Http {
                status: code,
                message: non_empty_or(message, status.canonical_reason().unwrap_or("unknown error")),
            },
        };

        Error::Api(api_error)
    }
}

impl fmt::Debug for FeedFactoryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedFactoryClient")
            .field("token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Extracts `message`, then `error`, from a JSON error body; otherwise the
/// trimmed raw body.
fn error_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = map.get(key).and_then(Value::as_str) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    body.trim().to_string()
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

fn first_account(accounts: Value) -> Result<Map<String, Value>> {
    let mut results = match accounts {
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(results)) => results,
            _ => return Err(Error::MissingField("no accounts found".to_string())),
        },
        other => {
            return Err(Error::UnexpectedShape(format!(
                "expected an accounts object, got {}",
                json_type_name(&other)
            )))
        }
    };

    if results.is_empty() {
        return Err(Error::MissingField("no accounts found".to_string()));
    }
    match results.swap_remove(0) {
        Value::Object(account) => Ok(account),
        other => Err(Error::UnexpectedShape(format!(
            "expected an account object, got {}",
            json_type_name(&other)
        ))),
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
