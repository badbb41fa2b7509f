//! Generic JSON-over-HTTP transport.
//!
//! Wraps a single [`reqwest::Client`] configured with the API base URL, a
//! fixed timeout and the static bearer credential. Failures are returned to
//! the caller without retry or transformation.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use devtrack_core::types::DbId;

use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError};
use crate::routes::AssignRoute;

/// HTTP client for one API deployment.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    api_url: String,
    assign_route: AssignRoute,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// Fails if the bearer token cannot be used as a header value or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.bearer_token))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            assign_route: config.assign_route,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn assign_route(&self) -> AssignRoute {
        self.assign_route
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, None::<&()>).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, path, Some(body)).await
    }

    /// Send `DELETE {path}/{id}`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str, id: DbId) -> Result<T, ApiError> {
        let path = format!("{path}/{id}");
        self.send(Method::DELETE, &path, None::<&()>).await
    }

    // ---- private helpers ----

    async fn send<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        tracing::debug!(%method, path, "API request");

        let mut request: RequestBuilder = self
            .client
            .request(method.clone(), format!("{}{}", self.api_url, path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let result = match request.send().await {
            Ok(response) => Self::parse_response(response).await,
            Err(err) => Err(ApiError::from(err)),
        };

        if let Err(err) = &result {
            tracing::warn!(%method, path, error = %err, "API request failed");
        }
        result
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Server`] carrying
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    ///
    /// An empty body is read as JSON `null`, so endpoints without a payload
    /// can be requested as `()` or [`serde::de::IgnoredAny`].
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        let body: &[u8] = if bytes.is_empty() { b"null" } else { &bytes[..] };
        Ok(serde_json::from_slice(body)?)
    }
}
