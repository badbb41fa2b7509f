use devtrack_core::error::CoreError;

/// Errors from the REST API layer.
///
/// Transport and service code never inspects or rewrites these; they are
/// handed to the caller as-is and only interpreted by the store layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (timeout, DNS, refused
    /// connection, TLS, ...).
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Server {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response whose body does not match the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Client-side validation blocked the request before it was sent.
    #[error("{0}")]
    Validation(String),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl ApiError {
    /// HTTP status for server-reported failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(err) if err.is_timeout())
    }

    /// A short message suitable for showing to the user.
    ///
    /// Server bodies shaped like `{"message": ".."}` or `{"error": ".."}`
    /// contribute their text; anything else falls back to the status code.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(err) if err.is_timeout() => "the server did not respond in time".into(),
            Self::Network(_) => "could not reach the server".into(),
            Self::Server { status, body } => server_message(body)
                .unwrap_or_else(|| format!("the server responded with status {status}")),
            Self::Decode(_) => "the server sent an unexpected response".into(),
            Self::Validation(msg) => msg.clone(),
        }
    }
}

fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
}

/// Errors raised while building a client from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Bearer token is not a valid header value")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
