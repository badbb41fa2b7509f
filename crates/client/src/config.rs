use std::time::Duration;

use crate::error::ConfigError;
use crate::routes::AssignRoute;

/// Default request timeout, fixed for every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without a trailing slash, e.g. `http://host:8080`.
    pub api_url: String,
    /// Static bearer credential attached to every request.
    pub bearer_token: String,
    pub timeout: Duration,
    pub assign_route: AssignRoute,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            bearer_token: bearer_token.into(),
            timeout: DEFAULT_TIMEOUT,
            assign_route: AssignRoute::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_assign_route(mut self, route: AssignRoute) -> Self {
        self.assign_route = route;
        self
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `DEVTRACK_API_URL`          | `http://localhost:8080` |
    /// | `DEVTRACK_API_TOKEN`        | empty                   |
    /// | `DEVTRACK_API_TIMEOUT_SECS` | `5`                     |
    /// | `DEVTRACK_ASSIGN_ROUTE`     | `nested`                |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads variables through
    /// `lookup`, so tests do not have to touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("DEVTRACK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let bearer_token = lookup("DEVTRACK_API_TOKEN").unwrap_or_default();

        let timeout = match lookup("DEVTRACK_API_TIMEOUT_SECS") {
            Some(raw) => {
                let invalid = || ConfigError::Invalid {
                    name: "DEVTRACK_API_TIMEOUT_SECS",
                    expected: "a positive whole number of seconds",
                    value: raw.clone(),
                };
                match raw.trim().parse::<u64>() {
                    Ok(0) | Err(_) => return Err(invalid()),
                    Ok(secs) => Duration::from_secs(secs),
                }
            }
            None => DEFAULT_TIMEOUT,
        };

        let assign_route = match lookup("DEVTRACK_ASSIGN_ROUTE") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "DEVTRACK_ASSIGN_ROUTE",
                expected: "`nested` or `verb`",
                value: raw.clone(),
            })?,
            None => AssignRoute::default(),
        };

        Ok(Self::new(api_url, bearer_token)
            .with_timeout(timeout)
            .with_assign_route(assign_route))
    }
}
