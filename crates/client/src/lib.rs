//! REST client for the developer/project management API.
//!
//! Provides the transport wrapper around [`reqwest`], the URL templates of
//! every endpoint, and one service per entity behind the [`api::EntityApi`]
//! seam used by the stateful stores.

pub mod api;
pub mod config;
pub mod developers;
pub mod error;
pub mod projects;
pub mod routes;
pub mod transport;

pub use api::EntityApi;
pub use config::ClientConfig;
pub use developers::DeveloperService;
pub use error::{ApiError, ConfigError};
pub use projects::ProjectService;
pub use transport::ApiClient;
