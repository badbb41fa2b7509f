//! Observable entity state for the dashboard.
//!
//! Wraps the REST services from `devtrack-client` in stores that keep the
//! last known collection, a loading flag and the last error, and publish
//! every change over a `tokio::sync::watch` channel. Relationship lookups
//! are fanned out concurrently with per-item failure isolation.

pub mod detail;
pub mod notify;
pub mod relations;
pub mod store;

pub use detail::{load_detail, Detail};
pub use notify::{Level, Notification, Notifier};
pub use relations::{
    assignable, resolve_counts, resolve_related, spawn_count_tracker, Membership, RelationCounts,
};
pub use store::{DeveloperStore, EntityState, EntityStore, ProjectStore};
