//! Domain model and pure logic for the developer/project dashboard.
//!
//! Has no internal dependencies and performs no I/O, so it can be shared by
//! the HTTP client, the stateful stores and the CLI alike.

pub mod dates;
pub mod developer;
pub mod entity;
pub mod error;
pub mod filter;
pub mod lifecycle;
pub mod project;
pub mod types;
pub mod validation;
