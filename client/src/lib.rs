//! API access layer for the maintenance-management service.
//!
//! This crate is the data layer the web and mobile surfaces link against:
//! it owns the session lifecycle, the authenticated HTTP plumbing and one
//! typed service per resource (machines, maintenance, parts, teams).
//! Rendering and navigation stay with the caller; on session expiry the
//! layer raises a typed error instead of redirecting anything itself.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod models;
pub mod poll;
pub mod services;
pub mod session;

pub use api::ApiClient;
pub use config::Config;
pub use errors::{ClientError, ClientResult};
pub use session::SessionStore;
