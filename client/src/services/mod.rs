//! Domain resource services.
//!
//! One narrow CRUD surface per resource, all sharing the same
//! [`crate::api::ApiClient`]. Payloads are validated locally before any
//! network call; partial updates only carry the fields the caller set.

pub mod dashboard_service;
pub mod machine_service;
pub mod maintenance_service;
pub mod part_service;
pub mod team_service;
