//! Authentication: login, sign-up and logout against the remote service.

pub mod models;
pub mod service;
