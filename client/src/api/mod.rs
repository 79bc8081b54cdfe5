//! Transport layer: authenticated HTTP requests against the remote
//! maintenance service.
//!
//! Domain services never touch HTTP directly; everything funnels through
//! [`client::ApiClient`], which owns bearer-token handling, error
//! normalization and the list-shape compatibility shim.

pub mod client;

pub use client::ApiClient;
