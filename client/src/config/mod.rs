//! Central module for client-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the API base URL, the request timeout, and the session storage location.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub request_timeout_seconds: u64,
    pub poll_interval_seconds: u64,
    pub low_stock_threshold: u32,
    pub session_dir: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_url =
            env::var("API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());

        let request_timeout_seconds = env::var("REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .context("REQUEST_TIMEOUT_SECONDS must be a valid number")?;

        let poll_interval_seconds = env::var("POLL_INTERVAL_SECONDS")
            .unwrap_or_else(|_| "2".to_string())
            .parse::<u64>()
            .context("POLL_INTERVAL_SECONDS must be a valid number")?;

        let low_stock_threshold = env::var("LOW_STOCK_THRESHOLD")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("LOW_STOCK_THRESHOLD must be a valid number")?;

        let session_dir = env::var("SESSION_DIR").ok().map(PathBuf::from);

        Ok(Config {
            api_url,
            request_timeout_seconds,
            poll_interval_seconds,
            low_stock_threshold,
            session_dir,
        })
    }

    /// Configuration pointing at the given base URL, defaults elsewhere.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Config {
            api_url: api_url.into(),
            request_timeout_seconds: 30,
            poll_interval_seconds: 2,
            low_stock_threshold: 5,
            session_dir: None,
        }
    }
}
