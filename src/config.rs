//! Client configuration.
//!
//! The API base URL comes from the `INKDESK_API_URL` environment variable
//! with a compiled-in default; the storage directory (which holds the
//! persisted session) is derived from the platform data directory.

use std::path::PathBuf;

use anyhow::Result;

/// Application name used for the storage directory path
const APP_NAME: &str = "inkdesk";

/// Environment variable overriding the API base URL
const API_URL_ENV: &str = "INKDESK_API_URL";

/// Default base URL for the blog platform API
const DEFAULT_API_URL: &str = "https://api.inkdesk.app/blog";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub storage_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let api_base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let storage_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?
            .join(APP_NAME);

        Ok(Self {
            api_base_url,
            storage_dir,
        })
    }

    /// Build a config pointing at an explicit base URL and storage location.
    pub fn with(api_base_url: impl Into<String>, storage_dir: PathBuf) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            storage_dir,
        }
    }
}
