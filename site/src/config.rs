//! Page client configuration.

use std::env;

use crate::{Error, Result};

/// Where the page fetches events from and where it posts forms to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Base URL of the API Gateway stage, e.g. `https://api.example.com/v1`
    pub api_base_url: String,
    /// URL of the hosted events document
    pub events_url: String,
}

impl SiteConfig {
    pub fn new(api_base_url: impl Into<String>, events_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            events_url: events_url.into(),
        }
    }

    /// Load configuration from `SITE_API_BASE_URL` and `SITE_EVENTS_URL`.
    pub fn from_env() -> Result<Self> {
        let api_base_url = env::var("SITE_API_BASE_URL")
            .map_err(|_| Error::Config("SITE_API_BASE_URL not set".to_string()))?;
        let events_url = env::var("SITE_EVENTS_URL")
            .map_err(|_| Error::Config("SITE_EVENTS_URL not set".to_string()))?;
        Ok(Self::new(api_base_url, events_url))
    }

    pub fn subscribe_endpoint(&self) -> String {
        format!("{}/subscribe", self.api_base_url)
    }

    pub fn create_event_endpoint(&self) -> String {
        format!("{}/create-event", self.api_base_url)
    }
}
