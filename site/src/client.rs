//! HTTP client for the events document and the form endpoints.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::Event;

use crate::{Error, Result, SiteConfig};

/// `message` / `error` fields the endpoints answer with.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplyPayload {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Outcome of a form POST that reached the server.
#[derive(Debug, Clone)]
pub struct Reply {
    pub ok: bool,
    pub payload: ReplyPayload,
}

pub struct ApiClient {
    http_client: Client,
    config: SiteConfig,
}

impl ApiClient {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            http_client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Fetch the hosted events document. A non-2xx status is an error.
    pub async fn fetch_events(&self) -> Result<Vec<Event>> {
        let response = self.http_client.get(&self.config.events_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }

    /// POST a JSON body and decode the JSON reply, whatever the status.
    pub async fn post_json<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<Reply> {
        let response = self.http_client.post(url).json(body).send().await?;

        let ok = response.status().is_success();
        let payload = response.json().await?;

        Ok(Reply { ok, payload })
    }
}
