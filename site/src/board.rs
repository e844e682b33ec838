//! The event board page: event list, subscribe form and create-event form.

use serde::Serialize;
use shared::models::sort_by_date;
use shared::Event;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::client::{ApiClient, Reply};
use crate::render;
use crate::status::StatusBanner;
use crate::SiteConfig;

const SUBSCRIBE_OK: &str = "Subscription request successful! Check your email to confirm.";
const SUBSCRIBE_FAILED: &str = "Subscription failed.";
const SUBSCRIBE_NETWORK_ERROR: &str = "Network error during subscription.";
const ANNOUNCE_OK: &str = "Event announced successfully! Subscribers notified.";
const ANNOUNCE_FAILED: &str = "Failed to announce event.";
const ANNOUNCE_NETWORK_ERROR: &str = "Network error during event announcement.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscribeForm {
    pub email: String,
}

impl SubscribeForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateEventForm {
    pub title: String,
    pub date: String,
    pub description: String,
}

impl CreateEventForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn to_event(&self) -> Event {
        Event {
            title: self.title.clone(),
            date: self.date.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Serialize)]
struct SubscribeBody<'a> {
    email: &'a str,
}

/// Page state plus the client it talks to.
pub struct EventBoard {
    client: ApiClient,
    events_html: RwLock<String>,
    banner: StatusBanner,
}

impl EventBoard {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            client: ApiClient::new(config),
            events_html: RwLock::new(String::new()),
            banner: StatusBanner::default(),
        }
    }

    pub fn banner(&self) -> &StatusBanner {
        &self.banner
    }

    /// Current contents of the events container.
    pub async fn events_html(&self) -> String {
        self.events_html.read().await.clone()
    }

    pub async fn show_status(&self, message: impl Into<String>, is_error: bool) {
        self.banner.show(message, is_error).await;
    }

    /// Fetch the events document and re-render the container. Failures render inline.
    pub async fn load_events(&self) {
        self.events_html.write().await.clear();

        let html = match self.client.fetch_events().await {
            Ok(mut events) => {
                sort_by_date(&mut events);
                info!(count = events.len(), "Loaded events");
                render::event_list(&events)
            }
            Err(e) => {
                error!(error = %e, "Error loading events");
                render::load_error(&e)
            }
        };

        *self.events_html.write().await = html;
    }

    /// Submit the subscribe form. The form is reset only when the server accepts it.
    pub async fn submit_subscribe(&self, form: &mut SubscribeForm) {
        let endpoint = self.client.config().subscribe_endpoint();
        let body = SubscribeBody { email: &form.email };

        match self.client.post_json(&endpoint, &body).await {
            Ok(Reply { ok: true, payload }) => {
                self.show_status(payload.message.unwrap_or_else(|| SUBSCRIBE_OK.to_string()), false)
                    .await;
                form.reset();
            }
            Ok(Reply { ok: false, payload }) => {
                let message = payload
                    .error
                    .or(payload.message)
                    .unwrap_or_else(|| SUBSCRIBE_FAILED.to_string());
                self.show_status(message, true).await;
            }
            Err(e) => {
                error!(error = %e, "Subscription error");
                self.show_status(SUBSCRIBE_NETWORK_ERROR, true).await;
            }
        }
    }

    /// Submit the create-event form; on success the event list is reloaded once.
    pub async fn submit_create_event(&self, form: &mut CreateEventForm) {
        let endpoint = self.client.config().create_event_endpoint();
        let event = form.to_event();

        match self.client.post_json(&endpoint, &event).await {
            Ok(Reply { ok: true, payload }) => {
                self.show_status(payload.message.unwrap_or_else(|| ANNOUNCE_OK.to_string()), false)
                    .await;
                form.reset();
                self.load_events().await;
            }
            Ok(Reply { ok: false, payload }) => {
                let message = payload
                    .message
                    .unwrap_or_else(|| ANNOUNCE_FAILED.to_string());
                self.show_status(message, true).await;
            }
            Err(e) => {
                error!(error = %e, "Event creation error");
                self.show_status(ANNOUNCE_NETWORK_ERROR, true).await;
            }
        }
    }

    /// Render the complete page from the current state and form values.
    pub async fn render_page(&self, subscribe: &SubscribeForm, create_event: &CreateEventForm) -> String {
        let events_html = self.events_html().await;
        let status_html = self.banner.render().await;
        render::page(&events_html, &status_html, subscribe, create_event)
    }
}
