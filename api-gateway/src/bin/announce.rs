//! Announce Lambda - Handles /v1/create-event.
//!
//! Publishes a newly created event to the announcement topic so every confirmed
//! subscriber gets an email. The hosted events document is updated separately.

use lambda_http::http::Method;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::http::{json_response, parse_json_body, preflight_response};
use shared::{AnnounceResponse, Config, Event, NotificationTopic, SnsTopic};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const ANNOUNCED: &str = "Event announced successfully! Subscribers notified.";
const ANNOUNCE_FAILED: &str = "Failed to announce event";

/// SNS requires subjects shorter than 100 characters.
const MAX_SUBJECT_LEN: usize = 99;

struct AppState<T> {
    topic: T,
}

/// Subject line for the announcement email: printable, single line, bounded length.
fn subject_for(event: &Event) -> String {
    format!("New event: {}", event.title)
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(MAX_SUBJECT_LEN)
        .collect()
}

fn message_for(event: &Event) -> String {
    format!(
        "{}\n\nDate: {}\n\n{}",
        event.title, event.date, event.description
    )
}

async fn handler<T: NotificationTopic>(
    state: Arc<AppState<T>>,
    request: Request,
) -> Result<Response<Body>, Error> {
    info!(method = %request.method(), path = request.uri().path(), "Announce request received");

    if *request.method() == Method::OPTIONS {
        return preflight_response();
    }

    let event: Event = match parse_json_body(request.body()) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "Rejected announce request");
            return json_response(
                400,
                &AnnounceResponse {
                    message: format!("Invalid request body: {}", e),
                    error: None,
                },
            );
        }
    };

    match state
        .topic
        .publish(&subject_for(&event), &message_for(&event))
        .await
    {
        Ok(message_id) => {
            info!(title = %event.title, date = %event.date, message_id = %message_id, "Event announced");
            json_response(
                200,
                &AnnounceResponse {
                    message: ANNOUNCED.to_string(),
                    error: None,
                },
            )
        }
        Err(e) => {
            error!(title = %event.title, error = %e, "Failed to announce event");
            json_response(
                500,
                &AnnounceResponse {
                    message: ANNOUNCE_FAILED.to_string(),
                    error: Some(e.to_string()),
                },
            )
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    let topic = SnsTopic::from_config(&config).await;

    let state = Arc::new(AppState { topic });

    run(service_fn(move |request| {
        let state = Arc::clone(&state);
        async move { handler(state, request).await }
    }))
    .await
}
