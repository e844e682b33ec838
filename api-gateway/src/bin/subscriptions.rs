//! Subscriptions Lambda - Handles /v1/subscribe and /v1/unsubscribe.
//!
//! Subscribes email addresses to the announcement topic and removes confirmed
//! subscriptions. The topic itself sends the confirmation email, so a subscribe
//! call only has to reach SNS.

use lambda_http::http::Method;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::http::{json_response, parse_json_body, preflight_response};
use shared::notifications::find_confirmed;
use shared::{
    Config, NotificationTopic, SnsTopic, SubscriberEmail, SubscriptionAction, SubscriptionRequest,
    SubscriptionResponse,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const INVALID_EMAIL: &str = "Valid email is required";
const INVALID_ACTION: &str = r#"Invalid action. Use "subscribe" or "unsubscribe""#;
const SUBSCRIBE_REQUESTED: &str = "Subscription request sent! Please check your email to confirm.";
const UNSUBSCRIBED: &str = "Successfully unsubscribed";
const NOT_FOUND: &str = "Subscription not found or pending confirmation";
const OPERATION_FAILED: &str = "Operation failed";

/// Application state shared across requests.
struct AppState<T> {
    topic: T,
}

/// Action named in the body, or else the last path segment (`/subscribe`, `/unsubscribe`).
fn resolve_action(request: &SubscriptionRequest, path: &str) -> Option<SubscriptionAction> {
    match request.action() {
        Some(action) => action,
        None => path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok()),
    }
}

async fn subscribe<T: NotificationTopic>(
    topic: &T,
    email: &SubscriberEmail,
) -> shared::Result<(u16, SubscriptionResponse)> {
    topic.subscribe_email(email.as_ref()).await?;
    info!(email = email.as_ref(), "Subscription request sent");

    Ok((200, SubscriptionResponse::success(SUBSCRIBE_REQUESTED, email.as_ref())))
}

async fn unsubscribe<T: NotificationTopic>(
    topic: &T,
    email: &SubscriberEmail,
) -> shared::Result<(u16, SubscriptionResponse)> {
    let subscriptions = topic.list_subscriptions().await?;

    let Some(subscription) = find_confirmed(&subscriptions, email.as_ref()) else {
        return Err(shared::Error::NotFound(NOT_FOUND.to_string()));
    };

    topic.unsubscribe(&subscription.subscription_arn).await?;
    info!(
        email = email.as_ref(),
        subscription_arn = %subscription.subscription_arn,
        "Unsubscribed"
    );

    Ok((200, SubscriptionResponse::success(UNSUBSCRIBED, email.as_ref())))
}

async fn process<T: NotificationTopic>(
    topic: &T,
    event: &Request,
) -> shared::Result<(u16, SubscriptionResponse)> {
    let request: SubscriptionRequest = parse_json_body(event.body())?;

    let action = resolve_action(&request, event.uri().path())
        .ok_or_else(|| shared::Error::Validation(INVALID_ACTION.to_string()))?;

    let email = request
        .email()
        .and_then(|email| SubscriberEmail::parse(email).ok())
        .ok_or_else(|| shared::Error::Validation(INVALID_EMAIL.to_string()))?;

    match action {
        SubscriptionAction::Subscribe => subscribe(topic, &email).await,
        SubscriptionAction::Unsubscribe => unsubscribe(topic, &email).await,
    }
}

/// Rejections carry their own message; anything else is reported as a generic failure.
fn failure(e: shared::Error) -> (u16, SubscriptionResponse) {
    match e {
        shared::Error::Validation(ref message) | shared::Error::NotFound(ref message) => {
            warn!(error = %e, "Subscription request rejected");
            (e.status_code(), SubscriptionResponse::failure(message.clone()))
        }
        _ => {
            error!(error = %e, "Subscription request failed");
            (
                500,
                SubscriptionResponse::failure(OPERATION_FAILED).with_error(e.to_string()),
            )
        }
    }
}

async fn handler<T: NotificationTopic>(
    state: Arc<AppState<T>>,
    event: Request,
) -> Result<Response<Body>, Error> {
    info!(method = %event.method(), path = event.uri().path(), "Subscription request received");

    if *event.method() == Method::OPTIONS {
        return preflight_response();
    }

    let (status, body) = match process(&state.topic, &event).await {
        Ok(outcome) => outcome,
        Err(e) => failure(e),
    };

    json_response(status, &body)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    let topic = SnsTopic::from_config(&config).await;
    info!(topic_arn = topic.topic_arn(), "Subscriptions handler starting");

    let state = Arc::new(AppState { topic });

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::notifications::PENDING_CONFIRMATION;
    use shared::TopicSubscription;
    use std::sync::Mutex;

    /// Topic kept in memory; records every call made against it.
    #[derive(Default)]
    struct InMemoryTopic {
        subscriptions: Mutex<Vec<TopicSubscription>>,
        removed: Mutex<Vec<String>>,
        fail_with: Option<String>,
    }

    impl InMemoryTopic {
        fn with(subscriptions: Vec<TopicSubscription>) -> Self {
            Self {
                subscriptions: Mutex::new(subscriptions),
                ..Default::default()
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Default::default()
            }
        }

        fn check(&self) -> shared::Result<()> {
            match &self.fail_with {
                Some(message) => Err(shared::Error::Aws(message.clone())),
                None => Ok(()),
            }
        }
    }

    impl NotificationTopic for InMemoryTopic {
        async fn subscribe_email(&self, email: &str) -> shared::Result<()> {
            self.check()?;
            self.subscriptions.lock().unwrap().push(TopicSubscription {
                subscription_arn: PENDING_CONFIRMATION.to_string(),
                endpoint: email.to_string(),
                protocol: "email".to_string(),
            });
            Ok(())
        }

        async fn list_subscriptions(&self) -> shared::Result<Vec<TopicSubscription>> {
            self.check()?;
            Ok(self.subscriptions.lock().unwrap().clone())
        }

        async fn unsubscribe(&self, subscription_arn: &str) -> shared::Result<()> {
            self.check()?;
            self.subscriptions
                .lock()
                .unwrap()
                .retain(|sub| sub.subscription_arn != subscription_arn);
            self.removed.lock().unwrap().push(subscription_arn.to_string());
            Ok(())
        }

        async fn publish(&self, _subject: &str, _message: &str) -> shared::Result<String> {
            self.check()?;
            Ok("message-1".to_string())
        }
    }

    fn confirmed(email: &str, arn: &str) -> TopicSubscription {
        TopicSubscription {
            subscription_arn: arn.to_string(),
            endpoint: email.to_string(),
            protocol: "email".to_string(),
        }
    }

    fn post(path: &str, body: &str) -> Request {
        lambda_http::http::Request::builder()
            .method("POST")
            .uri(path)
            .body(Body::from(body))
            .unwrap()
    }

    async fn call(
        topic: InMemoryTopic,
        request: Request,
    ) -> (u16, serde_json::Value, Arc<AppState<InMemoryTopic>>) {
        let state = Arc::new(AppState { topic });
        let response = handler(Arc::clone(&state), request).await.unwrap();
        let status = response.status().as_u16();
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        let body = if response.body().as_ref().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(response.body().as_ref()).unwrap()
        };
        (status, body, state)
    }

    #[tokio::test]
    async fn test_options_preflight() {
        let request = lambda_http::http::Request::builder()
            .method("OPTIONS")
            .uri("/v1/subscribe")
            .body(Body::from("not json at all"))
            .unwrap();

        let (status, body, _) = call(InMemoryTopic::default(), request).await;
        assert_eq!(status, 200);
        assert_eq!(body, serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_subscribe_success() {
        let (status, body, state) = call(
            InMemoryTopic::default(),
            post("/v1/subscriptions", r#"{"email":"user@example.com","action":"subscribe"}"#),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], SUBSCRIBE_REQUESTED);
        assert_eq!(body["email"], "user@example.com");
        assert_eq!(state.topic.subscriptions.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_action_falls_back_to_path() {
        let (status, body, state) =
            call(InMemoryTopic::default(), post("/v1/subscribe", r#"{"email":"user@example.com"}"#)).await;

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(state.topic.subscriptions.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_email_rejected_for_both_actions() {
        for action in ["subscribe", "unsubscribe"] {
            let body = format!(r#"{{"email":"not-an-email","action":"{}"}}"#, action);
            let (status, body, state) = call(InMemoryTopic::default(), post("/v1/subscriptions", &body)).await;

            assert_eq!(status, 400);
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], INVALID_EMAIL);
            assert!(state.topic.subscriptions.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_non_string_email_rejected_as_invalid() {
        let (status, body, state) = call(
            InMemoryTopic::default(),
            post("/v1/subscriptions", r#"{"email":12345,"action":"subscribe"}"#),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], INVALID_EMAIL);
        assert!(state.topic.subscriptions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_string_action_rejected_as_invalid() {
        let (status, body, _) = call(
            InMemoryTopic::default(),
            post("/v1/subscribe", r#"{"email":"user@example.com","action":7}"#),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], INVALID_ACTION);
    }

    #[tokio::test]
    async fn test_missing_email_rejected() {
        let (status, body, _) =
            call(InMemoryTopic::default(), post("/v1/subscriptions", r#"{"action":"subscribe"}"#)).await;

        assert_eq!(status, 400);
        assert_eq!(body["message"], INVALID_EMAIL);
    }

    #[tokio::test]
    async fn test_unknown_action_rejected_for_any_email() {
        for email in ["user@example.com", "not-an-email", ""] {
            let body = format!(r#"{{"email":"{}","action":"delete"}}"#, email);
            let (status, body, _) = call(InMemoryTopic::default(), post("/v1/subscriptions", &body)).await;

            assert_eq!(status, 400);
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], INVALID_ACTION);
        }
    }

    #[tokio::test]
    async fn test_unsubscribe_confirmed() {
        let topic = InMemoryTopic::with(vec![
            confirmed("other@example.com", "arn:sub:other"),
            confirmed("user@example.com", "arn:sub:user"),
        ]);

        let (status, body, state) = call(
            topic,
            post("/v1/subscriptions", r#"{"email":"user@example.com","action":"unsubscribe"}"#),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], UNSUBSCRIBED);
        assert_eq!(*state.topic.removed.lock().unwrap(), vec!["arn:sub:user".to_string()]);
    }

    #[tokio::test]
    async fn test_unsubscribe_not_found() {
        let topic = InMemoryTopic::with(vec![confirmed("other@example.com", "arn:sub:other")]);

        let (status, body, state) = call(
            topic,
            post("/v1/subscriptions", r#"{"email":"user@example.com","action":"unsubscribe"}"#),
        )
        .await;

        assert_eq!(status, 404);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], NOT_FOUND);
        assert!(state.topic.removed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unsubscribe_pending_is_not_removed() {
        let topic = InMemoryTopic::with(vec![confirmed("user@example.com", PENDING_CONFIRMATION)]);

        let (status, body, state) =
            call(topic, post("/v1/unsubscribe", r#"{"email":"user@example.com"}"#)).await;

        assert_eq!(status, 404);
        assert_eq!(body["message"], NOT_FOUND);
        assert!(state.topic.removed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_service_failure_is_500_with_detail() {
        let (status, body, _) = call(
            InMemoryTopic::failing("throttled"),
            post("/v1/subscriptions", r#"{"email":"user@example.com","action":"subscribe"}"#),
        )
        .await;

        assert_eq!(status, 500);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], OPERATION_FAILED);
        assert!(body["error"].as_str().unwrap().contains("throttled"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_500() {
        let (status, body, _) = call(InMemoryTopic::default(), post("/v1/subscribe", "{not json")).await;

        assert_eq!(status, 500);
        assert_eq!(body["message"], OPERATION_FAILED);
        assert!(body["error"].is_string());
    }
}
