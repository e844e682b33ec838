//! Notification topic integration (AWS SNS).

use std::future::Future;

use aws_sdk_sns::Client as SnsClient;
use tracing::info;

use crate::{Config, Error, Result};

/// ARN SNS reports for a subscription that has not been confirmed yet.
pub const PENDING_CONFIRMATION: &str = "PendingConfirmation";

/// Email-based subscription protocol.
pub const EMAIL_PROTOCOL: &str = "email";

/// A subscription as listed on the topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSubscription {
    pub subscription_arn: String,
    pub endpoint: String,
    pub protocol: String,
}

impl TopicSubscription {
    pub fn is_pending(&self) -> bool {
        self.subscription_arn == PENDING_CONFIRMATION
    }
}

/// Operations the handlers need from the notification service, bound to a single topic.
pub trait NotificationTopic {
    /// Request an email subscription. The service sends the confirmation email itself.
    fn subscribe_email(&self, email: &str) -> impl Future<Output = Result<()>> + Send;

    /// List subscriptions on the topic. Only the first page is returned.
    fn list_subscriptions(&self) -> impl Future<Output = Result<Vec<TopicSubscription>>> + Send;

    fn unsubscribe(&self, subscription_arn: &str) -> impl Future<Output = Result<()>> + Send;

    /// Publish a message to every confirmed subscriber. Returns the message id.
    fn publish(&self, subject: &str, message: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Find the confirmed email subscription for `email`, if any.
///
/// The first email-protocol subscription with a matching endpoint decides the outcome; if it is
/// still pending, there is nothing to remove.
pub fn find_confirmed<'a>(
    subscriptions: &'a [TopicSubscription],
    email: &str,
) -> Option<&'a TopicSubscription> {
    subscriptions
        .iter()
        .find(|sub| sub.endpoint == email && sub.protocol == EMAIL_PROTOCOL)
        .filter(|sub| !sub.is_pending())
}

/// SNS-backed topic.
#[derive(Debug, Clone)]
pub struct SnsTopic {
    client: SnsClient,
    topic_arn: String,
}

impl SnsTopic {
    pub fn new(client: SnsClient, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }

    /// Build a client from the default AWS credential chain.
    pub async fn from_config(config: &Config) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()))
            .load()
            .await;
        Self::new(SnsClient::new(&sdk_config), config.topic_arn.clone())
    }

    pub fn topic_arn(&self) -> &str {
        &self.topic_arn
    }
}

impl NotificationTopic for SnsTopic {
    async fn subscribe_email(&self, email: &str) -> Result<()> {
        let response = self
            .client
            .subscribe()
            .topic_arn(&self.topic_arn)
            .protocol(EMAIL_PROTOCOL)
            .endpoint(email)
            .send()
            .await
            .map_err(|e| Error::Aws(format!("Failed to subscribe: {}", e)))?;

        info!(
            subscription_arn = response.subscription_arn().unwrap_or(PENDING_CONFIRMATION),
            "Subscription requested"
        );
        Ok(())
    }

    async fn list_subscriptions(&self) -> Result<Vec<TopicSubscription>> {
        let response = self
            .client
            .list_subscriptions_by_topic()
            .topic_arn(&self.topic_arn)
            .send()
            .await
            .map_err(|e| Error::Aws(format!("Failed to list subscriptions: {}", e)))?;

        Ok(response
            .subscriptions()
            .iter()
            .map(|sub| TopicSubscription {
                subscription_arn: sub.subscription_arn().unwrap_or_default().to_string(),
                endpoint: sub.endpoint().unwrap_or_default().to_string(),
                protocol: sub.protocol().unwrap_or_default().to_string(),
            })
            .collect())
    }

    async fn unsubscribe(&self, subscription_arn: &str) -> Result<()> {
        self.client
            .unsubscribe()
            .subscription_arn(subscription_arn)
            .send()
            .await
            .map_err(|e| Error::Aws(format!("Failed to unsubscribe: {}", e)))?;
        Ok(())
    }

    async fn publish(&self, subject: &str, message: &str) -> Result<String> {
        let response = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|e| Error::Aws(format!("Failed to publish: {}", e)))?;

        Ok(response.message_id().unwrap_or_default().to_string())
    }
}
