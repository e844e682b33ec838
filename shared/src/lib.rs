//! Shared library for Event Board Lambda functions.
//!
//! This crate provides the configuration, error type, HTTP helpers, models and the
//! notification topic client used by the Lambda functions and the page client.

pub mod config;
pub mod email;
pub mod error;
pub mod http;
pub mod models;
pub mod notifications;

pub use config::Config;
pub use email::SubscriberEmail;
pub use error::{Error, Result};
pub use models::{AnnounceResponse, Event, SubscriptionAction, SubscriptionRequest, SubscriptionResponse};
pub use notifications::{NotificationTopic, SnsTopic, TopicSubscription};
