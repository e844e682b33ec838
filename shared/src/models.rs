//! Shared data models.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An announced event, as stored in the hosted events document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub date: String,
    pub description: String,
}

impl Event {
    /// Parse the date as `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        let date = self.date.trim();
        if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            return day.and_hms_opt(0, 0, 0);
        }
        DateTime::parse_from_rfc3339(date)
            .ok()
            .map(|dt| dt.naive_utc())
    }
}

/// Sort events by ascending date. Events with unparseable dates go last, in their original order.
pub fn sort_by_date(events: &mut [Event]) {
    events.sort_by(|a, b| match (a.parsed_date(), b.parsed_date()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Subscription handler request payload.
///
/// Fields are kept as raw JSON so a value of the wrong type is rejected as an
/// invalid email or action rather than failing the whole body.
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionRequest {
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub action: Option<Value>,
}

impl SubscriptionRequest {
    /// The email, if one was given as a string.
    pub fn email(&self) -> Option<&str> {
        self.email.as_ref().and_then(Value::as_str)
    }

    /// `None` when absent; `Some(None)` when present but not a recognized action.
    pub fn action(&self) -> Option<Option<SubscriptionAction>> {
        self.action
            .as_ref()
            .map(|action| action.as_str().and_then(|a| a.parse().ok()))
    }
}

/// Actions the subscription handler understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionAction {
    Subscribe,
    Unsubscribe,
}

impl FromStr for SubscriptionAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subscribe" => Ok(Self::Subscribe),
            "unsubscribe" => Ok(Self::Unsubscribe),
            other => Err(format!("unknown action: {}", other)),
        }
    }
}

impl fmt::Display for SubscriptionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subscribe => f.write_str("subscribe"),
            Self::Unsubscribe => f.write_str("unsubscribe"),
        }
    }
}

/// Subscription handler response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubscriptionResponse {
    pub fn success(message: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            email: Some(email.into()),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            email: None,
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Announce handler response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnounceResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
