//! Subscriber email validation.

use lazy_regex::regex_is_match;
use validator::ValidateEmail;

use crate::{Error, Result};

/// An email address that passed the syntax check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    /// Accepts `local@domain.tld` with no whitespace, also rejecting what `validator` considers invalid.
    pub fn parse(email: &str) -> Result<Self> {
        let email = email.to_string();
        if regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", &email) && email.validate_email() {
            Ok(Self(email))
        } else {
            Err(Error::Validation(format!("{} is not a valid email", email)))
        }
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
