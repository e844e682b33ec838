//! Page client for the Event Board site.
//!
//! Fetches the hosted events document, renders it as HTML, and submits the
//! subscribe and create-event forms to the API.

pub mod board;
pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod status;

pub use board::{CreateEventForm, EventBoard, SubscribeForm};
pub use client::{ApiClient, Reply, ReplyPayload};
pub use config::SiteConfig;
pub use error::{Error, Result};
pub use status::{StatusBanner, StatusKind};
