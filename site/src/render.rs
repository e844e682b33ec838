//! HTML rendering for the event list and the page shell.

use std::fmt::Display;

use htmlescape::{encode_attribute, encode_minimal};
use shared::Event;

use crate::board::{CreateEventForm, SubscribeForm};

/// Shown in place of cards when no events exist.
pub const NO_EVENTS: &str = "No upcoming events announced yet.";

pub fn event_card(event: &Event) -> String {
    format!(
        r#"<div class="event-card">
    <h3>{}</h3>
    <p><strong>Date:</strong> {}</p>
    <p>{}</p>
</div>"#,
        encode_minimal(&event.title),
        encode_minimal(&event.date),
        encode_minimal(&event.description)
    )
}

/// One card per event, in the order given; the placeholder for an empty list.
pub fn event_list(events: &[Event]) -> String {
    if events.is_empty() {
        return format!("<p>{}</p>", NO_EVENTS);
    }

    events
        .iter()
        .map(event_card)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn load_error(error: &dyn Display) -> String {
    format!(
        r#"<p class="error">Failed to load events. Error: {}</p>"#,
        encode_minimal(&error.to_string())
    )
}

/// The whole page: event list, status banner and both forms.
pub fn page(
    events_html: &str,
    status_html: &str,
    subscribe: &SubscribeForm,
    create_event: &CreateEventForm,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Event Board</title>
</head>
<body>
    <h1>Upcoming Events</h1>
    {status}
    <section id="events-container">
{events}
    </section>
    <form id="subscribe-form">
        <h2>Get notified</h2>
        <input type="email" id="subscriber-email" name="email" value="{email}" required>
        <button type="submit">Subscribe</button>
    </form>
    <form id="create-event-form">
        <h2>Announce an event</h2>
        <input type="text" id="event-title" name="title" value="{title}" required>
        <input type="date" id="event-date" name="date" value="{date}" required>
        <textarea id="event-description" name="description" required>{description}</textarea>
        <button type="submit">Announce</button>
    </form>
</body>
</html>
"#,
        status = status_html,
        events = events_html,
        email = encode_attribute(&subscribe.email),
        title = encode_attribute(&create_event.title),
        date = encode_attribute(&create_event.date),
        description = encode_minimal(&create_event.description),
    )
}
