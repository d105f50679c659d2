//! Observability for the catalog service
//!
//! - Structured logging through `tracing`
//! - Stable, upper-case event names
//! - Begin/complete scopes around request work
//!
//! # Usage
//!
//! ```ignore
//! use game_catalog::observability::{self, Event, LogFormat};
//!
//! observability::init(LogFormat::Json);
//! observability::log_event(Event::BootStart);
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{init, LogFormat, DEFAULT_FILTER};
pub use scope::ObservationScope;

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let rendered = fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ");

    if event.is_error() {
        tracing::error!(event = event.as_str(), fields = %rendered);
    } else {
        tracing::info!(event = event.as_str(), fields = %rendered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        log_event(Event::BootStart);
        log_event(Event::BootComplete);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::ConfigLoaded, &[("port", "8080")]);
    }
}
