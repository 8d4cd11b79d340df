//! Observability for achdb
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed engine events
//!
//! Observability is read-only: it never changes engine state and a failed
//! write is swallowed.
//!
//! ```ignore
//! use achdb::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::HypothesisAdded, &[("label", "H3")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an engine event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log an engine event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Verifies no panic
        log_event(Event::StateLoaded);
        log_event(Event::PersistenceUnavailable);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::AnalysisCreated, &[("title", "Outage review")]);
    }
}
