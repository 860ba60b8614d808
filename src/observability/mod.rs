//! Observability for the articles service
//!
//! - Structured logging (one JSON object per line)
//! - Request counters
//! - Typed lifecycle events
//!
//! Observability is read-only: nothing here feeds back into request
//! handling, and a failed log write is ignored.
//!
//! # Usage
//!
//! ```ignore
//! use articles_api::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::RecordCreated, &[("resource", "Article"), ("id", "7")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_created();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

fn severity_of(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else if event.is_per_request() {
        Severity::Trace
    } else if event == Event::RequestFailed {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log an event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = severity_of(event);
    if severity >= Severity::Error {
        Logger::log_stderr(severity, event.as_str(), fields);
    } else {
        Logger::log(severity, event.as_str(), fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_severity() {
        assert_eq!(severity_of(Event::BootFailed), Severity::Fatal);
        assert_eq!(severity_of(Event::RecordCreated), Severity::Trace);
        assert_eq!(severity_of(Event::RequestFailed), Severity::Warn);
        assert_eq!(severity_of(Event::Serving), Severity::Info);
    }

    #[test]
    fn test_log_event() {
        // This just verifies no panic
        log_event(Event::BootStart);
        log_event_with_fields(Event::ConfigLoaded, &[("backend", "memory")]);
    }
}
