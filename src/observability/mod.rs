//! Observability subsystem for flexquery
//!
//! Provides:
//! - Structured logging (JSON lines)
//! - Execution counters
//! - Operation scopes with begin/complete/fail events
//!
//! # Principles
//!
//! 1. Observability is read-only and never changes execution results
//! 2. No async or background threads
//! 3. Deterministic output

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, ParseSeverityError, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::ObservationScope;

/// Log a lifecycle event at its default severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

/// Log a lifecycle event at `severity`, never below the event's default
pub fn log_event_at(severity: Severity, event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity.max(event.severity()), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        log_event(Event::ConfigLoaded, &[("log_level", "info")]);
        log_event(Event::UpstreamCloseFailed, &[]);
        log_event_at(Severity::Fatal, Event::OrderByRejected, &[("code", "FQ_STREAM_CLOSED")]);
    }
}
