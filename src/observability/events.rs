//! Observable lifecycle events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events in flexquery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Engine configuration loaded
    ConfigLoaded,

    // Sources
    /// Input records loaded into a source node
    SourceLoaded,

    // Operators
    /// Ordered-stream operator produced its output
    OrderByExecuted,
    /// Ordered-stream operator rejected its input
    OrderByRejected,
    /// Upstream stream failed to close cleanly
    UpstreamCloseFailed,

    // Verification
    /// Stream equality check finished
    StreamsCompared,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SourceLoaded => "SOURCE_LOADED",
            Event::OrderByExecuted => "ORDER_BY_EXECUTED",
            Event::OrderByRejected => "ORDER_BY_REJECTED",
            Event::UpstreamCloseFailed => "UPSTREAM_CLOSE_FAILED",
            Event::StreamsCompared => "STREAMS_COMPARED",
        }
    }

    /// Default severity: WARN for degraded conditions, INFO otherwise
    pub fn severity(&self) -> Severity {
        match self {
            Event::OrderByRejected | Event::UpstreamCloseFailed => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::ConfigLoaded.as_str(), "CONFIG_LOADED");
        assert_eq!(Event::OrderByRejected.to_string(), "ORDER_BY_REJECTED");
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::UpstreamCloseFailed.severity(), Severity::Warn);
        assert_eq!(Event::OrderByRejected.severity(), Severity::Warn);
        assert_eq!(Event::OrderByExecuted.severity(), Severity::Info);
    }
}
