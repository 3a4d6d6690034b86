//! Lifecycle logging for one operation
//!
//! `begin` logs `{NAME}_BEGIN`. Consuming the scope with `complete` or
//! `fail` logs `{NAME}_COMPLETE` (with `elapsed_us`) or `{NAME}_FAILED`.
//! A scope dropped without either logs `{NAME}_INCOMPLETE` at WARN.

use std::time::Instant;

use super::logger::{Logger, Severity};

/// Begin/complete/fail logging around one operation
///
/// ```ignore
/// let scope = ObservationScope::begin("ORDER_BY", &[("keys", "2")]);
/// scope.complete(&[("records", "3")]);
/// ```
pub struct ObservationScope {
    name: &'static str,
    context: Vec<(&'static str, String)>,
    started: Instant,
    finished: bool,
}

impl ObservationScope {
    /// Opens a scope; `context` is repeated on every line it logs.
    pub fn begin(name: &'static str, context: &[(&'static str, &str)]) -> Self {
        let scope = Self {
            name,
            context: context.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            started: Instant::now(),
            finished: false,
        };
        scope.emit("BEGIN", Severity::Info, &[]);
        scope
    }

    /// Ends the scope with `<NAME>_COMPLETE` and its `results`
    pub fn complete(mut self, results: &[(&str, &str)]) {
        self.finished = true;
        let elapsed = self.started.elapsed().as_micros().to_string();

        let fields: Vec<(&str, &str)> = results
            .iter()
            .copied()
            .chain([("elapsed_us", elapsed.as_str())])
            .collect();
        self.emit("COMPLETE", Severity::Info, &fields);
    }

    /// Ends the scope with `<NAME>_FAILED` at ERROR
    pub fn fail(mut self, code: &str, reason: &str) {
        self.finished = true;
        self.emit("FAILED", Severity::Error, &[("code", code), ("reason", reason)]);
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn emit(&self, phase: &str, severity: Severity, extra: &[(&str, &str)]) {
        let event = format!("{}_{}", self.name, phase);
        let fields: Vec<(&str, &str)> = self
            .context
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .chain(extra.iter().copied())
            .collect();
        Logger::log(severity, &event, &fields);
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.finished {
            self.emit(
                "INCOMPLETE",
                Severity::Warn,
                &[("reason", "scope dropped before completion")],
            );
        }
    }
}
