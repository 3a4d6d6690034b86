//! Structured JSON logger
//!
//! Each call writes exactly one JSON object on its own line:
//! `event` first, `severity` second, then caller fields sorted by key.
//! TRACE/INFO/WARN go to stdout, ERROR/FATAL to stderr. Once a caller
//! reserves stdout for its own output, every line goes to stderr. Lines
//! below the process-wide threshold are dropped before any formatting
//! happens.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use serde_json::{Map, Value};

/// Log severity, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Trace = 0,
    Info = 1,
    /// Degraded but the operation continues
    Warn = 2,
    /// The operation failed
    Error = 3,
    /// Broken invariant; the caller cannot continue
    Fatal = 4,
}

const SEVERITIES: [Severity; 5] = [
    Severity::Trace,
    Severity::Info,
    Severity::Warn,
    Severity::Error,
    Severity::Fatal,
];

impl Severity {
    /// Upper-case name used in the `severity` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    fn writes_to_stderr(self) -> bool {
        self >= Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown severity name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level '{0}' (expected trace, info, warn, error or fatal)")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        if lowered == "warning" {
            return Ok(Severity::Warn);
        }
        SEVERITIES
            .iter()
            .copied()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(&lowered))
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}

static THRESHOLD: AtomicU8 = AtomicU8::new(Severity::Info as u8);
static STDOUT_RESERVED: AtomicBool = AtomicBool::new(false);

/// Process-wide structured logger
pub struct Logger;

impl Logger {
    /// Sets the process-wide threshold
    pub fn set_min_severity(severity: Severity) {
        THRESHOLD.store(severity as u8, Ordering::Relaxed);
    }

    /// Returns the process-wide threshold
    pub fn min_severity() -> Severity {
        let raw = THRESHOLD.load(Ordering::Relaxed) as usize;
        SEVERITIES[raw.min(SEVERITIES.len() - 1)]
    }

    /// Whether a line at `severity` passes the threshold
    pub fn enabled(severity: Severity) -> bool {
        severity >= Self::min_severity()
    }

    /// Sends every later line to stderr, leaving stdout to the caller.
    ///
    /// Irreversible for the life of the process.
    pub fn reserve_stdout() {
        STDOUT_RESERVED.store(true, Ordering::Relaxed);
    }

    /// Whether a line at `severity` is written to stderr
    pub fn routes_to_stderr(severity: Severity) -> bool {
        severity.writes_to_stderr() || STDOUT_RESERVED.load(Ordering::Relaxed)
    }

    /// Writes one line for `event`, routed by severity and stdout reservation.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !Self::enabled(severity) {
            return;
        }
        let line = render(severity, event, fields);
        // A logger has nowhere to report its own write failures
        if Self::routes_to_stderr(severity) {
            let _ = write_line(&mut io::stderr().lock(), &line);
        } else {
            let _ = write_line(&mut io::stdout().lock(), &line);
        }
    }

    /// Log at TRACE level
    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level (stderr)
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }

    /// Log at FATAL level (stderr)
    pub fn fatal(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Fatal, event, fields);
    }
}

/// Builds the JSON text of one line, without the trailing newline.
///
/// Caller fields never shadow `event` or `severity`. A repeated key keeps
/// its last value.
fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut line = Map::with_capacity(fields.len() + 2);
    line.insert("event".to_string(), Value::from(event));
    line.insert("severity".to_string(), Value::from(severity.as_str()));

    let sorted: BTreeMap<&str, &str> = fields.iter().copied().collect();
    for (key, value) in sorted {
        line.entry(key).or_insert_with(|| Value::from(value));
    }

    Value::Object(line).to_string()
}

fn write_line<W: Write>(writer: &mut W, line: &str) -> io::Result<()> {
    writeln!(writer, "{}", line)?;
    writer.flush()
}
