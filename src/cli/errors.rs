//! CLI error type
//!
//! Every failure reaching `main` carries one stable code and a message and
//! ends the process with status 1.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::executor::ExecutorError;
use crate::record::RecordError;

/// Stable CLI failure codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Unreadable or invalid configuration file
    Config,
    /// File or stdio failure
    Io,
    /// Input is not a JSON array of flat objects
    Input,
    /// The operator rejected the records
    Execution,
}

impl CliErrorCode {
    /// Stable code printed before the message
    pub fn as_str(&self) -> &'static str {
        match self {
            CliErrorCode::Config => "FQ_CLI_CONFIG_ERROR",
            CliErrorCode::Io => "FQ_CLI_IO_ERROR",
            CliErrorCode::Input => "FQ_CLI_INPUT_ERROR",
            CliErrorCode::Execution => "FQ_CLI_EXECUTION_FAILED",
        }
    }
}

impl fmt::Display for CliErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coded CLI failure, printed as `CODE: message`
#[derive(Debug, thiserror::Error)]
#[error("{code}: {message}")]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Creates an error with an explicit code
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// File or stdio failure
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(CliErrorCode::Io, message)
    }

    /// Input that is not a JSON array of flat objects
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(CliErrorCode::Input, message)
    }

    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(CliErrorCode::Config, e.to_string())
    }
}

impl From<RecordError> for CliError {
    fn from(e: RecordError) -> Self {
        Self::input(e.to_string())
    }
}

/// Keeps the executor code in the message so scripts can match on it
impl From<ExecutorError> for CliError {
    fn from(e: ExecutorError) -> Self {
        Self::new(CliErrorCode::Execution, format!("{}: {}", e.code(), e))
    }
}

pub type CliResult<T> = Result<T, CliError>;
