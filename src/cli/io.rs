//! JSON I/O handling for CLI
//!
//! - Input: a JSON array of objects, from a file or stdin ("-")
//! - Output: a single JSON object on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::Value;

use crate::record::json::{records_from_str, JsonOptions};
use crate::record::Record;

use super::errors::{CliError, CliResult};

/// Read input records from `path`, or stdin when `path` is "-"
pub fn read_records(path: &Path, options: JsonOptions) -> CliResult<Vec<Record>> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().lock().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(path).map_err(|e| {
            CliError::io(format!("Failed to read {}: {}", path.display(), e))
        })?
    };

    parse_records(&content, options)
}

/// Parse input records from JSON text
pub fn parse_records(content: &str, options: JsonOptions) -> CliResult<Vec<Record>> {
    if content.trim().is_empty() {
        return Err(CliError::input("Empty input"));
    }

    Ok(records_from_str(content, options)?)
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_response_to(&mut io::stdout().lock(), data)
}

/// Write `{"status":"ok","data":...}` as a single line to `writer`
pub fn write_response_to<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *writer, &response).map_err(|e| CliError::io(e.to_string()))?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
