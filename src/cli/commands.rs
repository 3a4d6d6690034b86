//! CLI command implementations
//!
//! Commands are thin: they load configuration and input, build an operator
//! tree, and print the result. All execution semantics live in `executor`.

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::config::EngineConfig;
use crate::executor::{
    are_streams_equal, drain, InMemorySource, InMemoryStream, Node, OrderBy, OrderField,
    RecordStream,
};
use crate::observability::{log_event, Event, Logger, MetricsRegistry};
use crate::record::json::record_to_json;
use crate::record::Record;

use super::args::Command;
use super::errors::CliResult;
use super::io::{read_records, write_response};

/// Parses process arguments and runs the selected command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Runs one command. Stdout carries only the response; logs go to stderr.
pub fn run_command(cmd: Command) -> CliResult<()> {
    Logger::reserve_stdout();

    match cmd {
        Command::Order { input, by, config } => order(&input, by, config.as_deref()),
        Command::Compare {
            left,
            right,
            config,
        } => compare(&left, &right, config.as_deref()),
    }
}

/// Load configuration (or defaults) and apply the log level
pub fn load_config(path: Option<&Path>) -> CliResult<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    Logger::set_min_severity(config.severity()?);

    let source = path.map_or_else(|| "default".to_string(), |p| p.display().to_string());
    log_event(
        Event::ConfigLoaded,
        &[("log_level", config.log_level.as_str()), ("source", source.as_str())],
    );

    Ok(config)
}

/// Sort the records in `input` by `by` and print them
pub fn order(input: &Path, by: Vec<OrderField>, config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let records = read_records(input, config.json_options())?;

    let count = records.len().to_string();
    log_event(Event::SourceLoaded, &[("records", count.as_str())]);

    let metrics = Arc::new(MetricsRegistry::new());
    let data = order_records(records, by, &config, &metrics)?;

    Logger::info("EXECUTION_METRICS", &[("metrics", metrics.to_json().as_str())]);
    write_response(data)
}

/// Run an `OrderBy` over `records` and render the sorted output.
pub fn order_records(
    records: Vec<Record>,
    by: Vec<OrderField>,
    config: &EngineConfig,
    metrics: &Arc<MetricsRegistry>,
) -> CliResult<Value> {
    let node = OrderBy::new(by, Box::new(InMemorySource::new(records)))
        .with_max_buffered_records(config.max_buffered_records)
        .with_metrics(Arc::clone(metrics));

    let mut stream = node.get()?;
    let sorted = drain(&mut stream, None);
    stream.close()?;
    let sorted = sorted?;

    let rendered: Vec<Value> = sorted.iter().map(record_to_json).collect();
    Ok(json!({
        "count": rendered.len(),
        "records": rendered,
    }))
}

/// Compare the records of two files and print whether they are equal
pub fn compare(left: &Path, right: &Path, config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let left = read_records(left, config.json_options())?;
    let right = read_records(right, config.json_options())?;

    let equal = compare_records(left, right)?;
    write_response(json!({ "equal": equal }))
}

/// Structural equality of two record lists, checked through streams.
pub fn compare_records(left: Vec<Record>, right: Vec<Record>) -> CliResult<bool> {
    let mut left = InMemoryStream::new(left);
    let mut right = InMemoryStream::new(right);

    let equal = are_streams_equal(&mut left, &mut right);
    left.close()?;
    right.close()?;
    let equal = equal?;

    log_event(
        Event::StreamsCompared,
        &[("equal", if equal { "true" } else { "false" })],
    );
    Ok(equal)
}
