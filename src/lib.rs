//! flexquery - ordered-stream execution over schema-flexible records
//!
//! Records pulled from heterogeneous sources flow through single-reader
//! streams. The ordered-stream operator drains a stream, validates its sort
//! keys and emits a stably sorted stream, failing loudly on schema or type
//! inconsistencies instead of producing a partial order.

pub mod cli;
pub mod config;
pub mod executor;
pub mod observability;
pub mod record;
pub mod value;
