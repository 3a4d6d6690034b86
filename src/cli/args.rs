//! CLI argument definitions using clap
//!
//! Commands:
//! - flexquery order --input <file|-> --by <field[:asc|desc]>... [--config <path>]
//! - flexquery compare --left <file> --right <file> [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::executor::OrderField;

/// flexquery - ordered-stream execution over schema-flexible records
#[derive(Parser, Debug)]
#[command(name = "flexquery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sort a JSON array of records and print the result
    Order {
        /// Path to the input records, or "-" for stdin
        #[arg(long, default_value = "-")]
        input: PathBuf,

        /// Sort key, repeatable; earlier keys take priority
        #[arg(long = "by", required = true)]
        by: Vec<OrderField>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check two JSON record files for structural equality
    Compare {
        #[arg(long)]
        left: PathBuf,

        #[arg(long)]
        right: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order() {
        let cli = Cli::try_parse_from([
            "flexquery", "order", "--input", "rows.json", "--by", "name", "--by", "age:desc",
        ])
        .unwrap();

        match cli.command {
            Command::Order { input, by, config } => {
                assert_eq!(input, PathBuf::from("rows.json"));
                assert_eq!(by, vec![OrderField::asc("name"), OrderField::desc("age")]);
                assert!(config.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_order_requires_key() {
        assert!(Cli::try_parse_from(["flexquery", "order", "--input", "rows.json"]).is_err());
    }

    #[test]
    fn test_rejects_bad_direction() {
        assert!(Cli::try_parse_from(["flexquery", "order", "--by", "age:up"]).is_err());
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::try_parse_from([
            "flexquery", "compare", "--left", "a.json", "--right", "b.json", "--config", "c.json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Compare { config: Some(_), .. }));
    }
}
