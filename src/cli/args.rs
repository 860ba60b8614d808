//! CLI argument definitions using clap
//!
//! Commands:
//! - articles-api init --data-file <path>
//! - articles-api serve [--config <path>]
//! - articles-api query --data-file <path> [--kind articles|users] [key=value ...]

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// articles-api - REST CRUD service for articles and users
#[derive(Parser, Debug)]
#[command(name = "articles-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty data file
    Init {
        /// Path of the data file to create
        #[arg(long, default_value = "./data.json")]
        data_file: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file; built-in defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run one listing against a data file and print it as JSON
    Query {
        /// Path to the data file
        #[arg(long, default_value = "./data.json")]
        data_file: PathBuf,

        /// Collection to list
        #[arg(long, value_enum, default_value_t = RecordKind::Articles)]
        kind: RecordKind,

        /// Listing parameters as key=value (page, limit, created_by, ...)
        params: Vec<String>,
    },
}

/// Collections reachable from the `query` command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Articles,
    Users,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
