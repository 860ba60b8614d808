//! CLI module
//!
//! Provides command-line interface for:
//! - init: Create an empty data file
//! - serve: Boot the HTTP server
//! - query: One-shot listing against a data file

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, RecordKind};
pub use commands::{init, open_repository, query, run, run_command, serve};
pub use config::{BackendKind, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
