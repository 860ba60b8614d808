//! CLI command implementations
//!
//! `serve` follows a fixed boot sequence: configuration, store, listener.
//! Any failure before the listener is bound is fatal.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::document::DocumentStore;
use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event, Logger};
use crate::query::ListParams;
use crate::repository::{Repository, SnapshotRepository};
use crate::rest_api::AppState;
use crate::storage::{read_dataset, Dataset, JsonFileBackend, MemoryBackend, StorageError};

use super::args::{Command, RecordKind};
use super::config::{BackendKind, Config};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { data_file } => init(&data_file),
        Command::Serve { config } => serve(config.as_deref()),
        Command::Query {
            data_file,
            kind,
            params,
        } => query(&data_file, kind, &params),
    }
}

/// Create an empty data file
///
/// Refuses to overwrite an existing file.
pub fn init(data_file: &Path) -> CliResult<()> {
    let backend = JsonFileBackend::create(data_file).map_err(|e| match e {
        StorageError::AlreadyExists(path) => CliError::already_initialized(&path),
        other => CliError::store_unavailable(other),
    })?;

    let path = backend.path().display().to_string();
    log_event_with_fields(Event::StoreInitialized, &[("data_file", path.as_str())]);
    write_response(json!({"initialized": true, "data_file": path}))?;

    Ok(())
}

/// Boot the server and block until it shuts down
pub fn serve(config_path: Option<&Path>) -> CliResult<()> {
    log_event(Event::BootStart);

    let result = boot_and_serve(config_path);
    if let Err(e) = &result {
        log_event_with_fields(
            Event::BootFailed,
            &[("code", e.code_str()), ("error", e.message())],
        );
    }
    result
}

fn boot_and_serve(config_path: Option<&Path>) -> CliResult<()> {
    let config = Config::resolve(config_path)?;
    Logger::set_min_severity(config.log_severity()?);

    let port = config.server.port.to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("backend", config.backend.as_str()),
            ("host", config.server.host.as_str()),
            ("port", port.as_str()),
        ],
    );

    let repository = open_repository(&config)?;
    let described = repository.describe();
    log_event_with_fields(Event::StoreOpened, &[("store", described.as_str())]);

    let server = HttpServer::with_config(config.server.clone(), AppState::new(repository));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Open the repository the configuration asks for
pub fn open_repository(config: &Config) -> CliResult<Arc<dyn Repository>> {
    let repository: Arc<dyn Repository> = match config.backend {
        BackendKind::Memory => {
            let seed = seed_dataset(config.data_file.as_deref())?;
            let backend = MemoryBackend::with_dataset(seed).map_err(CliError::store_unavailable)?;
            Arc::new(SnapshotRepository::new(backend))
        }
        BackendKind::File => {
            let path = config.data_file.as_deref().ok_or_else(|| {
                CliError::config_error("data_file is required when backend is 'file'")
            })?;
            let backend = JsonFileBackend::open(path).map_err(CliError::store_unavailable)?;
            Arc::new(SnapshotRepository::new(backend))
        }
        BackendKind::Document => {
            let seed = seed_dataset(config.data_file.as_deref())?;
            let store = DocumentStore::from_dataset(&seed).map_err(CliError::store_unavailable)?;
            Arc::new(store)
        }
    };

    Ok(repository)
}

fn seed_dataset(data_file: Option<&Path>) -> CliResult<Dataset> {
    match data_file {
        Some(path) => read_dataset(path).map_err(CliError::store_unavailable),
        None => Ok(Dataset::new()),
    }
}

/// Run one listing against a data file and print the page
pub fn query(data_file: &Path, kind: RecordKind, params: &[String]) -> CliResult<()> {
    let dataset = read_dataset(data_file).map_err(CliError::store_unavailable)?;
    let backend = MemoryBackend::with_dataset(dataset).map_err(CliError::store_unavailable)?;
    let repository = SnapshotRepository::new(backend);
    let params = ListParams::parse_pairs(params);

    let page = match kind {
        RecordKind::Articles => serde_json::to_value(
            repository
                .list_articles(&params.filter, params.pagination)
                .map_err(|e| CliError::io_error(e.to_string()))?,
        )?,
        RecordKind::Users => serde_json::to_value(
            repository
                .list_users(params.pagination)
                .map_err(|e| CliError::io_error(e.to_string()))?,
        )?,
    };

    write_response(page)
}
