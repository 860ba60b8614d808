//! Shared handler state.

use std::sync::Arc;

use crate::model::{RecordId, Resource};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::query::parse_lenient_int;
use crate::repository::Repository;

use super::errors::ApiError;

/// Repository and counters shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn Repository>,
    pub metrics: Arc<MetricsRegistry>,
}

impl AppState {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self::with_metrics(repository, Arc::new(MetricsRegistry::new()))
    }

    pub fn with_metrics(repository: Arc<dyn Repository>, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            repository,
            metrics,
        }
    }

    /// Count and log a failed request, then hand the error back for the response
    pub fn reject(&self, route: &str, err: ApiError) -> ApiError {
        match &err {
            ApiError::NotFound(_) => self.metrics.increment_not_found(),
            ApiError::BadRequest(_) => self.metrics.increment_bad_requests(),
            ApiError::Internal(_) => self.metrics.increment_internal_errors(),
        }

        let status = err.status_code();
        let message = err.to_string();
        log_event_with_fields(
            Event::RequestFailed,
            &[
                ("route", route),
                ("status", status.as_str()),
                ("error", message.as_str()),
            ],
        );
        err
    }
}

/// Log a successful create, update or delete
pub fn log_record(event: Event, resource: Resource, id: RecordId) {
    let id = id.to_string();
    log_event_with_fields(event, &[("resource", resource.as_str()), ("id", id.as_str())]);
}

/// Log a listing with its match count and page size
pub fn log_listing(resource: Resource, total: usize, returned: usize) {
    let total = total.to_string();
    let returned = returned.to_string();
    log_event_with_fields(
        Event::ListExecuted,
        &[
            ("collection", resource.collection()),
            ("total", total.as_str()),
            ("returned", returned.as_str()),
        ],
    );
}

/// Parse a path id the way a lenient `parseInt` would.
///
/// Anything that does not yield a positive integer can never name a stored
/// record, so it is reported as not found.
pub fn parse_id(raw: &str, resource: Resource) -> Result<RecordId, ApiError> {
    match parse_lenient_int(raw) {
        Some(id) if id > 0 => Ok(id as RecordId),
        _ => Err(ApiError::NotFound(resource)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::SnapshotRepository;
    use crate::storage::MemoryBackend;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("7", Resource::Article), Ok(7));
        assert_eq!(parse_id("7abc", Resource::Article), Ok(7));
        assert_eq!(
            parse_id("abc", Resource::User),
            Err(ApiError::NotFound(Resource::User))
        );
        assert_eq!(
            parse_id("0", Resource::Article),
            Err(ApiError::NotFound(Resource::Article))
        );
        assert_eq!(
            parse_id("-4", Resource::Article),
            Err(ApiError::NotFound(Resource::Article))
        );
    }

    #[test]
    fn test_reject_counts_by_kind() {
        let state = AppState::new(Arc::new(SnapshotRepository::new(MemoryBackend::new())));

        state.reject("GET /articles/:id", ApiError::NotFound(Resource::Article));
        state.reject("POST /articles", ApiError::BadRequest("x".to_string()));
        state.reject("GET /articles", ApiError::Internal("boom".to_string()));

        let snapshot = state.metrics.snapshot();
        assert_eq!(snapshot.not_found, 1);
        assert_eq!(snapshot.bad_requests, 1);
        assert_eq!(snapshot.internal_errors, 1);
    }
}
