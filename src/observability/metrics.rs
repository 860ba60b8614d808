//! Request counters
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Registry of operational counters, shared by all request handlers.
///
/// Uses Relaxed ordering; counters are independent of each other.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Listings answered
    listings_served: AtomicU64,
    /// Single-record reads answered
    records_read: AtomicU64,
    /// Records created
    records_created: AtomicU64,
    /// Records updated
    records_updated: AtomicU64,
    /// Records deleted
    records_deleted: AtomicU64,
    /// Requests answered 400
    bad_requests: AtomicU64,
    /// Requests answered 404
    not_found: AtomicU64,
    /// Requests answered 500
    internal_errors: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_listings(&self) {
        self.listings_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_reads(&self) {
        self.records_read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_created(&self) {
        self.records_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_updated(&self) {
        self.records_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_deleted(&self) {
        self.records_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_bad_requests(&self) {
        self.bad_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_internal_errors(&self) {
        self.internal_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Current values as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or_default()
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            listings_served: self.listings_served.load(Ordering::Relaxed),
            records_read: self.records_read.load(Ordering::Relaxed),
            records_created: self.records_created.load(Ordering::Relaxed),
            records_updated: self.records_updated.load(Ordering::Relaxed),
            records_deleted: self.records_deleted.load(Ordering::Relaxed),
            bad_requests: self.bad_requests.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            internal_errors: self.internal_errors.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub listings_served: u64,
    pub records_read: u64,
    pub records_created: u64,
    pub records_updated: u64,
    pub records_deleted: u64,
    pub bad_requests: u64,
    pub not_found: u64,
    pub internal_errors: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let snapshot = MetricsRegistry::new().snapshot();

        assert_eq!(snapshot.listings_served, 0);
        assert_eq!(snapshot.records_created, 0);
        assert_eq!(snapshot.internal_errors, 0);
    }

    #[test]
    fn test_increment_counters() {
        let registry = MetricsRegistry::new();

        registry.increment_listings();
        registry.increment_listings();
        registry.increment_reads();
        registry.increment_created();
        registry.increment_updated();
        registry.increment_deleted();
        registry.increment_bad_requests();
        registry.increment_not_found();
        registry.increment_internal_errors();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.listings_served, 2);
        assert_eq!(snapshot.records_read, 1);
        assert_eq!(snapshot.records_created, 1);
        assert_eq!(snapshot.records_updated, 1);
        assert_eq!(snapshot.records_deleted, 1);
        assert_eq!(snapshot.bad_requests, 1);
        assert_eq!(snapshot.not_found, 1);
        assert_eq!(snapshot.internal_errors, 1);
    }

    #[test]
    fn test_to_json() {
        let registry = MetricsRegistry::new();
        registry.increment_created();
        registry.increment_not_found();

        let json = registry.to_json();
        assert_eq!(json["records_created"], 1);
        assert_eq!(json["not_found"], 1);
        assert_eq!(json["listings_served"], 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let reg = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    reg.increment_listings();
                    reg.increment_created();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.listings_served, 1000);
        assert_eq!(snapshot.records_created, 1000);
    }
}
