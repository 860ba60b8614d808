//! Lifecycle and request events
//!
//! Events are explicit and typed; the string form is what lands in the
//! `event` field of a log line.

use std::fmt;

/// Observable events in the articles service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Process startup begins
    BootStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Record store opened
    StoreOpened,
    /// Data file initialized
    StoreInitialized,
    /// Listener bound, ready for requests
    Serving,
    /// Shutdown signal received
    ShutdownStart,
    /// Server drained and stopped
    ShutdownComplete,
    /// Startup failed (FATAL)
    BootFailed,

    // Record operations
    /// Listing answered
    ListExecuted,
    /// Record created
    RecordCreated,
    /// Record updated
    RecordUpdated,
    /// Record deleted
    RecordDeleted,
    /// Request answered with an error status
    RequestFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "ARTICLES_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::StoreInitialized => "STORE_INITIALIZED",
            Event::Serving => "ARTICLES_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::BootFailed => "ARTICLES_STARTUP_FAILED",

            Event::ListExecuted => "LIST_EXECUTED",
            Event::RecordCreated => "RECORD_CREATED",
            Event::RecordUpdated => "RECORD_UPDATED",
            Event::RecordDeleted => "RECORD_DELETED",
            Event::RequestFailed => "REQUEST_FAILED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::BootFailed)
    }

    /// Per-request events are logged at TRACE so they stay quiet by default
    pub fn is_per_request(&self) -> bool {
        matches!(
            self,
            Event::ListExecuted
                | Event::RecordCreated
                | Event::RecordUpdated
                | Event::RecordDeleted
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
