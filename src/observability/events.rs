//! Observability events for the catalog service
//!
//! Every log line carries one of these names in its `event` field.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Listener bound, ready to serve
    BootComplete,
    /// Shutdown signal received
    ShutdownStart,
    /// Server stopped
    ShutdownComplete,

    // Configuration
    /// Configuration resolved and validated
    ConfigLoaded,
    /// Connection pool established
    StoreConnected,
    /// Fixture records loaded into the in-memory store
    FixtureLoaded,

    // Requests
    /// Request failed validation before any store access
    QueryRejected,
    /// Request failed in the store
    QueryFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "CATALOG_STARTUP_BEGIN",
            Event::BootComplete => "CATALOG_STARTUP_COMPLETE",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreConnected => "STORE_CONNECTED",
            Event::FixtureLoaded => "FIXTURE_LOADED",

            Event::QueryRejected => "QUERY_REJECTED",
            Event::QueryFailed => "QUERY_FAILED",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Event::QueryFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
