//! Job Tracker Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod analytics;
pub mod config;
pub mod jobs;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use analytics::{AnalyticsAggregator, AnalyticsStore, SqliteAnalyticsStore};
pub use jobs::{JobManager, JobStore, SqliteJobStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
