//! Anonymous usage analytics: install heartbeats, named events and the
//! per-mode admin snapshot.
mod aggregator;
pub mod event_name;
mod models;
mod schema;
mod sqlite_analytics_store;
mod stats;
mod store;
mod timestamp;

pub use aggregator::{AnalyticsAggregator, AnalyticsError};
pub use event_name::{classify_event, is_accepted_event, EventClass, EventName};
pub use models::{
    AdminStats, EventRecord, EventReport, Heartbeat, InstallRecord, Mode, ModeStats,
};
pub use schema::ANALYTICS_VERSIONED_SCHEMAS;
pub use sqlite_analytics_store::SqliteAnalyticsStore;
pub use stats::aggregate;
pub use store::{AnalyticsStore, EventCount, LaunchCounts, StatsInputs};
pub use timestamp::normalize_timestamp;
