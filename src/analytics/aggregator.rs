use super::event_name::is_accepted_event;
use super::models::{AdminStats, EventReport, Heartbeat};
use super::stats::aggregate;
use super::store::AnalyticsStore;
use super::timestamp::normalize_timestamp;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),

    #[error("Unknown event: {0}")]
    InvalidEvent(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}

/// Records anonymous usage reports and computes the admin snapshot.
pub struct AnalyticsAggregator {
    store: Arc<dyn AnalyticsStore>,
}

impl AnalyticsAggregator {
    pub fn new(store: Arc<dyn AnalyticsStore>) -> Self {
        Self { store }
    }

    pub fn record_heartbeat(&self, heartbeat: &Heartbeat) -> Result<(), AnalyticsError> {
        let at = normalize_timestamp(heartbeat.ts)?;
        let install_id = heartbeat.id.to_string();
        self.store.record_heartbeat(
            &install_id,
            heartbeat.mode,
            &heartbeat.version,
            at.timestamp(),
        )?;
        debug!(
            "Heartbeat from {} ({}, {})",
            install_id,
            heartbeat.mode.as_str(),
            heartbeat.version
        );
        Ok(())
    }

    pub fn record_event(&self, report: &EventReport) -> Result<(), AnalyticsError> {
        if !is_accepted_event(&report.event) {
            return Err(AnalyticsError::InvalidEvent(report.event.clone()));
        }
        let at = normalize_timestamp(report.ts)?;
        let install_id = report.id.to_string();
        self.store
            .insert_event(&install_id, &report.event, at.timestamp())?;
        debug!("Event {} from {}", report.event, install_id);
        Ok(())
    }

    pub fn compute_stats(&self) -> Result<AdminStats, AnalyticsError> {
        self.compute_stats_at(Utc::now())
    }

    /// Snapshot as of `now`; activity windows are the trailing 7 and 30 days.
    pub fn compute_stats_at(&self, now: DateTime<Utc>) -> Result<AdminStats, AnalyticsError> {
        let since_7d = (now - Duration::days(7)).timestamp();
        let since_30d = (now - Duration::days(30)).timestamp();
        let inputs = self.store.load_stats_inputs(since_7d, since_30d)?;
        Ok(aggregate(&inputs))
    }
}
