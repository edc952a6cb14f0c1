use super::models::{EventRecord, InstallRecord, Mode};
use anyhow::Result;

/// Launch-event counts for one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCounts {
    pub mode: Mode,
    pub launches: u64,
    pub installs: u64,
    pub active_7d: u64,
    pub active_30d: u64,
}

/// Number of stored rows for one non-launch event name, grouped by the
/// current mode of the reporting install (`None` when the install is unknown).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCount {
    pub event: String,
    pub install_mode: Option<String>,
    pub count: u64,
}

/// Raw aggregates read from the store in one consistent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsInputs {
    pub unique_installs: u64,
    pub active_7d: u64,
    pub active_30d: u64,
    pub total_launches: u64,
    pub launches: Vec<LaunchCounts>,
    pub events: Vec<EventCount>,
}

pub trait AnalyticsStore: Send + Sync {
    /// Upserts the install and appends its `launch_<mode>` event.
    /// `ts` is in unix seconds.
    fn record_heartbeat(&self, install_id: &str, mode: Mode, version: &str, ts: i64)
        -> Result<()>;

    /// Appends an event row. `ts` is in unix seconds.
    fn insert_event(&self, install_id: &str, event: &str, ts: i64) -> Result<()>;

    fn get_install(&self, install_id: &str) -> Result<Option<InstallRecord>>;

    /// Events of an install in insertion order.
    fn list_events(&self, install_id: &str) -> Result<Vec<EventRecord>>;

    /// Reads everything needed for the admin stats. Windows are inclusive
    /// lower bounds in unix seconds.
    fn load_stats_inputs(&self, since_7d: i64, since_30d: i64) -> Result<StatsInputs>;
}
