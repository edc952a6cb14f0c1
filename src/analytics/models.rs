use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// =============================================================================
// Modes
// =============================================================================

/// Operating mode reported by a client install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Demo,
    Local,
    Admin,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Demo, Mode::Local, Mode::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Demo => "demo",
            Mode::Local => "local",
            Mode::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "demo" => Some(Mode::Demo),
            "local" => Some(Mode::Local),
            "admin" => Some(Mode::Admin),
            _ => None,
        }
    }
}

// =============================================================================
// Ingestion payloads
// =============================================================================

/// Periodic "I'm alive" report from a client install.
#[derive(Debug, Clone, Deserialize)]
pub struct Heartbeat {
    pub id: Uuid,
    pub mode: Mode,
    pub version: String,
    /// Epoch seconds or milliseconds
    pub ts: i64,
}

/// A named usage event from a client install.
#[derive(Debug, Clone, Deserialize)]
pub struct EventReport {
    pub id: Uuid,
    pub event: String,
    /// Epoch seconds or milliseconds
    pub ts: i64,
}

// =============================================================================
// Stored records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRecord {
    pub id: String,
    /// Unix seconds
    pub first_seen: i64,
    /// Unix seconds
    pub last_seen: i64,
    pub launch_count: i64,
    pub mode: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub id: i64,
    pub install_id: String,
    pub event: String,
    /// Unix seconds
    pub ts: i64,
}

// =============================================================================
// Stats
// =============================================================================

/// Usage numbers for a single mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeStats {
    pub launches: u64,
    /// Distinct installs that ever launched in this mode
    pub installs: u64,
    pub active_7d: u64,
    pub active_30d: u64,
    pub events_total: u64,
    pub jobs_created: u64,
    pub users_exported: u64,
}

/// Snapshot served by the admin stats endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub unique_installs: u64,
    pub active_7d: u64,
    pub active_30d: u64,
    pub total_launches: u64,
    pub total_events: u64,
    pub jobs_created: u64,
    pub users_exported: u64,
    /// Keyed by mode name, always containing every mode
    pub by_mode: BTreeMap<String, ModeStats>,
}
