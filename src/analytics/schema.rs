use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

const INSTALLS_TABLE_V1: Table = Table {
    name: "analytics_installs",
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("first_seen", &SqlType::Integer, non_null = true),
        sqlite_column!("last_seen", &SqlType::Integer, non_null = true),
        sqlite_column!(
            "launch_count",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!("mode", &SqlType::Text, non_null = true),
        sqlite_column!("version", &SqlType::Text, non_null = true),
    ],
    indices: &[("idx_analytics_installs_last_seen", "last_seen")],
};

/// `install_id` is not a foreign key, events may precede the first heartbeat.
const EVENTS_TABLE_V1: Table = Table {
    name: "analytics_events",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("install_id", &SqlType::Text, non_null = true),
        sqlite_column!("event", &SqlType::Text, non_null = true),
        sqlite_column!("ts", &SqlType::Integer, non_null = true),
    ],
    indices: &[
        ("idx_analytics_events_install_id", "install_id"),
        ("idx_analytics_events_event", "event"),
    ],
};

pub static ANALYTICS_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 1,
    tables: &[INSTALLS_TABLE_V1, EVENTS_TABLE_V1],
    migration: None,
}];
