use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};
use anyhow::Result;
use rusqlite::Connection;

const JOBS_TABLE_V1: Table = Table {
    name: "jobs",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("company", &SqlType::Text, non_null = true),
        sqlite_column!("link", &SqlType::Text),
        sqlite_column!("status", &SqlType::Text),
        sqlite_column!("date_applied", &SqlType::Text),
        sqlite_column!("notes", &SqlType::Text),
    ],
    indices: &[],
};

/// V2 adds tags (comma-separated) and the JSON-encoded status history.
const JOBS_TABLE_V2: Table = Table {
    name: "jobs",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("company", &SqlType::Text, non_null = true),
        sqlite_column!("link", &SqlType::Text),
        sqlite_column!("status", &SqlType::Text),
        sqlite_column!("date_applied", &SqlType::Text),
        sqlite_column!("notes", &SqlType::Text),
        sqlite_column!(
            "tags",
            &SqlType::Text,
            non_null = true,
            default_value = Some("''")
        ),
        sqlite_column!(
            "status_history",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'[]'")
        ),
    ],
    indices: &[],
};

fn migrate_v1_to_v2(conn: &Connection) -> Result<()> {
    conn.execute(
        "ALTER TABLE jobs ADD COLUMN tags TEXT NOT NULL DEFAULT ''",
        [],
    )?;
    conn.execute(
        "ALTER TABLE jobs ADD COLUMN status_history TEXT NOT NULL DEFAULT '[]'",
        [],
    )?;
    Ok(())
}

pub static JOBS_VERSIONED_SCHEMAS: &[VersionedSchema] = &[
    VersionedSchema {
        version: 1,
        tables: &[JOBS_TABLE_V1],
        migration: None,
    },
    VersionedSchema {
        version: 2,
        tables: &[JOBS_TABLE_V2],
        migration: Some(migrate_v1_to_v2),
    },
];
