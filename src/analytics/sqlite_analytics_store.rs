use super::event_name::{launch_event_mode, launch_event_name};
use super::models::{EventRecord, InstallRecord, Mode};
use super::schema::ANALYTICS_VERSIONED_SCHEMAS;
use super::store::{AnalyticsStore, EventCount, LaunchCounts, StatsInputs};
use crate::sqlite_persistence::open_versioned_db;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

pub struct SqliteAnalyticsStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteAnalyticsStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = open_versioned_db(db_path, ANALYTICS_VERSIONED_SCHEMAS, "analytics")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn row_to_install(row: &rusqlite::Row) -> rusqlite::Result<InstallRecord> {
        Ok(InstallRecord {
            id: row.get("id")?,
            first_seen: row.get("first_seen")?,
            last_seen: row.get("last_seen")?,
            launch_count: row.get("launch_count")?,
            mode: row.get("mode")?,
            version: row.get("version")?,
        })
    }

    fn row_to_event(row: &rusqlite::Row) -> rusqlite::Result<EventRecord> {
        Ok(EventRecord {
            id: row.get("id")?,
            install_id: row.get("install_id")?,
            event: row.get("event")?,
            ts: row.get("ts")?,
        })
    }
}

impl AnalyticsStore for SqliteAnalyticsStore {
    fn record_heartbeat(
        &self,
        install_id: &str,
        mode: Mode,
        version: &str,
        ts: i64,
    ) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO analytics_installs (id, first_seen, last_seen, launch_count, mode, version)
             VALUES (?1, ?2, ?2, 1, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                last_seen = excluded.last_seen,
                launch_count = launch_count + 1,
                mode = excluded.mode,
                version = excluded.version",
            params![install_id, ts, mode.as_str(), version],
        )
        .context("Failed to upsert install")?;
        tx.execute(
            "INSERT INTO analytics_events (install_id, event, ts) VALUES (?1, ?2, ?3)",
            params![install_id, launch_event_name(mode), ts],
        )
        .context("Failed to record launch event")?;
        tx.commit()?;
        Ok(())
    }

    fn insert_event(&self, install_id: &str, event: &str, ts: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO analytics_events (install_id, event, ts) VALUES (?1, ?2, ?3)",
            params![install_id, event, ts],
        )
        .context("Failed to insert analytics event")?;
        Ok(())
    }

    fn get_install(&self, install_id: &str) -> Result<Option<InstallRecord>> {
        let conn = self.conn.lock().unwrap();
        let install = conn
            .query_row(
                "SELECT id, first_seen, last_seen, launch_count, mode, version
                 FROM analytics_installs WHERE id = ?1",
                params![install_id],
                Self::row_to_install,
            )
            .optional()?;
        Ok(install)
    }

    fn list_events(&self, install_id: &str) -> Result<Vec<EventRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, install_id, event, ts FROM analytics_events
             WHERE install_id = ?1 ORDER BY id",
        )?;
        let events = stmt
            .query_map(params![install_id], Self::row_to_event)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(events)
    }

    fn load_stats_inputs(&self, since_7d: i64, since_30d: i64) -> Result<StatsInputs> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let (unique_installs, total_launches, active_7d, active_30d) = tx
            .query_row(
                "SELECT COUNT(*),
                        COALESCE(SUM(launch_count), 0),
                        COUNT(CASE WHEN last_seen >= ?1 THEN 1 END),
                        COUNT(CASE WHEN last_seen >= ?2 THEN 1 END)
                 FROM analytics_installs",
                params![since_7d, since_30d],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, i64>(3)?,
                    ))
                },
            )
            .context("Failed to count installs")?;

        let launches = {
            let mut stmt = tx.prepare(
                "SELECT event,
                        COUNT(*),
                        COUNT(DISTINCT install_id),
                        COUNT(DISTINCT CASE WHEN ts >= ?1 THEN install_id END),
                        COUNT(DISTINCT CASE WHEN ts >= ?2 THEN install_id END)
                 FROM analytics_events
                 WHERE substr(event, 1, 7) = 'launch_'
                 GROUP BY event",
            )?;
            let rows = stmt
                .query_map(params![since_7d, since_30d], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, i64>(4)?,
                    ))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()
                .context("Failed to count launch events")?;

            rows.into_iter()
                .filter_map(|(event, launches, installs, active_7d, active_30d)| {
                    let Some(mode) = launch_event_mode(&event) else {
                        debug!("Ignoring launch event with unknown mode: {}", event);
                        return None;
                    };
                    Some(LaunchCounts {
                        mode,
                        launches: launches as u64,
                        installs: installs as u64,
                        active_7d: active_7d as u64,
                        active_30d: active_30d as u64,
                    })
                })
                .collect::<Vec<_>>()
        };

        let events = {
            let mut stmt = tx.prepare(
                "SELECT e.event, i.mode, COUNT(*)
                 FROM analytics_events e
                 LEFT JOIN analytics_installs i ON i.id = e.install_id
                 WHERE substr(e.event, 1, 7) != 'launch_'
                 GROUP BY e.event, i.mode",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(EventCount {
                        event: row.get(0)?,
                        install_mode: row.get(1)?,
                        count: row.get::<_, i64>(2)? as u64,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()
                .context("Failed to count events")?;
            rows
        };

        tx.commit()?;

        Ok(StatsInputs {
            unique_installs: unique_installs as u64,
            active_7d: active_7d as u64,
            active_30d: active_30d as u64,
            total_launches: total_launches as u64,
            launches,
            events,
        })
    }
}
