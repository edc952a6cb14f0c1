use super::models::{JobDraft, JobRecord, StatusEntry, DEFAULT_STATUS};
use super::schema::JOBS_VERSIONED_SCHEMAS;
use super::JobStore;
use crate::sqlite_persistence::open_versioned_db;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::warn;

const SELECT_JOB_COLUMNS: &str =
    "SELECT id, title, company, link, status, date_applied, notes, tags, status_history FROM jobs";

pub struct SqliteJobStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteJobStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = open_versioned_db(db_path, JOBS_VERSIONED_SCHEMAS, "jobs")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn row_to_job(row: &rusqlite::Row) -> rusqlite::Result<JobRecord> {
        let id: i64 = row.get("id")?;
        let history_json: String = row.get("status_history")?;
        let status_history = serde_json::from_str::<Vec<StatusEntry>>(&history_json)
            .unwrap_or_else(|err| {
                warn!("Job {} has an unreadable status history: {}", id, err);
                Vec::new()
            });

        Ok(JobRecord {
            id,
            title: row.get("title")?,
            company: row.get("company")?,
            link: row.get("link")?,
            status: row
                .get::<_, Option<String>>("status")?
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            date_applied: row
                .get::<_, Option<String>>("date_applied")?
                .unwrap_or_default(),
            notes: row.get("notes")?,
            tags: row.get("tags")?,
            status_history,
        })
    }

    fn query_job(conn: &Connection, id: i64) -> Result<Option<JobRecord>> {
        conn.query_row(
            &format!("{} WHERE id = ?1", SELECT_JOB_COLUMNS),
            params![id],
            Self::row_to_job,
        )
        .optional()
        .with_context(|| format!("Failed to load job {}", id))
    }

    fn encode_history(history: &[StatusEntry]) -> Result<String> {
        serde_json::to_string(history).context("Failed to encode status history")
    }
}

impl JobStore for SqliteJobStore {
    fn insert_job(&self, draft: &JobDraft) -> Result<JobRecord> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO jobs (title, company, link, status, date_applied, notes, tags, status_history)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                draft.title,
                draft.company,
                draft.link,
                draft.status,
                draft.date_applied,
                draft.notes,
                draft.tags,
                Self::encode_history(&draft.status_history)?,
            ],
        )
        .context("Failed to insert job")?;
        Ok(draft.clone().into_record(conn.last_insert_rowid()))
    }

    fn list_jobs(&self) -> Result<Vec<JobRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_JOB_COLUMNS))?;
        let jobs = stmt
            .query_map([], Self::row_to_job)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to list jobs")?;
        Ok(jobs)
    }

    fn update_job(
        &self,
        id: i64,
        update: &dyn Fn(&JobRecord) -> JobRecord,
    ) -> Result<Option<JobRecord>> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let Some(existing) = Self::query_job(&tx, id)? else {
            return Ok(None);
        };
        let updated = update(&existing);

        tx.execute(
            "UPDATE jobs SET title = ?1, company = ?2, link = ?3, status = ?4, date_applied = ?5,
             notes = ?6, tags = ?7, status_history = ?8 WHERE id = ?9",
            params![
                updated.title,
                updated.company,
                updated.link,
                updated.status,
                updated.date_applied,
                updated.notes,
                updated.tags,
                Self::encode_history(&updated.status_history)?,
                id,
            ],
        )
        .with_context(|| format!("Failed to update job {}", id))?;
        tx.commit()?;

        Ok(Some(updated))
    }

    fn delete_job(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn
            .execute("DELETE FROM jobs WHERE id = ?1", params![id])
            .with_context(|| format!("Failed to delete job {}", id))?;
        Ok(deleted > 0)
    }
}
