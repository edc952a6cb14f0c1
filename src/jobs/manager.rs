use super::models::{JobPayload, JobRecord};
use super::reconcile::{apply_update, prepare_new_job, validate_payload};
use super::store::JobStore;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),

    #[error("Invalid job: {0}")]
    Validation(String),

    #[error("Job not found: {0}")]
    NotFound(i64),
}

/// Entry point for job operations. Normalizes input, keeps the status
/// history consistent and delegates persistence to a [`JobStore`].
pub struct JobManager {
    store: Arc<dyn JobStore>,
}

impl JobManager {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    pub fn create_job(&self, payload: &JobPayload) -> Result<JobRecord, JobError> {
        let draft = prepare_new_job(payload, Self::today())?;
        let job = self.store.insert_job(&draft)?;
        info!("Created job {} ({} at {})", job.id, job.title, job.company);
        Ok(job)
    }

    pub fn list_jobs(&self) -> Result<Vec<JobRecord>, JobError> {
        Ok(self.store.list_jobs()?)
    }

    pub fn update_job(&self, id: i64, payload: &JobPayload) -> Result<JobRecord, JobError> {
        validate_payload(payload)?;
        let today = Self::today();
        let updated = self
            .store
            .update_job(id, &|existing| apply_update(existing, payload, today))?
            .ok_or(JobError::NotFound(id))?;
        debug!(
            "Updated job {}: status {}, {} history entries",
            id,
            updated.status,
            updated.status_history.len()
        );
        Ok(updated)
    }

    pub fn delete_job(&self, id: i64) -> Result<(), JobError> {
        if !self.store.delete_job(id)? {
            return Err(JobError::NotFound(id));
        }
        info!("Deleted job {}", id);
        Ok(())
    }
}
