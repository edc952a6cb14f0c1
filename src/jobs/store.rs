use super::models::{JobDraft, JobRecord};
use anyhow::Result;

pub trait JobStore: Send + Sync {
    /// Persists a new job and returns it with its assigned id.
    fn insert_job(&self, draft: &JobDraft) -> Result<JobRecord>;

    /// All jobs in insertion order.
    fn list_jobs(&self) -> Result<Vec<JobRecord>>;

    /// Reads the job, computes its new state with `update` and writes it back
    /// within a single transaction. Returns `None` if the job does not exist.
    fn update_job(
        &self,
        id: i64,
        update: &dyn Fn(&JobRecord) -> JobRecord,
    ) -> Result<Option<JobRecord>>;

    /// Returns false if the job does not exist.
    fn delete_job(&self, id: i64) -> Result<bool>;
}
