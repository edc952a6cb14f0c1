//! Job applications: normalization of submitted fields, status-history
//! reconciliation and the SQLite-backed store.

mod manager;
mod models;
pub mod normalize;
mod reconcile;
mod schema;
mod sqlite_job_store;
mod store;

pub use manager::{JobError, JobManager};
pub use models::{JobDraft, JobPayload, JobRecord, StatusEntry, SubmittedStatusEntry, DEFAULT_STATUS};
pub use normalize::{normalize_date, normalize_history, normalize_tags};
pub use reconcile::{apply_update, prepare_new_job, validate_payload};
pub use schema::JOBS_VERSIONED_SCHEMAS;
pub use sqlite_job_store::SqliteJobStore;
pub use store::JobStore;
