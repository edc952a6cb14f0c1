use serde::{Deserialize, Serialize};

pub const DEFAULT_STATUS: &str = "Applied";

/// One step of a job's status history.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub status: String,
    /// Always `YYYY-MM-DD`
    pub date: String,
}

/// A history entry as sent by a client, before normalization.
/// Either field may be missing or malformed.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SubmittedStatusEntry {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Body of job create and update requests.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct JobPayload {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub date_applied: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Comma-separated tags
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub status_history: Option<Vec<SubmittedStatusEntry>>,
}

/// A normalized job that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub link: Option<String>,
    pub status: String,
    pub date_applied: String,
    pub notes: Option<String>,
    pub tags: String,
    pub status_history: Vec<StatusEntry>,
}

/// A stored job application.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub link: Option<String>,
    pub status: String,
    pub date_applied: String,
    pub notes: Option<String>,
    pub tags: String,
    pub status_history: Vec<StatusEntry>,
}

impl JobDraft {
    pub fn into_record(self, id: i64) -> JobRecord {
        JobRecord {
            id,
            title: self.title,
            company: self.company,
            link: self.link,
            status: self.status,
            date_applied: self.date_applied,
            notes: self.notes,
            tags: self.tags,
            status_history: self.status_history,
        }
    }
}
