//! Turns submitted payloads into stored job state.
//!
//! History rules: on create, an empty history is seeded with the initial
//! status. On update, a submitted history replaces the stored one, and a
//! status change appends exactly one entry on top of that. An unchanged
//! status never appends, so re-sending a previous response is harmless.

use chrono::NaiveDate;

use super::manager::JobError;
use super::models::{JobDraft, JobPayload, JobRecord, StatusEntry, DEFAULT_STATUS};
use super::normalize::{normalize_date, normalize_history, normalize_tags, DATE_FORMAT};

pub fn validate_payload(payload: &JobPayload) -> Result<(), JobError> {
    if payload.title.trim().is_empty() {
        return Err(JobError::Validation("title is required".to_string()));
    }
    if payload.company.trim().is_empty() {
        return Err(JobError::Validation("company is required".to_string()));
    }
    Ok(())
}

fn format_day(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

/// A submitted status counts only when it is not blank.
fn submitted_status(payload: &JobPayload) -> Option<&str> {
    payload
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub fn prepare_new_job(payload: &JobPayload, today: NaiveDate) -> Result<JobDraft, JobError> {
    validate_payload(payload)?;

    let date_applied =
        normalize_date(payload.date_applied.as_deref()).unwrap_or_else(|| format_day(today));
    let status = submitted_status(payload)
        .unwrap_or(DEFAULT_STATUS)
        .to_string();

    let mut status_history = normalize_history(
        payload.status_history.as_deref().unwrap_or_default(),
        &date_applied,
    );
    if status_history.is_empty() {
        status_history.push(StatusEntry {
            status: status.clone(),
            date: date_applied.clone(),
        });
    }

    Ok(JobDraft {
        title: payload.title.clone(),
        company: payload.company.clone(),
        link: payload.link.clone(),
        status,
        date_applied,
        notes: payload.notes.clone(),
        tags: normalize_tags(payload.tags.as_deref()),
        status_history,
    })
}

/// Computes the record that results from applying `payload` over `existing`.
/// The payload is expected to have passed [`validate_payload`].
pub fn apply_update(existing: &JobRecord, payload: &JobPayload, today: NaiveDate) -> JobRecord {
    let date_applied = match payload.date_applied.as_deref() {
        Some(submitted) => normalize_date(Some(submitted))
            .or_else(|| normalize_date(Some(&existing.date_applied)))
            .unwrap_or_else(|| format_day(today)),
        None => normalize_date(Some(&existing.date_applied)).unwrap_or_else(|| format_day(today)),
    };

    // The submitted history replaces the stored one, an omitted one counts as empty
    let mut status_history = normalize_history(
        payload.status_history.as_deref().unwrap_or_default(),
        &date_applied,
    );

    let status = match submitted_status(payload) {
        Some(status) if status != existing.status => {
            status_history.push(StatusEntry {
                status: status.to_string(),
                date: date_applied.clone(),
            });
            status.to_string()
        }
        _ => existing.status.clone(),
    };

    JobRecord {
        id: existing.id,
        title: payload.title.clone(),
        company: payload.company.clone(),
        link: payload.link.clone().or_else(|| existing.link.clone()),
        status,
        date_applied,
        notes: payload.notes.clone().or_else(|| existing.notes.clone()),
        tags: normalize_tags(payload.tags.as_deref()),
        status_history,
    }
}
