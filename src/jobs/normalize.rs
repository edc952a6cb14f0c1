//! Lenient normalization of user-entered job fields.
//!
//! None of these functions fail: malformed input maps to `None` or to an
//! empty value and the caller picks the fallback.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use super::models::{StatusEntry, SubmittedStatusEntry};

lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"^(\d{4})[-/](\d{1,2})[-/](\d{1,2})$").unwrap();
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepts `YYYY-MM-DD` and `YYYY/M/D` style dates (one or two digit month
/// and day, `-` or `/` separators) and returns the strict `YYYY-MM-DD` form.
///
/// Returns `None` for empty input, bad syntax and impossible dates.
pub fn normalize_date(input: Option<&str>) -> Option<String> {
    let input = input?.trim();
    if input.is_empty() {
        return None;
    }
    let captures = DATE_RE.captures(input)?;
    let year: i32 = captures[1].parse().ok()?;
    let month: u32 = captures[2].parse().ok()?;
    let day: u32 = captures[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.format(DATE_FORMAT).to_string())
}

/// Trims and de-duplicates a comma-separated tag list, keeping the first
/// occurrence of each tag. Comparison is case-sensitive.
pub fn normalize_tags(csv: Option<&str>) -> String {
    let Some(csv) = csv else {
        return String::new();
    };
    let mut seen: Vec<&str> = Vec::new();
    for tag in csv.split(',').map(str::trim) {
        if !tag.is_empty() && !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen.join(",")
}

/// Drops entries without a status and normalizes each entry date, falling
/// back to `fallback_date` when the submitted one is unusable. Statuses are
/// stored as submitted.
pub fn normalize_history(
    entries: &[SubmittedStatusEntry],
    fallback_date: &str,
) -> Vec<StatusEntry> {
    entries
        .iter()
        .filter_map(|entry| {
            let status = entry.status.as_deref().filter(|s| !s.is_empty())?;
            Some(StatusEntry {
                status: status.to_string(),
                date: normalize_date(entry.date.as_deref())
                    .unwrap_or_else(|| fallback_date.to_string()),
            })
        })
        .collect()
}
