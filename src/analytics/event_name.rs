//! Event naming conventions.
//!
//! Clients have reported events under two conventions over time: bare names
//! (`job_create`) and names carrying the mode as a suffix (`job_create_demo`).
//! Stored rows are never rewritten, so both forms are accepted and understood
//! here, and nowhere else. Heartbeats additionally produce synthetic
//! `launch_<mode>` events.

use super::models::Mode;

const LAUNCH_PREFIX: &str = "launch_";

/// Allow-listed usage events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventName {
    JobCreate,
    JobUpdate,
    JobDelete,
    ExportJson,
    ImportJson,
}

impl EventName {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "job_create" => Some(EventName::JobCreate),
            "job_update" => Some(EventName::JobUpdate),
            "job_delete" => Some(EventName::JobDelete),
            "export_json" => Some(EventName::ExportJson),
            "import_json" => Some(EventName::ImportJson),
            _ => None,
        }
    }
}

/// An event name split into its base name and optional mode suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventClass<'a> {
    pub base: &'a str,
    pub mode: Option<Mode>,
}

/// Splits `name` into base event and mode suffix.
///
/// Historical wart: the suffix is only recognized when the prefix is an
/// allow-listed event and the suffix a known mode. Anything else is
/// returned verbatim with no mode.
pub fn classify_event(name: &str) -> EventClass<'_> {
    if EventName::parse(name).is_some() {
        return EventClass {
            base: name,
            mode: None,
        };
    }
    if let Some((prefix, suffix)) = name.rsplit_once('_') {
        if let (Some(_), Some(mode)) = (EventName::parse(prefix), Mode::parse(suffix)) {
            return EventClass {
                base: prefix,
                mode: Some(mode),
            };
        }
    }
    EventClass {
        base: name,
        mode: None,
    }
}

/// Whether a client-reported event name may be stored.
pub fn is_accepted_event(name: &str) -> bool {
    EventName::parse(classify_event(name).base).is_some()
}

pub fn launch_event_name(mode: Mode) -> String {
    format!("{}{}", LAUNCH_PREFIX, mode.as_str())
}

/// The mode of a synthetic launch event, `None` for any other event.
pub fn launch_event_mode(name: &str) -> Option<Mode> {
    name.strip_prefix(LAUNCH_PREFIX).and_then(Mode::parse)
}
