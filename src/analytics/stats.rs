use super::event_name::{classify_event, EventName};
use super::models::{AdminStats, Mode, ModeStats};
use super::store::StatsInputs;

/// Folds raw store aggregates into the admin snapshot.
///
/// Per-mode launch numbers come from `launch_<mode>` events only. Other
/// events are attributed to the mode in their name suffix, or else to the
/// mode currently stored for the reporting install. An install that changed
/// mode is counted in every mode it launched in.
pub fn aggregate(inputs: &StatsInputs) -> AdminStats {
    let mut stats = AdminStats {
        unique_installs: inputs.unique_installs,
        active_7d: inputs.active_7d,
        active_30d: inputs.active_30d,
        total_launches: inputs.total_launches,
        by_mode: Mode::ALL
            .iter()
            .map(|mode| (mode.as_str().to_string(), ModeStats::default()))
            .collect(),
        ..Default::default()
    };

    for launch in &inputs.launches {
        let bucket = bucket_mut(&mut stats, launch.mode);
        bucket.launches += launch.launches;
        bucket.installs += launch.installs;
        bucket.active_7d += launch.active_7d;
        bucket.active_30d += launch.active_30d;
    }

    for row in &inputs.events {
        let class = classify_event(&row.event);
        let base = EventName::parse(class.base);
        let created = if base == Some(EventName::JobCreate) {
            row.count
        } else {
            0
        };
        let exported = if base == Some(EventName::ExportJson) {
            row.count
        } else {
            0
        };

        stats.total_events += row.count;
        stats.jobs_created += created;
        stats.users_exported += exported;

        let mode = class
            .mode
            .or_else(|| row.install_mode.as_deref().and_then(Mode::parse));
        if let Some(mode) = mode {
            let bucket = bucket_mut(&mut stats, mode);
            bucket.events_total += row.count;
            bucket.jobs_created += created;
            bucket.users_exported += exported;
        }
    }

    stats
}

fn bucket_mut(stats: &mut AdminStats, mode: Mode) -> &mut ModeStats {
    stats.by_mode.entry(mode.as_str().to_string()).or_default()
}
