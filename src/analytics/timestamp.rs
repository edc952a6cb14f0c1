use super::aggregator::AnalyticsError;
use chrono::{DateTime, Utc};

/// Client timestamps above this are epoch milliseconds.
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Interprets a client timestamp as epoch seconds or epoch milliseconds.
pub fn normalize_timestamp(ts: i64) -> Result<DateTime<Utc>, AnalyticsError> {
    let parsed = if ts > MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    };
    parsed.ok_or(AnalyticsError::InvalidTimestamp(ts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_and_millis_agree() {
        let seconds = normalize_timestamp(1_700_000_000).unwrap();
        let millis = normalize_timestamp(1_700_000_000_000).unwrap();
        assert_eq!(seconds, millis);
        assert_eq!(seconds.timestamp(), 1_700_000_000);
    }

    #[test]
    fn threshold_is_exclusive() {
        // 10^11 seconds is still read as seconds (year 5138)
        let at = normalize_timestamp(MILLIS_THRESHOLD).unwrap();
        assert_eq!(at.timestamp(), MILLIS_THRESHOLD);

        let above = normalize_timestamp(MILLIS_THRESHOLD + 1).unwrap();
        assert_eq!(above.timestamp(), 100_000_000);
    }

    #[test]
    fn millis_are_truncated_to_seconds() {
        let at = normalize_timestamp(1_700_000_000_999).unwrap();
        assert_eq!(at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn rejects_unrepresentable_values() {
        assert!(matches!(
            normalize_timestamp(i64::MIN),
            Err(AnalyticsError::InvalidTimestamp(i64::MIN))
        ));
        assert!(matches!(
            normalize_timestamp(i64::MAX),
            Err(AnalyticsError::InvalidTimestamp(_))
        ));
    }
}
