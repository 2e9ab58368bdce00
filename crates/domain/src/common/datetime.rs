//! Timestamp conversion for upstream epoch values.

use chrono::{DateTime, Utc};

/// Converts an epoch-milliseconds value into a UTC timestamp.
///
/// Upstream records carry timestamps as JSON numbers, which may arrive as
/// floats. Non-finite, negative or out-of-range values yield `None`.
///
/// # Examples
///
/// ```
/// use sbstats_domain::common::from_epoch_millis;
/// use chrono::Datelike;
///
/// let dt = from_epoch_millis(1_705_314_600_000.0).unwrap();
/// assert_eq!(dt.year(), 2024);
/// assert!(from_epoch_millis(f64::NAN).is_none());
/// ```
pub fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() || millis < 0.0 || millis > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
}
