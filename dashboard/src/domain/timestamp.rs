//! Timestamp normalisation and calendar-day helpers.
//!
//! Documents carry timestamps in two shapes: a raw epoch-millisecond number
//! written by older clients, and the store-native object exposing `seconds`
//! and `nanoseconds`. Every ordering and date comparison goes through
//! [`normalize_timestamp`] so both shapes compare on the same scale.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Store-native timestamp object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreTimestamp {
    /// Whole seconds since the epoch.
    pub seconds: i64,
    /// Sub-second part; ignored by normalisation.
    #[serde(default)]
    pub nanoseconds: u32,
}

/// A document timestamp in either supported shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Raw epoch milliseconds.
    Millis(i64),
    /// Store-native `{ seconds, nanoseconds }` object.
    Store(StoreTimestamp),
}

impl Timestamp {
    /// Build a store-native timestamp from whole seconds.
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self::Store(StoreTimestamp {
            seconds,
            nanoseconds: 0,
        })
    }

    /// Epoch milliseconds for this timestamp.
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        match self {
            Self::Millis(millis) => *millis,
            Self::Store(store) => store.seconds.saturating_mul(1000),
        }
    }
}

/// Resolve an optional timestamp to epoch milliseconds.
///
/// Missing timestamps resolve to `0` so they sort after every dated record.
///
/// # Examples
/// ```
/// use dashboard::domain::{Timestamp, normalize_timestamp};
///
/// assert_eq!(normalize_timestamp(Some(&Timestamp::from_seconds(10))), 10_000);
/// assert_eq!(normalize_timestamp(Some(&Timestamp::Millis(10_000))), 10_000);
/// assert_eq!(normalize_timestamp(None), 0);
/// ```
#[must_use]
pub fn normalize_timestamp(timestamp: Option<&Timestamp>) -> i64 {
    timestamp.map_or(0, Timestamp::as_millis)
}

/// A calendar day rendered as `YYYY-MM-DD`.
///
/// Delivery dates are stored as plain strings, so comparisons against a
/// [`CalendarDay`] are literal string equality rather than time-aware.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDay(String);

const DAY_FORMAT: &str = "%Y-%m-%d";

impl CalendarDay {
    /// Wrap an arbitrary day string without validation.
    #[must_use]
    pub fn new(day: impl Into<String>) -> Self {
        Self(day.into())
    }

    /// Format a chrono date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(DAY_FORMAT).to_string())
    }

    /// UTC calendar day of a normalised timestamp, if representable.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_millis(millis).map(|at| Self::from_date(at.date_naive()))
    }

    /// The current UTC day according to `clock`.
    #[must_use]
    pub fn today(clock: &dyn Clock) -> Self {
        Self::from_date(clock.utc().date_naive())
    }

    /// Parse the day back into a chrono date, if well formed.
    #[must_use]
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, DAY_FORMAT).ok()
    }

    /// Literal comparison with a stored day string.
    #[must_use]
    pub fn matches(&self, stored: &str) -> bool {
        self.0 == stored
    }

    /// Borrow the day as text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for CalendarDay {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::{Local, TimeZone};
    use rstest::rstest;
    use serde_json::json;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[rstest]
    #[case(Some(Timestamp::from_seconds(10)), 10_000)]
    #[case(Some(Timestamp::Millis(10_000)), 10_000)]
    #[case(None, 0)]
    #[case(Some(Timestamp::Store(StoreTimestamp { seconds: 3, nanoseconds: 999_000_000 })), 3_000)]
    #[case(Some(Timestamp::from_seconds(i64::MAX)), i64::MAX)]
    fn normalisation_follows_shape(#[case] timestamp: Option<Timestamp>, #[case] expected: i64) {
        assert_eq!(normalize_timestamp(timestamp.as_ref()), expected);
    }

    #[rstest]
    fn deserialises_both_shapes() {
        let raw: Timestamp = serde_json::from_value(json!(1_700_000_000_000_i64)).expect("raw");
        let store: Timestamp =
            serde_json::from_value(json!({ "seconds": 1_700_000_000_i64, "nanoseconds": 5 }))
                .expect("store");
        let bare: Timestamp =
            serde_json::from_value(json!({ "seconds": 12 })).expect("store without nanos");

        assert_eq!(raw, Timestamp::Millis(1_700_000_000_000));
        assert_eq!(raw.as_millis(), store.as_millis());
        assert_eq!(bare.as_millis(), 12_000);
    }

    #[rstest]
    fn calendar_day_uses_utc() {
        // 2024-01-01T23:30:00Z
        let day = CalendarDay::from_millis(1_704_151_800_000).expect("in range");
        assert_eq!(day.as_str(), "2024-01-01");
    }

    #[rstest]
    fn today_reads_the_clock() {
        let clock = FixedClock(
            Utc.with_ymd_and_hms(2024, 3, 9, 8, 0, 0)
                .single()
                .expect("valid fixed time"),
        );
        let today = CalendarDay::today(&clock);
        assert!(today.matches("2024-03-09"));
        assert_eq!(
            today.to_date(),
            NaiveDate::from_ymd_opt(2024, 3, 9),
            "round trip through chrono"
        );
    }

    #[rstest]
    fn matching_is_literal() {
        let today = CalendarDay::new("2024-01-01");
        assert!(!today.matches("2024-1-1"));
        assert!(!today.matches("2024-01-01T00:00:00Z"));
    }
}
