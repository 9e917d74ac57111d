// src/core/clock.rs
//! Time source and day arithmetic for the queue.
//!
//! Due dates carry no time of day. A due date becomes an instant at midnight
//! under the clock's fixed UTC offset, so day boundaries never depend on the
//! platform's local time zone.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};

/// Milliseconds in a day.
pub const TICKS_PER_DAY: i64 = 24 * 3600 * 1000;

pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock viewed at a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    #[must_use]
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// A clock that always reads the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    /// Midnight of `date` at `offset`, or `None` when that instant is out of
    /// range.
    #[must_use]
    pub fn at_midnight(date: NaiveDate, offset: FixedOffset) -> Option<Self> {
        let utc = DateTime::from_timestamp_millis(due_instant_millis(date, offset))?;
        Some(Self(utc.with_timezone(&offset)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Builds an offset from minutes east of UTC.
#[must_use]
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}

/// Milliseconds since the Unix epoch of midnight on `due` at `offset`.
#[must_use]
pub fn due_instant_millis(due: NaiveDate, offset: FixedOffset) -> i64 {
    let local_midnight = due.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
    local_midnight - i64::from(offset.local_minus_utc()) * 1000
}

/// Whole days from `now` until `due`, rounded up.
///
/// Anything due earlier today is `0`, yesterday is `-1`, tomorrow is `1`.
#[must_use]
pub fn days_until_due(due: NaiveDate, now: &DateTime<FixedOffset>) -> i64 {
    let delta = due_instant_millis(due, *now.offset()) - now.timestamp_millis();
    (delta + TICKS_PER_DAY - 1).div_euclid(TICKS_PER_DAY)
}
