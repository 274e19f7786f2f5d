//! Clock - nguồn thời gian được inject
//!
//! Decision logic never calls `now()` itself; the session reads the clock
//! once per request and passes hour and timestamp down.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SubsecRound, TimeZone, Timelike, Utc};

/// Source of "now" for the session controller and exporter.
pub trait Clock {
    /// Current instant in UTC, whole seconds
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current local wall-clock time (no timezone configuration)
    fn local_now(&self) -> NaiveDateTime;

    /// Current local hour, 0-23
    fn local_hour(&self) -> u32 {
        self.local_now().hour()
    }
}

/// Đồng hồ hệ thống
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(0)
    }

    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local().trunc_subsecs(0)
    }
}

/// Đồng hồ cố định cho tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    utc: DateTime<Utc>,
    local: NaiveDateTime,
}

impl FixedClock {
    pub fn new(utc: DateTime<Utc>, local: NaiveDateTime) -> Self {
        Self { utc, local }
    }

    /// 2026-01-25 at `hour`:00:00, with local time equal to UTC.
    ///
    /// Hours above 23 are clamped.
    pub fn at_hour(hour: u32) -> Self {
        let local = NaiveDate::from_ymd_opt(2026, 1, 25)
            .and_then(|d| d.and_hms_opt(hour.min(23), 0, 0))
            .unwrap_or_default();
        Self {
            utc: Utc.from_utc_datetime(&local),
            local,
        }
    }

    /// Move both instants forward by `seconds`
    pub fn advance(&mut self, seconds: i64) {
        let delta = chrono::Duration::seconds(seconds);
        self.utc += delta;
        self.local += delta;
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.utc
    }

    fn local_now(&self) -> NaiveDateTime {
        self.local
    }
}
