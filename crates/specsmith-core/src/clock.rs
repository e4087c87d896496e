//! Date source for `created`/`updated` stamps

use chrono::{Days, Local, NaiveDate};
use parking_lot::Mutex;
use std::fmt;

/// Date format written into documents
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of today's date
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current local date
    fn today(&self) -> NaiveDate;

    /// Current date as `YYYY-MM-DD`
    fn today_string(&self) -> String {
        format_date(self.today())
    }
}

/// Render a date as `YYYY-MM-DD`
#[inline]
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Settable clock for tests and replays
#[derive(Debug)]
pub struct ManualClock {
    today: Mutex<NaiveDate>,
}

impl ManualClock {
    /// Create a clock fixed at `date`
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            today: Mutex::new(date),
        }
    }

    /// Move the clock to `date`
    pub fn set(&self, date: NaiveDate) {
        *self.today.lock() = date;
    }

    /// Move the clock forward
    pub fn advance_days(&self, days: u64) {
        let mut today = self.today.lock();
        if let Some(next) = today.checked_add_days(Days::new(days)) {
            *today = next;
        }
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.today_string(), "2026-01-31");

        clock.advance_days(1);
        assert_eq!(clock.today_string(), "2026-02-01");

        clock.set(start);
        assert_eq!(clock.today(), start);
    }

    #[test]
    fn system_clock_formats_as_iso_date() {
        let today = SystemClock.today_string();
        assert_eq!(today.len(), 10);
        assert!(NaiveDate::parse_from_str(&today, DATE_FORMAT).is_ok());
    }
}
