//! Date source for streaks and "today" filtering.

use chrono::{DateTime, Local, NaiveDate, Utc};

pub trait Clock: Send + Sync {
    /// Current calendar day in the household's local time
    fn today(&self) -> NaiveDate;

    /// Current instant, used for `created_at` stamps
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the machine's local time
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub use fixed::FixedClock;
