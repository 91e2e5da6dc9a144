//! Source of "today" for expiry computations.

use chrono::{Local, NaiveDate};

/// Supplies the current calendar date.
///
/// Expiry math is pure over dates; the clock is the only place the wall clock
/// leaks in, so tests can pin it.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local-time calendar date of the host.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen on one date.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
