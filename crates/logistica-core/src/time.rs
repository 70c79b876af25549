//! Simulation calendar.
//!
//! Twelve months of thirty days, no leap years. A timestamp is the number of
//! whole minutes since the epoch, Year 1 Month 1 Day 1 00:00.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

const MINUTES_PER_HOUR: i64 = 60;
const HOURS_PER_DAY: i64 = 24;
const DAYS_PER_MONTH: i64 = 30;
const MONTHS_PER_YEAR: i64 = 12;

const MINUTES_PER_DAY: i64 = HOURS_PER_DAY * MINUTES_PER_HOUR;
const MINUTES_PER_MONTH: i64 = DAYS_PER_MONTH * MINUTES_PER_DAY;
const MINUTES_PER_YEAR: i64 = MONTHS_PER_YEAR * MINUTES_PER_MONTH;

/// A point in simulation time, minute resolution.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GalacticDateTime {
    total_minutes: i64,
}

impl GalacticDateTime {
    /// The epoch: Year 1, Month 1, Day 1, 00:00.
    pub const EPOCH: GalacticDateTime = GalacticDateTime { total_minutes: 0 };

    pub fn from_total_minutes(total_minutes: i64) -> Self {
        Self { total_minutes }
    }

    /// Build a timestamp from calendar parts. Year, month and day are
    /// 1-based; hour and minute are 0-based. Out-of-range parts carry over.
    pub fn from_parts(year: i64, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        let total_days = (year - 1) * MONTHS_PER_YEAR * DAYS_PER_MONTH
            + (i64::from(month) - 1) * DAYS_PER_MONTH
            + (i64::from(day) - 1);
        Self {
            total_minutes: total_days * MINUTES_PER_DAY
                + i64::from(hour) * MINUTES_PER_HOUR
                + i64::from(minute),
        }
    }

    pub fn total_minutes(&self) -> i64 {
        self.total_minutes
    }

    pub fn year(&self) -> i64 {
        self.total_minutes.div_euclid(MINUTES_PER_YEAR) + 1
    }

    pub fn month(&self) -> u32 {
        (self.total_minutes.rem_euclid(MINUTES_PER_YEAR) / MINUTES_PER_MONTH) as u32 + 1
    }

    pub fn day(&self) -> u32 {
        (self.total_minutes.rem_euclid(MINUTES_PER_MONTH) / MINUTES_PER_DAY) as u32 + 1
    }

    pub fn hour(&self) -> u32 {
        (self.total_minutes.rem_euclid(MINUTES_PER_DAY) / MINUTES_PER_HOUR) as u32
    }

    pub fn minute(&self) -> u32 {
        self.total_minutes.rem_euclid(MINUTES_PER_HOUR) as u32
    }

    pub fn add_minutes(self, minutes: i64) -> Self {
        Self::from_total_minutes(self.total_minutes + minutes)
    }

    pub fn add_hours(self, hours: i64) -> Self {
        self.add_minutes(hours * MINUTES_PER_HOUR)
    }

    pub fn add_days(self, days: i64) -> Self {
        self.add_minutes(days * MINUTES_PER_DAY)
    }

    pub fn add_months(self, months: i64) -> Self {
        self.add_minutes(months * MINUTES_PER_MONTH)
    }

    pub fn add_years(self, years: i64) -> Self {
        self.add_minutes(years * MINUTES_PER_YEAR)
    }
}

/// Difference in minutes.
impl Sub for GalacticDateTime {
    type Output = i64;

    fn sub(self, rhs: Self) -> i64 {
        self.total_minutes - rhs.total_minutes
    }
}

impl fmt::Display for GalacticDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.year(),
            self.month(),
            self.day(),
            self.hour(),
            self.minute()
        )
    }
}
