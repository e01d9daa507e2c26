//! Billing periods running from the 26th of one month to the 25th of the next.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use thiserror::Error;

/// Day of the month that opens a billing period.
pub const PERIOD_START_DAY: u32 = 26;
/// Day of the month that closes a billing period.
pub const PERIOD_END_DAY: u32 = 25;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
    #[error("year {0} is out of range")]
    InvalidYear(i32),
}

/// Inclusive date window named after the month it closes in.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct BillingPeriod {
    pub month: u32,
    pub year: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BillingPeriod {
    /// Resolves the period closing on the 25th of `month`/`year`.
    pub fn resolve(month: u32, year: i32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }

        let (start_month, start_year) = if month == 1 {
            (12, year.checked_sub(1).ok_or(PeriodError::InvalidYear(year))?)
        } else {
            (month - 1, year)
        };

        let start = NaiveDate::from_ymd_opt(start_year, start_month, PERIOD_START_DAY)
            .ok_or(PeriodError::InvalidYear(year))?;
        let end = NaiveDate::from_ymd_opt(year, month, PERIOD_END_DAY)
            .ok_or(PeriodError::InvalidYear(year))?;

        Ok(Self {
            month,
            year,
            start,
            end,
        })
    }

    /// Returns the period a given day is billed in.
    ///
    /// Days from the 26th on belong to the period closing next month.
    pub fn containing(date: NaiveDate) -> Self {
        let closing = if date.day() >= PERIOD_START_DAY {
            date.checked_add_months(Months::new(1)).unwrap_or(date)
        } else {
            date
        };

        Self::resolve(closing.month(), closing.year()).unwrap_or(Self {
            month: date.month(),
            year: date.year(),
            start: date,
            end: date,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
