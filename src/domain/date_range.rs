//! Calendar windows used to filter and compare dashboard data.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::common::serde_day;
use crate::domain::recurring::days_in_month;
use crate::errors::{FinanceError, Result};

/// Returns the first day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Returns the last day of the month containing `date`.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    days_in_month(date.year(), date.month())
        .and_then(|day| date.with_day(day))
        .unwrap_or(date)
}

fn next_month(date: NaiveDate) -> Option<NaiveDate> {
    let first = first_of_month(date);
    if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year().checked_add(1)?, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
}

/// Inclusive calendar range `[start, end]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DateRange {
    #[serde(with = "serde_day")]
    pub start: NaiveDate,
    #[serde(with = "serde_day")]
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(FinanceError::InvalidInput(format!(
                "range end {end} is before start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The whole calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        Self {
            start: first_of_month(date),
            end: last_of_month(date),
        }
    }

    /// Default dashboard filter: the month containing `today`.
    pub fn current_month(today: NaiveDate) -> Self {
        Self::month_of(today)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Intersection of two ranges, or `None` when they do not overlap.
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(DateRange { start, end })
    }

    /// First day of every calendar month the range touches, ascending.
    pub fn months(&self) -> Vec<NaiveDate> {
        let last = first_of_month(self.end);
        let mut cursor = Some(first_of_month(self.start));
        let mut months = Vec::new();
        while let Some(month) = cursor {
            if month > last {
                break;
            }
            months.push(month);
            cursor = next_month(month);
        }
        months
    }
}

/// Optional bounds selected by the user. Either side may be open.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateFilter {
    #[serde(with = "serde_day::option", default)]
    pub from: Option<NaiveDate>,
    #[serde(with = "serde_day::option", default)]
    pub to: Option<NaiveDate>,
}

impl DateFilter {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

impl From<DateRange> for DateFilter {
    fn from(range: DateRange) -> Self {
        Self {
            from: Some(range.start),
            to: Some(range.end),
        }
    }
}

/// Period a budget comparison covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// The calendar month containing the date.
    Month(NaiveDate),
    /// An arbitrary inclusive range, possibly spanning several months.
    Range(DateRange),
}

impl Period {
    pub fn range(&self) -> DateRange {
        match self {
            Period::Month(date) => DateRange::month_of(*date),
            Period::Range(range) => *range,
        }
    }

    pub fn months(&self) -> Vec<NaiveDate> {
        self.range().months()
    }
}
