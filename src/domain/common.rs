//! Shared traits and enums for dashboard records.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{FinanceError, Result};

/// Exposes a stable identifier for records persisted by the backend.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Finds a record by id in a fetched list.
pub fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

/// Common read contract for anything that behaves like a dated money movement.
///
/// Implemented by persisted [`Transaction`](super::Transaction)s and by the
/// [`Occurrence`](super::Occurrence)s a recurring rule expands into, so the
/// aggregation helpers work over either.
pub trait Entry {
    fn date(&self) -> NaiveDate;
    fn kind(&self) -> EntryKind;
    fn category_id(&self) -> Uuid;
    /// Raw decimal string as delivered by the backend.
    fn raw_amount(&self) -> &str;

    fn amount(&self) -> Result<Decimal> {
        parse_amount(self.raw_amount())
    }
}

/// Direction of a money movement. Categories carry the same classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Sign applied when accumulating a running balance.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            EntryKind::Income => amount,
            EntryKind::Expense => -amount,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

impl FromStr for EntryKind {
    type Err = FinanceError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(EntryKind::Income),
            "expense" => Ok(EntryKind::Expense),
            other => Err(FinanceError::InvalidInput(format!(
                "unknown transaction type `{other}`"
            ))),
        }
    }
}

/// Parses a backend decimal string. Blank or malformed values are rejected.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed).map_err(|_| FinanceError::InvalidAmount {
        value: raw.to_string(),
    })
}

/// Adds two amounts, failing instead of overflowing the decimal range.
///
/// Subtract by passing the negated amount; negation never overflows.
pub fn add_amounts(total: Decimal, amount: Decimal) -> Result<Decimal> {
    total
        .checked_add(amount)
        .ok_or(FinanceError::AmountOverflow)
}

/// Parses a `YYYY-MM-DD` calendar day, also accepting a full ISO timestamp.
pub fn parse_day(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    let day = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|_| FinanceError::InvalidDate(format!("`{raw}` is not a YYYY-MM-DD date")))
}

/// Serde adapter for calendar days that tolerates timestamp-shaped input.
pub mod serde_day {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_day(&raw).map_err(D::Error::custom)
    }

    pub mod option {
        use chrono::NaiveDate;
        use serde::{de::Error, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(value) => super::super::parse_day(value)
                    .map(Some)
                    .map_err(D::Error::custom),
            }
        }
    }
}
