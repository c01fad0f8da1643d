//! Recurring transaction rules and the calendar stepping they rely on.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{parse_amount, serde_day, Entry, EntryKind, Identifiable};
use crate::errors::{FinanceError, Result};

/// Repetition cadence of a recurring rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Returns `anchor` moved forward by `steps` periods.
    ///
    /// Month and year steps are computed from the anchor rather than chained,
    /// and clamp the day to the last day of the target month: a Jan 31 anchor
    /// gives Feb 29 (leap year), Mar 31, Apr 30. Returns `None` past chrono's
    /// representable range.
    pub fn advance(self, anchor: NaiveDate, steps: u32) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => anchor.checked_add_signed(Duration::days(steps as i64)),
            Frequency::Weekly => anchor.checked_add_signed(Duration::weeks(steps as i64)),
            Frequency::Monthly => shift_month(anchor, steps as i64),
            Frequency::Yearly => shift_month(anchor, steps as i64 * 12),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        }
    }

    /// Scales a per-occurrence amount to an approximate monthly figure:
    /// 30 days or 4 weeks per month, a twelfth of a yearly amount.
    pub fn monthly_amount(self, amount: Decimal) -> Option<Decimal> {
        match self {
            Frequency::Daily => amount.checked_mul(Decimal::from(30)),
            Frequency::Weekly => amount.checked_mul(Decimal::from(4)),
            Frequency::Monthly => Some(amount),
            Frequency::Yearly => amount.checked_div(Decimal::from(12)),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn shift_month(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let index = date.year() as i64 * 12 + date.month0() as i64 + months;
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day)
}

pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    first_next.pred_opt().map(|last| last.day())
}

/// A template describing a repeating transaction. Never a materialised list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTransaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub amount: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub description: Option<String>,
    pub frequency: Frequency,
    #[serde(with = "serde_day")]
    pub start_date: NaiveDate,
    #[serde(with = "serde_day::option", default)]
    pub end_date: Option<NaiveDate>,
    #[serde(with = "serde_day::option", default)]
    pub next_occurrence: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl RecurringTransaction {
    pub fn new(
        user_id: Uuid,
        category_id: Uuid,
        amount: impl Into<String>,
        kind: EntryKind,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            category_id,
            amount: amount.into(),
            kind,
            description: None,
            frequency,
            start_date,
            end_date: None,
            next_occurrence: Some(start_date),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn ending(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn paused(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Amount this rule contributes to an average month.
    pub fn monthly_equivalent(&self) -> Result<Decimal> {
        let amount = parse_amount(&self.amount)?;
        self.frequency
            .monthly_amount(amount)
            .ok_or(FinanceError::AmountOverflow)
    }
}

impl Identifiable for RecurringTransaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// One concrete dated instance implied by a recurring rule.
///
/// Occurrences have no stored identity; [`Occurrence::synthetic_id`] is stable
/// for a given rule and query window so views can key on it across refreshes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub rule_id: Uuid,
    pub index: usize,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub amount: String,
    pub kind: EntryKind,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl Occurrence {
    pub fn synthetic_id(&self) -> String {
        format!("recurring-{}-{}", self.rule_id, self.index)
    }
}

impl Entry for Occurrence {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn kind(&self) -> EntryKind {
        self.kind
    }

    fn category_id(&self) -> Uuid {
        self.category_id
    }

    fn raw_amount(&self) -> &str {
        &self.amount
    }
}

/// Payload for `POST /api/recurring-transactions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewRecurringTransaction {
    pub category_id: Uuid,
    pub amount: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub frequency: Frequency,
    #[serde(with = "serde_day")]
    pub start_date: NaiveDate,
    #[serde(with = "serde_day::option", default)]
    pub end_date: Option<NaiveDate>,
}

/// Partial update for a recurring rule; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTransactionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(
        with = "serde_day::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(
        with = "serde_day::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
