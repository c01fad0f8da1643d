//! Chart-ready groupings of dashboard entries.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{add_amounts, Category, Entry, EntryKind};
use crate::errors::Result;

/// Total for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatePoint {
    pub date: NaiveDate,
    pub total_amount: Decimal,
}

/// Total for one category, carrying the colour used to draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySlice {
    pub category_id: Uuid,
    pub category_name: String,
    pub total_amount: Decimal,
    pub color: String,
}

/// Rounds to cents, halves away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Sums amounts per distinct date, ascending by date.
///
/// Any unparseable amount rejects the whole batch.
pub fn aggregate_by_date<E: Entry>(entries: &[E]) -> Result<Vec<DatePoint>> {
    let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for entry in entries {
        let amount = entry.amount()?;
        let total = totals.entry(entry.date()).or_default();
        *total = add_amounts(*total, amount)?;
    }
    Ok(totals
        .into_iter()
        .map(|(date, total)| DatePoint {
            date,
            total_amount: round_cents(total),
        })
        .collect())
}

/// Sums amounts per category, largest first. Categories without a positive
/// total are omitted; ties keep the order of `categories`.
pub fn aggregate_by_category<E: Entry>(
    entries: &[E],
    categories: &[Category],
) -> Result<Vec<CategorySlice>> {
    let mut totals: HashMap<Uuid, Decimal> = HashMap::new();
    for entry in entries {
        let amount = entry.amount()?;
        let total = totals.entry(entry.category_id()).or_default();
        *total = add_amounts(*total, amount)?;
    }

    let mut slices: Vec<CategorySlice> = categories
        .iter()
        .filter_map(|category| {
            let total = round_cents(totals.get(&category.id).copied().unwrap_or_default());
            (total > Decimal::ZERO).then(|| CategorySlice {
                category_id: category.id,
                category_name: category.name.clone(),
                total_amount: total,
                color: category.color.clone(),
            })
        })
        .collect();
    slices.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
    Ok(slices)
}

/// Keeps only entries of the given kind.
pub fn of_kind<E: Entry + Clone>(entries: &[E], kind: EntryKind) -> Vec<E> {
    entries
        .iter()
        .filter(|entry| entry.kind() == kind)
        .cloned()
        .collect()
}
