//! Merged, filtered listing of persisted and recurring entries.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::core::occurrences::expand_rules;
use crate::domain::{
    category::{find_category, UNKNOWN_CATEGORY_COLOR, UNKNOWN_CATEGORY_NAME},
    Category, DateFilter, EntryKind, RecurringTransaction, Transaction,
};

const INVESTMENT_KEYWORDS: [&str; 6] = ["investment", "invest", "stock", "bond", "portfolio", "asset"];

/// Which entry types a history listing shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl KindFilter {
    pub fn matches(self, kind: EntryKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Income => kind == EntryKind::Income,
            KindFilter::Expense => kind == EntryKind::Expense,
        }
    }
}

/// Where a history row came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum EntrySource {
    Persisted { id: Uuid },
    Recurring { rule_id: Uuid, synthetic_id: String },
}

impl EntrySource {
    pub fn key(&self) -> String {
        match self {
            EntrySource::Persisted { id } => id.to_string(),
            EntrySource::Recurring { synthetic_id, .. } => synthetic_id.clone(),
        }
    }

    pub fn is_recurring(&self) -> bool {
        matches!(self, EntrySource::Recurring { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub source: EntrySource,
    pub date: NaiveDate,
    pub amount: String,
    pub kind: EntryKind,
    pub category_id: Uuid,
    pub category_name: String,
    pub category_color: String,
    pub description: Option<String>,
    pub is_investment: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    pub entries: Vec<HistoryEntry>,
    pub truncated: bool,
}

/// True when a category name looks like an investment bucket.
pub fn is_investment(category_name: &str) -> bool {
    let lowered = category_name.to_lowercase();
    INVESTMENT_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// Builds the history listing: persisted transactions inside `filter`, plus
/// every recurring rule expanded over the same bounds, newest first.
pub fn build_history(
    transactions: &[Transaction],
    rules: &[RecurringTransaction],
    categories: &[Category],
    filter: DateFilter,
    kinds: KindFilter,
    today: NaiveDate,
) -> History {
    let describe = |category_id: Uuid| match find_category(categories, category_id) {
        Some(category) => (category.name.clone(), category.color.clone()),
        None => (
            UNKNOWN_CATEGORY_NAME.to_string(),
            UNKNOWN_CATEGORY_COLOR.to_string(),
        ),
    };

    let mut entries: Vec<HistoryEntry> = transactions
        .iter()
        .filter(|txn| filter.contains(txn.date))
        .map(|txn| {
            let (category_name, category_color) = describe(txn.category_id);
            HistoryEntry {
                source: EntrySource::Persisted { id: txn.id },
                date: txn.date,
                amount: txn.amount.clone(),
                kind: txn.kind,
                category_id: txn.category_id,
                is_investment: is_investment(&category_name),
                category_name,
                category_color,
                description: txn.description.clone(),
            }
        })
        .collect();

    let batch = expand_rules(rules, filter.from, filter.to, today);
    entries.extend(batch.occurrences.into_iter().map(|occ| {
        let (category_name, category_color) = describe(occ.category_id);
        HistoryEntry {
            source: EntrySource::Recurring {
                rule_id: occ.rule_id,
                synthetic_id: occ.synthetic_id(),
            },
            date: occ.date,
            amount: occ.amount,
            kind: occ.kind,
            category_id: occ.category_id,
            is_investment: is_investment(&category_name),
            category_name,
            category_color,
            description: occ.description,
        }
    }));

    entries.retain(|entry| kinds.matches(entry.kind));
    entries.sort_by(|a, b| b.date.cmp(&a.date));

    History {
        entries,
        truncated: batch.truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Frequency;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn merges_filters_and_sorts_newest_first() {
        let user = Uuid::new_v4();
        let stocks = Category::new(user, "Stock Portfolio", EntryKind::Expense, "#6366f1");
        let salary = Category::new(user, "Salary", EntryKind::Income, "#10b981");
        let transactions = vec![
            Transaction::new(user, stocks.id, "300", EntryKind::Expense, date(2024, 1, 10)),
            Transaction::new(user, salary.id, "2000", EntryKind::Income, date(2023, 12, 28)),
        ];
        let rules = vec![RecurringTransaction::new(
            user,
            salary.id,
            "2000",
            EntryKind::Income,
            Frequency::Monthly,
            date(2023, 10, 25),
        )];
        let filter = DateFilter::new(Some(date(2024, 1, 1)), Some(date(2024, 2, 29)));

        let history = build_history(
            &transactions,
            &rules,
            &[stocks, salary],
            filter,
            KindFilter::All,
            date(2024, 3, 1),
        );

        let dates: Vec<_> = history.entries.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date(2024, 2, 1), date(2024, 1, 10), date(2024, 1, 1)]);
        assert!(history.entries[0].source.is_recurring());
        assert!(history.entries[1].is_investment);
        assert!(!history.truncated);
    }

    #[test]
    fn kind_filter_and_unknown_categories() {
        let user = Uuid::new_v4();
        let transactions = vec![
            Transaction::new(user, Uuid::new_v4(), "12", EntryKind::Expense, date(2024, 1, 2)),
            Transaction::new(user, Uuid::new_v4(), "99", EntryKind::Income, date(2024, 1, 3)),
        ];
        let history = build_history(
            &transactions,
            &[],
            &[],
            DateFilter::unbounded(),
            KindFilter::Expense,
            date(2024, 1, 31),
        );
        assert_eq!(history.entries.len(), 1);
        assert_eq!(history.entries[0].category_name, UNKNOWN_CATEGORY_NAME);
        assert_eq!(history.entries[0].category_color, UNKNOWN_CATEGORY_COLOR);
    }

    #[test]
    fn investment_keywords_are_case_insensitive() {
        assert!(is_investment("Bonds"));
        assert!(is_investment("Real ASSETS"));
        assert!(!is_investment("Groceries"));
    }
}
