//! Headline dashboard figures.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{add_amounts, Entry, EntryKind};
use crate::errors::Result;

/// Default number of points shown in the balance sparkline.
pub const DEFAULT_BALANCE_POINTS: usize = 12;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub savings: Decimal,
    pub avg_expense: Decimal,
    pub income_count: usize,
    pub expense_count: usize,
}

pub fn compute_metrics<E: Entry>(entries: &[E]) -> Result<DashboardMetrics> {
    let mut metrics = DashboardMetrics::default();
    for entry in entries {
        let amount = entry.amount()?;
        match entry.kind() {
            EntryKind::Income => {
                metrics.total_income = add_amounts(metrics.total_income, amount)?;
                metrics.income_count += 1;
            }
            EntryKind::Expense => {
                metrics.total_expenses = add_amounts(metrics.total_expenses, amount)?;
                metrics.expense_count += 1;
            }
        }
    }
    metrics.balance = add_amounts(metrics.total_income, -metrics.total_expenses)?;
    metrics.savings = metrics.balance;
    if metrics.expense_count > 0 {
        metrics.avg_expense = metrics.total_expenses / Decimal::from(metrics.expense_count);
    }
    Ok(metrics)
}

/// Running balance at the end of each distinct date, ascending, keeping only
/// the last `max_points` dates.
pub fn compute_balance_history<E: Entry>(entries: &[E], max_points: usize) -> Result<Vec<Decimal>> {
    let mut net_by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for entry in entries {
        let amount = entry.amount()?;
        let net = net_by_date.entry(entry.date()).or_default();
        *net = add_amounts(*net, entry.kind().signed(amount))?;
    }

    let mut running = Decimal::ZERO;
    let mut history = Vec::with_capacity(net_by_date.len());
    for net in net_by_date.into_values() {
        running = add_amounts(running, net)?;
        history.push(running);
    }
    let skip = history.len().saturating_sub(max_points);
    Ok(history.into_iter().skip(skip).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Transaction;
    use crate::errors::FinanceError;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(kind: EntryKind, amount: &str, on: NaiveDate) -> Transaction {
        Transaction::new(Uuid::nil(), Uuid::nil(), amount, kind, on)
    }

    #[test]
    fn empty_input_is_all_zero() {
        let none: Vec<Transaction> = Vec::new();
        assert_eq!(compute_metrics(&none).unwrap(), DashboardMetrics::default());
        assert!(compute_balance_history(&none, 12).unwrap().is_empty());
    }

    #[test]
    fn income_and_expense_totals() {
        let entries = vec![
            txn(EntryKind::Income, "100", date(2024, 1, 1)),
            txn(EntryKind::Expense, "40", date(2024, 1, 2)),
        ];
        let metrics = compute_metrics(&entries).unwrap();
        assert_eq!(metrics.total_income, Decimal::from(100));
        assert_eq!(metrics.total_expenses, Decimal::from(40));
        assert_eq!(metrics.balance, Decimal::from(60));
        assert_eq!(metrics.savings, Decimal::from(60));
        assert_eq!(metrics.avg_expense, Decimal::from(40));
        assert_eq!((metrics.income_count, metrics.expense_count), (1, 1));
    }

    #[test]
    fn average_expense_divides_by_expense_count() {
        let entries = vec![
            txn(EntryKind::Expense, "10", date(2024, 1, 1)),
            txn(EntryKind::Expense, "20", date(2024, 1, 2)),
            txn(EntryKind::Income, "500", date(2024, 1, 3)),
        ];
        let metrics = compute_metrics(&entries).unwrap();
        assert_eq!(metrics.avg_expense, Decimal::from(15));
    }

    #[test]
    fn balance_history_accumulates_per_date() {
        let entries = vec![
            txn(EntryKind::Expense, "30", date(2024, 1, 3)),
            txn(EntryKind::Income, "100", date(2024, 1, 1)),
            txn(EntryKind::Expense, "10", date(2024, 1, 1)),
            txn(EntryKind::Income, "5", date(2024, 1, 2)),
        ];
        assert_eq!(
            compute_balance_history(&entries, 12).unwrap(),
            vec![Decimal::from(90), Decimal::from(95), Decimal::from(65)]
        );
    }

    #[test]
    fn oversized_totals_reject_instead_of_wrapping() {
        let huge = "79228162514264337593543950335";
        let incomes = vec![
            txn(EntryKind::Income, huge, date(2024, 1, 1)),
            txn(EntryKind::Income, huge, date(2024, 1, 1)),
        ];
        assert!(matches!(compute_metrics(&incomes), Err(FinanceError::AmountOverflow)));
        assert!(matches!(
            compute_balance_history(&incomes, 12),
            Err(FinanceError::AmountOverflow)
        ));

        let spread = vec![
            txn(EntryKind::Expense, huge, date(2024, 1, 1)),
            txn(EntryKind::Expense, "1", date(2024, 1, 2)),
        ];
        assert!(matches!(
            compute_balance_history(&spread, 12),
            Err(FinanceError::AmountOverflow)
        ));
        let metrics = compute_metrics(&[txn(EntryKind::Expense, huge, date(2024, 1, 1))]).unwrap();
        assert_eq!(metrics.balance, -Decimal::MAX);
    }

    #[test]
    fn balance_history_keeps_latest_points() {
        let entries: Vec<Transaction> = (1..=20)
            .map(|day| txn(EntryKind::Income, "1", date(2024, 1, day)))
            .collect();
        let history = compute_balance_history(&entries, 12).unwrap();
        assert_eq!(history.len(), 12);
        assert_eq!(history.first(), Some(&Decimal::from(9)));
        assert_eq!(history.last(), Some(&Decimal::from(20)));
        assert!(compute_balance_history(&entries, 0).unwrap().is_empty());
    }

    #[test]
    fn bad_amount_rejects_metrics() {
        let entries = vec![txn(EntryKind::Income, "1e", date(2024, 1, 1))];
        assert!(compute_metrics(&entries).is_err());
        assert!(compute_balance_history(&entries, 12).is_err());
    }
}
