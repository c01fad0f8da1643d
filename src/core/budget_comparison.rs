//! Predicted-versus-actual comparison of budgets and transactions.

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    add_amounts, category::find_category, first_of_month, parse_amount, Budget, Category, Entry,
    EntryKind, Period,
};
use crate::errors::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BudgetComparison {
    pub predicted_income: Decimal,
    pub predicted_expenses: Decimal,
    pub predicted_balance: Decimal,
    pub actual_income: Decimal,
    pub actual_expenses: Decimal,
    pub actual_balance: Decimal,
    /// Per-category breakdown, in the order of the supplied categories.
    pub per_category: Vec<CategoryComparison>,
    /// Budgets in the period whose category is not among the supplied ones.
    pub unmatched_budgets: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryComparison {
    pub category_id: Uuid,
    pub category_name: String,
    pub kind: EntryKind,
    pub predicted: Decimal,
    pub actual: Decimal,
}

impl CategoryComparison {
    /// Predicted minus actual; positive means under budget for expenses.
    /// `None` when the difference is outside the decimal range.
    pub fn remaining(&self) -> Option<Decimal> {
        self.predicted.checked_sub(self.actual)
    }
}

/// Compares the budgets of every month the period touches with the entries
/// dated inside the period.
///
/// Budgets are split into income and expense by their category's type.
/// Entries are split by their own type.
pub fn compare_budget_to_actual<E: Entry>(
    budgets: &[Budget],
    entries: &[E],
    categories: &[Category],
    period: Period,
) -> Result<BudgetComparison> {
    let range = period.range();
    let months: BTreeSet<_> = period.months().into_iter().collect();
    let mut comparison = BudgetComparison::default();
    let mut predicted_by_category: HashMap<Uuid, Decimal> = HashMap::new();
    let mut actual_by_category: HashMap<Uuid, Decimal> = HashMap::new();

    for budget in budgets
        .iter()
        .filter(|budget| months.contains(&first_of_month(budget.month)))
    {
        let amount = parse_amount(&budget.amount)?;
        let Some(category) = find_category(categories, budget.category_id) else {
            warn!(
                budget_id = %budget.id,
                category_id = %budget.category_id,
                "budget references an unknown category; leaving it out of predictions"
            );
            comparison.unmatched_budgets += 1;
            continue;
        };
        let total = match category.kind {
            EntryKind::Income => &mut comparison.predicted_income,
            EntryKind::Expense => &mut comparison.predicted_expenses,
        };
        *total = add_amounts(*total, amount)?;
        let per_category = predicted_by_category.entry(category.id).or_default();
        *per_category = add_amounts(*per_category, amount)?;
    }

    for entry in entries.iter().filter(|entry| range.contains(entry.date())) {
        let amount = entry.amount()?;
        let total = match entry.kind() {
            EntryKind::Income => &mut comparison.actual_income,
            EntryKind::Expense => &mut comparison.actual_expenses,
        };
        *total = add_amounts(*total, amount)?;
        let per_category = actual_by_category.entry(entry.category_id()).or_default();
        *per_category = add_amounts(*per_category, amount)?;
    }

    comparison.predicted_balance =
        add_amounts(comparison.predicted_income, -comparison.predicted_expenses)?;
    comparison.actual_balance =
        add_amounts(comparison.actual_income, -comparison.actual_expenses)?;
    comparison.per_category = categories
        .iter()
        .filter_map(|category| {
            let predicted = predicted_by_category.get(&category.id).copied();
            let actual = actual_by_category.get(&category.id).copied();
            if predicted.is_none() && actual.is_none() {
                return None;
            }
            Some(CategoryComparison {
                category_id: category.id,
                category_name: category.name.clone(),
                kind: category.kind,
                predicted: predicted.unwrap_or_default(),
                actual: actual.unwrap_or_default(),
            })
        })
        .collect();

    Ok(comparison)
}
