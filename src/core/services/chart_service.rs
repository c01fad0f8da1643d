//! Series and slices for the income/expense charts.

use serde::Serialize;
use tracing::debug;

use crate::api::{FinanceApi, Session};
use crate::config::DisplayConfig;
use crate::core::aggregation::{
    aggregate_by_category, aggregate_by_date, of_kind, CategorySlice, DatePoint,
};
use crate::core::services::CategoriesByKind;
use crate::domain::{Category, EntryKind, Transaction};
use crate::errors::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub expense_series: Vec<DatePoint>,
    pub income_series: Vec<DatePoint>,
    pub expense_slices: Vec<CategorySlice>,
    pub income_slices: Vec<CategorySlice>,
    pub expense_color: String,
    pub income_color: String,
}

impl ChartData {
    /// Builds both charts. Slices are limited to the `top_categories` largest.
    pub fn build(
        transactions: &[Transaction],
        categories: Vec<Category>,
        display: &DisplayConfig,
    ) -> Result<Self> {
        let categories = CategoriesByKind::split(categories);
        let expenses = of_kind(transactions, EntryKind::Expense);
        let income = of_kind(transactions, EntryKind::Income);

        let mut expense_slices = aggregate_by_category(&expenses, &categories.expense)?;
        expense_slices.truncate(display.top_categories);
        let mut income_slices = aggregate_by_category(&income, &categories.income)?;
        income_slices.truncate(display.top_categories);

        Ok(Self {
            expense_series: aggregate_by_date(&expenses)?,
            income_series: aggregate_by_date(&income)?,
            expense_slices,
            income_slices,
            expense_color: series_color(&categories.expense, &display.expense_color),
            income_color: series_color(&categories.income, &display.income_color),
        })
    }
}

/// Colour of the first category of a kind, else the configured default.
fn series_color(categories: &[Category], fallback: &str) -> String {
    categories
        .first()
        .map(|category| category.color.trim())
        .filter(|color| !color.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

pub struct ChartService;

impl ChartService {
    pub fn load(
        api: &dyn FinanceApi,
        session: &Session,
        display: &DisplayConfig,
    ) -> Result<ChartData> {
        let categories = api.list_categories(session.user_id)?;
        let transactions = api.list_transactions(session.user_id)?;
        debug!(
            user_id = %session.user_id,
            categories = categories.len(),
            transactions = transactions.len(),
            "building chart data"
        );
        ChartData::build(&transactions, categories, display)
    }
}
