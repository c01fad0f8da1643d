//! Headline metrics for the dashboard cards.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::api::{FinanceApi, Session};
use crate::core::metrics::{compute_balance_history, compute_metrics, DashboardMetrics};
use crate::domain::Transaction;
use crate::errors::Result;
use crate::utils::format::format_currency;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSnapshot {
    pub metrics: DashboardMetrics,
    pub balance_history: Vec<Decimal>,
}

impl DashboardSnapshot {
    pub fn from_transactions(transactions: &[Transaction], max_points: usize) -> Result<Self> {
        Ok(Self {
            metrics: compute_metrics(transactions)?,
            balance_history: compute_balance_history(transactions, max_points)?,
        })
    }

    /// Card labels in display order, formatted in `currency`.
    pub fn cards(&self, currency: &str) -> Vec<(&'static str, String)> {
        let m = &self.metrics;
        vec![
            ("Balance", format_currency(m.balance, currency)),
            ("Income", format_currency(m.total_income, currency)),
            ("Expenses", format_currency(m.total_expenses, currency)),
            ("Savings", format_currency(m.savings, currency)),
            ("Avg. expense", format_currency(m.avg_expense, currency)),
        ]
    }
}

pub struct DashboardService;

impl DashboardService {
    pub fn load(
        api: &dyn FinanceApi,
        session: &Session,
        max_points: usize,
    ) -> Result<DashboardSnapshot> {
        let transactions = api.list_transactions(session.user_id)?;
        debug!(
            user_id = %session.user_id,
            count = transactions.len(),
            "computing dashboard metrics"
        );
        DashboardSnapshot::from_transactions(&transactions, max_points)
    }
}
