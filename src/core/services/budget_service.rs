use tracing::debug;

use crate::api::{FinanceApi, Session};
use crate::core::budget_comparison::{compare_budget_to_actual, BudgetComparison};
use crate::domain::{first_of_month, Category, Period};
use crate::errors::Result;

pub struct BudgetService;

impl BudgetService {
    /// Fetches budgets and transactions and compares them over `period`.
    ///
    /// A single-month period asks the backend for that month only; ranges
    /// fetch every budget and let the comparator pick the touched months.
    pub fn compare(
        api: &dyn FinanceApi,
        session: &Session,
        categories: &[Category],
        period: Period,
    ) -> Result<BudgetComparison> {
        let budgets = match period {
            Period::Month(month) => {
                api.list_budgets_for_month(session.user_id, first_of_month(month))?
            }
            Period::Range(_) => api.list_budgets(session.user_id)?,
        };
        let transactions = api.list_transactions(session.user_id)?;
        debug!(
            user_id = %session.user_id,
            budgets = budgets.len(),
            transactions = transactions.len(),
            "comparing budgets"
        );
        compare_budget_to_actual(&budgets, &transactions, categories, period)
    }
}
