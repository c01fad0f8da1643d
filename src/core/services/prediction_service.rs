//! Budget predictions: one budget per category and month.

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::api::{FinanceApi, Session};
use crate::core::validation::validate_positive_amount;
use crate::domain::{first_of_month, Budget, NewBudget};
use crate::errors::Result;

/// Result of asking for a new prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionOutcome {
    Created(Budget),
    /// A budget already exists for the category and month. The caller must
    /// confirm before [`PredictionService::overwrite_budget`] replaces it.
    NeedsConfirmation { existing_budget_id: Uuid },
}

pub struct PredictionService;

impl PredictionService {
    pub fn create_prediction(
        api: &dyn FinanceApi,
        session: &Session,
        category_id: Uuid,
        amount: &str,
        target_month: NaiveDate,
    ) -> Result<PredictionOutcome> {
        let amount = validate_positive_amount(amount)?;
        let month = first_of_month(target_month);

        let existing = api.list_budgets_for_month(session.user_id, month)?;
        if let Some(budget) = existing
            .iter()
            .find(|budget| budget.category_id == category_id)
        {
            return Ok(PredictionOutcome::NeedsConfirmation {
                existing_budget_id: budget.id,
            });
        }

        let input = NewBudget::for_month(category_id, amount.normalize().to_string(), month);
        let budget = api.create_budget(&input)?;
        info!(budget_id = %budget.id, %month, "budget prediction created");
        Ok(PredictionOutcome::Created(budget))
    }

    /// Rewrites an existing budget with the new amount and month.
    pub fn overwrite_budget(
        api: &dyn FinanceApi,
        budget_id: Uuid,
        category_id: Uuid,
        amount: &str,
        target_month: NaiveDate,
    ) -> Result<Budget> {
        let amount = validate_positive_amount(amount)?;
        let input = NewBudget::for_month(category_id, amount.normalize().to_string(), target_month);
        let budget = api.update_budget(budget_id, &input)?;
        info!(%budget_id, "budget prediction overwritten");
        Ok(budget)
    }
}
