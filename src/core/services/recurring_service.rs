//! Maintenance of recurring rules and projection of their instances.

use tracing::{info, warn};
use uuid::Uuid;

use crate::api::{FinanceApi, Session};
use crate::core::occurrences::{expand_rules, OccurrenceBatch};
use crate::core::validation::validate_positive_amount;
use crate::domain::{
    DateFilter, NewRecurringTransaction, RecurringTransaction, RecurringTransactionPatch,
};
use crate::errors::{FinanceError, Result};
use crate::utils::time::Clock;

pub struct RecurringService;

impl RecurringService {
    pub fn list(api: &dyn FinanceApi, session: &Session) -> Result<Vec<RecurringTransaction>> {
        api.list_recurring(session.user_id)
    }

    /// Creates a rule after checking its amount and date bounds.
    pub fn create(
        api: &dyn FinanceApi,
        input: &NewRecurringTransaction,
    ) -> Result<RecurringTransaction> {
        validate_positive_amount(&input.amount)?;
        if let Some(end) = input.end_date {
            if end < input.start_date {
                return Err(FinanceError::Validation(
                    "End date must be on or after the start date".into(),
                ));
            }
        }
        let rule = api.create_recurring(input)?;
        info!(rule_id = %rule.id, frequency = %rule.frequency, "recurring rule created");
        Ok(rule)
    }

    pub fn update(
        api: &dyn FinanceApi,
        id: Uuid,
        patch: &RecurringTransactionPatch,
    ) -> Result<RecurringTransaction> {
        if let Some(amount) = &patch.amount {
            validate_positive_amount(amount)?;
        }
        if let (Some(start), Some(end)) = (patch.start_date, patch.end_date) {
            if end < start {
                return Err(FinanceError::Validation(
                    "End date must be on or after the start date".into(),
                ));
            }
        }
        api.update_recurring(id, patch)
    }

    /// Pauses or resumes a rule.
    pub fn set_active(api: &dyn FinanceApi, id: Uuid, active: bool) -> Result<RecurringTransaction> {
        let patch = RecurringTransactionPatch {
            is_active: Some(active),
            ..RecurringTransactionPatch::default()
        };
        api.update_recurring(id, &patch)
    }

    pub fn delete(api: &dyn FinanceApi, id: Uuid) -> Result<()> {
        api.delete_recurring(id)
    }

    /// Fetches the user's rules and expands them over `filter`.
    pub fn project(
        api: &dyn FinanceApi,
        session: &Session,
        filter: DateFilter,
        clock: &dyn Clock,
    ) -> Result<OccurrenceBatch> {
        let rules = Self::list(api, session)?;
        let batch = expand_rules(&rules, filter.from, filter.to, clock.today());
        if batch.truncated {
            warn!(user_id = %session.user_id, "recurring projection is incomplete");
        }
        Ok(batch)
    }
}
