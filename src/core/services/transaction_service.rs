//! Create, edit and delete transactions through the backend.

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::api::{FinanceApi, Session};
use crate::core::validation::{validate_positive_amount, TransactionDraft};
use crate::domain::{EntryKind, NewTransaction, Transaction, TransactionPatch};
use crate::errors::{FinanceError, Result};

/// Provides validated CRUD helpers for transactions.
pub struct TransactionService;

impl TransactionService {
    /// Lists every transaction of the signed-in user.
    pub fn list(api: &dyn FinanceApi, session: &Session) -> Result<Vec<Transaction>> {
        api.list_transactions(session.user_id)
    }

    /// Validates the form input and creates the transaction.
    pub fn create(
        api: &dyn FinanceApi,
        draft: &TransactionDraft,
        kind: EntryKind,
        date: NaiveDate,
        description: Option<String>,
    ) -> Result<Transaction> {
        let valid = draft.validate()?;
        let input = NewTransaction {
            category_id: valid.category_id,
            amount: valid.amount.normalize().to_string(),
            kind,
            description: description.filter(|text| !text.trim().is_empty()),
            date,
        };
        let created = api.create_transaction(&input)?;
        info!(transaction_id = %created.id, %kind, "transaction created");
        Ok(created)
    }

    /// Applies a partial update; a supplied amount must be positive.
    pub fn update(api: &dyn FinanceApi, id: Uuid, patch: &TransactionPatch) -> Result<Transaction> {
        if let Some(amount) = &patch.amount {
            validate_positive_amount(amount)?;
        }
        if patch == &TransactionPatch::default() {
            return Err(FinanceError::InvalidInput("nothing to update".into()));
        }
        api.update_transaction(id, patch)
    }

    pub fn delete(api: &dyn FinanceApi, id: Uuid) -> Result<()> {
        api.delete_transaction(id)?;
        info!(transaction_id = %id, "transaction deleted");
        Ok(())
    }
}
