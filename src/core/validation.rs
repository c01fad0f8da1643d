//! Checks applied to user input before it is sent to the backend.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::parse_amount;
use crate::errors::{FinanceError, Result};

/// Raw transaction form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub amount: String,
    pub category_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

/// Input that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidDraft {
    pub amount: Decimal,
    pub category_id: Uuid,
    pub user_id: Uuid,
}

impl TransactionDraft {
    /// Validates fields in form order, returning the first failure.
    pub fn validate(&self) -> Result<ValidDraft> {
        if self.amount.trim().is_empty() {
            return Err(FinanceError::Validation("Please enter an amount".into()));
        }
        let amount = validate_positive_amount(&self.amount)?;
        let category_id = self
            .category_id
            .ok_or_else(|| FinanceError::Validation("Please select a category".into()))?;
        let user_id = self
            .user_id
            .ok_or_else(|| FinanceError::Validation("User not authenticated".into()))?;
        Ok(ValidDraft {
            amount,
            category_id,
            user_id,
        })
    }
}

/// Parses an amount that must be strictly positive.
pub fn validate_positive_amount(raw: &str) -> Result<Decimal> {
    match parse_amount(raw) {
        Ok(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err(FinanceError::Validation(
            "Please enter a valid amount greater than 0".into(),
        )),
    }
}
