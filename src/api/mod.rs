//! Access to the Finance Hub REST backend.

pub mod http;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    Budget, Category, CategoryPatch, NewBudget, NewCategory, NewRecurringTransaction,
    NewTransaction, RecurringTransaction, RecurringTransactionPatch, Transaction,
    TransactionPatch,
};
use crate::errors::Result;

pub use http::HttpApiClient;

/// Signed-in user context passed explicitly to services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub token: Option<String>,
}

impl Session {
    pub fn new(user_id: Uuid, token: Option<String>) -> Self {
        Self { user_id, token }
    }
}

/// Operations the dashboard needs from the backend.
///
/// Implemented over HTTP by [`HttpApiClient`]; tests supply in-memory fakes.
pub trait FinanceApi {
    fn list_transactions(&self, user_id: Uuid) -> Result<Vec<Transaction>>;
    fn get_transaction(&self, id: Uuid) -> Result<Transaction>;
    fn create_transaction(&self, input: &NewTransaction) -> Result<Transaction>;
    fn update_transaction(&self, id: Uuid, patch: &TransactionPatch) -> Result<Transaction>;
    fn delete_transaction(&self, id: Uuid) -> Result<()>;

    fn list_recurring(&self, user_id: Uuid) -> Result<Vec<RecurringTransaction>>;
    fn create_recurring(&self, input: &NewRecurringTransaction) -> Result<RecurringTransaction>;
    fn update_recurring(
        &self,
        id: Uuid,
        patch: &RecurringTransactionPatch,
    ) -> Result<RecurringTransaction>;
    fn delete_recurring(&self, id: Uuid) -> Result<()>;

    fn list_categories(&self, user_id: Uuid) -> Result<Vec<Category>>;
    fn create_category(&self, input: &NewCategory) -> Result<Category>;
    fn update_category(&self, id: Uuid, patch: &CategoryPatch) -> Result<Category>;
    fn delete_category(&self, id: Uuid) -> Result<()>;

    fn list_budgets(&self, user_id: Uuid) -> Result<Vec<Budget>>;
    fn list_budgets_for_month(&self, user_id: Uuid, month: NaiveDate) -> Result<Vec<Budget>>;
    fn create_budget(&self, input: &NewBudget) -> Result<Budget>;
    fn update_budget(&self, id: Uuid, input: &NewBudget) -> Result<Budget>;
    fn delete_budget(&self, id: Uuid) -> Result<()>;
}
