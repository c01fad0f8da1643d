#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use finance_hub::api::{FinanceApi, Session};
use finance_hub::domain::{
    find_by_id, first_of_month, Budget, Category, CategoryPatch, EntryKind, NewBudget, NewCategory,
    NewRecurringTransaction, NewTransaction, RecurringTransaction, RecurringTransactionPatch,
    Transaction, TransactionPatch,
};
use finance_hub::errors::{FinanceError, Result};
use uuid::Uuid;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn not_found(what: &str, id: Uuid) -> FinanceError {
    FinanceError::Api {
        status: 404,
        message: format!("{what} {id} not found"),
    }
}

/// In-memory backend for a single signed-in user.
#[derive(Default)]
pub struct FakeApi {
    pub user_id: Uuid,
    pub transactions: Mutex<Vec<Transaction>>,
    pub recurring: Mutex<Vec<RecurringTransaction>>,
    pub categories: Mutex<Vec<Category>>,
    pub budgets: Mutex<Vec<Budget>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            user_id: Uuid::new_v4(),
            ..Self::default()
        }
    }

    pub fn session(&self) -> Session {
        Session::new(self.user_id, Some("test-token".into()))
    }

    pub fn add_category(&self, name: &str, kind: EntryKind, color: &str) -> Category {
        let category = Category::new(self.user_id, name, kind, color);
        self.categories.lock().unwrap().push(category.clone());
        category
    }

    pub fn add_transaction(
        &self,
        category: &Category,
        amount: &str,
        date: NaiveDate,
    ) -> Transaction {
        let txn = Transaction::new(self.user_id, category.id, amount, category.kind, date);
        self.transactions.lock().unwrap().push(txn.clone());
        txn
    }

    pub fn add_rule(&self, rule: RecurringTransaction) {
        self.recurring.lock().unwrap().push(rule);
    }

    pub fn add_budget(&self, category: &Category, amount: &str, month: NaiveDate) -> Budget {
        let budget = Budget::new(self.user_id, category.id, amount, month);
        self.budgets.lock().unwrap().push(budget.clone());
        budget
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

impl FinanceApi for FakeApi {
    fn list_transactions(&self, user_id: Uuid) -> Result<Vec<Transaction>> {
        self.record("list_transactions");
        let items = self.transactions.lock().unwrap();
        Ok(items.iter().filter(|t| t.user_id == user_id).cloned().collect())
    }

    fn get_transaction(&self, id: Uuid) -> Result<Transaction> {
        self.record("get_transaction");
        let items = self.transactions.lock().unwrap();
        find_by_id(items.as_slice(), id)
            .cloned()
            .ok_or_else(|| not_found("transaction", id))
    }

    fn create_transaction(&self, input: &NewTransaction) -> Result<Transaction> {
        self.record("create_transaction");
        let mut txn = Transaction::new(
            self.user_id,
            input.category_id,
            input.amount.clone(),
            input.kind,
            input.date,
        );
        txn.description = input.description.clone();
        self.transactions.lock().unwrap().push(txn.clone());
        Ok(txn)
    }

    fn update_transaction(&self, id: Uuid, patch: &TransactionPatch) -> Result<Transaction> {
        self.record("update_transaction");
        let mut items = self.transactions.lock().unwrap();
        let txn = items
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("transaction", id))?;
        if let Some(category_id) = patch.category_id {
            txn.category_id = category_id;
        }
        if let Some(amount) = &patch.amount {
            txn.amount = amount.clone();
        }
        if let Some(kind) = patch.kind {
            txn.kind = kind;
        }
        if let Some(description) = &patch.description {
            txn.description = Some(description.clone());
        }
        if let Some(date) = patch.date {
            txn.date = date;
        }
        txn.updated_at = Utc::now();
        Ok(txn.clone())
    }

    fn delete_transaction(&self, id: Uuid) -> Result<()> {
        self.record("delete_transaction");
        let mut items = self.transactions.lock().unwrap();
        let before = items.len();
        items.retain(|t| t.id != id);
        if items.len() == before {
            return Err(not_found("transaction", id));
        }
        Ok(())
    }

    fn list_recurring(&self, user_id: Uuid) -> Result<Vec<RecurringTransaction>> {
        self.record("list_recurring");
        let items = self.recurring.lock().unwrap();
        Ok(items.iter().filter(|r| r.user_id == user_id).cloned().collect())
    }

    fn create_recurring(&self, input: &NewRecurringTransaction) -> Result<RecurringTransaction> {
        self.record("create_recurring");
        let mut rule = RecurringTransaction::new(
            self.user_id,
            input.category_id,
            input.amount.clone(),
            input.kind,
            input.frequency,
            input.start_date,
        );
        rule.end_date = input.end_date;
        rule.description = input.description.clone();
        self.recurring.lock().unwrap().push(rule.clone());
        Ok(rule)
    }

    fn update_recurring(
        &self,
        id: Uuid,
        patch: &RecurringTransactionPatch,
    ) -> Result<RecurringTransaction> {
        self.record("update_recurring");
        let mut items = self.recurring.lock().unwrap();
        let rule = items
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found("recurring transaction", id))?;
        if let Some(amount) = &patch.amount {
            rule.amount = amount.clone();
        }
        if let Some(frequency) = patch.frequency {
            rule.frequency = frequency;
        }
        if let Some(start) = patch.start_date {
            rule.start_date = start;
        }
        if let Some(end) = patch.end_date {
            rule.end_date = Some(end);
        }
        if let Some(active) = patch.is_active {
            rule.is_active = active;
        }
        Ok(rule.clone())
    }

    fn delete_recurring(&self, id: Uuid) -> Result<()> {
        self.record("delete_recurring");
        self.recurring.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }

    fn list_categories(&self, user_id: Uuid) -> Result<Vec<Category>> {
        self.record("list_categories");
        let items = self.categories.lock().unwrap();
        Ok(items.iter().filter(|c| c.user_id == user_id).cloned().collect())
    }

    fn create_category(&self, input: &NewCategory) -> Result<Category> {
        self.record("create_category");
        let color = input.color.clone().unwrap_or_else(|| "#3b82f6".into());
        let category = Category::new(self.user_id, input.name.clone(), input.kind, color);
        self.categories.lock().unwrap().push(category.clone());
        Ok(category)
    }

    fn update_category(&self, id: Uuid, patch: &CategoryPatch) -> Result<Category> {
        self.record("update_category");
        let mut items = self.categories.lock().unwrap();
        let category = items
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("category", id))?;
        if let Some(name) = &patch.name {
            category.name = name.clone();
        }
        if let Some(color) = &patch.color {
            category.color = color.clone();
        }
        Ok(category.clone())
    }

    fn delete_category(&self, id: Uuid) -> Result<()> {
        self.record("delete_category");
        self.categories.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    fn list_budgets(&self, user_id: Uuid) -> Result<Vec<Budget>> {
        self.record("list_budgets");
        let items = self.budgets.lock().unwrap();
        Ok(items.iter().filter(|b| b.user_id == user_id).cloned().collect())
    }

    fn list_budgets_for_month(&self, user_id: Uuid, month: NaiveDate) -> Result<Vec<Budget>> {
        self.record("list_budgets_for_month");
        let month = first_of_month(month);
        let items = self.budgets.lock().unwrap();
        Ok(items
            .iter()
            .filter(|b| b.user_id == user_id && first_of_month(b.month) == month)
            .cloned()
            .collect())
    }

    fn create_budget(&self, input: &NewBudget) -> Result<Budget> {
        self.record("create_budget");
        let budget = Budget::new(self.user_id, input.category_id, input.amount.clone(), input.month);
        self.budgets.lock().unwrap().push(budget.clone());
        Ok(budget)
    }

    fn update_budget(&self, id: Uuid, input: &NewBudget) -> Result<Budget> {
        self.record("update_budget");
        let mut items = self.budgets.lock().unwrap();
        let budget = items
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found("budget", id))?;
        budget.category_id = input.category_id;
        budget.amount = input.amount.clone();
        budget.month = first_of_month(input.month);
        Ok(budget.clone())
    }

    fn delete_budget(&self, id: Uuid) -> Result<()> {
        self.record("delete_budget");
        self.budgets.lock().unwrap().retain(|b| b.id != id);
        Ok(())
    }
}
