//! Blocking HTTP implementation of [`FinanceApi`].

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{
    blocking::Client,
    header::{ACCEPT, CONTENT_TYPE},
    Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use super::FinanceApi;
use crate::config::ApiConfig;
use crate::domain::{
    Budget, Category, CategoryPatch, NewBudget, NewCategory, NewRecurringTransaction,
    NewTransaction, RecurringTransaction, RecurringTransactionPatch, Transaction,
    TransactionPatch,
};
use crate::errors::{FinanceError, Result};

const TRANSACTIONS: &str = "/api/transactions";
const RECURRING: &str = "/api/recurring-transactions";
const CATEGORIES: &str = "/api/categories";
const BUDGETS: &str = "/api/budgets";

/// REST client for the backend. One instance per signed-in session.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        let base_url = config.api_url();
        reqwest::Url::parse(&base_url).map_err(|err| {
            FinanceError::Config(format!(
                "invalid API URL `{base_url}` ({err}); check the api.base_url setting"
            ))
        })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    /// Sends a request and returns the body text, or `None` for empty replies.
    fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<Option<String>> {
        let url = self.url(endpoint);
        debug!(%method, %url, "calling backend");
        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            let message = error_message(status, &text);
            warn!(%method, %url, status = status.as_u16(), %message, "backend rejected request");
            return Err(FinanceError::Api {
                status: status.as_u16(),
                message,
            });
        }
        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(text))
    }

    fn fetch<T, B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.send(method, endpoint, body)?.ok_or_else(|| {
            FinanceError::Transport(format!("empty response from {endpoint}"))
        })?;
        serde_json::from_str(&text).map_err(|err| {
            warn!(%endpoint, error = %err, "backend response did not match the expected shape");
            FinanceError::Decode(format!("{endpoint}: {err}"))
        })
    }

    fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.fetch::<T, ()>(Method::GET, endpoint, None)
    }

    fn delete(&self, endpoint: &str) -> Result<()> {
        self.send::<()>(Method::DELETE, endpoint, None).map(|_| ())
    }
}

/// Picks the most useful message from an error response body.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                if !message.trim().is_empty() {
                    return message.to_string();
                }
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        trimmed.to_string()
    }
}

impl FinanceApi for HttpApiClient {
    fn list_transactions(&self, user_id: Uuid) -> Result<Vec<Transaction>> {
        self.get(&format!("{TRANSACTIONS}/user/{user_id}"))
    }

    fn get_transaction(&self, id: Uuid) -> Result<Transaction> {
        self.get(&format!("{TRANSACTIONS}/{id}"))
    }

    fn create_transaction(&self, input: &NewTransaction) -> Result<Transaction> {
        self.fetch(Method::POST, TRANSACTIONS, Some(input))
    }

    fn update_transaction(&self, id: Uuid, patch: &TransactionPatch) -> Result<Transaction> {
        self.fetch(Method::PUT, &format!("{TRANSACTIONS}/{id}"), Some(patch))
    }

    fn delete_transaction(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("{TRANSACTIONS}/{id}"))
    }

    fn list_recurring(&self, user_id: Uuid) -> Result<Vec<RecurringTransaction>> {
        self.get(&format!("{RECURRING}/user/{user_id}"))
    }

    fn create_recurring(&self, input: &NewRecurringTransaction) -> Result<RecurringTransaction> {
        self.fetch(Method::POST, RECURRING, Some(input))
    }

    fn update_recurring(
        &self,
        id: Uuid,
        patch: &RecurringTransactionPatch,
    ) -> Result<RecurringTransaction> {
        self.fetch(Method::PUT, &format!("{RECURRING}/{id}"), Some(patch))
    }

    fn delete_recurring(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("{RECURRING}/{id}"))
    }

    fn list_categories(&self, user_id: Uuid) -> Result<Vec<Category>> {
        self.get(&format!("{CATEGORIES}/user/{user_id}"))
    }

    fn create_category(&self, input: &NewCategory) -> Result<Category> {
        self.fetch(Method::POST, CATEGORIES, Some(input))
    }

    fn update_category(&self, id: Uuid, patch: &CategoryPatch) -> Result<Category> {
        self.fetch(Method::PUT, &format!("{CATEGORIES}/{id}"), Some(patch))
    }

    fn delete_category(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("{CATEGORIES}/{id}"))
    }

    fn list_budgets(&self, user_id: Uuid) -> Result<Vec<Budget>> {
        self.get(&format!("{BUDGETS}/user/{user_id}"))
    }

    fn list_budgets_for_month(&self, user_id: Uuid, month: NaiveDate) -> Result<Vec<Budget>> {
        self.get(&format!(
            "{BUDGETS}/user/{user_id}/month/{}",
            month.format("%Y-%m-%d")
        ))
    }

    fn create_budget(&self, input: &NewBudget) -> Result<Budget> {
        self.fetch(Method::POST, BUDGETS, Some(input))
    }

    fn update_budget(&self, id: Uuid, input: &NewBudget) -> Result<Budget> {
        self.fetch(Method::PUT, &format!("{BUDGETS}/{id}"), Some(input))
    }

    fn delete_budget(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("{BUDGETS}/{id}"))
    }
}
