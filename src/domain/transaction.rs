//! Persisted transactions and the payloads used to create or edit them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{serde_day, Entry, EntryKind, Identifiable};

/// A transaction as stored by the backend. Only changed through API calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub amount: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "serde_day")]
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        user_id: Uuid,
        category_id: Uuid,
        amount: impl Into<String>,
        kind: EntryKind,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            category_id,
            amount: amount.into(),
            kind,
            description: None,
            date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Entry for Transaction {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn kind(&self) -> EntryKind {
        self.kind
    }

    fn category_id(&self) -> Uuid {
        self.category_id
    }

    fn raw_amount(&self) -> &str {
        &self.amount
    }
}

/// Payload for `POST /api/transactions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub category_id: Uuid,
    pub amount: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "serde_day")]
    pub date: NaiveDate,
}

/// Payload for `PUT /api/transactions/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        with = "serde_day::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
}
