use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{serde_day, Identifiable};
use crate::domain::date_range::first_of_month;

/// A predicted monthly amount for a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub amount: String,
    /// First day of the month the prediction applies to.
    #[serde(with = "serde_day")]
    pub month: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Budget {
    pub fn new(user_id: Uuid, category_id: Uuid, amount: impl Into<String>, month: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            category_id,
            amount: amount.into(),
            month: first_of_month(month),
            created_at: None,
            updated_at: None,
        }
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Payload for creating a budget or fully rewriting an existing one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub category_id: Uuid,
    pub amount: String,
    #[serde(with = "serde_day")]
    pub month: NaiveDate,
}

impl NewBudget {
    /// Builds the payload, normalising `month` to its first day.
    pub fn for_month(category_id: Uuid, amount: impl Into<String>, month: NaiveDate) -> Self {
        Self {
            category_id,
            amount: amount.into(),
            month: first_of_month(month),
        }
    }
}
