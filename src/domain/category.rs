//! Category records used to classify and colour dashboard entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{find_by_id, EntryKind, Identifiable};

pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";
pub const UNKNOWN_CATEGORY_COLOR: &str = "#6b7280";

/// User-defined tag classifying entries as income or expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub color: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub is_system: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(
        user_id: Uuid,
        name: impl Into<String>,
        kind: EntryKind,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            kind,
            color: color.into(),
            icon: None,
            is_system: false,
            created_at: None,
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Payload for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Partial update for a category; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Finds a category by id in a fetched list.
pub fn find_category(categories: &[Category], id: Uuid) -> Option<&Category> {
    find_by_id(categories, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_shape() {
        let json = r##"{
            "id": "6f9c1f7e-8a53-4a55-9d0e-3f0e1d2c4b5a",
            "userId": "0b7e6b64-31b5-4c43-9c59-0e5d3c3e8f11",
            "name": "Groceries",
            "type": "expense",
            "color": "#f97316",
            "icon": null,
            "isSystem": false,
            "createdAt": "2024-01-01T10:00:00Z"
        }"##;
        let category: Category = serde_json::from_str(json).expect("category parses");
        assert_eq!(category.kind, EntryKind::Expense);
        assert_eq!(category.color, "#f97316");
        assert!(category.icon.is_none());
    }

    #[test]
    fn find_category_matches_by_id_only() {
        let user = Uuid::new_v4();
        let rent = Category::new(user, "Rent", EntryKind::Expense, "#3b82f6");
        let twin = Category::new(user, "Rent", EntryKind::Expense, "#3b82f6");
        let categories = vec![rent.clone(), twin.clone()];
        assert_eq!(find_category(&categories, twin.id).map(|c| c.id), Some(twin.id));
        assert_eq!(find_category(&categories, rent.id).map(|c| c.id()), Some(rent.id));
        assert!(find_category(&categories, Uuid::nil()).is_none());
    }
}
