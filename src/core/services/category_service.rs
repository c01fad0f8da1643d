use uuid::Uuid;

use crate::api::{FinanceApi, Session};
use crate::domain::{Category, CategoryPatch, EntryKind, NewCategory};
use crate::errors::{FinanceError, Result};

/// Categories split by the kind of entry they classify.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoriesByKind {
    pub income: Vec<Category>,
    pub expense: Vec<Category>,
}

impl CategoriesByKind {
    pub fn split(categories: Vec<Category>) -> Self {
        let (income, expense) = categories
            .into_iter()
            .partition(|category| category.kind == EntryKind::Income);
        Self { income, expense }
    }

    pub fn of_kind(&self, kind: EntryKind) -> &[Category] {
        match kind {
            EntryKind::Income => &self.income,
            EntryKind::Expense => &self.expense,
        }
    }
}

pub struct CategoryService;

impl CategoryService {
    pub fn list(api: &dyn FinanceApi, session: &Session) -> Result<Vec<Category>> {
        api.list_categories(session.user_id)
    }

    pub fn list_by_kind(api: &dyn FinanceApi, session: &Session) -> Result<CategoriesByKind> {
        Ok(CategoriesByKind::split(Self::list(api, session)?))
    }

    pub fn create(api: &dyn FinanceApi, input: &NewCategory) -> Result<Category> {
        Self::validate_name(&input.name)?;
        api.create_category(input)
    }

    pub fn edit(api: &dyn FinanceApi, id: Uuid, patch: &CategoryPatch) -> Result<Category> {
        if let Some(name) = &patch.name {
            Self::validate_name(name)?;
        }
        api.update_category(id, patch)
    }

    /// Deletes a user category. System categories are refused locally.
    pub fn remove(api: &dyn FinanceApi, category: &Category) -> Result<()> {
        if category.is_system {
            return Err(FinanceError::InvalidInput(format!(
                "category `{}` is built in and cannot be deleted",
                category.name
            )));
        }
        api.delete_category(category.id)
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(FinanceError::Validation("Category name is required".into()));
        }
        Ok(())
    }
}
