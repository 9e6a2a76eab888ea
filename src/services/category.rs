//! Category service
//!
//! Provides business logic for category management including CRUD
//! operations. Deleting a category never cascades: transactions keep
//! their category references even when the category is gone.

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, CategoryId};
use crate::storage::Store;

/// Service for category management
pub struct CategoryService<'a> {
    store: &'a Store,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Create a new category
    pub fn create(&self, name: &str) -> ExpenseResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ExpenseError::Validation(
                "Category name cannot be empty".into(),
            ));
        }

        if self.store.categories.name_exists(name, None)? {
            return Err(ExpenseError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let category = Category::new(name);

        category
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.store.categories.upsert(category.clone())?;
        self.store.categories.save()?;

        self.store.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> ExpenseResult<Option<Category>> {
        self.store.categories.get(id)
    }

    /// Find a category by name or ID string
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Category>> {
        if let Some(category) = self.store.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.store.categories.get(id);
        }

        Ok(None)
    }

    /// Get all categories
    pub fn list(&self) -> ExpenseResult<Vec<Category>> {
        self.store.categories.get_all()
    }

    /// Rename a category
    pub fn rename(&self, id: CategoryId, new_name: &str) -> ExpenseResult<Category> {
        let mut category = self
            .store
            .categories
            .get(id)?
            .ok_or_else(|| ExpenseError::category_not_found(id.to_string()))?;

        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(ExpenseError::Validation(
                "Category name cannot be empty".into(),
            ));
        }

        if self.store.categories.name_exists(new_name, Some(id))? {
            return Err(ExpenseError::Duplicate {
                entity_type: "Category",
                identifier: new_name.to_string(),
            });
        }

        let before = category.clone();
        category.rename(new_name);

        category
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.store.categories.upsert(category.clone())?;
        self.store.categories.save()?;

        self.store.log_update(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &before,
            &category,
        )?;

        Ok(category)
    }

    /// Delete a category
    ///
    /// Transactions referencing this category keep their reference; they
    /// are rendered as uncategorized once the category is gone.
    pub fn delete(&self, id: CategoryId) -> ExpenseResult<Category> {
        let category = self
            .store
            .categories
            .get(id)?
            .ok_or_else(|| ExpenseError::category_not_found(id.to_string()))?;

        self.store.categories.delete(id)?;
        self.store.categories.save()?;

        self.store.log_delete(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }
}
