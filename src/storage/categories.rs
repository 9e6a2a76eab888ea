//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json. Loading an
//! empty or missing file seeds the built-in default category so it is
//! always available for uncategorized transactions.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk, seeding the default category when absent
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for category in file_data.categories {
            data.insert(category.id, category);
        }

        if !data.contains_key(&CategoryId::default_category()) {
            let default = Category::default_category();
            data.insert(default.id, default);
        }

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        let file_data = CategoryData { categories };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all categories
    pub fn get_all(&self) -> Result<Vec<Category>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a category
    pub fn upsert(&self, category: Category) -> Result<(), ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(category.id, category);
        Ok(())
    }

    /// Delete a category
    pub fn delete(&self, id: CategoryId) -> Result<bool, ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Check if a category exists
    pub fn exists(&self, id: CategoryId) -> Result<bool, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.contains_key(&id))
    }

    /// Check if a category name is already taken
    pub fn name_exists(
        &self,
        name: &str,
        exclude_id: Option<CategoryId>,
    ) -> Result<bool, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .any(|c| c.name.to_lowercase() == name_lower && Some(c.id) != exclude_id))
    }

    /// Replace the entire collection (used by backup restore)
    pub fn replace_all(&self, categories: Vec<Category>) -> Result<(), ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for category in categories {
            data.insert(category.id, category);
        }

        Ok(())
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
