//! Category model
//!
//! Categories label transactions for filtering and reporting. A built-in
//! "Uncategorized" category with a fixed ID is seeded on first load and is
//! assigned to transactions created without an explicit category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Name of the built-in default category
pub const DEFAULT_CATEGORY_NAME: &str = "Uncategorized";

/// A transaction category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// When the category was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Construct the built-in default category with its fixed ID
    pub fn default_category() -> Self {
        let mut category = Self::new(DEFAULT_CATEGORY_NAME);
        category.id = CategoryId::default_category();
        category
    }

    /// Check whether this is the built-in default category
    pub fn is_default(&self) -> bool {
        self.id.is_default_category()
    }

    /// Rename this category
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
