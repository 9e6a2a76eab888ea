//! Expense Manager - Personal finance tracking from the command line
//!
//! This library provides the core functionality for the Expense Manager
//! application: accounts, categories and transactions stored as JSON
//! files, a filter-based query engine, and checksum-verified backup
//! export and import.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Settings and path management
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, categories, transactions)
//! - `storage`: JSON file storage layer
//! - `query`: Filtering, sorting and aggregation over transactions
//! - `backup`: Backup serialization, validation and import
//! - `services`: Business logic layer
//! - `audit`: Audit logging
//! - `display`: Terminal output formatting
//! - `cli`: Command definitions and handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_manager::config::{paths::ExpensePaths, settings::Settings};
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod query;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
