//! Configuration module for the expense manager
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Application preferences

pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::Settings;
