//! Audit logging for the expense manager
//!
//! Records all create, update, delete operations with before/after values
//! in an append-only audit log. Backup exports and imports are recorded
//! as events with a human-readable details line.
//!
//! # Architecture
//!
//! The audit system consists of two components:
//!
//! - `AuditEntry`: Represents a single audit log entry with timestamp, operation,
//!   entity information, and optional before/after values.
//! - `AuditLogger`: Handles writing entries to the audit log file using a
//!   line-delimited JSON format (JSONL).

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
