//! Domain model for employee performance records.
//!
//! # Responsibility
//! - Define the canonical record shape shared by storage, filters, charts and
//!   exports.
//! - Turn raw form input into validated, strongly-typed drafts.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `RecordId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod record;
