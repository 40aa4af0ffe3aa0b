//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record store contract used by services.
//! - Isolate SQLite query details from use-case orchestration.
//!
//! # Invariants
//! - Repository writes only accept validated `RecordDraft` values.
//! - Update and delete report `NotFound` for unknown ids.

pub mod record_repo;
