//! In-memory record filters.
//!
//! # Responsibility
//! - Derive subsets of the full record set for search, tables and charts.
//!
//! # Invariants
//! - Filters are pure, read-only and preserve input order.
//! - Every call re-scans the full input; there is no index or cache.

pub mod filter;
