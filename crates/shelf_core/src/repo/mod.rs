//! Repository layer contracts and CSV persistence implementations.
//!
//! # Responsibility
//! - Define per-table data access contracts used by the services.
//! - Keep CSV encoding and file replacement inside the persistence boundary.
//!
//! # Invariants
//! - Every mutation is a full-table read-modify-write under the table guard.
//! - Repositories hold no records between calls; the file is the only owner.

pub mod error;
pub mod loan_repo;
pub mod registration_repo;
pub mod table;
