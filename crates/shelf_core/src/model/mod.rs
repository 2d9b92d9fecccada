//! Domain records persisted by the loan and registration stores.
//!
//! # Responsibility
//! - Define the row shapes and fixed column layouts of both tables.
//! - Own the calendar-date codec shared by every date column.
//!
//! # Invariants
//! - Struct field order matches the persisted column order.
//! - Records carry no storage identity; the table row order is the only order.

pub mod date_format;
pub mod loan;
pub mod registration;
