//! Core record keeping for book loans and new-user registrations.
//! This crate is the single source of truth for the loan rules.

pub mod api;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use api::Library;
pub use config::{ConflictScope, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::date_format::{format_date, parse_date, DateParseError};
pub use model::loan::{LoanRecord, LOAN_COLUMNS};
pub use model::registration::{RegistrationRecord, REGISTRATION_COLUMNS};
pub use repo::error::{StoreError, StoreResult};
pub use repo::loan_repo::{CsvLoanRepository, LoanRepository};
pub use repo::registration_repo::{CsvRegistrationRepository, RegistrationRepository};
pub use service::loan_service::LoanService;
pub use service::registration_service::RegistrationService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
