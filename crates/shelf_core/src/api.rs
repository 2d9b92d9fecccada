//! Boolean facade for presentation-layer callers.
//!
//! # Responsibility
//! - Expose the loan and registration use-cases as plain success flags and
//!   record lists.
//! - Log the detailed error before collapsing it.
//!
//! # Invariants
//! - No method panics or returns an error; failures become `false` or an
//!   empty list.
//! - Every call re-reads the tables; nothing is cached here.

use crate::config::StoreConfig;
use crate::model::loan::LoanRecord;
use crate::model::registration::RegistrationRecord;
use crate::repo::error::{StoreError, StoreResult};
use crate::repo::loan_repo::CsvLoanRepository;
use crate::repo::registration_repo::CsvRegistrationRepository;
use crate::service::loan_service::LoanService;
use crate::service::registration_service::RegistrationService;
use chrono::NaiveDate;
use log::{error, info};

/// Both stores bound to one data directory.
pub struct Library {
    loans: LoanService<CsvLoanRepository>,
    registrations: RegistrationService<CsvRegistrationRepository>,
}

impl Library {
    /// Binds both stores to the paths in `config`; no file is touched yet.
    pub fn open(config: &StoreConfig) -> Self {
        Self {
            loans: LoanService::with_conflict_scope(
                CsvLoanRepository::from_config(config),
                config.conflict_scope,
            ),
            registrations: RegistrationService::new(CsvRegistrationRepository::from_config(
                config,
            )),
        }
    }

    pub fn loans(&self) -> &LoanService<CsvLoanRepository> {
        &self.loans
    }

    pub fn registrations(&self) -> &RegistrationService<CsvRegistrationRepository> {
        &self.registrations
    }

    pub fn load_loans(&self) -> Vec<LoanRecord> {
        or_empty("load_loans", self.loans.load())
    }

    pub fn issue(
        &self,
        book_id: &str,
        title: &str,
        issued_to: &str,
        issue_date: NaiveDate,
    ) -> bool {
        succeeded("issue", self.loans.issue(book_id, title, issued_to, issue_date))
    }

    pub fn return_loan(&self, book_id: &str, return_date: NaiveDate) -> bool {
        succeeded("return_loan", self.loans.return_book(book_id, return_date))
    }

    pub fn list_outstanding(&self) -> Vec<LoanRecord> {
        or_empty("list_outstanding", self.loans.list_outstanding())
    }

    pub fn load_registrations(&self) -> Vec<RegistrationRecord> {
        or_empty("load_registrations", self.registrations.load())
    }

    pub fn register(&self, registration: &RegistrationRecord) -> bool {
        succeeded("register", self.registrations.register(registration))
    }
}

fn succeeded(operation: &str, result: StoreResult<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) if err.is_domain() => {
            info!(
                "event=api_call module=api status={} operation={} error={}",
                failure_status(&err),
                operation,
                err
            );
            false
        }
        Err(err) => {
            error!(
                "event=api_call module=api status={} operation={} error={}",
                failure_status(&err),
                operation,
                err
            );
            false
        }
    }
}

// `status=error` is reserved for storage failures.
fn failure_status(err: &StoreError) -> &'static str {
    if err.is_domain() {
        "rejected"
    } else {
        "error"
    }
}

fn or_empty<T>(operation: &str, result: StoreResult<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        error!(
            "event=api_call module=api status=error operation={} error={}",
            operation, err
        );
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::{failure_status, Library};
    use crate::config::StoreConfig;
    use crate::model::registration::RegistrationRecord;
    use crate::repo::error::StoreError;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn issue_and_return_report_plain_flags() {
        let dir = tempfile::tempdir().unwrap();
        let library = Library::open(&StoreConfig::new(dir.path()));

        assert!(library.issue("100", "Algebra", "Alice", day(2024, 1, 10)));
        assert!(!library.issue("100", "Algebra", "Bob", day(2024, 1, 11)));
        assert_eq!(library.list_outstanding().len(), 1);

        assert!(library.return_loan("100", day(2024, 2, 1)));
        assert!(!library.return_loan("100", day(2024, 2, 2)));
        assert!(!library.return_loan("missing", day(2024, 2, 2)));
        assert!(library.list_outstanding().is_empty());
        assert_eq!(library.load_loans().len(), 1);
    }

    #[test]
    fn malformed_loan_table_lists_empty_and_rejects_mutations() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path());
        std::fs::write(config.loan_path(), "BookID\n\"unterminated").unwrap();
        let library = Library::open(&config);

        assert!(library.load_loans().is_empty());
        assert!(library.list_outstanding().is_empty());
        assert!(!library.issue("1", "T", "U", day(2024, 1, 1)));
    }

    #[test]
    fn register_always_reports_success_on_writable_storage() {
        let dir = tempfile::tempdir().unwrap();
        let library = Library::open(&StoreConfig::new(dir.path()));
        let record = RegistrationRecord::new("", "", day(2010, 5, 4));

        assert!(library.register(&record));
        assert!(library.register(&record));
        assert_eq!(library.load_registrations(), vec![record.clone(), record]);
    }

    #[test]
    fn domain_outcomes_are_not_reported_as_errors() {
        assert_eq!(
            failure_status(&StoreError::BookIdConflict("100".to_string())),
            "rejected"
        );
        assert_eq!(
            failure_status(&StoreError::NotFound("100".to_string())),
            "rejected"
        );
        assert_eq!(
            failure_status(&StoreError::Unreadable {
                path: PathBuf::from("library_data.csv"),
                message: "missing column `BookID`".to_string(),
            }),
            "error"
        );
    }
}
