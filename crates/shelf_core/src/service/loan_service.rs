//! Loan use-case service.
//!
//! # Responsibility
//! - Issue books under the book-id uniqueness rule.
//! - Record returns against the first outstanding loan of a book.
//! - List loans that are currently issued.
//!
//! # Invariants
//! - Book ids are matched on their exact string form.
//! - Conflict checks and the append happen in one guarded table update, so
//!   two issues of the same id in one process cannot both succeed.
//! - Listing order is table order, which is issue order.

use crate::config::ConflictScope;
use crate::model::loan::LoanRecord;
use crate::repo::error::{StoreError, StoreResult};
use crate::repo::loan_repo::LoanRepository;
use chrono::NaiveDate;
use log::{info, warn};

/// Loan service facade over repository implementations.
pub struct LoanService<R: LoanRepository> {
    repo: R,
    conflict_scope: ConflictScope,
}

impl<R: LoanRepository> LoanService<R> {
    /// Creates a service with the default `ConflictScope::AnyRecord`.
    pub fn new(repo: R) -> Self {
        Self::with_conflict_scope(repo, ConflictScope::default())
    }

    pub fn with_conflict_scope(repo: R, conflict_scope: ConflictScope) -> Self {
        Self {
            repo,
            conflict_scope,
        }
    }

    pub fn conflict_scope(&self) -> ConflictScope {
        self.conflict_scope
    }

    /// Loads every loan in table order.
    pub fn load(&self) -> StoreResult<Vec<LoanRecord>> {
        self.repo.load_loans()
    }

    /// Replaces the loan table.
    pub fn save(&self, loans: &[LoanRecord]) -> StoreResult<()> {
        self.repo.save_loans(loans)
    }

    /// Issues a book to a borrower.
    ///
    /// # Errors
    /// - `StoreError::BookIdConflict` when an existing row blocks `book_id`
    ///   under the configured conflict scope; the table is not rewritten.
    /// - Storage errors from the table update.
    pub fn issue(
        &self,
        book_id: impl Into<String>,
        title: impl Into<String>,
        issued_to: impl Into<String>,
        issue_date: NaiveDate,
    ) -> StoreResult<()> {
        let loan = LoanRecord::issued(book_id, title, issued_to, issue_date);
        let scope = self.conflict_scope;

        let result = self.repo.update_loans(|loans| {
            if loans.iter().any(|existing| blocks_issue(existing, &loan.book_id, scope)) {
                return Err(StoreError::BookIdConflict(loan.book_id.clone()));
            }
            loans.push(loan.clone());
            Ok(loans.len())
        });

        match result {
            Ok(rows) => {
                info!(
                    "event=loan_issue module=service status=ok book_id={} rows={}",
                    loan.book_id, rows
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=loan_issue module=service status=error book_id={} error={}",
                    loan.book_id, err
                );
                Err(err)
            }
        }
    }

    /// Marks the first outstanding loan of `book_id` as returned.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when the id was never issued or every loan of
    ///   it is already returned; the table is not rewritten.
    /// - Storage errors from the table update.
    pub fn return_book(&self, book_id: &str, return_date: NaiveDate) -> StoreResult<()> {
        let result = self.repo.update_loans(|loans| {
            let loan = loans
                .iter_mut()
                .find(|loan| loan.has_book_id(book_id) && loan.is_outstanding())
                .ok_or_else(|| StoreError::NotFound(book_id.to_string()))?;
            loan.mark_returned(return_date);
            Ok(())
        });

        match &result {
            Ok(()) => info!(
                "event=loan_return module=service status=ok book_id={}",
                book_id
            ),
            Err(err) => warn!(
                "event=loan_return module=service status=error book_id={} error={}",
                book_id, err
            ),
        }
        result
    }

    /// Returns loans currently issued: a borrower is set and no return date.
    pub fn list_outstanding(&self) -> StoreResult<Vec<LoanRecord>> {
        let mut loans = self.repo.load_loans()?;
        loans.retain(LoanRecord::is_listed_as_issued);
        Ok(loans)
    }
}

fn blocks_issue(existing: &LoanRecord, book_id: &str, scope: ConflictScope) -> bool {
    if !existing.has_book_id(book_id) {
        return false;
    }
    match scope {
        ConflictScope::AnyRecord => true,
        ConflictScope::Outstanding => existing.is_outstanding(),
    }
}
