//! Book loan domain model.
//!
//! # Responsibility
//! - Define the persisted loan row and its column layout.
//! - Provide the key-matching and outstanding-state helpers used by the
//!   loan service.
//!
//! # Invariants
//! - `book_id` is compared on its exact string form; `"007"` and `"7"` are
//!   different books.
//! - At most one record per `book_id` has `return_date == None`.
//! - Records are never removed; returning a book only fills `return_date`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed column order of the loan table.
pub const LOAN_COLUMNS: &[&str] = &["BookID", "Title", "IssuedTo", "IssueDate", "ReturnDate"];

/// One row of the loan table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    /// Natural key of the lent item.
    #[serde(rename = "BookID")]
    pub book_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    /// Borrower name.
    #[serde(rename = "IssuedTo")]
    pub issued_to: String,
    #[serde(rename = "IssueDate", with = "crate::model::date_format")]
    pub issue_date: NaiveDate,
    /// `None` while the book is still on loan.
    #[serde(rename = "ReturnDate", with = "crate::model::date_format::option")]
    pub return_date: Option<NaiveDate>,
}

impl LoanRecord {
    /// Creates a freshly issued loan with no return date.
    pub fn issued(
        book_id: impl Into<String>,
        title: impl Into<String>,
        issued_to: impl Into<String>,
        issue_date: NaiveDate,
    ) -> Self {
        Self {
            book_id: book_id.into(),
            title: title.into(),
            issued_to: issued_to.into(),
            issue_date,
            return_date: None,
        }
    }

    /// Returns whether the book is still on loan.
    pub fn is_outstanding(&self) -> bool {
        self.return_date.is_none()
    }

    /// Exact string comparison on the natural key.
    pub fn has_book_id(&self, book_id: &str) -> bool {
        self.book_id == book_id
    }

    /// Whether this row belongs in the "currently issued" listing.
    ///
    /// Rows without a borrower are skipped even when unreturned.
    pub fn is_listed_as_issued(&self) -> bool {
        self.is_outstanding() && !self.issued_to.is_empty()
    }

    /// Marks the loan returned on `return_date`.
    pub fn mark_returned(&mut self, return_date: NaiveDate) {
        self.return_date = Some(return_date);
    }
}
