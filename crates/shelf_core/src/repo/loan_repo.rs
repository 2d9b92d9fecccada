//! Loan repository contract and CSV implementation.
//!
//! # Responsibility
//! - Expose whole-table load/save and guarded mutation for loan rows.
//!
//! # Invariants
//! - Column order on disk is always `LOAN_COLUMNS`.
//! - Business rules (conflicts, return matching) live in the loan service.

use crate::config::StoreConfig;
use crate::model::loan::{LoanRecord, LOAN_COLUMNS};
use crate::repo::error::StoreResult;
use crate::repo::table::CsvTable;
use std::path::PathBuf;

/// Repository interface for the loan table.
pub trait LoanRepository {
    fn load_loans(&self) -> StoreResult<Vec<LoanRecord>>;
    fn save_loans(&self, loans: &[LoanRecord]) -> StoreResult<()>;
    fn update_loans<R, F>(&self, apply: F) -> StoreResult<R>
    where
        F: FnOnce(&mut Vec<LoanRecord>) -> StoreResult<R>;
}

/// CSV-file-backed loan repository.
pub struct CsvLoanRepository {
    table: CsvTable<LoanRecord>,
}

impl CsvLoanRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            table: CsvTable::new(path, LOAN_COLUMNS),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.loan_path())
    }
}

impl LoanRepository for CsvLoanRepository {
    fn load_loans(&self) -> StoreResult<Vec<LoanRecord>> {
        self.table.load()
    }

    fn save_loans(&self, loans: &[LoanRecord]) -> StoreResult<()> {
        self.table.save(loans)
    }

    fn update_loans<R, F>(&self, apply: F) -> StoreResult<R>
    where
        F: FnOnce(&mut Vec<LoanRecord>) -> StoreResult<R>,
    {
        self.table.modify(apply)
    }
}
