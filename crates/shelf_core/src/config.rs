//! Store location and behavior settings.
//!
//! # Responsibility
//! - Hold the resolved data directory and table file names.
//! - Select which existing loans block issuing a book id again.
//!
//! # Invariants
//! - The core never searches for a writable directory; callers pass one in.
//! - `from_env` reads the environment once per call and never fails.

use std::path::{Path, PathBuf};

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "SHELF_DATA_DIR";
/// Default loan table file name.
pub const DEFAULT_LOAN_FILE_NAME: &str = "library_data.csv";
/// Default registration table file name.
pub const DEFAULT_REGISTRATION_FILE_NAME: &str = "registration_newuser.csv";

const FALLBACK_DIR_NAME: &str = "shelf";

/// Which existing loan rows count as a conflict when issuing a book id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictScope {
    /// Any row with the same book id blocks the issue, returned or not.
    #[default]
    AnyRecord,
    /// Only rows still on loan block the issue; returned books can be lent again.
    Outstanding,
}

/// Resolved configuration for both stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub loan_file_name: String,
    pub registration_file_name: String,
    pub conflict_scope: ConflictScope,
}

impl StoreConfig {
    /// Creates a config rooted at `data_dir` with default file names.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            loan_file_name: DEFAULT_LOAN_FILE_NAME.to_string(),
            registration_file_name: DEFAULT_REGISTRATION_FILE_NAME.to_string(),
            conflict_scope: ConflictScope::default(),
        }
    }

    /// Resolves the data directory from `SHELF_DATA_DIR`.
    ///
    /// Blank or unset values fall back to `<temp>/shelf`.
    pub fn from_env() -> Self {
        Self::new(resolve_data_dir(std::env::var(DATA_DIR_ENV).ok()))
    }

    pub fn with_conflict_scope(mut self, conflict_scope: ConflictScope) -> Self {
        self.conflict_scope = conflict_scope;
        self
    }

    pub fn with_file_names(
        mut self,
        loan_file_name: impl Into<String>,
        registration_file_name: impl Into<String>,
    ) -> Self {
        self.loan_file_name = loan_file_name.into();
        self.registration_file_name = registration_file_name.into();
        self
    }

    pub fn loan_path(&self) -> PathBuf {
        self.data_dir.join(&self.loan_file_name)
    }

    pub fn registration_path(&self) -> PathBuf {
        self.data_dir.join(&self.registration_file_name)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn resolve_data_dir(raw: Option<String>) -> PathBuf {
    if let Some(raw) = raw {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(FALLBACK_DIR_NAME)
}
