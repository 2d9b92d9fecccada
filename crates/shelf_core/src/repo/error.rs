//! Store error taxonomy shared by repositories and services.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a store operation.
///
/// `BookIdConflict` and `NotFound` are domain outcomes; every other variant
/// is a storage failure.
#[derive(Debug)]
pub enum StoreError {
    /// Reading, writing, renaming or creating a table file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A record could not be encoded into the table.
    Csv { path: PathBuf, source: csv::Error },
    /// The table exists but its content cannot be parsed.
    Unreadable { path: PathBuf, message: String },
    /// A loan with this book id already blocks a new issue.
    BookIdConflict(String),
    /// No outstanding loan with this book id.
    NotFound(String),
    /// A previous mutation panicked while holding the table guard.
    LockPoisoned(PathBuf),
}

impl StoreError {
    /// Whether this error is a domain outcome rather than a storage failure.
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::BookIdConflict(_) | Self::NotFound(_))
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error on `{}`: {source}", path.display()),
            Self::Csv { path, source } => {
                write!(f, "failed to encode table `{}`: {source}", path.display())
            }
            Self::Unreadable { path, message } => {
                write!(f, "unreadable table `{}`: {message}", path.display())
            }
            Self::BookIdConflict(book_id) => write!(f, "book id already exists: {book_id}"),
            Self::NotFound(book_id) => write!(f, "no outstanding loan for book id: {book_id}"),
            Self::LockPoisoned(path) => {
                write!(f, "table guard poisoned for `{}`", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}
