//! Whole-file CSV table persistence.
//!
//! # Responsibility
//! - Read and rewrite one comma-separated table as a unit.
//! - Serialize read-modify-write cycles on the same table.
//!
//! # Invariants
//! - Every operation on a table holds its guard for the full read/write.
//! - Guards are shared per file path across the process, so separate handles
//!   on one file serialize with each other.
//! - Files are written with a UTF-8 BOM and the fixed header row, even when
//!   empty; a leading BOM is optional on read.
//! - A malformed table is never overwritten: `load` degrades to an empty
//!   result, `modify` fails with `StoreError::Unreadable`.
//! - Writes land in a sibling temp file that is renamed over the target.

use crate::repo::error::{StoreError, StoreResult};
use log::{error, info};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tempfile::NamedTempFile;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

static TABLE_GUARDS: Lazy<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = Lazy::new(Default::default);

enum TableContent<T> {
    Missing,
    Parsed(Vec<T>),
    Malformed(String),
}

/// One CSV file holding rows of `T` under a fixed header.
pub struct CsvTable<T> {
    path: PathBuf,
    columns: &'static [&'static str],
    guard: Arc<Mutex<()>>,
    _record: PhantomData<fn() -> T>,
}

impl<T> CsvTable<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a table handle; no file access happens until first use.
    pub fn new(path: impl Into<PathBuf>, columns: &'static [&'static str]) -> Self {
        let path = path.into();
        Self {
            guard: shared_guard(&path),
            path,
            columns,
            _record: PhantomData,
        }
    }

    /// Loads every row in file order.
    ///
    /// # Side effects
    /// - Creates a header-only table when the file is absent.
    /// - Logs `status=error` and returns no rows when the file is malformed;
    ///   the file itself is left as is.
    pub fn load(&self) -> StoreResult<Vec<T>> {
        let _guard = self.lock()?;
        let started_at = Instant::now();

        match self.read_content()? {
            TableContent::Parsed(records) => {
                info!(
                    "event=table_load module=repo status=ok table={} rows={} duration_ms={}",
                    self.table_name(),
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(records)
            }
            TableContent::Missing => {
                self.write_records(&[])?;
                info!(
                    "event=table_create module=repo status=ok table={}",
                    self.table_name()
                );
                Ok(Vec::new())
            }
            TableContent::Malformed(message) => {
                error!(
                    "event=table_load module=repo status=error table={} error_code=table_unreadable error={}",
                    self.table_name(),
                    message
                );
                Ok(Vec::new())
            }
        }
    }

    /// Replaces the whole table with `records`.
    pub fn save(&self, records: &[T]) -> StoreResult<()> {
        let _guard = self.lock()?;
        self.write_records(records)
    }

    /// Runs one read-modify-write cycle under the table guard.
    ///
    /// The table is rewritten only when `apply` returns `Ok`.
    ///
    /// # Errors
    /// - `StoreError::Unreadable` when the current file cannot be parsed.
    /// - Any error returned by `apply`, with nothing written.
    /// - I/O and encoding failures from the rewrite.
    pub fn modify<R, F>(&self, apply: F) -> StoreResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> StoreResult<R>,
    {
        let _guard = self.lock()?;

        let mut records = match self.read_content()? {
            TableContent::Missing => Vec::new(),
            TableContent::Parsed(records) => records,
            TableContent::Malformed(message) => {
                error!(
                    "event=table_modify module=repo status=error table={} error_code=table_unreadable error={}",
                    self.table_name(),
                    message
                );
                return Err(StoreError::Unreadable {
                    path: self.path.clone(),
                    message,
                });
            }
        };

        let outcome = apply(&mut records)?;
        self.write_records(&records)?;
        Ok(outcome)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, ()>> {
        self.guard
            .lock()
            .map_err(|_| StoreError::LockPoisoned(self.path.clone()))
    }

    fn read_content(&self) -> StoreResult<TableContent<T>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(TableContent::Missing),
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        Ok(match decode_records(&bytes, self.columns) {
            Ok(records) => TableContent::Parsed(records),
            Err(message) => TableContent::Malformed(message),
        })
    }

    fn write_records(&self, records: &[T]) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.write_records_inner(records);
        match &result {
            Ok(()) => info!(
                "event=table_save module=repo status=ok table={} rows={} duration_ms={}",
                self.table_name(),
                records.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=table_save module=repo status=error table={} duration_ms={} error_code=table_write_failed error={}",
                self.table_name(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn write_records_inner(&self, records: &[T]) -> StoreResult<()> {
        let bytes = encode_records(records, self.columns).map_err(|source| StoreError::Csv {
            path: self.path.clone(),
            source,
        })?;

        let dir = self.parent_dir();
        std::fs::create_dir_all(&dir).map_err(|err| StoreError::io(&dir, err))?;

        let mut staged = NamedTempFile::new_in(&dir).map_err(|err| StoreError::io(&dir, err))?;
        staged
            .write_all(&bytes)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|err| StoreError::io(staged.path(), err))?;
        staged
            .persist(&self.path)
            .map_err(|err| StoreError::io(&self.path, err.error))?;
        Ok(())
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn table_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

// The registry only maps paths to guards; a panic while holding it cannot
// leave a half-updated entry, so poisoning is ignored.
fn shared_guard(path: &Path) -> Arc<Mutex<()>> {
    let mut guards = TABLE_GUARDS.lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(guards.entry(guard_key(path)).or_default())
}

fn guard_key(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn decode_records<T: DeserializeOwned>(bytes: &[u8], columns: &[&str]) -> Result<Vec<T>, String> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(body);
    let headers = reader.headers().map_err(|err| err.to_string())?;
    for column in columns {
        if !headers.iter().any(|header| header == *column) {
            return Err(format!("missing column `{column}`"));
        }
    }

    reader
        .deserialize::<T>()
        .map(|row| row.map_err(|err| err.to_string()))
        .collect()
}

fn encode_records<T: Serialize>(records: &[T], columns: &[&str]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(UTF8_BOM.to_vec());
    writer.write_record(columns)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}
