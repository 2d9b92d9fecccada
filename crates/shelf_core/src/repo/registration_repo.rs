//! Registration repository contract and CSV implementation.

use crate::config::StoreConfig;
use crate::model::registration::{RegistrationRecord, REGISTRATION_COLUMNS};
use crate::repo::error::StoreResult;
use crate::repo::table::CsvTable;
use std::path::PathBuf;

/// Repository interface for the registration table.
pub trait RegistrationRepository {
    fn load_registrations(&self) -> StoreResult<Vec<RegistrationRecord>>;
    fn save_registrations(&self, registrations: &[RegistrationRecord]) -> StoreResult<()>;
    fn append_registration(&self, registration: &RegistrationRecord) -> StoreResult<()>;
}

/// CSV-file-backed registration repository.
pub struct CsvRegistrationRepository {
    table: CsvTable<RegistrationRecord>,
}

impl CsvRegistrationRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            table: CsvTable::new(path, REGISTRATION_COLUMNS),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.registration_path())
    }
}

impl RegistrationRepository for CsvRegistrationRepository {
    fn load_registrations(&self) -> StoreResult<Vec<RegistrationRecord>> {
        self.table.load()
    }

    fn save_registrations(&self, registrations: &[RegistrationRecord]) -> StoreResult<()> {
        self.table.save(registrations)
    }

    fn append_registration(&self, registration: &RegistrationRecord) -> StoreResult<()> {
        self.table.modify(|registrations| {
            registrations.push(registration.clone());
            Ok(())
        })
    }
}
