//! Registration use-case service.
//!
//! Registrations are accepted as given: no required-field check and no
//! duplicate detection. Only storage failures are reported.

use crate::model::registration::RegistrationRecord;
use crate::repo::error::StoreResult;
use crate::repo::registration_repo::RegistrationRepository;
use log::{info, warn};

/// Registration service facade over repository implementations.
pub struct RegistrationService<R: RegistrationRepository> {
    repo: R,
}

impl<R: RegistrationRepository> RegistrationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads every registration in table order.
    pub fn load(&self) -> StoreResult<Vec<RegistrationRecord>> {
        self.repo.load_registrations()
    }

    /// Replaces the registration table.
    pub fn save(&self, registrations: &[RegistrationRecord]) -> StoreResult<()> {
        self.repo.save_registrations(registrations)
    }

    /// Appends one registration.
    pub fn register(&self, registration: &RegistrationRecord) -> StoreResult<()> {
        match self.repo.append_registration(registration) {
            Ok(()) => {
                info!("event=registration_add module=service status=ok");
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=registration_add module=service status=error error={}",
                    err
                );
                Err(err)
            }
        }
    }
}
