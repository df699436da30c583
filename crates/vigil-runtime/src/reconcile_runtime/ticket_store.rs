//! Per-job persistence of the tracked ticket id.

use std::path::{Path, PathBuf};

use thiserror::Error;
use vigil_core::write_text_atomic;

#[derive(Debug, Error)]
#[error("ticket store unavailable at {path}: {reason}")]
/// Persistence failure. Treated as fatal for the cycle: an action whose
/// outcome cannot be recorded risks a duplicate ticket on the next build.
pub struct StoreError {
    pub path: String,
    pub reason: String,
}

/// Durable mapping from one job to at most one tracked ticket id.
///
/// Absence means "no tracked ticket". Builds for the same job are assumed
/// serialized by the CI orchestrator; the store only has to keep different
/// jobs from interfering with each other.
pub trait TicketStore {
    fn load(&self) -> Result<Option<String>, StoreError>;
    fn save(&self, ticket_id: &str) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// Replaces path-hostile characters in a job name.
pub fn sanitize_job_for_path(raw: &str) -> String {
    raw.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// One single-line file per job directory holding the ticket key.
pub struct FileTicketStore {
    path: PathBuf,
}

impl FileTicketStore {
    pub fn new(state_dir: &Path, job_name: &str) -> Self {
        let path = state_dir
            .join(sanitize_job_for_path(job_name))
            .join("tracked-ticket");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn store_error(&self, reason: impl ToString) -> StoreError {
        StoreError {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl TicketStore for FileTicketStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let ticket = raw.trim();
                if ticket.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(ticket.to_string()))
                }
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(self.store_error(error)),
        }
    }

    fn save(&self, ticket_id: &str) -> Result<(), StoreError> {
        write_text_atomic(&self.path, &format!("{ticket_id}\n"))
            .map_err(|error| self.store_error(error))
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(self.store_error(error)),
        }
    }
}
