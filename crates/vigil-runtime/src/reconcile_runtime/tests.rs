//! Tests for the reconcile decision table, action execution, and store behavior.

use std::sync::Mutex;

use vigil_tracker::{
    BuildOutcome, BuildRef, CreatedTicket, IssueStatus, IssueTracker, NewIssueRequest,
    TrackerError,
};

use super::apply::{apply, ApplyOutcome};
use super::decision::{decide, Action, ReconcileContext};
use super::ticket_store::{FileTicketStore, StoreError, TicketStore};
use super::{ReconcileError, ReconcileRuntime, ReconcileRuntimeConfig};

fn test_build() -> BuildRef {
    BuildRef {
        job_name: "nightly-smoke".to_string(),
        build_number: "412".to_string(),
        build_url: "https://ci.example.com/job/nightly-smoke/412/".to_string(),
        root_url: "https://ci.example.com/".to_string(),
    }
}

fn test_create_request() -> NewIssueRequest {
    NewIssueRequest {
        project_key: "OPS".to_string(),
        summary: "Build nightly-smoke failing - https://ci.example.com/".to_string(),
        description: "The build nightly-smoke has failed.".to_string(),
        assignee: None,
        components: Vec::new(),
    }
}

fn context(
    current: BuildOutcome,
    previous: Option<BuildOutcome>,
    tracked: Option<&str>,
) -> ReconcileContext {
    ReconcileContext {
        current,
        previous,
        tracked: tracked.map(ToOwned::to_owned),
    }
}

/// Status lookup double that must never be consulted.
fn no_lookup(_ticket_id: &str) -> Result<IssueStatus, TrackerError> {
    panic!("live status must not be consulted for this decision");
}

/// Scripted tracker double recording every remote effect, with a shared
/// operation log so ordering against the store can be asserted.
#[derive(Default)]
struct StubTracker {
    next_ticket_key: Option<&'static str>,
    fail_create: bool,
    fail_comment: bool,
    created: Mutex<Vec<NewIssueRequest>>,
    comments: Mutex<Vec<(String, String)>>,
    operations: Mutex<Vec<String>>,
}

impl StubTracker {
    fn with_next_key(key: &'static str) -> Self {
        Self {
            next_ticket_key: Some(key),
            ..Self::default()
        }
    }

    fn created_count(&self) -> usize {
        self.created.lock().expect("created lock").len()
    }

    fn comment_log(&self) -> Vec<(String, String)> {
        self.comments.lock().expect("comments lock").clone()
    }

    fn operation_log(&self) -> Vec<String> {
        self.operations.lock().expect("operations lock").clone()
    }
}

impl IssueTracker for StubTracker {
    fn create_issue(&self, request: &NewIssueRequest) -> Result<CreatedTicket, TrackerError> {
        self.operations
            .lock()
            .expect("operations lock")
            .push("create".to_string());
        if self.fail_create {
            return Err(TrackerError::CreateFailed {
                reason: "scripted rejection".to_string(),
            });
        }
        let key = self.next_ticket_key.unwrap_or("OPS-1");
        self.created
            .lock()
            .expect("created lock")
            .push(request.clone());
        Ok(CreatedTicket {
            id: "10000".to_string(),
            key: key.to_string(),
        })
    }

    fn issue_status(&self, ticket_id: &str) -> Result<String, TrackerError> {
        // Apply never consults live status; decide() receives its own lookup.
        Err(TrackerError::LookupFailed {
            ticket_id: ticket_id.to_string(),
            reason: "status lookup not scripted".to_string(),
        })
    }

    fn add_comment(&self, ticket_id: &str, body: &str) -> Result<(), TrackerError> {
        self.operations
            .lock()
            .expect("operations lock")
            .push("comment".to_string());
        if self.fail_comment {
            return Err(TrackerError::CommentFailed {
                ticket_id: ticket_id.to_string(),
                reason: "scripted rejection".to_string(),
            });
        }
        self.comments
            .lock()
            .expect("comments lock")
            .push((ticket_id.to_string(), body.to_string()));
        Ok(())
    }
}

/// In-memory store double sharing the tracker's operation log.
struct MemoryTicketStore<'a> {
    slot: Mutex<Option<String>>,
    operations: Option<&'a Mutex<Vec<String>>>,
}

impl<'a> MemoryTicketStore<'a> {
    fn empty() -> Self {
        Self {
            slot: Mutex::new(None),
            operations: None,
        }
    }

    fn tracking(ticket_id: &str) -> Self {
        Self {
            slot: Mutex::new(Some(ticket_id.to_string())),
            operations: None,
        }
    }

    fn with_operation_log(self, operations: &'a Mutex<Vec<String>>) -> Self {
        Self {
            operations: Some(operations),
            ..self
        }
    }

    fn tracked(&self) -> Option<String> {
        self.slot.lock().expect("slot lock").clone()
    }

    fn log(&self, operation: &str) {
        if let Some(operations) = self.operations {
            operations
                .lock()
                .expect("operations lock")
                .push(operation.to_string());
        }
    }
}

impl TicketStore for MemoryTicketStore<'_> {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.tracked())
    }

    fn save(&self, ticket_id: &str) -> Result<(), StoreError> {
        self.log("store.save");
        *self.slot.lock().expect("slot lock") = Some(ticket_id.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.log("store.clear");
        *self.slot.lock().expect("slot lock") = None;
        Ok(())
    }
}
