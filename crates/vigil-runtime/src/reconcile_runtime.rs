//! Orchestration of one reconcile cycle per completed build.

use std::path::PathBuf;

use thiserror::Error;
use vigil_tracker::message_format::{render_issue_description, render_issue_summary};
use vigil_tracker::{
    project_issue_status, BuildOutcome, BuildRef, IssueTracker, NewIssueRequest, TrackerError,
};

pub mod apply;
pub mod decision;
pub mod ticket_store;

#[cfg(test)]
mod tests;

use apply::{apply, ApplyOutcome};
use decision::{decide, ReconcileContext};
use ticket_store::{FileTicketStore, StoreError, TicketStore};

#[derive(Debug, Error)]
/// Cycle-level failure taxonomy. Tracker trouble is recoverable on the next
/// build; store trouble is fatal for the cycle and nothing is applied.
pub enum ReconcileError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
/// Operator-supplied settings for ticket creation and state placement.
pub struct ReconcileRuntimeConfig {
    pub state_dir: PathBuf,
    pub project_key: String,
    pub assignee: Option<String>,
    pub components: Vec<String>,
    /// Free-form text included in new issue descriptions.
    pub failure_description: Option<String>,
}

/// Runs reconcile cycles against a tracker and the per-job file store.
///
/// Precondition: builds of the same job arrive serialized (the CI layer does
/// not overlap a job's builds). That is what keeps "at most one tracked
/// ticket per job" maintainable without locking. Different jobs reconcile
/// independently since each owns its own store file.
pub struct ReconcileRuntime {
    config: ReconcileRuntimeConfig,
    tracker: Box<dyn IssueTracker>,
}

impl ReconcileRuntime {
    pub fn new(config: ReconcileRuntimeConfig, tracker: Box<dyn IssueTracker>) -> Self {
        Self { config, tracker }
    }

    fn new_issue_request(&self, build: &BuildRef) -> NewIssueRequest {
        NewIssueRequest {
            project_key: self.config.project_key.clone(),
            summary: render_issue_summary(build),
            description: render_issue_description(
                build,
                self.config.failure_description.as_deref(),
            ),
            assignee: self.config.assignee.clone(),
            components: self.config.components.clone(),
        }
    }

    /// Runs one cycle with the job's file-backed store.
    pub fn run_cycle(
        &self,
        build: &BuildRef,
        current: BuildOutcome,
        previous: Option<BuildOutcome>,
    ) -> Result<ApplyOutcome, ReconcileError> {
        let store = FileTicketStore::new(&self.config.state_dir, &build.job_name);
        self.run_cycle_with_store(build, current, previous, &store)
    }

    /// Runs one cycle against an explicit store. This is the seam tests use
    /// to substitute in-memory persistence.
    pub fn run_cycle_with_store(
        &self,
        build: &BuildRef,
        current: BuildOutcome,
        previous: Option<BuildOutcome>,
        store: &dyn TicketStore,
    ) -> Result<ApplyOutcome, ReconcileError> {
        let tracked = store.load()?;
        let context = ReconcileContext {
            current,
            previous,
            tracked,
        };

        let action = decide(&context, build, |ticket_id| {
            let raw = self.tracker.issue_status(ticket_id)?;
            project_issue_status(&raw)
        })
        .map_err(|error| {
            tracing::warn!(
                job = %build.job_name,
                error = %error,
                "skipping reconcile cycle, status lookup failed"
            );
            error
        })?;

        tracing::debug!(
            job = %build.job_name,
            current = %context.current,
            action = action.label(),
            "decided reconcile action"
        );

        let request = self.new_issue_request(build);
        let outcome = apply(&action, self.tracker.as_ref(), store, &request)?;
        match &outcome {
            ApplyOutcome::Created { ticket_key } => {
                tracing::info!(job = %build.job_name, ticket = %ticket_key, "created tracking ticket");
            }
            ApplyOutcome::Commented { ticket_id } => {
                tracing::info!(job = %build.job_name, ticket = %ticket_id, "commented on tracking ticket");
            }
            ApplyOutcome::Forgot { ticket_id } => {
                tracing::info!(job = %build.job_name, ticket = %ticket_id, "dropped closed tracking ticket");
            }
            ApplyOutcome::Replaced {
                forgotten,
                ticket_key,
            } => {
                tracing::info!(
                    job = %build.job_name,
                    previous_ticket = %forgotten,
                    ticket = %ticket_key,
                    "replaced closed tracking ticket"
                );
            }
            ApplyOutcome::Skipped => {
                tracing::debug!(job = %build.job_name, "nothing to reconcile");
            }
        }
        Ok(outcome)
    }
}
