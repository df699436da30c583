//! Side-effecting execution of a decided [`Action`].

use vigil_tracker::{IssueTracker, NewIssueRequest};

use super::decision::Action;
use super::ticket_store::TicketStore;
use super::ReconcileError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// What a successful apply did, for cycle reporting.
pub enum ApplyOutcome {
    Created { ticket_key: String },
    Commented { ticket_id: String },
    Forgot { ticket_id: String },
    Replaced { forgotten: String, ticket_key: String },
    Skipped,
}

fn create_and_track(
    tracker: &dyn IssueTracker,
    store: &dyn TicketStore,
    create_request: &NewIssueRequest,
) -> Result<String, ReconcileError> {
    let ticket = tracker.create_issue(create_request)?;
    store.save(&ticket.key)?;
    Ok(ticket.key)
}

/// Executes one action against the tracker and the per-job store.
///
/// Store-mutation rules: create persists the returned key in the same step,
/// so a re-run with identical inputs observes the new record and cannot
/// double-create; a failed comment leaves the store untouched, keeping the
/// ticket association alive for the next build to retry; forgetting clears
/// the store regardless of anything remote. In the replace case the store is
/// cleared before the create is attempted, so a crash between the two steps
/// leaves the job with no tracked ticket, which simply re-evaluates to
/// CreateTicket on the next cycle.
pub fn apply(
    action: &Action,
    tracker: &dyn IssueTracker,
    store: &dyn TicketStore,
    create_request: &NewIssueRequest,
) -> Result<ApplyOutcome, ReconcileError> {
    match action {
        Action::CreateTicket => {
            let ticket_key = create_and_track(tracker, store, create_request)?;
            Ok(ApplyOutcome::Created { ticket_key })
        }
        Action::CommentOnTicket { ticket_id, body } => {
            tracker.add_comment(ticket_id, body)?;
            Ok(ApplyOutcome::Commented {
                ticket_id: ticket_id.clone(),
            })
        }
        Action::ForgetTicket { ticket_id } => {
            store.clear()?;
            Ok(ApplyOutcome::Forgot {
                ticket_id: ticket_id.clone(),
            })
        }
        Action::ForgetThenCreate { ticket_id } => {
            store.clear()?;
            let ticket_key = create_and_track(tracker, store, create_request)?;
            Ok(ApplyOutcome::Replaced {
                forgotten: ticket_id.clone(),
                ticket_key,
            })
        }
        Action::NoOp => Ok(ApplyOutcome::Skipped),
    }
}
