//! The pure decision function at the heart of the reconciler.

use vigil_tracker::message_format::{render_back_to_green_comment, render_still_failing_comment};
use vigil_tracker::{BuildOutcome, BuildRef, IssueStatus, TrackerError};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Per-invocation input bundle. Rebuilt from the store and CI metadata on
/// every cycle; never persisted.
pub struct ReconcileContext {
    pub current: BuildOutcome,
    /// Absent for the first build ever observed for a job.
    pub previous: Option<BuildOutcome>,
    /// Ticket id currently persisted for the job, if any.
    pub tracked: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The single outcome of one decision. Executing an action is the only way
/// the persisted ticket record changes.
pub enum Action {
    CreateTicket,
    CommentOnTicket { ticket_id: String, body: String },
    /// A human closed the tracked ticket but the build is failing again:
    /// drop the stale record, then open a fresh ticket.
    ForgetThenCreate { ticket_id: String },
    ForgetTicket { ticket_id: String },
    NoOp,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::CreateTicket => "create_ticket",
            Action::CommentOnTicket { .. } => "comment_on_ticket",
            Action::ForgetThenCreate { .. } => "forget_then_create",
            Action::ForgetTicket { .. } => "forget_ticket",
            Action::NoOp => "no_op",
        }
    }
}

/// Decides the one action for this build transition.
///
/// Does no I/O beyond the injected `live_status` lookup, which is consulted
/// only when a tracked ticket exists and the outcome requires its state. A
/// lookup failure propagates untouched so the caller can skip the cycle
/// without mutating any state.
///
/// Rules, in priority order: aborted builds are inert; the first observed
/// build has no transition to react to; a failing build opens, comments on,
/// or replaces the tracked ticket depending on its live status; a passing
/// build comments on an active ticket (never auto-closes it) and forgets a
/// ticket a human already closed. A previous aborted build counts the same
/// as any other previous build when the current one fails; the historical
/// behavior is preserved deliberately.
pub fn decide<F>(
    context: &ReconcileContext,
    build: &BuildRef,
    mut live_status: F,
) -> Result<Action, TrackerError>
where
    F: FnMut(&str) -> Result<IssueStatus, TrackerError>,
{
    if context.current == BuildOutcome::Aborted {
        return Ok(Action::NoOp);
    }
    if context.previous.is_none() {
        return Ok(Action::NoOp);
    }

    match context.current {
        BuildOutcome::Failure => match context.tracked.as_deref() {
            None => Ok(Action::CreateTicket),
            Some(ticket_id) => {
                let status = live_status(ticket_id)?;
                if status.is_active() {
                    Ok(Action::CommentOnTicket {
                        ticket_id: ticket_id.to_string(),
                        body: render_still_failing_comment(build),
                    })
                } else {
                    Ok(Action::ForgetThenCreate {
                        ticket_id: ticket_id.to_string(),
                    })
                }
            }
        },
        BuildOutcome::Success => match context.tracked.as_deref() {
            None => Ok(Action::NoOp),
            Some(ticket_id) => {
                let status = live_status(ticket_id)?;
                if status.is_active() {
                    Ok(Action::CommentOnTicket {
                        ticket_id: ticket_id.to_string(),
                        body: render_back_to_green_comment(build),
                    })
                } else {
                    Ok(Action::ForgetTicket {
                        ticket_id: ticket_id.to_string(),
                    })
                }
            }
        },
        BuildOutcome::Aborted => Ok(Action::NoOp),
    }
}
