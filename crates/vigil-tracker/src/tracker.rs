use thiserror::Error;

#[derive(Debug, Error)]
/// Failure taxonomy for issue-tracker collaborators.
///
/// `Unavailable` covers transport-level trouble (connect, timeout, 5xx) and is
/// recoverable on the next build cycle; the per-operation variants mean the
/// tracker actively rejected the call. `UnknownStatus` is a data-integrity
/// failure raised at the projection seam, never by the wire client itself.
pub enum TrackerError {
    #[error("issue tracker unavailable: {reason}")]
    Unavailable { reason: String },
    #[error("issue create rejected: {reason}")]
    CreateFailed { reason: String },
    #[error("status lookup failed for {ticket_id}: {reason}")]
    LookupFailed { ticket_id: String, reason: String },
    #[error("comment rejected for {ticket_id}: {reason}")]
    CommentFailed { ticket_id: String, reason: String },
    #[error("unknown issue status code '{code}'")]
    UnknownStatus { code: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fields for a new tracker issue, already rendered to final text.
pub struct NewIssueRequest {
    pub project_key: String,
    pub summary: String,
    pub description: String,
    pub assignee: Option<String>,
    pub components: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Identity of an issue the tracker just created.
pub struct CreatedTicket {
    pub id: String,
    pub key: String,
}

/// Capability surface the reconciliation core consumes from the tracker.
///
/// Implementations perform no retries and no status projection; raw status
/// codes are handed back untouched so the decision layer can fail loudly on
/// codes it does not recognize.
pub trait IssueTracker {
    fn create_issue(&self, request: &NewIssueRequest) -> Result<CreatedTicket, TrackerError>;
    fn issue_status(&self, ticket_id: &str) -> Result<String, TrackerError>;
    fn add_comment(&self, ticket_id: &str, body: &str) -> Result<(), TrackerError>;
}

/// Truncates a response body for inclusion in an error message.
pub fn truncate_for_error(body: &str, max_chars: usize) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let kept: String = trimmed.chars().take(max_chars).collect();
    format!("{kept} [truncated]")
}
