use serde::{Deserialize, Serialize};

use crate::tracker::TrackerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Three-valued projection of tracker-specific status codes.
///
/// `Open` and `Resolved` both count as "still active" for the decision table;
/// only `Closed` is terminal. Intermediate workflow states a tracker may grow
/// must be added to the projection allow-list explicitly.
pub enum IssueStatus {
    Open,
    Resolved,
    Closed,
}

/// Maps a raw tracker status code onto [`IssueStatus`].
///
/// The allow-list covers the legacy Jira numeric ids (`1`, `5`, `6`) and the
/// status names returned by the REST API. Anything else fails with
/// [`TrackerError::UnknownStatus`] instead of silently defaulting, so a
/// terminal state can never be misread as active or vice versa.
pub fn project_issue_status(raw: &str) -> Result<IssueStatus, TrackerError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "open" | "reopened" => Ok(IssueStatus::Open),
        "5" | "resolved" => Ok(IssueStatus::Resolved),
        "6" | "closed" | "done" => Ok(IssueStatus::Closed),
        _ => Err(TrackerError::UnknownStatus {
            code: raw.trim().to_string(),
        }),
    }
}

impl IssueStatus {
    /// True for statuses a human has not yet dispositioned.
    pub fn is_active(&self) -> bool {
        matches!(self, IssueStatus::Open | IssueStatus::Resolved)
    }
}
