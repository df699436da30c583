//! Issue-tracker domain types and the Jira REST collaborator for Vigil.
//!
//! This crate holds everything the reconciliation runtime consumes from the
//! tracker side: build/issue enums, the status projection, message rendering
//! helpers, the capability trait, and the concrete Jira REST client.

pub mod build_outcome;
pub mod issue_status;
pub mod jira_client;
pub mod message_format;
pub mod tracker;

pub use build_outcome::BuildOutcome;
pub use issue_status::{project_issue_status, IssueStatus};
pub use jira_client::{JiraAuth, JiraRestClient};
pub use message_format::BuildRef;
pub use tracker::{CreatedTicket, IssueTracker, NewIssueRequest, TrackerError};
