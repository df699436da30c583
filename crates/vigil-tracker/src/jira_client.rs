//! Blocking Jira REST v2 client implementing the [`IssueTracker`] capability.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tracker::{truncate_for_error, CreatedTicket, IssueTracker, NewIssueRequest, TrackerError};

const ERROR_BODY_MAX_CHARS: usize = 800;

#[derive(Debug, Clone)]
/// Credentials for the Jira REST API.
pub enum JiraAuth {
    /// Personal access token sent as a bearer header.
    Bearer { token: String },
    /// Username + API token, base64-encoded basic auth.
    Basic { user: String, secret: String },
}

/// Synchronous Jira client. Performs exactly one attempt per call; retrying
/// across build cycles is the reconciliation runtime's concern.
pub struct JiraRestClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct JiraCreateResponse {
    id: String,
    key: String,
}

#[derive(Debug, Deserialize)]
struct JiraIssueResponse {
    fields: JiraIssueFields,
}

#[derive(Debug, Deserialize)]
struct JiraIssueFields {
    status: JiraStatusField,
}

#[derive(Debug, Deserialize)]
struct JiraStatusField {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl JiraRestClient {
    pub fn new(base_url: &str, auth: JiraAuth, request_timeout_ms: u64) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("vigil-reconciler"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let auth_header = match auth {
            JiraAuth::Bearer { token } => format!("Bearer {}", token.trim()),
            JiraAuth::Basic { user, secret } => {
                let encoded = BASE64_STANDARD.encode(format!("{}:{}", user.trim(), secret.trim()));
                format!("Basic {encoded}")
            }
        };
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&auth_header)
                .context("invalid jira authorization header")?,
        );

        let http = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create jira rest client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn transport_error(operation: &str, error: reqwest::Error) -> TrackerError {
        TrackerError::Unavailable {
            reason: format!("jira {operation} request failed: {error}"),
        }
    }

    /// Renders a failure reason from a non-success response. 5xx responses
    /// count as tracker unavailability; anything else is a rejection the
    /// per-operation variants describe.
    fn response_failure(
        operation: &str,
        response: reqwest::blocking::Response,
    ) -> (bool, String) {
        let status = response.status();
        let body = response.text().unwrap_or_default();
        let reason = format!(
            "jira {operation} returned status {}: {}",
            status.as_u16(),
            truncate_for_error(&body, ERROR_BODY_MAX_CHARS)
        );
        (status.is_server_error(), reason)
    }
}

impl IssueTracker for JiraRestClient {
    fn create_issue(&self, request: &NewIssueRequest) -> Result<CreatedTicket, TrackerError> {
        let mut fields = json!({
            "project": { "key": request.project_key },
            "issuetype": { "name": "Bug" },
            "summary": request.summary,
            "description": request.description,
        });
        if let Some(assignee) = request.assignee.as_deref().filter(|name| !name.is_empty()) {
            fields["assignee"] = json!({ "name": assignee });
        }
        if !request.components.is_empty() {
            let components: Vec<Value> = request
                .components
                .iter()
                .map(|name| json!({ "name": name }))
                .collect();
            fields["components"] = Value::Array(components);
        }

        let response = self
            .http
            .post(format!("{}/rest/api/2/issue", self.base_url))
            .json(&json!({ "fields": fields }))
            .send()
            .map_err(|error| Self::transport_error("create issue", error))?;

        if response.status().is_success() {
            let created: JiraCreateResponse =
                response.json().map_err(|error| TrackerError::CreateFailed {
                    reason: format!("failed to decode jira create response: {error}"),
                })?;
            return Ok(CreatedTicket {
                id: created.id,
                key: created.key,
            });
        }

        let (unavailable, reason) = Self::response_failure("create issue", response);
        if unavailable {
            Err(TrackerError::Unavailable { reason })
        } else {
            Err(TrackerError::CreateFailed { reason })
        }
    }

    fn issue_status(&self, ticket_id: &str) -> Result<String, TrackerError> {
        let response = self
            .http
            .get(format!("{}/rest/api/2/issue/{}", self.base_url, ticket_id))
            .query(&[("fields", "status")])
            .send()
            .map_err(|error| Self::transport_error("status lookup", error))?;

        if response.status().is_success() {
            let issue: JiraIssueResponse =
                response.json().map_err(|error| TrackerError::LookupFailed {
                    ticket_id: ticket_id.to_string(),
                    reason: format!("failed to decode jira status response: {error}"),
                })?;
            return issue
                .fields
                .status
                .id
                .or(issue.fields.status.name)
                .ok_or_else(|| TrackerError::LookupFailed {
                    ticket_id: ticket_id.to_string(),
                    reason: "jira status response carried neither id nor name".to_string(),
                });
        }

        let (unavailable, reason) = Self::response_failure("status lookup", response);
        if unavailable {
            Err(TrackerError::Unavailable { reason })
        } else {
            Err(TrackerError::LookupFailed {
                ticket_id: ticket_id.to_string(),
                reason,
            })
        }
    }

    fn add_comment(&self, ticket_id: &str, body: &str) -> Result<(), TrackerError> {
        let response = self
            .http
            .post(format!(
                "{}/rest/api/2/issue/{}/comment",
                self.base_url, ticket_id
            ))
            .json(&json!({ "body": body }))
            .send()
            .map_err(|error| Self::transport_error("add comment", error))?;

        if response.status().is_success() {
            return Ok(());
        }

        let (unavailable, reason) = Self::response_failure("add comment", response);
        if unavailable {
            Err(TrackerError::Unavailable { reason })
        } else {
            Err(TrackerError::CommentFailed {
                ticket_id: ticket_id.to_string(),
                reason,
            })
        }
    }
}
