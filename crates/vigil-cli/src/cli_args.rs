//! Argument surface for the `vigil` binary.
//!
//! Env fallbacks follow the variable names a Jenkins-style CI layer already
//! exports per build, so a pipeline step can usually invoke
//! `vigil reconcile` with only the tracker flags spelled out.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vigil_tracker::BuildOutcome;

#[derive(Debug, Parser)]
#[command(
    name = "vigil",
    about = "Reconciles CI build outcomes with issue-tracker tickets"
)]
pub struct VigilCli {
    #[command(subcommand)]
    pub command: VigilCommand,
}

#[derive(Debug, Subcommand)]
pub enum VigilCommand {
    /// Run one reconcile cycle for a completed build.
    Reconcile(ReconcileArgs),
    /// Print the ticket currently tracked for a job, if any.
    Status(StatusArgs),
}

fn parse_build_outcome(raw: &str) -> Result<BuildOutcome, String> {
    raw.parse()
}

#[derive(Debug, Args)]
pub struct ReconcileArgs {
    #[arg(long, env = "JOB_NAME")]
    pub job: String,
    #[arg(long, env = "BUILD_NUMBER")]
    pub build_number: String,
    #[arg(long, env = "BUILD_URL")]
    pub build_url: String,
    #[arg(long, env = "JENKINS_URL")]
    pub root_url: String,
    /// Outcome of the build that just completed.
    #[arg(long, env = "BUILD_RESULT", value_parser = parse_build_outcome)]
    pub current_result: BuildOutcome,
    /// Outcome of the previous build; omit for the first build of a job.
    #[arg(long, env = "PREVIOUS_BUILD_RESULT", value_parser = parse_build_outcome)]
    pub previous_result: Option<BuildOutcome>,

    #[arg(long, env = "JIRA_URL")]
    pub jira_url: String,
    /// API token; sent as bearer auth, or basic auth when --jira-user is set.
    #[arg(long, env = "JIRA_TOKEN")]
    pub jira_token: String,
    #[arg(long, env = "JIRA_USER")]
    pub jira_user: Option<String>,
    #[arg(long)]
    pub project_key: String,
    #[arg(long)]
    pub assignee: Option<String>,
    #[arg(long, value_delimiter = ',')]
    pub components: Vec<String>,
    /// Free-form text included in new issue descriptions.
    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, env = "VIGIL_STATE_DIR", default_value = ".vigil-state")]
    pub state_dir: PathBuf,
    #[arg(long, default_value_t = 10_000)]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    #[arg(long, env = "JOB_NAME")]
    pub job: String,
    #[arg(long, env = "VIGIL_STATE_DIR", default_value = ".vigil-state")]
    pub state_dir: PathBuf,
}
