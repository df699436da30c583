//! `vigil` runs one reconcile cycle per completed CI build.

mod bootstrap_helpers;
mod cli_args;

use anyhow::{Context, Result};
use clap::Parser;
use vigil_runtime::{
    ApplyOutcome, FileTicketStore, ReconcileRuntime, ReconcileRuntimeConfig, TicketStore,
};
use vigil_tracker::{BuildRef, JiraAuth, JiraRestClient};

use crate::cli_args::{ReconcileArgs, StatusArgs, VigilCli, VigilCommand};

fn main() {
    bootstrap_helpers::init_tracing();
    let cli = VigilCli::parse();
    let result = match cli.command {
        VigilCommand::Reconcile(args) => run_reconcile(args),
        VigilCommand::Status(args) => run_status(args),
    };
    if let Err(error) = result {
        tracing::error!(error = format!("{error:#}"), "vigil cycle failed");
        std::process::exit(1);
    }
}

fn run_reconcile(args: ReconcileArgs) -> Result<()> {
    let auth = match args.jira_user.as_deref() {
        Some(user) => JiraAuth::Basic {
            user: user.to_string(),
            secret: args.jira_token.clone(),
        },
        None => JiraAuth::Bearer {
            token: args.jira_token.clone(),
        },
    };
    let tracker = JiraRestClient::new(&args.jira_url, auth, args.request_timeout_ms)
        .context("failed to construct jira client")?;

    let runtime = ReconcileRuntime::new(
        ReconcileRuntimeConfig {
            state_dir: args.state_dir,
            project_key: args.project_key,
            assignee: args.assignee,
            components: args.components,
            failure_description: args.description,
        },
        Box::new(tracker),
    );
    let build = BuildRef {
        job_name: args.job,
        build_number: args.build_number,
        build_url: args.build_url,
        root_url: args.root_url,
    };

    let outcome = runtime.run_cycle(&build, args.current_result, args.previous_result)?;
    println!("{}", describe_outcome(&outcome));
    Ok(())
}

fn run_status(args: StatusArgs) -> Result<()> {
    let store = FileTicketStore::new(&args.state_dir, &args.job);
    match store.load()? {
        Some(ticket_id) => println!("{}: tracking {ticket_id}", args.job),
        None => println!("{}: no tracked ticket", args.job),
    }
    Ok(())
}

fn describe_outcome(outcome: &ApplyOutcome) -> String {
    match outcome {
        ApplyOutcome::Created { ticket_key } => format!("created ticket {ticket_key}"),
        ApplyOutcome::Commented { ticket_id } => format!("commented on ticket {ticket_id}"),
        ApplyOutcome::Forgot { ticket_id } => format!("dropped closed ticket {ticket_id}"),
        ApplyOutcome::Replaced {
            forgotten,
            ticket_key,
        } => format!("replaced closed ticket {forgotten} with {ticket_key}"),
        ApplyOutcome::Skipped => "nothing to reconcile".to_string(),
    }
}
