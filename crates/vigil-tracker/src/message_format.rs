//! Rendering helpers for issue summaries, descriptions, and progress comments.
//!
//! All renderers are pure string composition over [`BuildRef`]; the wiki-style
//! link markup (`[label|url]`) matches what Jira renders in issue bodies.

#[derive(Debug, Clone, PartialEq, Eq)]
/// Per-build metadata the CI layer passes through untouched.
pub struct BuildRef {
    pub job_name: String,
    pub build_number: String,
    pub build_url: String,
    pub root_url: String,
}

const NO_DESCRIPTION_PLACEHOLDER: &str = "No description is provided.";

/// Appends the console-log segment to a build url.
pub fn console_log_url(build_url: &str) -> String {
    if build_url.ends_with('/') {
        format!("{build_url}console")
    } else {
        format!("{build_url}/console")
    }
}

pub fn render_issue_summary(build: &BuildRef) -> String {
    format!("Build {} failing - {}", build.job_name, build.root_url)
}

pub fn render_issue_description(build: &BuildRef, operator_description: Option<&str>) -> String {
    let description = match operator_description {
        Some(text) if !text.trim().is_empty() => text.trim(),
        _ => NO_DESCRIPTION_PLACEHOLDER,
    };
    format!(
        "The build {} has failed.\n\n{}\n\n* First failed run: [{}|{}]\n** [console log|{}]",
        build.job_name,
        description,
        build.build_number,
        build.build_url,
        console_log_url(&build.build_url)
    )
}

pub fn render_still_failing_comment(build: &BuildRef) -> String {
    format!(
        "- Build is still failing.\n- Failed run: [{}|{}]\n** [console log|{}]",
        build.build_number,
        build.build_url,
        console_log_url(&build.build_url)
    )
}

pub fn render_back_to_green_comment(build: &BuildRef) -> String {
    format!(
        "- Build is passing but the ticket is still open.\n- Passed run: [{}|{}]\n** [console log|{}]",
        build.build_number,
        build.build_url,
        console_log_url(&build.build_url)
    )
}
