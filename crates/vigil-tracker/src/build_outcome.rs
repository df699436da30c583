use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Result of one completed build, as reported by the CI layer.
pub enum BuildOutcome {
    Success,
    Failure,
    Aborted,
}

impl BuildOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            BuildOutcome::Success => "success",
            BuildOutcome::Failure => "failure",
            BuildOutcome::Aborted => "aborted",
        }
    }
}

impl fmt::Display for BuildOutcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

impl FromStr for BuildOutcome {
    type Err = String;

    // Accepts the Jenkins spellings (SUCCESS/FAILURE/ABORTED) case-insensitively.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(BuildOutcome::Success),
            "failure" | "failed" => Ok(BuildOutcome::Failure),
            "aborted" => Ok(BuildOutcome::Aborted),
            _ => Err(format!(
                "unknown build outcome '{raw}', expected success, failure, or aborted"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_build_outcome_parses_jenkins_spellings() {
        assert_eq!("SUCCESS".parse::<BuildOutcome>(), Ok(BuildOutcome::Success));
        assert_eq!("Failure".parse::<BuildOutcome>(), Ok(BuildOutcome::Failure));
        assert_eq!(" aborted ".parse::<BuildOutcome>(), Ok(BuildOutcome::Aborted));
        assert_eq!("failed".parse::<BuildOutcome>(), Ok(BuildOutcome::Failure));
    }

    #[test]
    fn unit_build_outcome_rejects_unknown_values() {
        let error = "unstable".parse::<BuildOutcome>().expect_err("must fail");
        assert!(error.contains("unknown build outcome"));
    }

    #[test]
    fn unit_build_outcome_labels_round_trip() {
        for outcome in [
            BuildOutcome::Success,
            BuildOutcome::Failure,
            BuildOutcome::Aborted,
        ] {
            assert_eq!(outcome.label().parse::<BuildOutcome>(), Ok(outcome));
        }
    }
}
