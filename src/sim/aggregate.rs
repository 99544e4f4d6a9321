use average::{Estimate, Mean, MeanWithError};

use super::job::JobOutcome;
use crate::core::TrialError;

/// Trial-level means over every task of one trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialSummary {
    pub mean_turnaround: f64,
    pub mean_relative_turnaround: f64,
    pub tasks: usize,
}

pub fn aggregate(outcomes: &[JobOutcome]) -> Result<TrialSummary, TrialError> {
    if outcomes.is_empty() {
        return Err(TrialError::EmptyWorkload);
    }

    let turnaround: Mean = outcomes.iter().map(|o| o.turnaround as f64).collect();
    let relative: Mean = outcomes.iter().map(|o| o.relative_turnaround).collect();
    Ok(TrialSummary {
        mean_turnaround: turnaround.estimate(),
        mean_relative_turnaround: relative.estimate(),
        tasks: outcomes.len(),
    })
}

/// Mean of trial means across repeated trials of one policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyStats {
    pub mean_turnaround: f64,
    pub turnaround_error: f64,
    pub mean_relative_turnaround: f64,
    pub relative_error: f64,
    pub trials: u64,
}

/// Accumulates trial summaries; owned by whoever repeats the trials.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    turnaround: MeanWithError,
    relative: MeanWithError,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, summary: &TrialSummary) {
        self.turnaround.add(summary.mean_turnaround);
        self.relative.add(summary.mean_relative_turnaround);
    }

    pub fn trials(&self) -> u64 {
        self.turnaround.len()
    }

    pub fn stats(&self) -> Option<PolicyStats> {
        if self.trials() == 0 {
            return None;
        }
        Some(PolicyStats {
            mean_turnaround: self.turnaround.mean(),
            turnaround_error: self.turnaround.error(),
            mean_relative_turnaround: self.relative.mean(),
            relative_error: self.relative.error(),
            trials: self.trials(),
        })
    }
}
