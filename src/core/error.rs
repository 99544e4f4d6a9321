use std::fmt;

use super::state::{Ticks, Units};
use crate::scheduler::DispatchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialError {
    /// Size or duration below 1.
    InvalidJob {
        index: usize,
        size: Units,
        duration: Ticks,
    },
    /// No block is large enough to ever hold the task.
    JobTooLarge {
        index: usize,
        size: Units,
        largest_block: Units,
    },
    EmptyPool,
    ZeroCapacityBlock {
        index: usize,
    },
    /// Means were requested over a trial with no tasks.
    EmptyWorkload,
    /// The engine asked for a dispatch with nothing Resident. Always a bug.
    Dispatch(DispatchError),
}

impl fmt::Display for TrialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrialError::InvalidJob {
                index,
                size,
                duration,
            } => write!(
                f,
                "job {index} has size {size} and duration {duration}; both must be at least 1"
            ),
            TrialError::JobTooLarge {
                index,
                size,
                largest_block,
            } => write!(
                f,
                "job {index} of size {size} cannot fit in the largest block ({largest_block})"
            ),
            TrialError::EmptyPool => write!(f, "memory pool has no blocks"),
            TrialError::ZeroCapacityBlock { index } => {
                write!(f, "memory block {index} has zero capacity")
            }
            TrialError::EmptyWorkload => write!(f, "trial has no tasks to average"),
            TrialError::Dispatch(err) => write!(f, "dispatch failed: {err}"),
        }
    }
}

impl std::error::Error for TrialError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrialError::Dispatch(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DispatchError> for TrialError {
    fn from(err: DispatchError) -> Self {
        TrialError::Dispatch(err)
    }
}
