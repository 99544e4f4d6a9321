use crate::core::state::{Task, Ticks, Units};

/// One item of the synthetic workload, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    pub size: Units,
    pub duration: Ticks,
}

impl Job {
    pub fn new(size: Units, duration: Ticks) -> Self {
        Self { size, duration }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobOutcome {
    pub turnaround: Ticks,
    pub relative_turnaround: f64,
}

impl JobOutcome {
    /// `None` while the task has not completed.
    pub fn from_task(task: &Task) -> Option<Self> {
        let turnaround = task.turnaround()?;
        Some(Self {
            turnaround,
            relative_turnaround: turnaround as f64 / task.required_service as f64,
        })
    }
}
