use crate::core::{TaskId, TaskState, Ticks, Units};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialEvent {
    TaskStateChange {
        task: TaskId,
        from: TaskState,
        to: TaskState,
    },
    // Placement found no block with enough free space
    NoFit {
        task: TaskId,
        size: Units,
    },
    Served {
        task: TaskId,
        start: Ticks,
        units: Ticks,
    },
}
