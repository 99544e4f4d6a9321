use rustc_hash::FxHashSet;

use super::{DispatchDecision, DispatchError, RR_QUANTUM, Scheduler, Slice, TaskId, TrialCtx};

/// Round robin with a one-unit quantum.
///
/// Every Resident task gets one unit per round before any task gets a second.
/// Within a round the most recently admitted unserved task goes first (higher
/// arrival index on equal admission time). Tasks admitted mid-round join the
/// current round.
#[derive(Debug, Default)]
pub struct RoundRobinScheduler {
    resident: Vec<TaskId>,
    served: FxHashSet<TaskId>,
}

impl RoundRobinScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn round_complete(&self) -> bool {
        self.served.len() >= self.resident.len()
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "RRq1"
    }

    fn enqueue(&mut self, _ctx: &TrialCtx, task: TaskId) {
        debug_assert!(!self.resident.contains(&task), "Task {task} enqueued twice");
        self.resident.push(task);
    }

    fn dispatch(&mut self, ctx: &TrialCtx) -> Result<DispatchDecision, DispatchError> {
        if self.resident.is_empty() {
            return Err(DispatchError::NoResidentTask);
        }
        if self.round_complete() {
            self.served.clear();
        }

        let task = self
            .resident
            .iter()
            .copied()
            .filter(|task| !self.served.contains(task))
            .max_by_key(|&task| (ctx.task(task).admitted_at, task))
            .ok_or(DispatchError::NoResidentTask)?;
        self.served.insert(task);

        Ok(DispatchDecision {
            task,
            slice: Slice::Quantum(RR_QUANTUM),
        })
    }

    // Unfinished tasks stay in `resident`; only completion removes them
    fn stopping(&mut self, _ctx: &TrialCtx, task: TaskId, runnable: bool) {
        if !runnable {
            self.resident.retain(|&t| t != task);
            self.served.remove(&task);
        }
    }
}
