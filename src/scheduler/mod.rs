pub mod fifo;
pub mod priq;
pub mod round_robin;

use std::fmt;

use crate::core::{TaskId, Ticks, TrialCtx};
pub use fifo::FifoScheduler;
pub use priq::PriqScheduler;
pub use round_robin::RoundRobinScheduler;

pub const RR_QUANTUM: Ticks = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    NoResidentTask,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::NoResidentTask => write!(f, "no Resident task to dispatch"),
        }
    }
}

impl std::error::Error for DispatchError {}

/// How much service the engine grants the dispatched task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Quantum(Ticks),
    ToCompletion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchDecision {
    pub task: TaskId,
    pub slice: Slice,
}

pub trait Scheduler {
    fn name(&self) -> &'static str;

    /// `task` just became Resident.
    fn enqueue(&mut self, ctx: &TrialCtx, task: TaskId);

    /// Picks the Resident task to serve next. The engine never calls this with
    /// an empty Resident set, so an error here means the engine is broken.
    fn dispatch(&mut self, ctx: &TrialCtx) -> Result<DispatchDecision, DispatchError>;

    /// `task` finished its slice. `runnable` is false once it has completed
    /// and left memory.
    fn stopping(&mut self, ctx: &TrialCtx, task: TaskId, runnable: bool) {
        if runnable {
            self.enqueue(ctx, task);
        }
    }
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn enqueue(&mut self, ctx: &TrialCtx, task: TaskId) {
        (**self).enqueue(ctx, task)
    }

    fn dispatch(&mut self, ctx: &TrialCtx) -> Result<DispatchDecision, DispatchError> {
        (**self).dispatch(ctx)
    }

    fn stopping(&mut self, ctx: &TrialCtx, task: TaskId, runnable: bool) {
        (**self).stopping(ctx, task, runnable)
    }
}

/// Which SRT rule to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SrtMode {
    /// Smallest remaining service, re-evaluated after every unit.
    #[default]
    Preemptive,
    /// Smallest total duration, run to completion. Selects exactly like SPN.
    ShortestTotal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Fcfs,
    RoundRobin,
    Spn,
    Srt,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Fcfs,
        PolicyKind::RoundRobin,
        PolicyKind::Spn,
        PolicyKind::Srt,
    ];

    pub fn build(self, srt: SrtMode) -> Box<dyn Scheduler> {
        match self {
            PolicyKind::Fcfs => Box::new(FifoScheduler::new()),
            PolicyKind::RoundRobin => Box::new(RoundRobinScheduler::new()),
            PolicyKind::Spn => Box::new(PriqScheduler::shortest_process_next()),
            PolicyKind::Srt => match srt {
                SrtMode::Preemptive => Box::new(PriqScheduler::shortest_remaining_time()),
                SrtMode::ShortestTotal => Box::new(PriqScheduler::shortest_total_time()),
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PolicyKind::Fcfs => "FCFS",
            PolicyKind::RoundRobin => "RRq1",
            PolicyKind::Spn => "SPN",
            PolicyKind::Srt => "SRT",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
