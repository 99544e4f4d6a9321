use log::trace;

use super::{
    error::TrialError,
    event::TrialEvent,
    observer::Observer,
    state::{TaskId, TaskState, Ticks, TrialCtx},
};
use crate::{
    placement::PlacementStrategy,
    scheduler::{Scheduler, Slice},
};

/// Admission/placement/dispatch loop for one trial.
///
/// Admission runs in passes over the Pending tasks in arrival order. A task
/// that fits becomes Resident at the current clock; a task that does not fit
/// makes the scheduler serve one Resident task before the pass moves on to
/// the next Pending task. Once nothing is Pending, every step is a dispatch
/// until the Resident set drains.
pub struct TrialCore<S: Scheduler, P: PlacementStrategy> {
    pub ctx: TrialCtx,
    pub scheduler: S,
    pub placement: P,
    observer: Observer,

    // Arrival index the current admission pass resumes from
    cursor: TaskId,
}

impl<S: Scheduler, P: PlacementStrategy> TrialCore<S, P> {
    pub fn new(ctx: TrialCtx, scheduler: S, placement: P) -> Self {
        Self {
            ctx,
            scheduler,
            placement,
            observer: Observer::new(),
            cursor: 0,
        }
    }

    pub fn step(&mut self) -> Result<Vec<TrialEvent>, TrialError> {
        let mut events = Vec::new();
        if self.ctx.all_tasks_completed() {
            return Ok(events);
        }

        match self.next_pending() {
            Some(task) => {
                self.cursor = task + 1;
                self.admit(task, &mut events)?;
            }
            None => self.dispatch_once(&mut events)?,
        }

        self.observer.observe(&self.ctx);
        Ok(events)
    }

    // Continue the current pass, or start a new one from the first Pending task
    fn next_pending(&self) -> Option<TaskId> {
        self.ctx
            .next_pending(self.cursor)
            .or_else(|| self.ctx.next_pending(0))
    }

    fn admit(&mut self, task: TaskId, events: &mut Vec<TrialEvent>) -> Result<(), TrialError> {
        let size = self.ctx.task(task).size;
        match self.ctx.pool.try_place(size, &mut self.placement) {
            Some(block) => {
                self.ctx.mark_resident(task, block);
                self.scheduler.enqueue(&self.ctx, task);
                self.emit(
                    events,
                    TrialEvent::TaskStateChange {
                        task,
                        from: TaskState::Pending,
                        to: TaskState::Resident { block },
                    },
                );
                Ok(())
            }
            None => {
                self.emit(events, TrialEvent::NoFit { task, size });
                self.dispatch_once(events)
            }
        }
    }

    fn dispatch_once(&mut self, events: &mut Vec<TrialEvent>) -> Result<(), TrialError> {
        let decision = self.scheduler.dispatch(&self.ctx)?;
        let task = decision.task;
        debug_assert!(
            self.ctx.task(task).is_resident(),
            "{} dispatched non-Resident task {task}",
            self.scheduler.name()
        );

        let remaining = self.ctx.task(task).remaining_service();
        let units = match decision.slice {
            Slice::Quantum(quantum) => quantum.max(1).min(remaining),
            Slice::ToCompletion => remaining,
        };
        let start = self.ctx.now;
        let units = self.ctx.serve(task, units);
        self.emit(events, TrialEvent::Served { task, start, units });

        let completed = self.ctx.task(task).remaining_service() == 0;
        if completed {
            let block = self.ctx.mark_completed(task);
            self.emit(
                events,
                TrialEvent::TaskStateChange {
                    task,
                    from: TaskState::Resident { block },
                    to: TaskState::Completed,
                },
            );
        }
        self.scheduler.stopping(&self.ctx, task, !completed);

        Ok(())
    }

    fn emit(&self, events: &mut Vec<TrialEvent>, event: TrialEvent) {
        trace!("t={} [{}] {:?}", self.ctx.now, self.scheduler.name(), event);
        events.push(event);
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
