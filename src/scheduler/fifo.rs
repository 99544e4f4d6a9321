use std::collections::VecDeque;

use super::{DispatchDecision, DispatchError, Scheduler, Slice, TaskId, TrialCtx};

/// First-come first-served: earliest admission runs to completion, ties go
/// to the lower arrival index.
#[derive(Debug, Default)]
pub struct FifoScheduler {
    queue: VecDeque<TaskId>,
}

impl FifoScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for FifoScheduler {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn enqueue(&mut self, ctx: &TrialCtx, task: TaskId) {
        // Usually a push_back, but a skipped lower index can be admitted at the
        // same tick as a later arrival
        let key = (ctx.task(task).admitted_at, task);
        let pos = self
            .queue
            .partition_point(|&queued| (ctx.task(queued).admitted_at, queued) < key);
        self.queue.insert(pos, task);
    }

    fn dispatch(&mut self, _ctx: &TrialCtx) -> Result<DispatchDecision, DispatchError> {
        let task = self.queue.pop_front().ok_or(DispatchError::NoResidentTask)?;
        Ok(DispatchDecision {
            task,
            slice: Slice::ToCompletion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::FirstFit;

    fn admit(ctx: &mut TrialCtx, sched: &mut FifoScheduler, task: TaskId) {
        let size = ctx.task(task).size;
        let block = ctx.pool.try_place(size, &mut FirstFit).unwrap();
        ctx.mark_resident(task, block);
        sched.enqueue(ctx, task);
    }

    #[test]
    fn dispatches_by_admission_then_index() {
        let mut ctx = TrialCtx::new(&[16]).unwrap();
        for _ in 0..3 {
            ctx.create_task(1, 5).unwrap();
        }
        let mut sched = FifoScheduler::new();

        ctx.advance_time(2);
        admit(&mut ctx, &mut sched, 2);
        ctx.advance_time(3);
        admit(&mut ctx, &mut sched, 1);
        admit(&mut ctx, &mut sched, 0);

        let order: Vec<_> = (0..3).map(|_| sched.dispatch(&ctx).unwrap().task).collect();
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[test]
    fn empty_queue_is_underflow() {
        let ctx = TrialCtx::new(&[16]).unwrap();
        assert_eq!(
            FifoScheduler::new().dispatch(&ctx),
            Err(DispatchError::NoResidentTask)
        );
    }
}
