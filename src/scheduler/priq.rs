use keyed_priority_queue::KeyedPriorityQueue;

use super::{DispatchDecision, DispatchError, RR_QUANTUM, Scheduler, Slice, TaskId, TrialCtx};
use crate::core::{Task, Ticks};

#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct ServiceKey {
    pub service: Ticks,
    pub task: TaskId,
}

// KeyedPriorityQueue is a max-heap, so flip ServiceKey's Ord to pop the shortest first
impl PartialOrd for ServiceKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ServiceKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (other.service, other.task).cmp(&(self.service, self.task))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ServiceMeasure {
    Total,
    Remaining,
}

impl ServiceMeasure {
    fn of(self, task: &Task) -> Ticks {
        match self {
            ServiceMeasure::Total => task.required_service,
            ServiceMeasure::Remaining => task.remaining_service(),
        }
    }
}

/// Shortest-first dispatch over the Resident set. Ties go to the lower arrival index.
pub struct PriqScheduler {
    name: &'static str,
    queue: KeyedPriorityQueue<TaskId, ServiceKey>,
    measure: ServiceMeasure,
    slice: Slice,
}

impl PriqScheduler {
    /// SPN: smallest duration, run to completion.
    pub fn shortest_process_next() -> Self {
        Self::with_rule("SPN", ServiceMeasure::Total, Slice::ToCompletion)
    }

    /// SRT: smallest remaining service, one unit per decision.
    pub fn shortest_remaining_time() -> Self {
        Self::with_rule("SRT", ServiceMeasure::Remaining, Slice::Quantum(RR_QUANTUM))
    }

    /// SRT as it behaves when keyed on total duration without preemption.
    pub fn shortest_total_time() -> Self {
        Self::with_rule("SRT", ServiceMeasure::Total, Slice::ToCompletion)
    }

    fn with_rule(name: &'static str, measure: ServiceMeasure, slice: Slice) -> Self {
        Self {
            name,
            queue: KeyedPriorityQueue::new(),
            measure,
            slice,
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Scheduler for PriqScheduler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn enqueue(&mut self, ctx: &TrialCtx, task: TaskId) {
        let key = ServiceKey {
            service: self.measure.of(ctx.task(task)),
            task,
        };
        let previous = self.queue.push(task, key);
        debug_assert!(
            previous.is_none(),
            "Task {task} already queued in {}",
            self.name
        );
    }

    fn dispatch(&mut self, _ctx: &TrialCtx) -> Result<DispatchDecision, DispatchError> {
        let (task, _) = self.queue.pop().ok_or(DispatchError::NoResidentTask)?;
        Ok(DispatchDecision {
            task,
            slice: self.slice,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::FirstFit;

    fn ctx_with(durations: &[Ticks]) -> TrialCtx {
        let mut ctx = TrialCtx::new(&[64]).unwrap();
        for &d in durations {
            let task = ctx.create_task(1, d).unwrap();
            let block = ctx.pool.try_place(1, &mut FirstFit).unwrap();
            ctx.mark_resident(task, block);
        }
        ctx
    }

    #[test]
    fn service_key_pops_smallest_then_lowest_index() {
        let mut q = KeyedPriorityQueue::new();
        q.push(0, ServiceKey { service: 4, task: 0 });
        q.push(1, ServiceKey { service: 2, task: 1 });
        q.push(2, ServiceKey { service: 2, task: 2 });
        q.push(3, ServiceKey { service: 9, task: 3 });
        let order: Vec<_> = std::iter::from_fn(|| q.pop().map(|(t, _)| t)).collect();
        assert_eq!(order, vec![1, 2, 0, 3]);
    }

    #[test]
    fn spn_runs_shortest_to_completion() {
        let ctx = ctx_with(&[5, 3, 7, 3]);
        let mut spn = PriqScheduler::shortest_process_next();
        for task in 0..4 {
            spn.enqueue(&ctx, task);
        }
        let first = spn.dispatch(&ctx).unwrap();
        assert_eq!(first.task, 1);
        assert_eq!(first.slice, Slice::ToCompletion);
        assert_eq!(spn.dispatch(&ctx).unwrap().task, 3);
        assert_eq!(spn.dispatch(&ctx).unwrap().task, 0);
        assert_eq!(spn.len(), 1);
    }

    #[test]
    fn srt_rekeys_on_remaining_service() {
        let mut ctx = ctx_with(&[4, 3]);
        let mut srt = PriqScheduler::shortest_remaining_time();
        srt.enqueue(&ctx, 0);

        let d = srt.dispatch(&ctx).unwrap();
        assert_eq!(
            d,
            DispatchDecision {
                task: 0,
                slice: Slice::Quantum(1)
            }
        );
        ctx.serve(0, 2);
        srt.stopping(&ctx, 0, true);

        // Task 0 has 2 left against task 1's 3, though its total is larger
        srt.enqueue(&ctx, 1);
        assert_eq!(srt.dispatch(&ctx).unwrap().task, 0);
        assert_eq!(srt.dispatch(&ctx).unwrap().task, 1);
        assert!(srt.is_empty());
    }

    #[test]
    fn shortest_total_variant_ignores_progress() {
        let mut ctx = ctx_with(&[4, 3]);
        ctx.serve(0, 3);
        let mut srt = PriqScheduler::shortest_total_time();
        srt.enqueue(&ctx, 0);
        srt.enqueue(&ctx, 1);
        assert_eq!(
            srt.dispatch(&ctx).unwrap(),
            DispatchDecision {
                task: 1,
                slice: Slice::ToCompletion
            }
        );
    }
}
