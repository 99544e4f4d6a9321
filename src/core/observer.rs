use super::state::{TaskState, TrialCtx};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &TrialCtx) {
        self.step += 1;

        debug_assert_eq!(
            ctx.pool.total_free() + ctx.resident_footprint(),
            ctx.pool.total_capacity(),
            "Pool free space plus resident sizes must equal total capacity (step {})",
            self.step
        );

        for (id, block) in ctx.pool.blocks().iter().enumerate() {
            debug_assert!(
                block.free <= block.capacity,
                "Block {id} has {} free of {} capacity",
                block.free,
                block.capacity
            );
        }

        let mut pending = 0;
        let mut resident = 0;
        for task in &ctx.tasks {
            match task.state {
                TaskState::Pending => {
                    pending += 1;
                    debug_assert_eq!(
                        task.consumed_service, 0,
                        "Pending task {} has already been served",
                        task.id
                    );
                }
                TaskState::Resident { block } => {
                    resident += 1;
                    debug_assert!(
                        block < ctx.pool.blocks().len(),
                        "Task {} references unknown block {block}",
                        task.id
                    );
                    debug_assert!(
                        task.consumed_service < task.required_service,
                        "Resident task {} has no service left",
                        task.id
                    );
                }
                TaskState::Completed => {
                    debug_assert!(
                        task.turnaround().is_some_and(|t| t >= task.required_service),
                        "Completed task {} finished faster than its duration",
                        task.id
                    );
                }
            }
        }
        debug_assert_eq!(pending, ctx.pending_count(), "Pending count drifted");
        debug_assert_eq!(resident, ctx.resident_count(), "Resident count drifted");
    }
}
