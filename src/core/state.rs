use super::error::TrialError;
use crate::placement::PlacementStrategy;

// Index into Task Vec; equals the job's position in the arrival stream
pub type TaskId = usize;
// Index into the pool's block Vec
pub type BlockId = usize;
pub type Ticks = u64;
pub type Units = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Resident { block: BlockId },
    Completed,
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub state: TaskState,
    pub size: Units,
    pub required_service: Ticks,
    pub consumed_service: Ticks,
    pub admitted_at: Option<Ticks>,
    pub started_at: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl Task {
    pub fn remaining_service(&self) -> Ticks {
        self.required_service - self.consumed_service
    }

    pub fn block(&self) -> Option<BlockId> {
        match self.state {
            TaskState::Resident { block } => Some(block),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == TaskState::Pending
    }

    pub fn is_resident(&self) -> bool {
        matches!(self.state, TaskState::Resident { .. })
    }

    pub fn is_completed(&self) -> bool {
        self.state == TaskState::Completed
    }

    /// Time from admission to completion; `None` until the task has completed.
    pub fn turnaround(&self) -> Option<Ticks> {
        Some(self.completion_time? - self.admitted_at?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub capacity: Units,
    pub free: Units,
}

impl Block {
    pub fn fits(&self, size: Units) -> bool {
        self.free >= size
    }

    pub fn used(&self) -> Units {
        self.capacity - self.free
    }
}

/// Fixed set of blocks. Free space only moves by whole task sizes: it shrinks
/// when a task is placed and grows back by the same amount when it leaves.
#[derive(Debug, Clone)]
pub struct MemoryPool {
    blocks: Vec<Block>,
}

impl MemoryPool {
    pub fn new(capacities: &[Units]) -> Result<Self, TrialError> {
        if capacities.is_empty() {
            return Err(TrialError::EmptyPool);
        }
        if let Some(index) = capacities.iter().position(|&c| c == 0) {
            return Err(TrialError::ZeroCapacityBlock { index });
        }

        let blocks = capacities
            .iter()
            .map(|&capacity| Block {
                capacity,
                free: capacity,
            })
            .collect();
        Ok(Self { blocks })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, block: BlockId) -> &Block {
        &self.blocks[block]
    }

    /// Asks `strategy` for a block and reserves `size` units in it.
    pub fn try_place<P: PlacementStrategy + ?Sized>(
        &mut self,
        size: Units,
        strategy: &mut P,
    ) -> Option<BlockId> {
        let block = strategy.place(&self.blocks, size)?;
        let chosen = &mut self.blocks[block];
        assert!(
            chosen.fits(size),
            "{} picked block {block} with {} free for a task of size {size}",
            strategy.name(),
            chosen.free
        );
        chosen.free -= size;
        Some(block)
    }

    pub fn release(&mut self, block: BlockId, size: Units) {
        let block = &mut self.blocks[block];
        block.free += size;
        debug_assert!(
            block.free <= block.capacity,
            "Release overflowed block capacity ({} > {})",
            block.free,
            block.capacity
        );
    }

    pub fn total_capacity(&self) -> Units {
        self.blocks.iter().map(|b| b.capacity).sum()
    }

    pub fn total_free(&self) -> Units {
        self.blocks.iter().map(|b| b.free).sum()
    }

    pub fn largest_capacity(&self) -> Units {
        self.blocks.iter().map(|b| b.capacity).max().unwrap_or(0)
    }
}

/// Everything one trial mutates: the clock, the task registry and the pool.
#[derive(Debug)]
pub struct TrialCtx {
    pub now: Ticks,
    pub tasks: Vec<Task>,
    pub pool: MemoryPool,

    pending: usize,
    resident: usize,
    // No task below this index is Pending
    first_pending: TaskId,
}

impl TrialCtx {
    pub fn new(capacities: &[Units]) -> Result<Self, TrialError> {
        Ok(Self {
            now: 0,
            tasks: Vec::new(),
            pool: MemoryPool::new(capacities)?,
            pending: 0,
            resident: 0,
            first_pending: 0,
        })
    }

    /// Registers the next task in arrival order.
    pub fn create_task(&mut self, size: Units, required_service: Ticks) -> Result<TaskId, TrialError> {
        let id = self.tasks.len();
        if size < 1 || required_service < 1 {
            return Err(TrialError::InvalidJob {
                index: id,
                size,
                duration: required_service,
            });
        }
        let largest_block = self.pool.largest_capacity();
        if size > largest_block {
            return Err(TrialError::JobTooLarge {
                index: id,
                size,
                largest_block,
            });
        }

        self.tasks.push(Task {
            id,
            state: TaskState::Pending,
            size,
            required_service,
            consumed_service: 0,
            admitted_at: None,
            started_at: None,
            completion_time: None,
        });
        self.pending += 1;

        Ok(id)
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn task(&self, task_id: TaskId) -> &Task {
        &self.tasks[task_id]
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> &mut Task {
        &mut self.tasks[task_id]
    }

    /// First Pending task at or after `from`, in arrival order.
    pub fn next_pending(&self, from: TaskId) -> Option<TaskId> {
        self.tasks
            .get(from.max(self.first_pending)..)?
            .iter()
            .find(|task| task.is_pending())
            .map(|task| task.id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending
    }

    pub fn resident_count(&self) -> usize {
        self.resident
    }

    pub fn resident_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| task.is_resident())
    }

    /// Units held by Resident tasks.
    pub fn resident_footprint(&self) -> Units {
        self.resident_tasks().map(|task| task.size).sum()
    }

    pub fn all_tasks_completed(&self) -> bool {
        self.pending == 0 && self.resident == 0
    }

    pub fn mark_resident(&mut self, task_id: TaskId, block: BlockId) {
        let now = self.now;
        let task = self.task_mut(task_id);
        debug_assert!(
            task.is_pending(),
            "Task {task_id} must be Pending before it is placed"
        );
        task.state = TaskState::Resident { block };
        task.admitted_at = Some(now);
        self.pending -= 1;
        self.resident += 1;

        while self
            .tasks
            .get(self.first_pending)
            .is_some_and(|task| !task.is_pending())
        {
            self.first_pending += 1;
        }
    }

    /// Gives `task_id` up to `units` of service starting now and advances the
    /// clock by what was actually consumed.
    pub fn serve(&mut self, task_id: TaskId, units: Ticks) -> Ticks {
        let now = self.now;
        let task = self.task_mut(task_id);
        debug_assert!(task.is_resident(), "Served task {task_id} is not Resident");

        let units = units.min(task.remaining_service());
        task.started_at.get_or_insert(now);
        task.consumed_service += units;
        self.advance_time(units);
        units
    }

    // Returns the block the task vacated
    pub fn mark_completed(&mut self, task_id: TaskId) -> BlockId {
        let now = self.now;
        let task = &mut self.tasks[task_id];
        let block = task
            .block()
            .unwrap_or_else(|| panic!("Task {task_id} must be Resident before marked complete"));
        debug_assert_eq!(
            task.consumed_service, task.required_service,
            "Task {task_id} completed with service left"
        );

        task.state = TaskState::Completed;
        task.completion_time = Some(now);
        let size = task.size;
        self.pool.release(block, size);
        self.resident -= 1;
        block
    }
}
