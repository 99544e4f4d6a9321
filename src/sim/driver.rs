use super::job::{Job, JobOutcome};
use crate::{
    core::{
        driver::TrialCore,
        error::TrialError,
        event::TrialEvent,
        state::{Task, TrialCtx, Units},
    },
    placement::PlacementStrategy,
    scheduler::Scheduler,
};

/// One trial: a workload seated into a fresh pool and driven to completion.
pub struct Sim<S: Scheduler, P: PlacementStrategy> {
    pub core: TrialCore<S, P>,
}

impl<S: Scheduler, P: PlacementStrategy> Sim<S, P> {
    pub fn new(
        jobs: &[Job],
        capacities: &[Units],
        placement: P,
        scheduler: S,
    ) -> Result<Self, TrialError> {
        let mut ctx = TrialCtx::new(capacities)?;
        for job in jobs {
            ctx.create_task(job.size, job.duration)?;
        }

        Ok(Self {
            core: TrialCore::new(ctx, scheduler, placement),
        })
    }

    pub fn step(&mut self) -> Result<Vec<TrialEvent>, TrialError> {
        self.core.step()
    }

    pub fn all_tasks_completed(&self) -> bool {
        self.core.ctx.all_tasks_completed()
    }

    pub fn run_to_completion(&mut self) -> Result<(), TrialError> {
        while !self.all_tasks_completed() {
            self.step()?;
        }
        Ok(())
    }

    pub fn tasks_map<T>(&self, f: impl FnMut(&Task) -> T) -> impl Iterator<Item = T> {
        self.core.ctx.tasks.iter().map(f)
    }

    /// Per-task outcomes in arrival order. Tasks that have not completed are skipped.
    pub fn outcomes(&self) -> Vec<JobOutcome> {
        self.core
            .ctx
            .tasks
            .iter()
            .filter_map(JobOutcome::from_task)
            .collect()
    }
}

/// Runs one trial of `scheduler` over `jobs` on a pool built from `capacities`
/// and returns one outcome per job, in input order.
pub fn run_trial<S: Scheduler, P: PlacementStrategy>(
    jobs: &[Job],
    capacities: &[Units],
    placement: P,
    scheduler: S,
) -> Result<Vec<JobOutcome>, TrialError> {
    let mut sim = Sim::new(jobs, capacities, placement, scheduler)?;
    sim.run_to_completion()?;
    Ok(sim.outcomes())
}
