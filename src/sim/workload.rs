//! Synthetic workload: task sizes and durations drawn as sums of small uniform samples.

use rand::Rng;

use super::job::Job;

#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Tasks per trial.
    pub num_tasks: usize,
    /// Uniform draws summed per value.
    pub samples: u32,
    /// Each draw is uniform over `0..=sample_max`.
    pub sample_max: u64,
    /// Sums below this are raised to it.
    pub min_value: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            num_tasks: 1000,
            samples: 4,
            sample_max: 4,
            min_value: 1,
        }
    }
}

/// Sizes and durations are drawn independently, size first.
pub fn generate<R: Rng + ?Sized>(config: &WorkloadConfig, rng: &mut R) -> Vec<Job> {
    (0..config.num_tasks)
        .map(|_| {
            let size = summed_uniform(config, rng);
            let duration = summed_uniform(config, rng);
            Job::new(size, duration)
        })
        .collect()
}

fn summed_uniform<R: Rng + ?Sized>(config: &WorkloadConfig, rng: &mut R) -> u64 {
    let sum: u64 = (0..config.samples)
        .map(|_| rng.random_range(0..=config.sample_max))
        .sum();
    sum.max(config.min_value)
}
