//! Repeated trials of every policy over shared random workloads.

use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};
use rustc_hash::FxHashMap;

use super::{
    aggregate::{Aggregator, PolicyStats, aggregate},
    driver::run_trial,
    workload::{WorkloadConfig, generate},
};
use crate::{
    core::{TrialError, Units},
    placement::PlacementKind,
    scheduler::{PolicyKind, SrtMode},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementMode {
    /// FCFS first-fit, RR worst-fit, SPN next-fit, SRT best-fit.
    #[default]
    PerPolicy,
    FirstFitEverywhere,
}

impl PlacementMode {
    pub fn for_policy(self, policy: PolicyKind) -> PlacementKind {
        match (self, policy) {
            (PlacementMode::FirstFitEverywhere, _) => PlacementKind::FirstFit,
            (PlacementMode::PerPolicy, PolicyKind::Fcfs) => PlacementKind::FirstFit,
            (PlacementMode::PerPolicy, PolicyKind::RoundRobin) => PlacementKind::WorstFit,
            (PlacementMode::PerPolicy, PolicyKind::Spn) => PlacementKind::NextFit,
            (PlacementMode::PerPolicy, PolicyKind::Srt) => PlacementKind::BestFit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    pub trials: usize,
    pub workload: WorkloadConfig,
    pub pool_capacities: Vec<Units>,
    pub placement: PlacementMode,
    pub srt: SrtMode,
    pub seed: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            trials: 50,
            workload: WorkloadConfig::default(),
            pool_capacities: vec![16, 16, 16, 8],
            placement: PlacementMode::default(),
            srt: SrtMode::default(),
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolicyReport {
    pub policy: PolicyKind,
    pub placement: PlacementKind,
    pub stats: PolicyStats,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExperimentReport {
    pub policies: Vec<PolicyReport>,
}

impl ExperimentReport {
    pub fn policy(&self, policy: PolicyKind) -> Option<&PolicyReport> {
        self.policies.iter().find(|r| r.policy == policy)
    }
}

/// Every trial draws one workload and runs all four policies on it, each on a
/// fresh pool. Policies come back in FCFS, RR, SPN, SRT order.
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentReport, TrialError> {
    info!(
        "Running {} trials of {} tasks over pool {:?} ({:?} placement, {:?} SRT)",
        config.trials,
        config.workload.num_tasks,
        config.pool_capacities,
        config.placement,
        config.srt
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut totals: FxHashMap<PolicyKind, Aggregator> = FxHashMap::default();

    for trial in 0..config.trials {
        let jobs = generate(&config.workload, &mut rng);

        for policy in PolicyKind::ALL {
            let placement = config.placement.for_policy(policy);
            let outcomes = run_trial(
                &jobs,
                &config.pool_capacities,
                placement.build(),
                policy.build(config.srt),
            )?;
            let summary = aggregate(&outcomes)?;
            debug!(
                "trial {trial} {policy}/{placement}: turnaround {:.3}, relative {:.3}",
                summary.mean_turnaround, summary.mean_relative_turnaround
            );
            totals.entry(policy).or_default().add(&summary);
        }
    }

    let policies = PolicyKind::ALL
        .into_iter()
        .filter_map(|policy| {
            let stats = totals.get(&policy)?.stats()?;
            Some(PolicyReport {
                policy,
                placement: config.placement.for_policy(policy),
                stats,
            })
        })
        .collect();

    info!("Finished {} trials", config.trials);
    Ok(ExperimentReport { policies })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ExperimentConfig {
        ExperimentConfig {
            trials: 3,
            workload: WorkloadConfig {
                num_tasks: 40,
                ..WorkloadConfig::default()
            },
            ..ExperimentConfig::default()
        }
    }

    #[test]
    fn per_policy_placement_mapping() {
        let mode = PlacementMode::PerPolicy;
        assert_eq!(mode.for_policy(PolicyKind::Fcfs), PlacementKind::FirstFit);
        assert_eq!(mode.for_policy(PolicyKind::RoundRobin), PlacementKind::WorstFit);
        assert_eq!(mode.for_policy(PolicyKind::Spn), PlacementKind::NextFit);
        assert_eq!(mode.for_policy(PolicyKind::Srt), PlacementKind::BestFit);
        for policy in PolicyKind::ALL {
            assert_eq!(
                PlacementMode::FirstFitEverywhere.for_policy(policy),
                PlacementKind::FirstFit
            );
        }
    }

    #[test]
    fn report_lists_every_policy_in_order() {
        let report = run_experiment(&small_config()).unwrap();
        let order: Vec<_> = report.policies.iter().map(|r| r.policy).collect();
        assert_eq!(order, PolicyKind::ALL.to_vec());
        for r in &report.policies {
            assert_eq!(r.stats.trials, 3);
            assert!(r.stats.mean_relative_turnaround >= 1.0);
            assert!(r.stats.mean_turnaround >= 1.0);
        }
    }

    #[test]
    fn seeded_experiment_is_reproducible() {
        let config = small_config();
        assert_eq!(run_experiment(&config), run_experiment(&config));
    }

    #[test]
    fn zero_trials_yield_empty_report() {
        let config = ExperimentConfig {
            trials: 0,
            ..small_config()
        };
        assert!(run_experiment(&config).unwrap().policies.is_empty());
    }

    #[test]
    fn shortest_total_srt_matches_spn_under_same_placement() {
        let config = ExperimentConfig {
            placement: PlacementMode::FirstFitEverywhere,
            srt: SrtMode::ShortestTotal,
            ..small_config()
        };
        let report = run_experiment(&config).unwrap();
        let spn = report.policy(PolicyKind::Spn).unwrap();
        let srt = report.policy(PolicyKind::Srt).unwrap();
        assert_eq!(spn.stats, srt.stats);
    }

    #[test]
    fn oversized_job_is_reported() {
        let config = ExperimentConfig {
            pool_capacities: vec![4, 4],
            ..small_config()
        };
        assert!(matches!(
            run_experiment(&config),
            Err(TrialError::JobTooLarge { largest_block: 4, .. })
        ));
    }
}
