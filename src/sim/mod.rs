pub mod aggregate;
pub mod driver;
pub mod experiment;
pub mod job;
pub mod workload;

pub use aggregate::{Aggregator, PolicyStats, TrialSummary, aggregate};
pub use driver::{Sim, run_trial};
pub use experiment::{ExperimentConfig, ExperimentReport, PlacementMode, PolicyReport, run_experiment};
pub use job::{Job, JobOutcome};
pub use workload::WorkloadConfig;
