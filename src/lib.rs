pub mod core;
pub mod placement;
pub mod scheduler;
pub mod sim;

pub use placement::{PlacementKind, PlacementStrategy};
pub use scheduler::{PolicyKind, Scheduler, SrtMode};
pub use sim::{Job, JobOutcome, Sim, run_trial};
