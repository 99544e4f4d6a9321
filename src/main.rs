use std::io::Write;

use env_logger::Builder;
use memsched::sim::{ExperimentConfig, run_experiment};

fn main() {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let config = ExperimentConfig::default();

    println!("\n**Processing**\n");
    let report = match run_experiment(&config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("experiment failed: {err}");
            std::process::exit(1);
        }
    };

    for r in &report.policies {
        println!(
            "Average turn around time for {} is {}",
            r.policy,
            significant(r.stats.mean_turnaround, 5)
        );
        println!(
            "Average relative turn around time for {} is {}",
            r.policy,
            significant(r.stats.mean_relative_turnaround, 5)
        );
    }
    println!(
        "({} trials of {} tasks, {:?} placement, seed {})",
        config.trials, config.workload.num_tasks, config.placement, config.seed
    );
}

// Rounds to `digits` significant figures
fn significant(x: f64, digits: i32) -> String {
    if x == 0.0 || !x.is_finite() {
        return format!("{x}");
    }
    let magnitude = x.abs().log10().floor() as i32;
    let decimals = (digits - 1 - magnitude).max(0) as usize;
    format!("{x:.decimals$}")
}
