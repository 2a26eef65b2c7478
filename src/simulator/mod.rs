//! Monte Carlo simulator.
//!
//! Runs the configured experiment for a number of seeded repetitions and
//! reports each estimate next to its closed-form value:
//! - Estimate, standard error and 95% interval per run
//! - Spread of the estimate across runs
//! - Optional convergence table over increasing sample counts

mod config;
mod report;
mod runner;

pub use config::{Distribution, SimConfig};
pub use report::{convergence_text, ConvergencePoint, LineSummary, RunResult, SimReport, StatLine};
pub use runner::{convergence_study, run_simulation};
