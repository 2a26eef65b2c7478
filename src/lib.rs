//! montecarlo - Monte Carlo estimation for probability and finance teaching
//!
//! The core is [`estimator::estimate`]: draw N independent trials from a
//! caller-owned generator, score them, and average. The experiments module
//! packages the classic classroom examples on top of it, and the simulator
//! module adds configuration, repeated runs and reports.

pub mod build_info;
pub mod combinatorics;
pub mod error;
pub mod estimator;
pub mod experiments;
pub mod rng;
pub mod simulator;
pub mod stats;

pub use error::{Result, SimError};
pub use estimator::{estimate, estimate_seeded, estimate_vector, sample_batch, try_estimate};
pub use stats::Estimate;
