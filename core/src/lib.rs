pub mod artifact;
pub mod config;
pub mod extract;
pub mod report;
pub mod runner;
pub mod sweep;

#[cfg(test)]
mod config_test;

pub use config::{SweepConfig, SweepParams};
pub use report::{ResultRow, ResultTable};
pub use runner::{BenchOutput, BenchmarkRunner, CommandRunner};
pub use sweep::{Sweep, SweepState};
