use std::path::PathBuf;

use anyhow::{Result, bail};

/// Placeholder ring size checked into the benchmark file.
pub const PLACEHOLDER: i64 = 1000;

pub const DEFAULT_ARTIFACT: &str = "main_test.go";
pub const DEFAULT_OUTPUT: &str = "results.csv";

/// Column names of the report, ring size first. The remaining names follow
/// the benchmark suite's algorithms.
pub const DEFAULT_HEADER: [&str; 6] = ["Ring Size", "Divide", "Group", "OptAvgTime", "OptTeamSize", "OptTime"];

/// The three swept values. Immutable once the sweep starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepParams {
    pub start: i64,
    pub increment: i64,
    pub max: i64,
}

impl SweepParams {
    pub fn new(start: i64, increment: i64, max: i64) -> Self {
        Self { start, increment, max }
    }

    /// Rejects parameter sets that would never terminate. An empty range
    /// accepts any increment since the loop body never runs.
    pub fn validate(&self) -> Result<()> {
        if self.start <= self.max && self.increment <= 0 {
            bail!(
                "increment must be positive when start ({}) <= max ({}), got {}",
                self.start,
                self.max,
                self.increment
            );
        }
        Ok(())
    }

    /// Number of iterations the sweep will run, saturating at `u64::MAX`.
    pub fn iterations(&self) -> u64 {
        if self.start > self.max || self.increment <= 0 {
            return 0;
        }
        let span = (self.max as i128) - (self.start as i128);
        ((span / self.increment as i128) as u64).saturating_add(1)
    }
}

/// Fixed environment of a sweep: which command runs, which file carries the
/// ring size, and where the report goes.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub artifact: PathBuf,
    pub placeholder: i64,
    pub output: PathBuf,
    pub header: Vec<String>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            program: "go".to_string(),
            args: vec!["test".to_string(), "-bench=.".to_string()],
            working_dir: PathBuf::from("."),
            artifact: PathBuf::from(DEFAULT_ARTIFACT),
            placeholder: PLACEHOLDER,
            output: PathBuf::from(DEFAULT_OUTPUT),
            header: DEFAULT_HEADER.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SweepConfig {
    /// Same defaults, with the artifact and report resolved against `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            artifact: dir.join(DEFAULT_ARTIFACT),
            output: dir.join(DEFAULT_OUTPUT),
            working_dir: dir,
            ..Self::default()
        }
    }

    /// Metric columns expected per row.
    pub fn expected_metrics(&self) -> usize {
        self.header.len().saturating_sub(1)
    }
}
