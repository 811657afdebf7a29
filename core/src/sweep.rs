//! The sweep loop.
//!
//! One iteration runs the suite at the current ring size, records a row and
//! moves the artifact on to the next size. The artifact is the only channel
//! into the benchmark, so every rewrite has to land before the next run.

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    artifact::ConfigArtifact,
    config::{SweepConfig, SweepParams},
    extract::extract_metrics,
    report::{ResultRow, ResultTable},
    runner::BenchmarkRunner,
};

/// Loop state threaded through each iteration.
#[derive(Debug, Clone)]
pub struct SweepState {
    pub current: i64,
    pub table: ResultTable,
}

impl SweepState {
    pub fn new(start: i64, header: Vec<String>) -> Self {
        Self {
            current: start,
            table: ResultTable::new(header),
        }
    }
}

pub struct Sweep {
    config: SweepConfig,
    params: SweepParams,
    artifact: ConfigArtifact,
}

impl Sweep {
    pub fn new(config: SweepConfig, params: SweepParams) -> Result<Self> {
        params.validate()?;
        let artifact = ConfigArtifact::new(config.artifact.clone());
        Ok(Self {
            config,
            params,
            artifact,
        })
    }

    /// Run every iteration and return the collected table.
    ///
    /// `progress` sees each ring size before its benchmark runs. The
    /// placeholder is put back once the loop ends, including when an
    /// iteration failed.
    pub fn run<R, P>(&self, runner: &mut R, mut progress: P) -> Result<ResultTable>
    where
        R: BenchmarkRunner + ?Sized,
        P: FnMut(i64),
    {
        let SweepParams { start, increment, max } = self.params;
        let placeholder = self.config.placeholder;
        info!(start, increment, max, iterations = self.params.iterations(), "starting sweep");

        self.artifact.replace(placeholder, start)?;
        let mut state = SweepState::new(start, self.config.header.clone());

        let looped = self.iterate(&mut state, runner, &mut progress);
        // state.current is whatever size the artifact was last moved to.
        let restored = self.restore(state.current);
        looped?;
        restored?;

        info!(rows = state.table.len(), "sweep finished");
        Ok(state.table)
    }

    /// Run the sweep and write the report to the configured output path.
    pub fn run_to_file<R, P>(&self, runner: &mut R, progress: P) -> Result<ResultTable>
    where
        R: BenchmarkRunner + ?Sized,
        P: FnMut(i64),
    {
        let table = self.run(runner, progress)?;
        table.write_csv(&self.config.output)?;
        Ok(table)
    }

    fn iterate<R, P>(&self, state: &mut SweepState, runner: &mut R, progress: &mut P) -> Result<()>
    where
        R: BenchmarkRunner + ?Sized,
        P: FnMut(i64),
    {
        let expected = self.config.expected_metrics();
        while state.current <= self.params.max {
            let ring_size = state.current;
            progress(ring_size);

            let output = runner.run();
            let metrics = extract_metrics(&output.text);
            if metrics.len() != expected {
                warn!(ring_size, found = metrics.len(), expected, "short or oversized benchmark row");
            }
            info!(ring_size, metrics = ?metrics, "benchmark run recorded");
            state.table.push(ResultRow::new(ring_size, metrics));

            let Some(next) = ring_size.checked_add(self.params.increment) else {
                warn!(ring_size, increment = self.params.increment, "next ring size overflows i64; stopping");
                break;
            };
            self.artifact.replace(ring_size, next)?;
            state.current = next;
        }
        Ok(())
    }

    fn restore(&self, current: i64) -> Result<()> {
        let placeholder = self.config.placeholder;
        if current == placeholder {
            return Ok(());
        }
        if self.artifact.occurrences(current)? == 0 {
            warn!(
                path = %self.artifact.path().display(),
                current,
                placeholder,
                "artifact does not carry the last ring size; skipping placeholder restore"
            );
            return Ok(());
        }
        self.artifact.replace(current, placeholder)?;
        Ok(())
    }
}
