use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use tracing::{debug, warn};

use crate::config::SweepConfig;

/// Captured text of one benchmark invocation.
#[derive(Debug, Clone, Default)]
pub struct BenchOutput {
    /// stdout followed by stderr.
    pub text: String,
    /// `None` when the process could not be spawned at all.
    pub status: Option<ExitStatus>,
}

impl BenchOutput {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status.map(|s| s.success()).unwrap_or(false)
    }
}

/// Anything that can run the benchmark suite once and hand back its output.
///
/// Runs are blocking and never fail: a broken invocation shows up as empty
/// or partial text.
pub trait BenchmarkRunner {
    fn run(&mut self) -> BenchOutput;
}

impl<F> BenchmarkRunner for F
where
    F: FnMut() -> BenchOutput,
{
    fn run(&mut self) -> BenchOutput {
        self()
    }
}

/// Spawns the external benchmark command and waits for it.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl CommandRunner {
    pub fn new(program: impl Into<String>, args: Vec<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: working_dir.into(),
        }
    }

    pub fn from_config(config: &SweepConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone(), config.working_dir.clone())
    }

    fn display_command(&self) -> String {
        let mut cmd = self.program.clone();
        for arg in &self.args {
            cmd.push(' ');
            cmd.push_str(arg);
        }
        cmd
    }
}

impl BenchmarkRunner for CommandRunner {
    fn run(&mut self) -> BenchOutput {
        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .output();
        let output = match output {
            Ok(output) => output,
            Err(err) => {
                warn!(command = %self.display_command(), %err, "failed to spawn benchmark command");
                return BenchOutput::default();
            }
        };

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        debug!(
            command = %self.display_command(),
            status = %output.status,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "benchmark command finished"
        );
        let result = BenchOutput {
            text,
            status: Some(output.status),
        };
        if !result.succeeded() {
            warn!(command = %self.display_command(), status = %output.status, "benchmark command exited with failure");
        }
        result
    }
}
