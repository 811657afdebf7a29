use anyhow::{Context, Result, bail};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::debug;

use ringsweep_core::SweepParams;

pub(crate) const START_PROMPT: &str = "Start ring size: ";
pub(crate) const INCREMENT_PROMPT: &str = "Increment: ";
pub(crate) const MAX_PROMPT: &str = "Max ring size: ";

/// Line-oriented input. `None` means end of input.
pub(crate) trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

impl LineSource for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Interrupted) => bail!("interrupted"),
            Err(e) => Err(e).context("read from stdin"),
        }
    }
}

pub(crate) fn parse_int(raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .with_context(|| format!("'{}' is not a valid integer", trimmed))
}

/// Ask until a valid integer arrives.
pub(crate) fn ask_int<S: LineSource + ?Sized>(src: &mut S, prompt: &str) -> Result<i64> {
    let label = prompt.trim_end().trim_end_matches(':');
    loop {
        let Some(line) = src.read_line(prompt)? else {
            bail!("input ended before {} was given", label.to_lowercase());
        };
        match parse_int(&line) {
            Ok(value) => {
                debug!(label, value, "read sweep parameter");
                return Ok(value);
            }
            Err(e) => eprintln!("{}; try again", e),
        }
    }
}

/// Fill in whatever the command line left out, in prompt order.
pub(crate) fn resolve_params<S: LineSource + ?Sized>(
    start: Option<i64>,
    increment: Option<i64>,
    max: Option<i64>,
    src: &mut S,
) -> Result<SweepParams> {
    let start = match start {
        Some(v) => v,
        None => ask_int(src, START_PROMPT)?,
    };
    let increment = match increment {
        Some(v) => v,
        None => ask_int(src, INCREMENT_PROMPT)?,
    };
    let max = match max {
        Some(v) => v,
        None => ask_int(src, MAX_PROMPT)?,
    };
    Ok(SweepParams::new(start, increment, max))
}
