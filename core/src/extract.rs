use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// `Benchmark<Name><Digits>-<Procs> <iterations> <value> ns/op`
static BENCH_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Benchmark\w+\d+-\d+\s+\d+\s+(\d+)\s+ns/op").expect("benchmark line pattern is valid"));

/// Pull the `ns/op` value out of every matching line, in output order.
pub fn extract_metrics(output: &str) -> Vec<u64> {
    let mut metrics = Vec::new();
    for line in output.lines() {
        let Some(caps) = BENCH_LINE.captures(line) else {
            continue;
        };
        let raw = &caps[1];
        match raw.parse::<u64>() {
            Ok(value) => metrics.push(value),
            Err(err) => warn!(line, %err, "skipping benchmark value that does not fit u64"),
        }
    }
    metrics
}
