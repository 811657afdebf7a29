use std::sync::Once;

use clap::Parser;
use rustyline::DefaultEditor;
use tracing::info;

use ringsweep_core::{CommandRunner, Sweep, SweepConfig, SweepParams};

mod prompt;

static TRACE_INIT: Once = Once::new();
const DEFAULT_TRACE_FILTER: &str = "ringsweep_core=warn,ringsweep=warn";

#[derive(Debug, Parser)]
#[command(
    name = "ringsweep",
    author,
    version,
    about = "Sweep the ring size of the BHS Go benchmarks and tabulate ns/op",
    long_about = None,
    after_help = "Run from the directory holding main_test.go. Missing values are prompted for.\n\
                  Results go to results.csv."
)]
struct CliArgs {
    /// First ring size to benchmark
    #[arg(long, allow_negative_numbers = true)]
    start: Option<i64>,

    /// Step between ring sizes
    #[arg(long, allow_negative_numbers = true)]
    increment: Option<i64>,

    /// Last ring size to benchmark (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    max: Option<i64>,
}

fn init_tracing() {
    TRACE_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        use tracing_subscriber::fmt;

        let filter_expr = std::env::var("RINGSWEEP_LOG")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .filter(|expr| !expr.trim().is_empty());

        let builder = fmt().with_writer(std::io::stderr);

        let builder = match filter_expr.and_then(|expr| EnvFilter::try_new(expr).ok()) {
            Some(filter) => builder.with_env_filter(filter),
            None => builder.with_env_filter(DEFAULT_TRACE_FILTER),
        };

        let _ = builder.try_init();
    });
}

fn read_params(args: &CliArgs) -> anyhow::Result<SweepParams> {
    if let (Some(start), Some(increment), Some(max)) = (args.start, args.increment, args.max) {
        return Ok(SweepParams::new(start, increment, max));
    }
    let mut editor = DefaultEditor::new()?;
    prompt::resolve_params(args.start, args.increment, args.max, &mut editor)
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let params = read_params(&args)?;

    let config = SweepConfig::default();
    let sweep = Sweep::new(config.clone(), params)?;
    let mut runner = CommandRunner::from_config(&config);
    let table = sweep.run_to_file(&mut runner, |ring_size| println!("{}", ring_size))?;

    info!(rows = table.len(), output = %config.output.display(), "done");
    Ok(())
}
