//! Two-level adaptive branch predictor simulator CLI.
//!
//! This binary drives the simulator core from the command line. It provides:
//! 1. **Run:** Replay a branch trace through every configured predictor and report accuracy.
//! 2. **Schemes:** List the configured schemes and their hardware cost inputs.
//! 3. **Aggregate:** Merge the CSV blocks of several run logs into one results table.
//! 4. **Summarize:** Condense a results table into an accuracy matrix and per-scheme geometric means.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use atsim_core::common::{Error, Result};
use atsim_core::config::{BaselineConfig, Config, HrtKind};
use atsim_core::predictor::{BranchPredictor, TwoLevelPredictor};
use atsim_core::sim::{Simulator, TraceReader};
use atsim_core::stats::{ResultsTable, aggregate};

#[derive(Parser, Debug)]
#[command(
    name = "atsim",
    author,
    version,
    about = "Two-level adaptive training branch predictor simulator",
    long_about = "Replay branch traces through two-level adaptive training schemes and baseline predictors.\n\nTrace lines are `<pc_hex> <taken>`; blank lines and `#` comments are skipped.\n\nExamples:\n  atsim run traces/gcc.trace gcc\n  atsim run traces/gcc.trace gcc --config schemes.json --format csv\n  atsim aggregate logs/*.log --output analysis/results.csv\n  atsim summarize analysis/results.csv"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a branch trace.
    Run {
        /// Trace file to replay.
        trace: PathBuf,

        /// Benchmark label written into CSV rows.
        #[arg(default_value = "unknown")]
        benchmark: String,

        /// JSON configuration (default: the built-in scheme catalog).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Report format.
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Write the report here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stop after this many events.
        #[arg(long)]
        max_events: Option<u64>,

        /// Skip the always-taken and bimodal baselines.
        #[arg(long)]
        no_baselines: bool,
    },

    /// List the configured two-level schemes.
    Schemes {
        /// JSON configuration (default: the built-in scheme catalog).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Merge CSV blocks from run logs into one CSV table.
    Aggregate {
        /// Run logs to scan.
        #[arg(required = true)]
        logs: Vec<PathBuf>,

        /// Write the table here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize a merged results table across benchmarks.
    Summarize {
        /// Results table written by `aggregate`.
        results: PathBuf,

        /// Summary format.
        #[arg(short, long, value_enum, default_value_t = SummaryFormat::Text)]
        format: SummaryFormat,

        /// Write the summary here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Report format of `run`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human-readable summary followed by the CSV block.
    Text,
    /// CSV rows only.
    Csv,
    /// Pretty-printed JSON.
    Json,
}

/// Output format of `summarize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SummaryFormat {
    /// Accuracy matrix followed by geometric means.
    Text,
    /// Geometric means only, as `scheme,gmean_accuracy` rows.
    Csv,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            trace,
            benchmark,
            config,
            format,
            output,
            max_events,
            no_baselines,
        } => cmd_run(&RunArgs {
            trace,
            benchmark,
            config,
            format,
            output,
            max_events,
            no_baselines,
        }),
        Commands::Schemes { config } => cmd_schemes(config.as_deref()),
        Commands::Aggregate { logs, output } => cmd_aggregate(&logs, output.as_deref()),
        Commands::Summarize {
            results,
            format,
            output,
        } => cmd_summarize(&results, format, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Loads the configuration file, or the built-in catalog. The caller validates.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            Ok(Config::read_file(path)?)
        }
        None => Ok(Config::default()),
    }
}

/// Opens the report destination.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Arguments of the `run` subcommand.
#[derive(Debug)]
struct RunArgs {
    trace: PathBuf,
    benchmark: String,
    config: Option<PathBuf>,
    format: Format,
    output: Option<PathBuf>,
    max_events: Option<u64>,
    no_baselines: bool,
}

/// Loads the configuration, applies command-line overrides, then validates once.
fn run_config(args: &RunArgs) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;
    if args.no_baselines {
        config.baselines = BaselineConfig::none();
    }
    if args.max_events.is_some() {
        config.limits.max_events = args.max_events;
    }
    config.validate()?;
    Ok(config)
}

/// Simulates one trace and writes the report.
fn cmd_run(args: &RunArgs) -> Result<()> {
    let config = run_config(args)?;

    let reader = TraceReader::open(&args.trace)?;
    let mut sim = Simulator::new(&config);
    let events = sim.run(reader)?;
    info!(events, trace = %args.trace.display(), "simulation complete");

    let report = sim.report(&args.trace.display().to_string(), &args.benchmark);
    let mut out = open_output(args.output.as_deref())?;
    match args.format {
        Format::Text => report.write_text(&mut out)?,
        Format::Csv => report.write_csv(&mut out)?,
        Format::Json => writeln!(out, "{}", report.to_json()?)?,
    }
    out.flush().map_err(Error::from)
}

/// Prints each scheme's geometry and hardware cost.
fn cmd_schemes(config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    config.validate()?;
    let mut out = open_output(None)?;
    writeln!(
        out,
        "{:<24} {:<5} {:>8} {:>5} {:>3} {:<9} {:>10}",
        "scheme", "hrt", "entries", "ways", "k", "automaton", "hw_bits"
    )?;
    for scheme in &config.schemes {
        let (entries, ways) = match scheme.hrt_kind {
            HrtKind::Ideal => ("-".to_owned(), "-".to_owned()),
            HrtKind::Hashed => (scheme.hrt_entries.to_string(), "1".to_owned()),
            HrtKind::Associative => (scheme.hrt_entries.to_string(), scheme.hrt_ways.to_string()),
        };
        // Ideal tables start empty, so their cost only reflects the pattern table here.
        let hw_bits = TwoLevelPredictor::new(scheme).hardware_cost_bits();
        writeln!(
            out,
            "{:<24} {:<5} {:>8} {:>5} {:>3} {:<9} {:>10}",
            scheme.name,
            scheme.hrt_kind.label(),
            entries,
            ways,
            scheme.history_bits,
            scheme.automaton.label(),
            hw_bits
        )?;
    }
    out.flush().map_err(Error::from)
}

/// Extracts the CSV rows of `logs`, failing if there are none.
fn collect_rows(logs: &[PathBuf]) -> Result<Vec<String>> {
    let rows = aggregate::aggregate_logs(logs)?;
    if rows.is_empty() {
        return Err(Error::NoRows("the provided logs".to_owned()));
    }
    Ok(rows)
}

/// Merges the CSV blocks of `logs`.
fn cmd_aggregate(logs: &[PathBuf], output: Option<&Path>) -> Result<()> {
    let rows = collect_rows(logs)?;
    info!(rows = rows.len(), logs = logs.len(), "aggregated results");
    let mut out = open_output(output)?;
    aggregate::write_rows(&rows, &mut out)?;
    out.flush().map_err(Error::from)
}

/// Loads a results table, failing if it holds no usable row.
fn load_results(path: &Path) -> Result<ResultsTable> {
    let table = ResultsTable::from_reader(BufReader::new(File::open(path)?))?;
    if table.is_empty() {
        return Err(Error::NoRows(path.display().to_string()));
    }
    debug!(
        benchmarks = table.benchmarks().len(),
        schemes = table.schemes().len(),
        "loaded results table"
    );
    Ok(table)
}

/// Prints the accuracy matrix and per-scheme geometric means of a results table.
fn cmd_summarize(results: &Path, format: SummaryFormat, output: Option<&Path>) -> Result<()> {
    let table = load_results(results)?;
    let mut out = open_output(output)?;
    match format {
        SummaryFormat::Text => table.write_text(&mut out)?,
        SummaryFormat::Csv => table.write_csv(&mut out)?,
    }
    out.flush().map_err(Error::from)
}
