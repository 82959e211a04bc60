//! Argument parsing and the batch driver.

use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use enctab_validator::{BatchReport, SchemaVersion, output, validate_batch};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "enctab",
    version,
    about = "Validate x86 instruction encoding table files"
)]
pub struct Cli {
    /// Table files to validate, in reporting order.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Table format generation the files must conform to.
    #[arg(long, value_enum, default_value_t = SchemaArg::V3)]
    pub schema: SchemaArg,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Increase log verbosity on stderr (-v, -vv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// File-format generation, as selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaArg {
    V1,
    V2,
    V3,
}

impl From<SchemaArg> for SchemaVersion {
    fn from(arg: SchemaArg) -> Self {
        match arg {
            SchemaArg::V1 => Self::V1,
            SchemaArg::V2 => Self::V2,
            SchemaArg::V3 => Self::V3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `<path>: Ok!` lines followed by one line per diagnostic.
    Human,
    /// The full report as pretty-printed JSON.
    Json,
}

/// Run the batch and return the process exit code.
///
/// Exit codes: 0 for a clean batch, 1 when any diagnostic was recorded.
/// An unreadable input aborts the batch and surfaces as `Err` (exit 2 in
/// `main`), keeping "table invalid" distinguishable from "could not run".
pub fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let schema = SchemaVersion::from(cli.schema).schema();
    debug!(files = cli.files.len(), schema = ?schema.version(), "starting batch validation");

    let report = validate_batch(&cli.files, &schema)?;
    debug!(
        diagnostics = report.diagnostics_count(),
        ok = report.ok,
        "batch validation finished"
    );

    let stdout = std::io::stdout();
    write_report(&report, cli.format, &mut stdout.lock())?;
    Ok(report.exit_code())
}

fn write_report(
    report: &BatchReport,
    format: OutputFormat,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Human => output::write_human(report, writer),
        OutputFormat::Json => output::write_json(report, writer),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
