//! spentcal CLI - Command-line interface for spentcal
//!
//! Commands:
//! - info: Report for a single training record
//! - batch: Reports for one record per line (file or stdin)
//! - calories: Run a calorie estimator directly

use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use spentcal::duration::{parse_duration, DurationError};
use spentcal::{
    spent_calories, ActivityKind, CalorieError, ErrorKind, TrainingCalculator, SPENTCAL_VERSION,
};

/// spentcal - Calories burned during walking and running
#[derive(Parser)]
#[command(name = "spentcal")]
#[command(version = SPENTCAL_VERSION)]
#[command(about = "Estimate calories burned from step-count training records", long_about = None)]
struct Cli {
    /// Log pipeline stages to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report for a single record, e.g. "5000,Бег,1h30m"
    Info {
        /// Training record: <steps>,<activity>,<duration>
        record: String,

        /// Body weight in kilograms
        #[arg(long)]
        weight: f64,

        /// Body height in meters
        #[arg(long)]
        height: f64,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Reports for one record per line
    Batch {
        /// Input file path (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Body weight in kilograms
        #[arg(long)]
        weight: f64,

        /// Body height in meters
        #[arg(long)]
        height: f64,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Run a calorie estimator without parsing a record
    Calories {
        /// Activity formula to use
        #[arg(long, value_enum)]
        activity: ActivityArg,

        /// Number of steps
        #[arg(long, allow_negative_numbers = true)]
        steps: i64,

        /// Duration expression, e.g. "45m" or "1h30m"
        #[arg(long, allow_hyphen_values = true)]
        duration: String,

        /// Body weight in kilograms
        #[arg(long, allow_negative_numbers = true)]
        weight: f64,

        /// Body height in meters
        #[arg(long, allow_negative_numbers = true)]
        height: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Fixed text report
    Text,
    /// JSON summary (one object per line in batch mode)
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum ActivityArg {
    Running,
    Walking,
}

impl From<ActivityArg> for ActivityKind {
    fn from(arg: ActivityArg) -> Self {
        match arg {
            ActivityArg::Running => ActivityKind::Running,
            ActivityArg::Walking => ActivityKind::Walking,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "spentcal=debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), SpentcalCliError> {
    match cli.command {
        Commands::Info {
            record,
            weight,
            height,
            format,
        } => cmd_info(&record, weight, height, format),

        Commands::Batch {
            input,
            weight,
            height,
            format,
        } => cmd_batch(&input, weight, height, format),

        Commands::Calories {
            activity,
            steps,
            duration,
            weight,
            height,
        } => cmd_calories(activity.into(), steps, &duration, weight, height),
    }
}

fn render(
    calculator: &TrainingCalculator,
    record: &str,
    format: OutputFormat,
) -> Result<String, CalorieError> {
    match format {
        OutputFormat::Text => calculator.info(record),
        OutputFormat::Json => {
            let summary = calculator.summarize(record)?;
            Ok(serde_json::to_string(&summary)?)
        }
    }
}

fn cmd_info(
    record: &str,
    weight: f64,
    height: f64,
    format: OutputFormat,
) -> Result<(), SpentcalCliError> {
    let calculator = TrainingCalculator::new(weight, height);
    let output = render(&calculator, record, format)?;
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => write!(stdout, "{output}")?,
        OutputFormat::Json => writeln!(stdout, "{output}")?,
    }
    Ok(())
}

fn cmd_batch(
    input: &PathBuf,
    weight: f64,
    height: f64,
    format: OutputFormat,
) -> Result<(), SpentcalCliError> {
    let reader: Box<dyn BufRead> = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("Reading records from stdin, one per line (Ctrl-D to finish)");
        }
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(input)?))
    };

    let calculator = TrainingCalculator::new(weight, height);
    let mut stdout = io::stdout().lock();
    let mut failed = 0;
    let mut written = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let record = line.trim_end_matches('\r');
        if record.trim().is_empty() {
            continue;
        }

        match render(&calculator, record, format) {
            Ok(output) => {
                match format {
                    OutputFormat::Text => {
                        if written > 0 {
                            writeln!(stdout)?;
                        }
                        write!(stdout, "{output}")?;
                    }
                    OutputFormat::Json => writeln!(stdout, "{output}")?,
                }
                written += 1;
            }
            Err(e) => {
                failed += 1;
                warn!(line = index + 1, error = %e, "rejected training record");
                let mut detail = CliError::from(SpentcalCliError::Calorie(e));
                detail.line = Some(index + 1);
                eprintln!(
                    "{}",
                    serde_json::to_string(&detail).unwrap_or_else(|_| detail.message.clone())
                );
            }
        }
    }
    stdout.flush()?;

    if failed > 0 {
        return Err(SpentcalCliError::BatchFailed(failed));
    }
    Ok(())
}

fn cmd_calories(
    kind: ActivityKind,
    steps: i64,
    duration: &str,
    weight: f64,
    height: f64,
) -> Result<(), SpentcalCliError> {
    let duration = parse_duration(duration)?;
    let calories = spent_calories(kind, steps, weight, height, duration)?;
    println!("{calories:.2}");
    Ok(())
}

// Error types

#[derive(Debug)]
enum SpentcalCliError {
    Io(io::Error),
    Calorie(CalorieError),
    Duration(DurationError),
    BatchFailed(usize),
}

impl From<io::Error> for SpentcalCliError {
    fn from(e: io::Error) -> Self {
        SpentcalCliError::Io(e)
    }
}

impl From<CalorieError> for SpentcalCliError {
    fn from(e: CalorieError) -> Self {
        SpentcalCliError::Calorie(e)
    }
}

impl From<DurationError> for SpentcalCliError {
    fn from(e: DurationError) -> Self {
        SpentcalCliError::Duration(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
}

impl CliError {
    fn new(code: &str, message: String, hint: &str) -> Self {
        CliError {
            code: code.to_string(),
            message,
            hint: Some(hint.to_string()),
            line: None,
        }
    }
}

impl From<SpentcalCliError> for CliError {
    fn from(e: SpentcalCliError) -> Self {
        match e {
            SpentcalCliError::Io(e) => CliError::new(
                "IO_ERROR",
                e.to_string(),
                "Check file paths and permissions",
            ),
            SpentcalCliError::Calorie(e) => {
                let (code, hint) = match e.kind() {
                    Some(ErrorKind::Format) => (
                        "FORMAT_ERROR",
                        "Records look like <steps>,<activity>,<duration>",
                    ),
                    Some(ErrorKind::Parse) => (
                        "PARSE_ERROR",
                        "Steps must be an integer and durations look like 1h30m",
                    ),
                    Some(ErrorKind::Validation) => (
                        "VALIDATION_ERROR",
                        "Steps and duration must be positive and the activity non-empty",
                    ),
                    Some(ErrorKind::UnknownActivity) => {
                        ("UNKNOWN_ACTIVITY", "Known activities are Бег and Ходьба")
                    }
                    Some(ErrorKind::InvalidParameters) => (
                        "INVALID_PARAMETERS",
                        "Weight, height, steps and duration must be positive",
                    ),
                    None => ("JSON_ERROR", "Report this as a bug"),
                };
                CliError::new(code, e.to_string(), hint)
            }
            SpentcalCliError::Duration(e) => CliError::new(
                "PARSE_ERROR",
                e.to_string(),
                "Durations look like 45m, 1h30m or 1.5h",
            ),
            SpentcalCliError::BatchFailed(count) => CliError::new(
                "BATCH_FAILED",
                format!("{count} records failed"),
                "See the per-line errors above",
            ),
        }
    }
}
