// crates/dcp-conformity-cli/src/main.rs
// ============================================================================
// Module: DCP Validator CLI Entry Point
// Description: Command dispatcher for offline DCP conformity workflows.
// Purpose: Print tier expectations, evaluate validation records, check config.
// Dependencies: clap, dcp-conformity-core, dcp-conformity-config, serde_jcs, thiserror
// ============================================================================

//! ## Overview
//! `dcp-validator` evaluates firmware validation records against the governed
//! DCP timing requirements. All user-facing strings are routed through the
//! message catalog. Input files are untrusted: they are size-bounded before
//! parsing and every failure exits non-zero with a message on stderr.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use dcp_conformity_cli::audit::AuditSink;
use dcp_conformity_cli::audit::ConformityReportEvent;
use dcp_conformity_cli::audit::TierRejectedEvent;
use dcp_conformity_cli::audit::sink_from_config;
use dcp_conformity_cli::render::ExpectationsDocument;
use dcp_conformity_cli::render::report_text;
use dcp_conformity_cli::t;
use dcp_conformity_config::ValidatorConfig;
use dcp_conformity_core::ConformityEngine;
use dcp_conformity_core::ConformityError;
use dcp_conformity_core::SpeedTier;
use dcp_conformity_core::UNIT_MICROSECONDS;
use dcp_conformity_core::ValidationRecord;
use dcp_conformity_core::core::values::format_decimal;
use dcp_conformity_core::core::values::with_unit;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a validation record input.
const MAX_RECORD_BYTES: usize = 1024 * 1024;
/// Exit code for `--fail-on-failure` when the report has failures.
const EXIT_NONCONFORMING: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "dcp-validator", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the expected parameter values for a speed tier.
    Expectations(ExpectationsCommand),
    /// Evaluate a validation record and print the conformity report.
    Report(ReportCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for `expectations`.
#[derive(Args, Debug)]
struct ExpectationsCommand {
    /// Nominal bus speed in MHz (4, 20, 32 or 64).
    #[arg(long, value_name = "MHZ")]
    speed: u32,
    /// Optional config file path (defaults to `dcp-validator.toml` or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = ExpectationsFormat::Text)]
    format: ExpectationsFormat,
}

/// Output formats for `expectations`.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum ExpectationsFormat {
    /// Human-readable text output.
    Text,
    /// Canonical JSON output.
    Json,
}

/// Arguments for `report`.
#[derive(Args, Debug)]
struct ReportCommand {
    /// Path to the validation record JSON.
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
    /// Nominal bus speed in MHz (4, 20, 32 or 64).
    #[arg(long, value_name = "MHZ")]
    speed: u32,
    /// Optional config file path (defaults to `dcp-validator.toml` or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    format: ReportFormat,
    /// Exit with status 2 when the report has failures.
    #[arg(long, action = ArgAction::SetTrue)]
    fail_on_failure: bool,
}

/// Output formats for `report`.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum ReportFormat {
    /// Canonical JSON of the full report.
    Json,
    /// Canonical JSON of the table view.
    View,
    /// Human-readable tables.
    Text,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a config file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to `dcp-validator.toml` or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a catalog message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Expectations(command) => command_expectations(&command),
        Commands::Report(command) => command_report(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Shared Setup
// ============================================================================

/// Loaded configuration plus the engine and audit sink it selects.
struct Session {
    /// Engine built from the configured tolerance and schema.
    engine: ConformityEngine,
    /// Audit sink selected by `[audit]`.
    audit: Box<dyn AuditSink>,
}

impl Session {
    /// Loads config and builds the engine and audit sink.
    fn open(config: Option<&Path>) -> CliResult<Self> {
        let config = ValidatorConfig::load(config)
            .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
        let engine = config
            .engine()
            .map_err(|err| CliError::new(t!("config.engine_failed", error = err)))?;
        let audit = sink_from_config(&config.audit).map_err(|err| {
            CliError::new(t!(
                "audit.open_failed",
                path = config.audit.path.as_deref().unwrap_or_default(),
                error = err
            ))
        })?;
        Ok(Self {
            engine,
            audit,
        })
    }

    /// Maps an engine error, auditing rejected speeds.
    fn reject(&self, error: ConformityError) -> CliError {
        match error {
            ConformityError::UnknownTier {
                nominal_mhz,
            } => {
                self.audit.record_tier_rejected(&TierRejectedEvent::new(nominal_mhz));
                CliError::new(t!(
                    "speed.unsupported",
                    speed = nominal_mhz,
                    supported = supported_speeds()
                ))
            }
            other => CliError::new(t!("evaluation.failed", error = other)),
        }
    }
}

/// Lists the governed speeds, e.g. `4, 20, 32, 64`.
fn supported_speeds() -> String {
    SpeedTier::ALL.iter().map(|tier| tier.nominal_mhz().to_string()).collect::<Vec<_>>().join(", ")
}

// ============================================================================
// SECTION: Expectations Command
// ============================================================================

/// Executes the expectations command.
fn command_expectations(command: &ExpectationsCommand) -> CliResult<ExitCode> {
    let session = Session::open(command.config.as_deref())?;
    let speed_mhz =
        SpeedTier::from_nominal_mhz(command.speed).map_err(|err| session.reject(err))?;
    let delta = session.engine.delta(command.speed).map_err(|err| session.reject(err))?;
    let document = ExpectationsDocument {
        speed_mhz,
        delta: with_unit(&format_decimal(delta), Some(UNIT_MICROSECONDS)),
        expectations: session
            .engine
            .derive_expectations(command.speed)
            .map_err(|err| session.reject(err))?,
    };
    match command.format {
        ExpectationsFormat::Text => write_stdout_bytes(document.to_text().as_bytes())
            .map_err(|err| CliError::new(output_error("stdout", &err)))?,
        ExpectationsFormat::Json => write_json_value(&document)?,
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Report Command
// ============================================================================

/// Executes the report command.
fn command_report(command: &ReportCommand) -> CliResult<ExitCode> {
    let session = Session::open(command.config.as_deref())?;
    let record = read_record(&command.input)?;
    let report = session
        .engine
        .build_report_from_record(command.speed, &record)
        .map_err(|err| session.reject(err))?;
    session
        .audit
        .record_report(&ConformityReportEvent::new(&report, record.upstream_failures().len()));

    match command.format {
        ReportFormat::Json => write_json_value(&report)?,
        ReportFormat::View => write_json_value(&report.view())?,
        ReportFormat::Text => write_stdout_bytes(report_text(&report).as_bytes())
            .map_err(|err| CliError::new(output_error("stdout", &err)))?,
    }

    if command.fail_on_failure && report.has_failures {
        return Ok(ExitCode::from(EXIT_NONCONFORMING));
    }
    Ok(ExitCode::SUCCESS)
}

/// Reads and decodes a validation record with a size bound.
fn read_record(path: &Path) -> CliResult<ValidationRecord> {
    let kind = t!("input.kind.record");
    let bytes = read_bytes_with_limit(path, MAX_RECORD_BYTES).map_err(|err| match err {
        ReadLimitError::Io(error) => CliError::new(t!(
            "input.read_failed",
            kind = kind,
            path = path.display(),
            error = error
        )),
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })?;
    serde_json::from_slice(&bytes).map_err(|err| {
        CliError::new(t!("input.parse_failed", kind = kind, path = path.display(), error = err))
    })
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = ValidatorConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    config.engine().map_err(|err| CliError::new(t!("config.engine_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a value to stdout as canonical JSON followed by a newline.
fn write_json_value<T: Serialize>(value: &T) -> CliResult<()> {
    let mut bytes = serde_jcs::to_vec(value)
        .map_err(|err| CliError::new(t!("output.serialize_failed", error = err)))?;
    bytes.push(b'\n');
    write_stdout_bytes(&bytes).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
