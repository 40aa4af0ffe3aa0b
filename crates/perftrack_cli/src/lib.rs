//! Scriptable command surface over `perftrack_core`.
//!
//! Every command prints one JSON document. [`run_cli`] does the work and is
//! what `main` calls; errors are rendered by [`error_envelope`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use perftrack_core::db::migrations::latest_version;
use perftrack_core::db::open_db;
use perftrack_core::{
    core_version, init_logging, with_record_service, AppConfig, ChartStyle, ExportFormat,
    Period, RecordFilter, RecordId, RecordInput, ServiceError,
};
use rusqlite::Connection;
use serde_json::{json, Value};

#[derive(Debug, Parser)]
#[command(name = "perftrack")]
#[command(about = "Employee performance records")]
pub struct Cli {
    /// Database file; overrides the config file and platform default.
    #[arg(long)]
    db: Option<PathBuf>,

    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the database and apply the schema.
    Init,
    Add(RecordArgs),
    List(ListArgs),
    Search(SearchArgs),
    Update(UpdateArgs),
    Delete(IdArgs),
    Export(ExportArgs),
    Chart(ChartArgs),
    Version,
}

/// Field values are passed through unparsed; validation happens in core.
#[derive(Debug, Args)]
pub struct RecordArgs {
    #[arg(long)]
    name: String,
    /// YYYY-MM-DD
    #[arg(long)]
    date: String,
    #[arg(long)]
    metric: String,
    #[arg(long, allow_hyphen_values = true)]
    score: String,
    /// Daily, Weekly or Monthly
    #[arg(long)]
    period: String,
}

impl RecordArgs {
    fn to_input(&self) -> RecordInput {
        RecordInput {
            name: self.name.clone(),
            date: self.date.clone(),
            metric: self.metric.clone(),
            score: self.score.clone(),
            period: self.period.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    period: Option<PeriodArg>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    period: Option<PeriodArg>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[arg(long)]
    id: RecordId,
    #[command(flatten)]
    fields: RecordArgs,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    #[arg(long)]
    id: RecordId,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(long)]
    format: FormatArg,
    /// Target file; the format's extension is added when missing.
    #[arg(long)]
    output: PathBuf,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    period: PeriodArg,
    #[arg(long, default_value = "line")]
    style: StyleArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PeriodArg {
    Daily,
    Weekly,
    Monthly,
}

impl From<PeriodArg> for Period {
    fn from(value: PeriodArg) -> Self {
        match value {
            PeriodArg::Daily => Self::Daily,
            PeriodArg::Weekly => Self::Weekly,
            PeriodArg::Monthly => Self::Monthly,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    #[value(alias = "excel")]
    Xlsx,
    Pdf,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => Self::Csv,
            FormatArg::Xlsx => Self::Xlsx,
            FormatArg::Pdf => Self::Pdf,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StyleArg {
    Line,
    Bar,
    Scatter,
}

impl From<StyleArg> for ChartStyle {
    fn from(value: StyleArg) -> Self {
        match value {
            StyleArg::Line => Self::Line,
            StyleArg::Bar => Self::Bar,
            StyleArg::Scatter => Self::Scatter,
        }
    }
}

/// Resolves config, starts logging, opens the store and runs one command.
///
/// # Errors
/// Returns config, storage and use-case failures unchanged inside `anyhow`.
pub fn run_cli(cli: Cli) -> Result<Value> {
    if matches!(cli.command, Command::Version) {
        return Ok(json!({ "ok": true, "core_version": core_version() }));
    }

    let config = resolve_config(&cli)?;
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        // Logging is diagnostics only; the command still runs.
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    run_command(&conn, &config.db_path, cli.command)
}

/// Runs one command against an already-open connection.
pub fn run_command(conn: &Connection, db_path: &Path, command: Command) -> Result<Value> {
    let output = match command {
        Command::Init => json!({
            "ok": true,
            "db_path": db_path,
            "schema_version": latest_version(),
        }),
        Command::Add(args) => {
            let id = with_record_service(conn, |service| service.add_record(&args.to_input()))?;
            json!({ "ok": true, "id": id })
        }
        Command::List(args) => {
            let filter = RecordFilter {
                name: args.name.map(|name| name.trim().to_string()),
                period: args.period.map(Period::from),
            };
            let records = with_record_service(conn, |service| service.list_filtered(&filter))?;
            json!({ "ok": true, "count": records.len(), "records": records })
        }
        Command::Search(args) => {
            let period = args.period.map(Period::from);
            let records = with_record_service(conn, |service| service.search(&args.name, period))?;
            json!({ "ok": true, "count": records.len(), "records": records })
        }
        Command::Update(args) => {
            let input = args.fields.to_input();
            with_record_service(conn, |service| service.update_record(args.id, &input))?;
            json!({ "ok": true, "id": args.id })
        }
        Command::Delete(args) => {
            with_record_service(conn, |service| service.delete_record(args.id))?;
            json!({ "ok": true, "id": args.id })
        }
        Command::Export(args) => {
            let summary = with_record_service(conn, |service| {
                service.export_all(args.format.into(), &args.output)
            })?;
            json!({
                "ok": true,
                "path": summary.path,
                "format": summary.format,
                "rows": summary.rows,
            })
        }
        Command::Chart(args) => {
            let chart = with_record_service(conn, |service| {
                service.visualize(&args.name, args.period.into(), args.style.into())
            })?;
            json!({ "ok": true, "chart": chart })
        }
        Command::Version => json!({ "ok": true, "core_version": core_version() }),
    };
    Ok(output)
}

/// JSON error document with a stable `kind` for scripts.
pub fn error_envelope(err: &anyhow::Error) -> Value {
    let kind = match err.downcast_ref::<ServiceError>() {
        Some(ServiceError::Validation(_)) => "invalid_input",
        Some(ServiceError::RecordNotFound(_)) => "not_found",
        Some(service_err) if service_err.is_empty_result() => "no_data",
        Some(_) => "failed",
        None => "failed",
    };
    json!({ "ok": false, "kind": kind, "error": format!("{err:#}") })
}

fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(db) = &cli.db {
        config = config.with_db_path(db)?;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = if dir.is_absolute() {
            dir.clone()
        } else {
            std::env::current_dir()
                .context("cannot resolve working directory")?
                .join(dir)
        };
    }
    Ok(config)
}
