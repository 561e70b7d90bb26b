//! mensura: score assessment responses from the command line.
//!
//! Usage:
//!   mensura scales
//!   mensura validate <scale.json>
//!   mensura score --scale <id|scale.json> --responses <responses.json> [--force]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use mensura_audit::events::AuditEvent;
use mensura_audit::notify::{notify_if_severe, TracingNotifier};
use mensura_core::models::scale::{AdministrationMode, ScaleDefinition};
use mensura_core::models::session::{AssessmentSession, ResponseEntry};
use mensura_engine::{AssessmentEngine, EngineConfig, EvaluationRequest};
use mensura_instruments::custom::load_scale_file;
use mensura_instruments::{all_instruments, require_instrument};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "mensura")]
#[command(version)]
#[command(about = "Score and interpret clinical assessment responses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in instruments
    Scales,

    /// Check a scale definition file
    Validate {
        /// Path to a scale definition (JSON)
        file: PathBuf,
    },

    /// Score a response file and print the report as JSON
    Score {
        /// Built-in instrument id or path to a scale definition file
        #[arg(short, long)]
        scale: String,

        /// Path to the responses (JSON)
        #[arg(short, long)]
        responses: PathBuf,

        /// Engine configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Administration mode; defaults to the scale's own
        #[arg(short, long, value_enum)]
        mode: Option<Mode>,

        /// Accept completion below the configured minimum
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    SelfAdministered,
    Supervised,
    ClinicianAdministered,
}

impl From<Mode> for AdministrationMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::SelfAdministered => AdministrationMode::SelfAdministered,
            Mode::Supervised => AdministrationMode::Supervised,
            Mode::ClinicianAdministered => AdministrationMode::ClinicianAdministered,
        }
    }
}

/// Shape of the `--responses` file.
#[derive(Deserialize)]
struct ResponseFile {
    #[serde(default)]
    patient_id: Option<Uuid>,
    #[serde(default)]
    administrator_id: Option<Uuid>,
    /// Total time the patient took, in seconds.
    #[serde(default)]
    elapsed_seconds: Option<f64>,
    responses: Vec<ResponseLine>,
}

#[derive(Deserialize)]
struct ResponseLine {
    item_number: u32,
    raw_value: u32,
    #[serde(default)]
    duration_seconds: Option<f64>,
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match cli.command {
        Commands::Scales => {
            for instrument in all_instruments() {
                let def = instrument.definition();
                println!(
                    "{:<8} {:<8} {} items, range {}–{}",
                    instrument.id(),
                    instrument.name(),
                    def.items.len(),
                    def.score_range.min,
                    def.score_range.max
                );
            }
        }
        Commands::Validate { file } => {
            let scale = load_scale_file(&file)?;
            println!(
                "{}: valid ({} items, {} subscales, {} rules)",
                scale.id,
                scale.items.len(),
                scale.subscales.len(),
                scale.interpretation_rules.len()
            );
        }
        Commands::Score {
            scale,
            responses,
            config,
            mode,
            force,
        } => {
            let config = match config {
                Some(path) => EngineConfig::load(&path)?,
                None => EngineConfig::default(),
            };
            let scale = resolve_scale(&scale)?;
            let file: ResponseFile = serde_json::from_str(
                &std::fs::read_to_string(&responses)
                    .map_err(|e| eyre::eyre!("failed to read {}: {e}", responses.display()))?,
            )?;
            score(config, &scale, file, mode.map(Into::into), force)?;
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// An existing file is a scale definition; anything else is looked up in
/// the built-in catalog.
fn resolve_scale(scale: &str) -> eyre::Result<ScaleDefinition> {
    let path = Path::new(scale);
    if path.is_file() {
        return Ok(load_scale_file(path)?);
    }
    if path.extension().is_some_and(|ext| ext == "json") {
        eyre::bail!("scale file {} does not exist", path.display());
    }
    Ok(require_instrument(scale)?.definition().clone())
}

fn score(
    config: EngineConfig,
    scale: &ScaleDefinition,
    file: ResponseFile,
    mode: Option<AdministrationMode>,
    force: bool,
) -> eyre::Result<()> {
    let now = jiff::Timestamp::now();
    let administrator_id = file.administrator_id.unwrap_or_else(Uuid::new_v4);

    let mut session = AssessmentSession::new(
        scale.id.clone(),
        file.patient_id.unwrap_or_else(Uuid::new_v4),
        administrator_id,
        mode.unwrap_or(scale.administration_mode),
        now,
    );
    session.start(now)?;
    for line in file.responses {
        session.record_response(
            scale,
            ResponseEntry {
                item_number: line.item_number,
                raw_value: line.raw_value,
                duration_seconds: line.duration_seconds,
                recorded_at: now,
            },
        )?;
    }

    // Without an explicit elapsed time, fall back to the per-item timings.
    let observed = file.elapsed_seconds.or_else(|| {
        let timed: Vec<f64> = session
            .responses
            .values()
            .filter_map(|r| r.duration_seconds)
            .collect();
        (!timed.is_empty()).then(|| timed.iter().sum())
    });

    let engine = AssessmentEngine::new(config);
    let report = engine.evaluate(&EvaluationRequest {
        scale,
        session: &session,
        observed_duration_seconds: observed,
        force,
        calculated_at: now,
    })?;
    session.complete(now)?;

    match AuditEvent::assessment_scored(&report, administrator_id.to_string()) {
        Ok(event) => event.emit(),
        Err(e) => tracing::warn!(error = %e, "failed to build audit event"),
    }
    notify_if_severe(&TracingNotifier, &report);

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
