// IdeaGrid CLI - headless replay and inspection of idea sheets

mod exit_codes;
mod logging;
mod render;
mod replay;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use ideagrid_config::Settings;
use ideagrid_core::address;
use ideagrid_engine::validation::{parse_candidate, Candidate};
use ideagrid_engine::Zoom;

use exit_codes::{
    scenario_exit_code, EXIT_ERROR, EXIT_INVALID_PAYLOAD, EXIT_SUCCESS, EXIT_USAGE,
};
use replay::{Scenario, ScenarioError};

#[derive(Parser)]
#[command(name = "igrid")]
#[command(about = "Sparse idea sheets: replay editing scenarios, check payloads and paths")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (default: <config dir>/ideagrid/settings.json)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a TOML scenario and print the resulting sheet and editor state
    #[command(after_help = "\
Examples:
  igrid replay move.toml
  igrid replay move.toml --format json
  igrid replay move.toml --zoom 96")]
    Replay {
        /// Scenario file
        scenario: PathBuf,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Zoom level (overrides settings and the scenario)
        #[arg(long)]
        zoom: Option<u32>,
    },

    /// Validate a JSON cell payload or reference
    #[command(after_help = "\
Examples:
  igrid validate cell.json      # {\"type\": \"idea\", \"body\": \"...\", \"extends\": []}
  igrid validate ref.json       # {\"type\": \"idea\", \"path\": \"B2\"}")]
    Validate {
        /// JSON file
        payload: PathBuf,
    },

    /// Decode a path like B12 into column and row
    Decode {
        path: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encode a column and row as a path
    #[command(allow_negative_numbers = true)]
    Encode { col: i32, row: i32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  ideagrid-engine ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("warning: logging disabled: {}", e);
    }

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    let result = match cli.command {
        Commands::Replay {
            scenario,
            format,
            zoom,
        } => cmd_replay(&settings, scenario, format, zoom),
        Commands::Validate { payload } => cmd_validate(payload),
        Commands::Decode { path, json } => cmd_decode(&path, json),
        Commands::Encode { col, row } => cmd_encode(col, row),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INVALID_PAYLOAD, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Create error from a scenario error with the matching exit code.
    pub fn scenario(err: ScenarioError) -> Self {
        let code = scenario_exit_code(&err);
        let hint = match &err {
            ScenarioError::BadAction { .. } => Some(
                "actions: begin-select, exit, delete, move, confirm, right, left, up, down, \
                 shift-down, shift-up, zoom-in, zoom-out, reset, move-cursor:<cols>,<rows>"
                    .to_string(),
            ),
            ScenarioError::BadPath { .. } => {
                Some("paths are uppercase letters then digits, e.g. B12".to_string())
            }
            ScenarioError::DuplicateCell { .. } => {
                Some("column letters add up, so AB1 and BA1 are the same cell".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn zoom_from(settings: &Settings) -> Zoom {
    Zoom::new(
        settings.zoom,
        settings.zoom_step,
        settings.min_zoom,
        settings.max_zoom,
    )
}

fn cmd_replay(
    settings: &Settings,
    path: PathBuf,
    format: OutputFormat,
    zoom: Option<u32>,
) -> Result<(), CliError> {
    let mut scenario = Scenario::load(&path).map_err(CliError::scenario)?;
    if zoom.is_some() {
        scenario.zoom = zoom;
    }

    let result = scenario.replay(zoom_from(settings));
    let session = &result.session;
    let snapshot = session.snapshot();

    match format {
        OutputFormat::Text => {
            println!(
                "{}",
                render::render_text(
                    session.sheet(),
                    &snapshot,
                    settings.visible_cols,
                    settings.visible_rows,
                )
            );
            println!(
                "actions: {} ({} effective)  cells: {}",
                result.total,
                result.effective,
                session.sheet().len()
            );
            if !result.rejected.is_empty() {
                println!("skipped invalid cells: {}", result.rejected.join(", "));
            }
        }
        OutputFormat::Json => {
            let mut value =
                render::render_json(session.sheet(), &snapshot, result.total, result.effective);
            value["rejected"] = serde_json::json!(result.rejected);
            let text = serde_json::to_string_pretty(&value)
                .map_err(|e| CliError::general(format!("cannot encode output: {}", e)))?;
            println!("{}", text);
        }
    }
    Ok(())
}

fn cmd_validate(path: PathBuf) -> Result<(), CliError> {
    let text = fs::read_to_string(&path)
        .map_err(|e| CliError::usage(format!("cannot read {}: {}", path.display(), e)))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| CliError::invalid_payload(format!("malformed JSON: {}", e)))?;

    match parse_candidate(&value) {
        Ok(Candidate::Contents(contents)) => {
            println!("valid {}", contents.type_name());
            Ok(())
        }
        Ok(Candidate::Ref(r)) => {
            println!("valid ref -> {}", r.path);
            Ok(())
        }
        Err(e) => {
            log::warn!("rejected {}: {}", path.display(), e);
            Err(CliError::invalid_payload(e.to_string()))
        }
    }
}

fn cmd_decode(path: &str, json: bool) -> Result<(), CliError> {
    let coord = address::decode(path).map_err(|e| {
        CliError::usage(e.to_string()).with_hint("paths are uppercase letters then digits, e.g. B12")
    })?;
    if json {
        println!("{}", serde_json::json!({ "col": coord.col, "row": coord.row }));
    } else {
        println!("{} {}", coord.col, coord.row);
    }
    Ok(())
}

fn cmd_encode(col: i32, row: i32) -> Result<(), CliError> {
    let path = address::encode(col, row).map_err(|e| CliError::usage(e.to_string()))?;
    println!("{}", path);
    Ok(())
}
