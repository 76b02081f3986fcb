//! media-filter: filter a JSON array of catalogue records by search term
//!
//! This is the main entry point for the command-line harness.

use anyhow::{bail, Context, Result};
use clap::Parser;
use media_filter::config::{self, Settings};
use media_filter::matcher::PatternMode;
use media_filter::records::Field;
use serde_json::Value;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "media-filter",
    about = "Filter catalogue records whose title fields match a search term",
    version,
    after_help = "Settings are read from --config, MEDIA_FILTER_SETTINGS_PATH, ./media-filter.yml, \
                  then the user config dir. MEDIA_FILTER_FALLTHROUGH, MEDIA_FILTER_PATTERN_MODE and \
                  MEDIA_FILTER_LOG_LEVEL override them; RUST_LOG overrides the log level."
)]
struct Cli {
    /// Path to settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Treat TERM as plain text
    #[arg(short, long)]
    literal: bool,

    /// Fields to consult, in priority order (overrides settings)
    #[arg(short, long = "field", value_name = "FIELD", value_delimiter = ',')]
    fields: Vec<Field>,

    /// Case-insensitive regular expression (empty string keeps everything)
    term: String,

    /// JSON array of records, or `-` for stdin (default: stdin)
    input: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line overrides on top of loaded settings
    fn apply(&self, settings: &mut Settings) -> Result<()> {
        if self.literal {
            settings.pattern.mode = PatternMode::Literal;
        }
        if !self.fields.is_empty() {
            settings.filter.fields = self.fields.clone();
        }
        settings.validate()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration; the subscriber depends on its log level
    let source = config::locate(cli.config.as_deref());
    let mut settings = config::load_from(source.as_deref())?;
    cli.apply(&mut settings)?;

    init_logging(&settings);
    info!("Starting media-filter v{}", media_filter::VERSION);
    match &source {
        Some(path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }

    let records = read_records(cli.input.as_ref())?;
    info!("Read {} records", records.len());

    let filter = settings.build_filter::<Value>();
    let results = filter.filter_owned(records, &cli.term)?;
    info!("Matched {} records for '{}'", results.len(), cli.term);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &results)?;
    writeln!(out)?;

    Ok(())
}

/// Initialize logging on stderr so stdout stays valid JSON
fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Read a JSON array of records from a file, or stdin when `path` is `None` or `-`
fn read_records(path: Option<&PathBuf>) -> Result<Vec<Value>> {
    let content = match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read records from {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read records from stdin")?;
            buf
        }
    };

    match serde_json::from_str(&content).context("Records must be valid JSON")? {
        Value::Array(records) => Ok(records),
        // Catalogue search responses wrap the list in `results`
        Value::Object(mut object) => match object.remove("results") {
            Some(Value::Array(records)) => Ok(records),
            _ => bail!("expected a JSON array or an object with a `results` array"),
        },
        _ => bail!("expected a JSON array or an object with a `results` array"),
    }
}
