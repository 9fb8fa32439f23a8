//! Texnouz OCPI: payload checker
//!
//! Parses an OCPI JSON object, validates it and prints the normalized form.
//!
//! ```sh
//! # Check a file
//! ocpi-check business_details details.json
//!
//! # Read from stdin, print compact JSON
//! curl -s https://cpo.example.com/ocpi/2.2.1 | ocpi-check version_detail --compact
//!
//! # List supported object kinds
//! ocpi-check --list
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;
use tracing::{error, info};

use texnouz_ocpi::config::AppConfig;
use texnouz_ocpi::telemetry::init_tracing;
use texnouz_ocpi::ObjectKind;

/// Validate and normalize OCPI 2.2 payloads.
#[derive(Parser, Debug)]
#[command(
    name = "ocpi-check",
    version,
    about = "Validate and normalize OCPI 2.2 JSON objects",
    long_about = "Parses a JSON payload as the given OCPI object kind and prints the \
                  normalized JSON. Exits with status 1 when the payload is invalid.\n\n\
                  Default config: ~/.config/texnouz-ocpi/config.toml"
)]
struct Cli {
    /// Object kind, e.g. business_details, hours, version_detail.
    #[arg(required_unless_present = "list")]
    kind: Option<String>,

    /// JSON file to read; stdin when omitted.
    file: Option<PathBuf>,

    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "OCPI_CONFIG")]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Print single-line JSON.
    #[arg(long)]
    compact: bool,

    /// List the supported object kinds and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(texnouz_ocpi::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Err(e) = init_tracing(&config) {
        eprintln!("Failed to initialise logging: {e}");
    }
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        // A missing file is the normal case for a command line tool.
        Some(e) => info!("Using default configuration ({e})"),
    }

    if cli.list {
        for kind in ObjectKind::ALL {
            println!("{kind}");
        }
        return ExitCode::SUCCESS;
    }

    match run(&cli, &config) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            // Logging may be filtered out; the verdict is always printed.
            let _ = report_failure(&mut io::stderr(), &*e);
            ExitCode::FAILURE
        }
    }
}

fn report_failure(out: &mut impl Write, error: &dyn std::error::Error) -> io::Result<()> {
    writeln!(out, "ocpi-check: {error}")
}

fn run(cli: &Cli, config: &AppConfig) -> Result<String, Box<dyn std::error::Error>> {
    let kind = ObjectKind::from_name(cli.kind.as_deref().unwrap_or_default())?;

    let raw = match &cli.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let payload: Value = serde_json::from_str(&raw)?;

    info!(kind = kind.name(), "Checking payload");
    let normalized = kind.normalize(&payload)?;

    let output = if cli.compact || !config.output.pretty {
        serde_json::to_string(&normalized)?
    } else {
        serde_json::to_string_pretty(&normalized)?
    };
    Ok(output)
}
