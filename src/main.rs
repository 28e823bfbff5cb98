// Autoreg - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Settings loading (before logging, so the configured level applies)
// 3. Logging initialisation
// 4. A single run, reported on stdout; any error exits non-zero

use autoreg::app::pipeline::{self, RunStamp};
use autoreg::platform::config;
use autoreg::util;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Autoreg - split an autoregistration dump into records and build a
/// browser-profile mass-import spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "autoreg", version, about)]
struct Cli {
    /// Settings file.
    #[arg(short = 's', long = "settings", default_value = util::constants::DEFAULT_SETTINGS_FILE_NAME)]
    settings: PathBuf,

    /// Split and classify only; write no artifacts.
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Print the classified records as JSON on stdout.
    #[arg(long = "json")]
    json: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Captured once, before any work, and threaded into the run.
    let stamp = RunStamp::now();

    let (settings, warnings) = match config::load_settings(&cli.settings) {
        Ok(loaded) => loaded,
        Err(e) => {
            util::logging::init(cli.debug, None);
            report(&util::error::AutoregError::from(e));
            return ExitCode::FAILURE;
        }
    };

    util::logging::init(cli.debug, settings.log_level.as_deref());
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        settings = %cli.settings.display(),
        dry_run = cli.dry_run,
        "Autoreg starting"
    );

    let outcome = match pipeline::run(&settings, &stamp, cli.dry_run) {
        Ok(outcome) => outcome,
        Err(e) => {
            report(&e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        records = outcome.summary.records,
        unnamed = outcome.summary.unnamed_records,
        "Run complete"
    );

    if cli.json {
        match serde_json::to_string_pretty(&outcome.records) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialise records");
                eprintln!("Error: failed to serialise records: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", outcome.summary);
    }

    ExitCode::SUCCESS
}

/// Log a fatal error and print it on stderr.
///
/// Every error's Display already carries its underlying cause.
fn report(err: &util::error::AutoregError) {
    tracing::error!(error = %err, "Run failed");
    eprintln!("Error: {err}");
}
