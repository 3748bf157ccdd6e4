//! Setflow - command-line DJ set planner
//!
//! Loads a set file or a built-in preset, validates its energy flow, tempo
//! changes and key transitions, and exports tracklists.
//!
//! Set `RUST_LOG=info` (or `debug`) for verbose output.

mod cli;
mod commands;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::CheckOutcome;
use setflow_core::config::{default_config_path, load_config, SetflowConfig};

/// Exit status for `check --strict` on a set with violations
const EXIT_VIOLATIONS: u8 = 2;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            let _ = report_error(&mut std::io::stderr().lock(), &e);
            ExitCode::FAILURE
        }
    }
}

/// Print a fatal error with its context chain on one line
fn report_error(err_out: &mut impl Write, e: &anyhow::Error) -> std::io::Result<()> {
    writeln!(err_out, "Error: {:#}", e)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config: SetflowConfig = load_config(&config_path);
    log::info!(
        "setflow: energy scale 1-{}, {:.1} min per track",
        config.energy_scale().max(),
        config.minutes_per_track
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Check { source, strict } => {
            let set = commands::load_set(&source, &config)?;
            let outcome = commands::check(&mut out, set, &config)?;
            if strict && outcome != CheckOutcome::Clean {
                return Ok(ExitCode::from(EXIT_VIOLATIONS));
            }
        }
        Commands::Camelot { key } => commands::camelot(&mut out, &key)?,
        Commands::Compat { key1, key2 } => {
            commands::compat(&mut out, &key1, &key2)?;
        }
        Commands::Presets => commands::list_presets(&mut out)?,
        Commands::Export {
            source,
            format,
            output,
        } => {
            let set = commands::load_set(&source, &config)?;
            commands::export(&mut out, &set, format, output.as_deref())?;
        }
    }

    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_reported_once() {
        let err = std::fs::read_to_string("/nonexistent/friday.yaml")
            .context("Failed to load set file")
            .unwrap_err();

        let mut buf = Vec::new();
        report_error(&mut buf, &err).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Error: Failed to load set file: "));
    }
}
