//! `songplay` binary: parse flags, set up logging, dispatch the subcommand.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use songplay_cli::logging::{LogConfig, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_etl, run_tables};
use crate::summary::print_summary;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    init_logging(&log_config(cli)).context("failed to initialize logging")?;
    match &cli.command {
        Command::Run(args) => print_summary(&run_etl(args)?),
        Command::Tables => run_tables()?,
    }
    Ok(())
}

/// `--log-level` beats `-v`/`-q`; `RUST_LOG` only applies when neither is given.
fn log_config(cli: &Cli) -> LogConfig {
    let level_given = cli.verbosity.is_present() || cli.log_level.is_some();
    LogConfig {
        level_filter: cli
            .log_level
            .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from),
        use_env_filter: !level_given,
        format: cli.log_format.into(),
        log_file: cli.log_file.clone(),
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
        },
        ..LogConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use songplay_cli::logging::LogFormat;

    use super::*;

    #[test]
    fn explicit_level_overrides_verbosity() {
        let cli = Cli::parse_from([
            "songplay",
            "-v",
            "--log-level",
            "error",
            "--color",
            "never",
            "tables",
        ]);

        let config = log_config(&cli);

        assert_eq!(config.level_filter, LevelFilter::ERROR);
        assert!(!config.use_env_filter);
        assert!(!config.with_ansi);
    }

    #[test]
    fn env_filter_applies_without_level_flags() {
        let cli = Cli::parse_from(["songplay", "--log-format", "json", "tables"]);

        let config = log_config(&cli);

        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert_eq!(config.format, LogFormat::Json);
    }
}
