//! CLI argument definitions for the `songplay` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use songplay_cli::logging::LogFormat;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "songplay",
    version,
    about = "Build a song-play star schema from catalog and activity JSON feeds",
    long_about = "Build a song-play star schema from catalog and activity JSON feeds.\n\n\
                  Writes Song, Artist, User, Time and SongPlay tables as\n\
                  Hive-partitioned Parquet directories."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read both feeds and write the five tables.
    Run(RunArgs),

    /// List the output tables with their columns and partition keys.
    Tables,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Input root holding `song_data/` and `log_data/`.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output root receiving one directory per table.
    #[arg(long = "output", short = 'o', value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// JSON pipeline configuration; flags given alongside it take precedence.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Catalog path pattern relative to the input root.
    #[arg(long = "catalog-pattern", value_name = "PATTERN")]
    pub catalog_pattern: Option<String>,

    /// Activity path pattern relative to the input root.
    #[arg(long = "activity-pattern", value_name = "PATTERN")]
    pub activity_pattern: Option<String>,

    /// Page value that marks a song play.
    #[arg(long = "play-action", value_name = "ACTION")]
    pub play_action: Option<String>,

    /// Replace tables that already exist under the output root.
    #[arg(long = "overwrite")]
    pub overwrite: bool,

    /// Build and validate every table without writing.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
