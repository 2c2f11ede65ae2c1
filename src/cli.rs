//! Command-line interface definitions.
//!
//! Two binaries share this module: `osba`, the simulated business
//! application, and `pii-scan`, the line scanner.
//!
//! # Example
//!
//! ```bash
//! # Start a new session, logging into /mnt/logs
//! osba start --logpath /mnt/logs
//!
//! # Resume it later from the same working directory
//! osba --debug resume --logpath /mnt/logs
//!
//! # Scan with the built-in defaults
//! pii-scan
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::scanner::MatchMode;
use crate::session::Mode;

/// A simulated business application performing actions and depending on
/// distinct components to function.
///
/// The session document is always kept in the current working directory.
#[derive(Debug, Parser)]
#[command(name = "osba")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Dump debug info and log at debug level
    #[arg(long, global = true)]
    pub debug: bool,

    /// Print errors as JSON objects
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE", env = "OSBA_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the [simulated] business application
    Start(LogPathArgs),
    /// Resume the [simulated] business application
    Resume(LogPathArgs),
}

impl Commands {
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::Start(_) => Mode::Start,
            Self::Resume(_) => Mode::Resume,
        }
    }

    #[must_use]
    pub fn log_args(&self) -> &LogPathArgs {
        match self {
            Self::Start(args) | Self::Resume(args) => args,
        }
    }
}

/// Arguments shared by `start` and `resume`.
#[derive(Debug, Args)]
pub struct LogPathArgs {
    /// The directory where the log file is created or already stored
    #[arg(long, value_name = "/path/to/log/dir")]
    pub logpath: PathBuf,
}

/// Scan files for lines matching the contents of a name file.
///
/// Without arguments the built-in or configured defaults are used.
#[derive(Debug, Parser)]
#[command(name = "pii-scan")]
#[command(author, version, about, long_about = None)]
pub struct ScanCli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the progress spinner and informational output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE", env = "OSBA_CONFIG")]
    pub config: Option<PathBuf>,

    /// File whose full text is compared with each scanned line
    #[arg(long, value_name = "FILE")]
    pub name_file: Option<PathBuf>,

    /// Directory tree to scan
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Report file that matches are appended to
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// How lines are compared with the name file
    #[arg(long, value_enum)]
    pub match_mode: Option<MatchMode>,
}
