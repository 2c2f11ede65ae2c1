//! Logging infrastructure.
//!
//! Two separate channels exist:
//!
//! 1. Console diagnostics through the `log` facade and the `env_logger`
//!    backend, set up once per binary by [`init_logging`]. `RUST_LOG` takes
//!    precedence over the CLI flags.
//! 2. The session log, a [`SessionLog`] value bound to the session's log
//!    file and handed to every operation that writes to it. It is not a
//!    global; two sessions in one process get two independent loggers.
//!
//! Every session log line is also forwarded to the facade at debug level
//! under the `osba::session` target.

use std::env;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::Local;
use env_logger::Builder;
use log::{Level, LevelFilter};

use crate::session::{FileRole, SessionError};

/// Initialize console logging from CLI verbosity flags.
///
/// Priority: `RUST_LOG` if set, then `quiet` (errors only), then `verbose`
/// (0 = info, 1 = debug, 2+ = trace).
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init_logging(verbose: u8, quiet: bool) {
    let use_env = env::var("RUST_LOG").is_ok();
    let level = determine_level(verbose, quiet);

    let mut builder = Builder::new();
    if use_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(level);
    }
    configure_format(&mut builder, verbose);

    if builder.try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
        return;
    }

    if use_env {
        log::debug!(
            "Logging initialized from RUST_LOG environment variable: {:?}",
            env::var("RUST_LOG").ok()
        );
    } else {
        log::debug!("Logging initialized at level: {:?}", level);
    }
}

fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn configure_format(builder: &mut Builder, verbose: u8) {
    #[cfg(debug_assertions)]
    {
        builder.format(move |buf, record| {
            let timestamp = buf.timestamp_seconds();
            let level = record.level();
            let level_style = buf.default_level_style(level);
            if verbose >= 1 {
                writeln!(
                    buf,
                    "{} {level_style}{:<5}{level_style:#} [{}] {}",
                    timestamp,
                    level,
                    record.module_path().unwrap_or("unknown"),
                    record.args()
                )
            } else {
                writeln!(
                    buf,
                    "{} {level_style}{:<5}{level_style:#} {}",
                    timestamp,
                    level,
                    record.args()
                )
            }
        });
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = verbose;
        builder.format(|buf, record| {
            let level = record.level();
            let level_style = buf.default_level_style(level);
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {}",
                level,
                record.args()
            )
        });
    }
}

/// Session log level for the `--debug` flag.
#[must_use]
pub fn session_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Line-oriented logger bound to one session's log file.
///
/// Lines have the form `<timestamp> | <name> | <LEVEL> -->  <message>`.
/// [`SessionLog::log`] reports write failures on the console and carries on,
/// so a full disk never aborts the menu loop. [`SessionLog::try_log`]
/// returns them instead.
#[derive(Debug)]
pub struct SessionLog<W: Write = File> {
    sink: W,
    name: String,
    level: LevelFilter,
}

impl SessionLog<File> {
    /// Create a new log file. Fails if the file already exists.
    pub fn create(path: &Path, name: &str, level: LevelFilter) -> Result<Self, SessionError> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| SessionError::from_io(FileRole::LogFile, path.to_path_buf(), e))?;
        Ok(Self::from_writer(file, name, level))
    }

    /// Open an existing log file for appending.
    pub fn append(path: &Path, name: &str, level: LevelFilter) -> Result<Self, SessionError> {
        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| SessionError::from_io(FileRole::LogFile, path.to_path_buf(), e))?;
        Ok(Self::from_writer(file, name, level))
    }
}

impl<W: Write> SessionLog<W> {
    /// Wrap any writer.
    pub fn from_writer(sink: W, name: &str, level: LevelFilter) -> Self {
        Self {
            sink,
            name: name.to_string(),
            level,
        }
    }

    #[must_use]
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Whether a message at `level` would be written.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    /// Write one line, reporting a failure on the console only.
    pub fn log(&mut self, level: Level, message: &str) {
        if let Err(e) = self.try_log(level, message) {
            log::warn!("Failed to write session log: {e}");
        }
    }

    /// Write one line and return any write or flush error.
    ///
    /// Used for lines the session cannot do without, such as the sentinel.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error from the sink.
    pub fn try_log(&mut self, level: Level, message: &str) -> std::io::Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }
        log::debug!(target: "osba::session", "{message}");

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        writeln!(
            self.sink,
            "{timestamp} | {} | {level} -->  {message}",
            self.name
        )?;
        self.sink.flush()
    }

    pub fn try_info(&mut self, message: &str) -> std::io::Result<()> {
        self.try_log(Level::Info, message)
    }

    pub fn debug(&mut self, message: &str) {
        self.log(Level::Debug, message);
    }

    pub fn info(&mut self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn warn(&mut self, message: &str) {
        self.log(Level::Warn, message);
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
