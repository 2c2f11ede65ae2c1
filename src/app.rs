//! Start/resume flow of the business application.

use std::fs::File;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use rand::Rng;

use crate::cli::Cli;
use crate::config::{Config, SessionConfig};
use crate::error::ExitCode;
use crate::logging::{init_logging, session_level, SessionLog};
use crate::menu::Menu;
use crate::session::{validate, Mode, Sentinel, SessionError, SessionRecord, SessionStore};

/// Paths of the two files that make up a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
}

impl SessionPaths {
    /// The data file lives in `work_dir`, the log file in `log_dir`.
    #[must_use]
    pub fn resolve(config: &SessionConfig, work_dir: &Path, log_dir: &Path) -> Self {
        Self {
            data_file: work_dir.join(&config.data_file_name),
            log_file: log_dir.join(&config.log_file_name),
        }
    }
}

/// A validated session, ready for the menu.
#[derive(Debug)]
pub struct OpenSession {
    pub store: SessionStore,
    pub log: SessionLog<File>,
    pub record: SessionRecord,
}

/// Validate and open a session according to `mode`.
///
/// `start` creates both files, writes the sentinel and seeds records;
/// `resume` checks that the files agree and appends a resume timestamp.
///
/// # Errors
///
/// Any [`SessionError`] from validation or file access. A failed `start`
/// removes the files it had already created.
pub fn open_session(
    mode: Mode,
    paths: &SessionPaths,
    config: &SessionConfig,
    debug: bool,
) -> Result<OpenSession> {
    let level = session_level(debug);
    let store = SessionStore::new(&paths.data_file);

    match mode {
        Mode::Start => {
            validate(Mode::Start, &paths.data_file, &paths.log_file)?;
            let mut log = SessionLog::create(&paths.log_file, &config.logger_name, level)?;
            let record = match store.create() {
                Ok(record) => record,
                Err(e) => {
                    drop(log);
                    discard(&paths.log_file);
                    return Err(e.into());
                }
            };

            // A start whose header cannot be written is rolled back
            if let Err(e) = write_start_header(&mut log, &record, paths) {
                drop(log);
                discard(&paths.data_file);
                discard(&paths.log_file);
                return Err(e.into());
            }

            let mut rng = rand::thread_rng();
            let count = rng.gen_range(config.seed_range());
            let record = store.seed(&mut rng, count)?;
            log.info("Initial bulk creation of OSBA data");
            log.info(&format!("{count} records added"));
            log::info!("Started session {}", record.instance_id);

            Ok(OpenSession { store, log, record })
        }
        Mode::Resume => {
            let instance_id = validate(Mode::Resume, &paths.data_file, &paths.log_file)?;
            let mut log = SessionLog::append(&paths.log_file, &config.logger_name, level)?;
            let record = store.resume()?;

            log.info(">>> Resuming OSBA data file <<<");
            if let Some(resumed) = record.resumed_at.last() {
                log.info(&format!("Timestamp         : {}", display_time(*resumed)));
            }
            if let Some(id) = instance_id {
                log::info!("Resumed session {id}");
            }

            Ok(OpenSession { store, log, record })
        }
    }
}

/// Write the start header, sentinel included, to a fresh session log.
///
/// # Errors
///
/// Returns [`SessionError::Io`] for the log file if any header line cannot
/// be written.
pub fn write_start_header<W: Write>(
    log: &mut SessionLog<W>,
    record: &SessionRecord,
    paths: &SessionPaths,
) -> Result<(), SessionError> {
    let lines = [
        "*** Starting OSBA data file ***".to_string(),
        Sentinel::new(record.instance_id.clone()).message(),
        format!("Timestamp         : {}", display_time(record.started_at)),
        format!("Data File path    : {}", paths.data_file.display()),
        format!("Log File path     : {}", paths.log_file.display()),
        "-----------------------------------------".to_string(),
        String::new(),
    ];
    for line in &lines {
        log.try_info(line).map_err(|source| SessionError::Io {
            path: paths.log_file.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Remove a file this call created before failing.
fn discard(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        log::warn!("Failed to remove {}: {e}", path.display());
    }
}

fn display_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Open the session and run the menu on the given input and output.
pub fn run_session<R: BufRead, W: Write>(
    cli: &Cli,
    config: &Config,
    work_dir: &Path,
    input: R,
    output: W,
) -> Result<ExitCode> {
    let paths = SessionPaths::resolve(
        &config.session,
        work_dir,
        &cli.command.log_args().logpath,
    );
    log::debug!("Session paths: {:?}", paths);

    let mut session = open_session(cli.command.mode(), &paths, &config.session, cli.debug)?;
    if cli.debug {
        session.log.debug(&format!("{cli:?}"));
    }

    Menu::new(input, output, &session.store, &mut session.log).run()?;
    Ok(ExitCode::Success)
}

/// Entry point used by the `osba` binary.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    init_logging(u8::from(cli.debug), false);
    if cli.debug {
        println!("DEBUG: {cli:?}");
    }

    let config = Config::load(cli.config.as_deref());
    let work_dir = std::env::current_dir().context("Failed to determine working directory")?;
    let stdin = std::io::stdin();
    run_session(&cli, &config, &work_dir, stdin.lock(), std::io::stdout())
}
