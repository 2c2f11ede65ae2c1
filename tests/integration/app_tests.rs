use clap::Parser;
use osba::app::run_session;
use osba::cli::Cli;
use osba::config::Config;
use osba::error::ExitCode;
use osba::session::{SessionError, SessionStore};
use std::fs;
use std::io::Cursor;
use tempfile::tempdir;

fn config() -> Config {
    let mut config = Config::default();
    config.session.seed_min = 2;
    config.session.seed_max = 2;
    config
}

fn cli(command: &str, logpath: &std::path::Path, debug: bool) -> Cli {
    let logpath = logpath.to_string_lossy().to_string();
    let mut args = vec!["osba", command, "--logpath", logpath.as_str()];
    if debug {
        args.push("--debug");
    }
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn test_start_add_quit_then_resume() {
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir(&logs).unwrap();
    let config = config();

    let mut output = Vec::new();
    let code = run_session(
        &cli("start", &logs, false),
        &config,
        dir.path(),
        Cursor::new("1\n\n5\n"),
        &mut output,
    )
    .unwrap();
    assert_eq!(code, ExitCode::Success);

    let store = SessionStore::new(dir.path().join("osba_data_file.dat"));
    let record = store.load().unwrap();
    assert_eq!(record.entries.len(), 3);
    assert!(String::from_utf8(output)
        .unwrap()
        .contains("Adding new record    : "));

    let mut output = Vec::new();
    run_session(
        &cli("resume", &logs, true),
        &config,
        dir.path(),
        Cursor::new("3\n\n5\n"),
        &mut output,
    )
    .unwrap();

    let record = store.load().unwrap();
    assert_eq!(record.resumed_at.len(), 1);
    assert_eq!(record.entries.len(), 3);
    let shown = String::from_utf8(output).unwrap();
    assert!(shown.contains(&format!("\"instanceId\": \"{}\"", record.instance_id)));

    let log = fs::read_to_string(logs.join("osba_log_file.txt")).unwrap();
    assert!(log.contains("Option selected by user: 1"));
    assert!(log.contains("Option selected by user: 3"));
    assert!(log.contains("DEBUG -->  Cli {"));
    assert_eq!(log.matches("[Terminating application]").count(), 2);
}

#[test]
fn test_start_refused_when_session_exists() {
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir(&logs).unwrap();
    let config = config();

    run_session(
        &cli("start", &logs, false),
        &config,
        dir.path(),
        Cursor::new("5\n"),
        Vec::new(),
    )
    .unwrap();
    let before = fs::read_to_string(dir.path().join("osba_data_file.dat")).unwrap();

    let err = run_session(
        &cli("start", &logs, false),
        &config,
        dir.path(),
        Cursor::new("5\n"),
        Vec::new(),
    )
    .unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::AlreadyExists);
    assert!(matches!(
        err.downcast_ref::<SessionError>(),
        Some(SessionError::AlreadyExists { .. })
    ));
    let after = fs::read_to_string(dir.path().join("osba_data_file.dat")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_resume_with_foreign_log_is_mismatch() {
    let dir = tempdir().unwrap();
    let logs_a = dir.path().join("a");
    let logs_b = dir.path().join("b");
    let work_a = dir.path().join("work_a");
    let work_b = dir.path().join("work_b");
    for d in [&logs_a, &logs_b, &work_a, &work_b] {
        fs::create_dir(d).unwrap();
    }
    let config = config();

    for (work, logs) in [(&work_a, &logs_a), (&work_b, &logs_b)] {
        run_session(
            &cli("start", logs, false),
            &config,
            work,
            Cursor::new("5\n"),
            Vec::new(),
        )
        .unwrap();
    }

    // Data file from session A, log file from session B
    let err = run_session(
        &cli("resume", &logs_b, false),
        &config,
        &work_a,
        Cursor::new("5\n"),
        Vec::new(),
    )
    .unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::IdentityMismatch);
}

#[test]
fn test_custom_file_names_from_config() {
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir(&logs).unwrap();
    let mut config = config();
    config.session.data_file_name = "custom.json".into();
    config.session.log_file_name = "custom.log".into();
    config.session.logger_name = "osba".into();

    run_session(
        &cli("start", &logs, false),
        &config,
        dir.path(),
        Cursor::new("5\n"),
        Vec::new(),
    )
    .unwrap();

    assert!(dir.path().join("custom.json").is_file());
    let log = fs::read_to_string(logs.join("custom.log")).unwrap();
    assert!(log.contains(" | osba | INFO -->  "));
}
