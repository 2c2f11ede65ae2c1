use osba::session::{validate, InstanceId, Mode, Sentinel, SessionError, SessionRecord, SessionStore};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_truncated_document_is_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("osba_data_file.dat");
    let store = SessionStore::new(&path);
    store
        .create_from(SessionRecord::new(InstanceId::new("TRUNC001")))
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    fs::write(&path, &content[..content.len() / 2]).unwrap();

    assert!(matches!(store.load(), Err(SessionError::Corrupt { .. })));
    assert!(matches!(store.resume(), Err(SessionError::Corrupt { .. })));
}

#[test]
fn test_document_with_wrong_shape_is_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("osba_data_file.dat");
    // The shape of a different document format
    fs::write(
        &path,
        r#"{"dataFile": [{"instanceUUID": "ABC12345", "timestampStart": "2024-01-01 10:00"}]}"#,
    )
    .unwrap();

    assert!(matches!(
        SessionStore::new(&path).load(),
        Err(SessionError::Corrupt { .. })
    ));
}

#[test]
fn test_empty_document_is_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("osba_data_file.dat");
    fs::write(&path, "").unwrap();

    assert!(matches!(
        SessionStore::new(&path).load(),
        Err(SessionError::Corrupt { .. })
    ));
}

#[test]
fn test_log_without_sentinel_fails_resume() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("osba_data_file.dat");
    let log = dir.path().join("osba_log_file.txt");
    SessionStore::new(&data).create().unwrap();
    fs::write(&log, "2024-01-01 10:00:00,000 | root | INFO -->  hello\n").unwrap();

    assert!(matches!(
        validate(Mode::Resume, &data, &log),
        Err(SessionError::MissingSentinel(_))
    ));
}

#[test]
fn test_first_sentinel_line_wins() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("osba_data_file.dat");
    let log = dir.path().join("osba_log_file.txt");
    SessionStore::new(&data)
        .create_from(SessionRecord::new(InstanceId::new("FIRST001")))
        .unwrap();
    let first = Sentinel::new(InstanceId::new("FIRST001")).message();
    let second = Sentinel::new(InstanceId::new("OTHER002")).message();
    fs::write(&log, format!("t | root | INFO -->  {first}\nt | root | INFO -->  {second}\n"))
        .unwrap();

    assert_eq!(
        validate(Mode::Resume, &data, &log).unwrap(),
        Some(InstanceId::new("FIRST001"))
    );
}

#[test]
fn test_hand_edited_identifier_is_detected() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("osba_data_file.dat");
    let log = dir.path().join("osba_log_file.txt");
    let store = SessionStore::new(&data);
    let record = store.create().unwrap();
    fs::write(
        &log,
        format!("{}\n", Sentinel::new(record.instance_id.clone()).message()),
    )
    .unwrap();

    let content = fs::read_to_string(&data).unwrap();
    fs::write(&data, content.replace(record.instance_id.as_str(), "EDITED00")).unwrap();

    assert!(matches!(
        validate(Mode::Resume, &data, &log),
        Err(SessionError::IdentityMismatch { .. })
    ));
}
