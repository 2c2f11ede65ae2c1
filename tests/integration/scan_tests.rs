use osba::scanner::{MatchMode, NamePattern, PiiScanner, Report, ScanError};
use std::fs::{self, File};
use std::io::Write;
use tempfile::{tempdir, TempDir};

fn create_tree() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path().join("share");
    fs::create_dir_all(root.join("hr").join("2024")).unwrap();

    fs::write(
        root.join("hr").join("staff.csv"),
        "id,name\n1,Jane Doe\nJane Doe\n",
    )
    .unwrap();
    fs::write(root.join("hr").join("2024").join("notes.txt"), "Jane Doe\r\n").unwrap();
    fs::write(root.join("readme.md"), "nothing here\n").unwrap();
    // No trailing newline on the last line
    fs::write(root.join("tail.txt"), "first\nJane Doe").unwrap();

    fs::write(dir.path().join(".NAME"), "Jane Doe\n").unwrap();
    dir
}

#[test]
fn test_scan_with_single_line_name_file() {
    let dir = create_tree();
    let pattern = NamePattern::load(&dir.path().join(".NAME"), MatchMode::WholeFile).unwrap();
    let report = Report::new(dir.path().join("BREACH---PII_matched_data.txt"));

    let outcome = PiiScanner::new(pattern, &dir.path().join("share"))
        .scan(&report, None)
        .unwrap();

    // Only the exact line with a plain \n terminator matches
    assert_eq!(outcome.summary.matches, 1);
    assert_eq!(outcome.matches[0].line_number, 3);
    assert!(outcome.matches[0].path.ends_with("staff.csv"));
    assert_eq!(outcome.summary.files_scanned, 4);
    assert_eq!(outcome.summary.skipped, 0);
}

#[test]
fn test_report_accumulates_across_runs() {
    let dir = create_tree();
    let report = Report::new(dir.path().join("report.txt"));
    let root = dir.path().join("share");

    for _ in 0..2 {
        let pattern = NamePattern::load(&dir.path().join(".NAME"), MatchMode::WholeFile).unwrap();
        PiiScanner::new(pattern, &root).scan(&report, None).unwrap();
    }

    let text = fs::read_to_string(report.path()).unwrap();
    assert_eq!(text.lines().count(), 2);
    for line in text.lines() {
        assert!(line.starts_with("*** PII Match: Jane Doe    "));
        assert!(line.ends_with("staff.csv"));
    }
}

#[test]
fn test_containment_with_multi_line_name_file() {
    let dir = create_tree();
    let mut f = File::create(dir.path().join(".NAME")).unwrap();
    writeln!(f, "Jane Doe").unwrap();
    writeln!(f, "John Roe").unwrap();
    drop(f);

    let whole = NamePattern::load(&dir.path().join(".NAME"), MatchMode::WholeFile).unwrap();
    let contained = NamePattern::load(&dir.path().join(".NAME"), MatchMode::Containment).unwrap();
    let root = dir.path().join("share");

    let outcome = PiiScanner::new(whole, &root)
        .scan(&Report::new(dir.path().join("whole.txt")), None)
        .unwrap();
    assert_eq!(outcome.summary.matches, 0);

    let outcome = PiiScanner::new(contained, &root)
        .scan(&Report::new(dir.path().join("contained.txt")), None)
        .unwrap();
    // "Jane Doe\n" in staff.csv and "Jane Doe" without terminator in tail.txt
    assert_eq!(outcome.summary.matches, 2);
}

#[test]
fn test_missing_name_file() {
    let dir = tempdir().unwrap();
    let result = NamePattern::load(&dir.path().join(".NAME"), MatchMode::WholeFile);
    assert!(matches!(result, Err(ScanError::NameFileNotFound(_))));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = create_tree();
    let locked = dir.path().join("share").join("locked.txt");
    fs::write(&locked, "Jane Doe\n").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root can read anything; nothing to check in that case
    if File::open(&locked).is_ok() {
        return;
    }

    let pattern = NamePattern::load(&dir.path().join(".NAME"), MatchMode::WholeFile).unwrap();
    let outcome = PiiScanner::new(pattern, &dir.path().join("share"))
        .scan(&Report::new(dir.path().join("report.txt")), None)
        .unwrap();

    assert_eq!(outcome.summary.skipped, 1);
    assert_eq!(outcome.summary.matches, 1);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}
