use std::fs;

use tempfile::TempDir;

use crate::logging::{LOG_FILE, LogLimits};

fn limits(max_bytes: u64, keep_bytes: u64) -> LogLimits {
    LogLimits {
        max_bytes,
        keep_bytes,
    }
}

#[test]
fn test_small_log_is_left_alone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(LOG_FILE);
    fs::write(&path, "one\ntwo\n").unwrap();

    assert_eq!(limits(1024, 512).trim(&path).unwrap(), None);
    assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
}

#[test]
fn test_missing_log_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    assert_eq!(limits(10, 5).trim(&dir.path().join(LOG_FILE)).unwrap(), None);
}

#[test]
fn test_trim_keeps_recent_whole_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(LOG_FILE);
    let content: String = (0..100).map(|i| format!("line {i:03}\n")).collect();
    fs::write(&path, &content).unwrap();

    // 9-byte lines: the last 40 bytes start mid-line, so four whole lines survive
    assert_eq!(limits(100, 40).trim(&path).unwrap(), Some(900 - 36));

    let trimmed = fs::read_to_string(&path).unwrap();
    let mut lines = trimmed.lines();
    assert_eq!(
        lines.next(),
        Some("[sitescore] dropped 864 bytes of older entries")
    );
    let kept: Vec<&str> = lines.collect();
    assert_eq!(kept, vec!["line 096", "line 097", "line 098", "line 099"]);
}

#[test]
fn test_keep_larger_than_file_keeps_everything() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(LOG_FILE);
    fs::write(&path, "a\nb\nc\n").unwrap();

    assert_eq!(limits(4, 100).trim(&path).unwrap(), Some(0));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[sitescore] dropped 0 bytes of older entries\na\nb\nc\n"
    );
}
