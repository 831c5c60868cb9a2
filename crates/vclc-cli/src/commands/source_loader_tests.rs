use std::io::Write;
use std::path::Path;

use super::source_loader::{LoadError, load_source};

#[test]
fn inline_text_wins() {
    let loaded = load_source(Some(Path::new("ignored.vcl")), Some("count 1;")).unwrap();
    assert_eq!(loaded.name, "<expr>");
    assert_eq!(loaded.text, "count 1;");
}

#[test]
fn reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "duration 10s;").unwrap();

    let loaded = load_source(Some(file.path()), None).unwrap();
    assert_eq!(loaded.text, "duration 10s;");
    assert_eq!(loaded.name, file.path().to_string_lossy());
}

#[test]
fn missing_input() {
    let err = load_source(None, None).unwrap_err();
    assert!(matches!(err, LoadError::Missing));
}

#[test]
fn unreadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.vcl");
    let err = load_source(Some(&path), None).unwrap_err();
    assert!(matches!(err, LoadError::File { .. }));
    assert!(err.to_string().starts_with("failed to read '"));
}
