use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn react_arca(cwd: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_react-arca"))
        .args(args)
        .current_dir(cwd)
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn is_empty(dir: &std::path::Path) -> bool {
    fs::read_dir(dir).unwrap().next().is_none()
}

// ── Exit codes ──────────────────────────────────────────────────────

#[test]
fn invalid_name_exits_with_one() {
    let tmp = TempDir::new().unwrap();
    let out = react_arca(tmp.path(), &["Bad/Name"]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("npm naming restrictions"));
    assert!(stderr.contains("name cannot contain path separators"));
    assert!(is_empty(tmp.path()));
}

#[test]
fn missing_name_exits_with_one() {
    let tmp = TempDir::new().unwrap();
    let out = react_arca(tmp.path(), &[]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Please provide a project name."));
    assert!(is_empty(tmp.path()));
}

#[test]
fn reserved_name_exits_with_one_and_lists_reserved() {
    let tmp = TempDir::new().unwrap();
    let out = react_arca(tmp.path(), &["react-router-dom"]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("react-dom"));
    assert!(stderr.contains("Please choose a different project name."));
    assert!(is_empty(tmp.path()));
}

#[test]
fn existing_directory_exits_with_one_and_is_kept() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("my-app")).unwrap();
    fs::write(tmp.path().join("my-app/notes.txt"), "keep me").unwrap();

    let out = react_arca(tmp.path(), &["my-app"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("already exists"));
    assert_eq!(
        fs::read_to_string(tmp.path().join("my-app/notes.txt")).unwrap(),
        "keep me"
    );
}
