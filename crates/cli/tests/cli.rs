//! End-to-end runs of the `gatelog` binary against a temporary data directory.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

fn gatelog(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gatelog"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .env_remove("GATELOG_DATA_DIR")
        .env_remove("GATELOG_EXPORT_DIR")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_register_request_and_list() {
    let dir = tempdir().unwrap();

    let out = gatelog(dir.path(), &["register", "p1", "--name", "Pat"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Registered: P1 (Pat)"));

    let out = gatelog(dir.path(), &["request", "P1"]);
    assert!(stdout(&out).contains("Decision: GRANT | Reason: Valid ID"));

    let out = gatelog(dir.path(), &["request", "nobody"]);
    assert!(stdout(&out).contains("Decision: DENY | Reason: Unknown ID"));

    let out = gatelog(dir.path(), &["users"]);
    assert!(stdout(&out).contains("- P1 | Pat | person | created"));

    let out = gatelog(dir.path(), &["logs", "--denied"]);
    let text = stdout(&out);
    assert!(text.contains("| NOBODY | DENY | Unknown ID"));
    assert!(!text.contains("| GRANT |"));

    let logs: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("logs.json")).unwrap())
            .unwrap();
    assert_eq!(logs.as_array().unwrap().len(), 2);
}

#[test]
fn test_flag_notice_only_on_stdout() {
    let dir = tempdir().unwrap();
    gatelog(dir.path(), &["request", "X"]);
    gatelog(dir.path(), &["request", "X"]);

    let out = gatelog(dir.path(), &["request", "X"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Flag raised: repeated denied attempts."));
    assert!(out.stderr.is_empty(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn test_duplicate_registration_fails() {
    let dir = tempdir().unwrap();
    assert!(gatelog(dir.path(), &["register", "A1"]).status.success());

    let out = gatelog(dir.path(), &["register", "a1"]);
    assert!(!out.status.success());
    assert!(stdout(&out).contains("That ID already exists."));
}

#[test]
fn test_export_to_output_dir() {
    let dir = tempdir().unwrap();
    let exports = dir.path().join("exports");

    let out = gatelog(
        dir.path(),
        &["export", "--output-dir", exports.to_str().unwrap()],
    );
    assert!(stdout(&out).contains("No logs to export."));
    assert!(!exports.exists());

    gatelog(dir.path(), &["request", "X"]);
    let out = gatelog(
        dir.path(),
        &["export", "--format", "json", "--output-dir", exports.to_str().unwrap()],
    );
    assert!(out.status.success());
    assert!(stdout(&out).contains("Logs exported to"));

    let files: Vec<_> = std::fs::read_dir(&exports).unwrap().collect();
    assert_eq!(files.len(), 1);
}

#[test]
fn test_menu_over_stdin() {
    let dir = tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_gatelog"))
        .arg("--data-dir")
        .arg(dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"1\nv9\nVan\nvehicle\n\n3\n\n7\n6\n")
        .unwrap();
    let out = child.wait_with_output().unwrap();
    let text = stdout(&out);

    assert!(out.status.success());
    assert!(text.contains("Access Control & Ops Logger"));
    assert!(text.contains("Registered: V9 (Van)"));
    assert!(text.contains("- V9 | Van | vehicle | created"));
    assert!(text.contains("Invalid option. Try again."));
    assert!(text.contains("Goodbye."));
}
