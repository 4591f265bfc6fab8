//! Exit status and output of the `recycleme` binary.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary in `cwd` with logging and user config kept out of the way.
fn recycleme(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_recycleme"))
        .args(args)
        .current_dir(cwd)
        .env("RECYCLEME_DISABLE_FILE_LOG", "1")
        .env("XDG_CONFIG_HOME", cwd)
        .env_remove("RECYCLEME_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_missing_argument_prints_usage() {
    let cwd = TempDir::new().unwrap();
    let output = recycleme(cwd.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Usage: recycleme <file_path>\n"
    );
    assert!(output.stderr.is_empty());
}

#[test]
fn test_unreadable_file_is_reported_on_stderr() {
    let cwd = TempDir::new().unwrap();
    let output = recycleme(cwd.path(), &["missing.txt"]);

    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: Failed to read "), "stderr was {stderr:?}");
    assert!(stderr.contains("missing.txt: "), "stderr was {stderr:?}");
    assert_eq!(stderr.matches("Error:").count(), 1);
    assert_eq!(stderr.matches("os error").count(), 1);

    assert_eq!(String::from_utf8_lossy(&output.stdout), "Loading :D\n");
    assert_eq!(std::fs::read_dir(cwd.path()).unwrap().count(), 0);
}

#[test]
fn test_explicit_missing_config_fails_before_loading() {
    let cwd = TempDir::new().unwrap();
    std::fs::write(cwd.path().join("essay.txt"), "AI wrote this.").unwrap();
    let output = recycleme(cwd.path(), &["--config", "nope.json", "essay.txt"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: Failed to load configuration: Config file not found"));
    assert!(output.stdout.is_empty());
}
