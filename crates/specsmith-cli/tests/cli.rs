//! Binary-level tests for the `specsmith` command

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn specsmith(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("specsmith").unwrap();
    cmd.env_remove("ANTHROPIC_API_KEY")
        .env_remove("SPECSMITH_LOG")
        .env_remove("RUST_LOG")
        .arg("--path")
        .arg(root);
    cmd
}

fn initialized() -> TempDir {
    let tmp = TempDir::new().unwrap();
    specsmith(tmp.path()).arg("init").assert().success();
    tmp
}

fn active(root: &Path) -> String {
    fs::read_to_string(root.join(".specs/active")).unwrap().trim().to_string()
}

#[test]
fn version_prints_name() {
    let tmp = TempDir::new().unwrap();
    specsmith(tmp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("specsmith "));
}

#[test]
fn init_creates_layout() {
    let tmp = initialized();
    let specs = tmp.path().join(".specs");
    assert!(specs.join("specs").is_dir());
    assert!(specs.join("active").exists());
    assert!(specs.join("registry.md").exists());
}

#[test]
fn init_twice_reports_existing() {
    let tmp = initialized();
    specsmith(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn new_creates_and_activates() {
    let tmp = initialized();
    specsmith(tmp.path()).args(["new", "My Feature"]).assert().success();
    assert!(tmp.path().join(".specs/specs/my-feature/SPEC.md").exists());
    assert_eq!(active(tmp.path()), "my-feature");
}

#[test]
fn new_duplicate_fails() {
    let tmp = initialized();
    specsmith(tmp.path()).args(["new", "My Feature"]).assert().success();
    specsmith(tmp.path())
        .args(["new", "My Feature"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn new_without_init_fails() {
    let tmp = TempDir::new().unwrap();
    specsmith(tmp.path())
        .args(["new", "My Feature"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("specsmith init"));
}

#[test]
fn status_shows_title_and_phases() {
    let tmp = initialized();
    specsmith(tmp.path()).args(["new", "My Feature"]).assert().success();
    specsmith(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("My Feature"))
        .stdout(predicate::str::contains("Progress: 0/8 tasks (0%)"))
        .stdout(predicate::str::contains("Current: Task 1"));
}

#[test]
fn list_groups_specs() {
    let tmp = initialized();
    specsmith(tmp.path()).args(["new", "Feature A"]).assert().success();
    specsmith(tmp.path()).args(["new", "Feature B"]).assert().success();
    specsmith(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("feature-a: Feature A (0/8 tasks) (active)"))
        .stdout(predicate::str::contains("feature-b"));
}

#[test]
fn pause_and_resume() {
    let tmp = initialized();
    specsmith(tmp.path()).args(["new", "My Feature"]).assert().success();

    specsmith(tmp.path())
        .arg("pause")
        .assert()
        .success()
        .stdout(predicate::str::contains("Paused"));
    assert_eq!(active(tmp.path()), "");

    specsmith(tmp.path())
        .args(["resume", "my-feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resumed"));
    assert_eq!(active(tmp.path()), "my-feature");
}

#[test]
fn switch_moves_pointer() {
    let tmp = initialized();
    specsmith(tmp.path()).args(["new", "Feature A"]).assert().success();
    specsmith(tmp.path()).args(["new", "Feature B"]).assert().success();
    specsmith(tmp.path()).args(["switch", "feature-b"]).assert().success();
    assert_eq!(active(tmp.path()), "feature-b");

    let doc = fs::read_to_string(tmp.path().join(".specs/specs/feature-a/SPEC.md")).unwrap();
    assert!(doc.contains("status: paused"));
}

#[test]
fn complete_needs_force_with_open_tasks() {
    let tmp = initialized();
    specsmith(tmp.path()).args(["new", "My Feature"]).assert().success();

    specsmith(tmp.path())
        .arg("complete")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--force"));

    specsmith(tmp.path())
        .args(["complete", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed"));
    assert_eq!(active(tmp.path()), "");
}

#[test]
fn archive_reports() {
    let tmp = initialized();
    specsmith(tmp.path()).args(["new", "My Feature"]).assert().success();
    specsmith(tmp.path())
        .args(["archive", "my-feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived"));
}

#[test]
fn unknown_spec_fails() {
    let tmp = initialized();
    specsmith(tmp.path())
        .args(["archive", "ghost"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("spec not found: ghost"));
}

#[cfg(unix)]
#[test]
fn edit_runs_editor() {
    let tmp = initialized();
    specsmith(tmp.path()).args(["new", "My Feature"]).assert().success();
    specsmith(tmp.path()).env("EDITOR", "true").arg("edit").assert().success();
    specsmith(tmp.path()).env("EDITOR", "false").arg("edit").assert().code(1);
}

#[test]
fn setup_dry_run_prints_snippet() {
    let tmp = TempDir::new().unwrap();
    specsmith(tmp.path())
        .args(["setup", "cursor", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spec Management"));
    assert!(!tmp.path().join(".cursor").exists());
}

#[test]
fn setup_creates_then_skips() {
    let tmp = TempDir::new().unwrap();
    specsmith(tmp.path()).args(["setup", "cursor"]).assert().success();
    let config = tmp.path().join(".cursor/rules");
    assert!(fs::read_to_string(&config).unwrap().contains("Spec Management"));

    specsmith(tmp.path())
        .args(["setup", "cursor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already configured"));
}

#[test]
fn setup_unknown_tool_fails() {
    let tmp = TempDir::new().unwrap();
    specsmith(tmp.path())
        .args(["setup", "unknown-tool"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("supported tools"));
}

#[test]
fn setup_claude_code_prints_plugin_steps() {
    let tmp = TempDir::new().unwrap();
    specsmith(tmp.path())
        .args(["setup", "claude-code"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plugin"));
}

#[test]
fn forge_without_key_fails() {
    let tmp = initialized();
    specsmith(tmp.path())
        .args(["forge", "anything"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ANTHROPIC_API_KEY not set"));
}
