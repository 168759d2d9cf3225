//! Integration tests for the `sourcefix` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BARE_CHECK: &str = r#"async function load() {
  try {
    const res = await fetch("/api/roles");
    if (!res.ok) throw new Error("Failed to load roles");
    setRoles((await res.json()).roles);
  } catch (err) {
    setError(String(err));
  }
}
"#;

const CLEAN: &str = "export const answer = 42;\n";

fn sourcefix(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sourcefix").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn sections() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("roles.tsx"), BARE_CHECK).unwrap();
    fs::write(dir.path().join("about.tsx"), CLEAN).unwrap();
    dir
}

#[test]
fn test_default_run_fixes_current_directory() {
    let dir = sections();

    sourcefix(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Fixed roles.tsx (parse-before-status-check)"))
        .stdout(predicate::str::contains("1 changed, 1 unchanged, 0 error(s)"));

    let fixed = fs::read_to_string(dir.path().join("roles.tsx")).unwrap();
    assert!(fixed.contains("const payload = await res.json().catch(() => ({}));"));
    assert_eq!(fs::read_to_string(dir.path().join("about.tsx")).unwrap(), CLEAN);
}

#[test]
fn test_second_run_reports_nothing_changed() {
    let dir = sections();
    sourcefix(dir.path()).assert().success();

    sourcefix(dir.path())
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 changed, 2 unchanged, 0 error(s)"));
}

#[test]
fn test_dry_run_leaves_files_alone() {
    let dir = sections();

    sourcefix(dir.path())
        .args(["run", ".", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would fix roles.tsx"))
        .stdout(predicate::str::contains("1 would change"));

    assert_eq!(
        fs::read_to_string(dir.path().join("roles.tsx")).unwrap(),
        BARE_CHECK
    );
}

#[test]
fn test_check_exits_one_when_changes_pending() {
    let dir = sections();
    sourcefix(dir.path()).arg("check").assert().code(1);

    sourcefix(dir.path()).assert().success();
    sourcefix(dir.path()).arg("check").assert().success();
}

#[test]
fn test_missing_root_fails() {
    let dir = TempDir::new().unwrap();

    sourcefix(dir.path())
        .args(["run", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Root directory not found"));
}

#[test]
fn test_unreadable_file_is_reported_and_others_fixed() {
    let dir = sections();
    fs::write(dir.path().join("broken.tsx"), [0xffu8, 0xfe, 0xfd]).unwrap();

    sourcefix(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("✗ broken.tsx"))
        .stdout(predicate::str::contains("1 changed, 1 unchanged, 1 error(s)"));

    let fixed = fs::read_to_string(dir.path().join("roles.tsx")).unwrap();
    assert!(fixed.contains("const payload"));
}

#[test]
fn test_rule_selection() {
    let dir = sections();

    sourcefix(dir.path())
        .args(["run", "--rule", "guard-jsx-map"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 changed, 2 unchanged"));

    sourcefix(dir.path())
        .args(["run", "--rule", "no-such-rule"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown rule: no-such-rule"));
}

#[test]
fn test_config_file_sets_root_and_disables_rules() {
    let dir = TempDir::new().unwrap();
    let sections = dir.path().join("sections");
    fs::create_dir(&sections).unwrap();
    fs::write(sections.join("roles.tsx"), BARE_CHECK).unwrap();
    fs::write(
        dir.path().join("sourcefix.toml"),
        "root = \"sections\"\ndisabled_rules = [\"parse-before-status-check\"]\n",
    )
    .unwrap();

    sourcefix(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 changed, 1 unchanged"));

    sourcefix(dir.path())
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("parse-before-status-check"))
        .stdout(predicate::str::contains("(disabled)"));

    // An explicit selection on the command line wins over the config.
    sourcefix(dir.path())
        .args(["run", "--rule", "parse-before-status-check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 changed, 0 unchanged"));
}

#[test]
fn test_rules_lists_catalogue_in_order() {
    let dir = TempDir::new().unwrap();
    let output = sourcefix(dir.path()).arg("rules").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let names: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(
        names,
        vec![
            "reorder-status-check",
            "parse-before-status-check",
            "guard-length-check",
            "guard-jsx-map",
            "clear-mock-constants",
        ]
    );
}
