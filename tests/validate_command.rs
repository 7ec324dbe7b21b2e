//! Integration tests for `pulse validate`.
//!
//! Each test builds a marketplace tree in a tempdir and checks which
//! violations the command reports.

#![allow(clippy::expect_used)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn pulse() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("pulse"))
}

// ── Tree-building helpers ─────────────────────────────────────────────────────

fn write_catalog(root: &Path, json: &str) {
    let dir = root.join(".claude-plugin");
    fs::create_dir_all(&dir).expect("create .claude-plugin");
    fs::write(dir.join("marketplace.json"), json).expect("write marketplace.json");
}

fn write_plugin(root: &Path, name: &str, version: &str) {
    let dir = root.join("plugins").join(name);
    fs::create_dir_all(dir.join(".claude-plugin")).expect("create plugin dirs");
    fs::write(
        dir.join(".claude-plugin").join("plugin.json"),
        format!(r#"{{ "name": "{name}", "version": "{version}" }}"#),
    )
    .expect("write plugin.json");
    fs::write(
        dir.join("command.md"),
        "---\nallowed-tools: Bash, Read\ndescription: demo command\n---\n\n# Demo\n",
    )
    .expect("write command.md");
}

fn single_plugin_catalog(version: &str) -> String {
    format!(
        r#"{{
            "name": "test-market",
            "owner": {{ "name": "tester" }},
            "metadata": {{ "description": "test catalog", "version": "1.0.0" }},
            "plugins": [
                {{
                    "name": "demo",
                    "source": "./plugins/demo",
                    "description": "demo plugin",
                    "version": "{version}"
                }}
            ]
        }}"#
    )
}

// ── Happy path ────────────────────────────────────────────────────────────────

#[test]
fn test_validate_well_formed_tree_passes() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), &single_plugin_catalog("0.1.0"));
    write_plugin(dir.path(), "demo", "0.1.0");

    pulse()
        .arg("validate")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("valid (1 plugins)"));
}

#[test]
fn test_validate_remote_source_skips_disk_checks() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(
        dir.path(),
        r#"{
            "name": "remote-market",
            "owner": { "name": "tester" },
            "metadata": { "description": "remote catalog", "version": "1.0.0" },
            "plugins": [
                {
                    "name": "remote-plugin",
                    "source": "github:example/remote-plugin",
                    "description": "hosted elsewhere",
                    "version": "1.0.0"
                }
            ]
        }"#,
    );
    // No plugins/ tree for the entry itself — only the root must exist.
    fs::create_dir_all(dir.path().join("plugins")).expect("create plugin root");

    pulse()
        .arg("validate")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "plugin 'remote-plugin': remote source, file checks skipped",
        ));
}

// ── Catalog-level violations ──────────────────────────────────────────────────

#[test]
fn test_validate_missing_catalog_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    pulse()
        .arg("validate")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_validate_unparseable_catalog_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), "{ not json");
    pulse()
        .arg("validate")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot parse"));
}

#[test]
fn test_validate_bad_plugin_version_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), &single_plugin_catalog("1.2"));
    write_plugin(dir.path(), "demo", "1.2");

    pulse()
        .arg("validate")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("MAJOR.MINOR.PATCH"));
}

#[test]
fn test_validate_duplicate_names_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(
        dir.path(),
        r#"{
            "name": "dup-market",
            "owner": { "name": "tester" },
            "metadata": { "description": "dup catalog", "version": "1.0.0" },
            "plugins": [
                { "name": "demo", "source": "./plugins/demo", "description": "a", "version": "0.1.0" },
                { "name": "demo", "source": "./plugins/demo", "description": "b", "version": "0.1.0" }
            ]
        }"#,
    );
    write_plugin(dir.path(), "demo", "0.1.0");

    pulse()
        .arg("validate")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate plugin name 'demo'"));
}

#[test]
fn test_validate_total_plugins_mismatch_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(
        dir.path(),
        r#"{
            "name": "count-market",
            "owner": { "name": "tester" },
            "metadata": { "description": "c", "version": "1.0.0", "totalPlugins": 3 },
            "plugins": [
                { "name": "demo", "source": "./plugins/demo", "description": "a", "version": "0.1.0" }
            ]
        }"#,
    );
    write_plugin(dir.path(), "demo", "0.1.0");

    pulse()
        .arg("validate")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("totalPlugins"));
}

// ── Cross-file violations ─────────────────────────────────────────────────────

#[test]
fn test_validate_missing_plugin_directory_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), &single_plugin_catalog("0.1.0"));
    fs::create_dir_all(dir.path().join("plugins")).expect("create plugin root");

    pulse()
        .arg("validate")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_validate_missing_plugin_json_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), &single_plugin_catalog("0.1.0"));
    write_plugin(dir.path(), "demo", "0.1.0");
    fs::remove_file(
        dir.path()
            .join("plugins/demo/.claude-plugin/plugin.json"),
    )
    .expect("remove plugin.json");

    pulse()
        .arg("validate")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing .claude-plugin/plugin.json"));
}

#[test]
fn test_validate_version_drift_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), &single_plugin_catalog("0.1.0"));
    write_plugin(dir.path(), "demo", "9.9.9");

    pulse()
        .arg("validate")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("plugin.json version is '9.9.9'"));
}

#[test]
fn test_validate_missing_command_md_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), &single_plugin_catalog("0.1.0"));
    write_plugin(dir.path(), "demo", "0.1.0");
    fs::remove_file(dir.path().join("plugins/demo/command.md")).expect("remove command.md");

    pulse()
        .arg("validate")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing command.md"));
}

#[test]
fn test_validate_frontmatter_missing_field_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), &single_plugin_catalog("0.1.0"));
    write_plugin(dir.path(), "demo", "0.1.0");
    fs::write(
        dir.path().join("plugins/demo/command.md"),
        "---\ndescription: no tools listed\n---\n",
    )
    .expect("rewrite command.md");

    pulse()
        .arg("validate")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing 'allowed-tools'"));
}

// ── JSON output ───────────────────────────────────────────────────────────────

#[test]
fn test_validate_json_valid_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), &single_plugin_catalog("0.1.0"));
    write_plugin(dir.path(), "demo", "0.1.0");

    let output = pulse()
        .args(["validate", "--json"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(v["valid"], true);
    assert_eq!(v["plugins"], 1);
    assert_eq!(v["violations"].as_array().expect("array").len(), 0);
}

#[test]
fn test_validate_json_invalid_report_lists_violations() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), &single_plugin_catalog("not-semver"));
    write_plugin(dir.path(), "demo", "not-semver");

    let output = pulse()
        .args(["validate", "--json"])
        .arg(dir.path())
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(v["valid"], false);
    assert!(
        !v["violations"].as_array().expect("array").is_empty(),
        "violations must be listed"
    );
}

#[test]
fn test_validate_json_no_ansi_in_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), &single_plugin_catalog("0.1.0"));
    write_plugin(dir.path(), "demo", "0.1.0");

    let output = pulse()
        .args(["validate", "--json"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).expect("utf8");
    assert!(
        !text.contains("\x1b["),
        "JSON output must not contain ANSI escape codes"
    );
}

// ── Violation accumulation ────────────────────────────────────────────────────

#[test]
fn test_validate_reports_every_violation_at_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(
        dir.path(),
        r#"{
            "name": "Bad Name",
            "owner": { "name": "tester" },
            "metadata": { "description": "c", "version": "1.0", "totalPlugins": 9 },
            "plugins": [
                { "name": "demo", "source": "./plugins/demo", "description": "a", "version": "x" }
            ]
        }"#,
    );
    write_plugin(dir.path(), "demo", "0.1.0");

    let output = pulse()
        .args(["validate", "--json"])
        .arg(dir.path())
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    let violations = v["violations"].as_array().expect("array");
    // Bad marketplace name, bad metadata version, totalPlugins mismatch,
    // bad plugin version, plugin.json version drift.
    assert!(
        violations.len() >= 5,
        "expected at least 5 violations, got {}: {violations:?}",
        violations.len()
    );
}
