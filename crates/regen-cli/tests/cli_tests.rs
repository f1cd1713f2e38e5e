//! Integration tests for the regen binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CONFIG: &str = r#"
[generator]
definitions_dir = "defs"
templates_dir = "templates"

[[generator.outputs]]
template = "model.go"
prefix = "out/model_"
suffix = ".go"
structured = true
skip_directive_lines = 1

[generator.manifest]
template = "provider.go"
destination = "out/provider.go"

[generator.changelog]
source = "CHANGELOG.md"
template = "changelog.md"
destination = "docs/changelog.md"
"#;

const MODEL: &str = "//go:build ignore
package provider

//template:begin model
type {{ name | to_camel_words }} struct {
{%- for a in attributes %}
	{{ a.model_name | to_identifier }} string
{%- endfor %}
}
//template:end model
";

/// A project directory with config, templates and one entity.
fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("regen.toml"), CONFIG).unwrap();
    fs::create_dir_all(root.join("defs")).unwrap();
    fs::create_dir_all(root.join("templates")).unwrap();
    fs::write(root.join("templates/model.go"), MODEL).unwrap();
    fs::write(
        root.join("templates/provider.go"),
        "{% for e in entities %}{{ e }}\n{% endfor %}",
    )
    .unwrap();
    fs::write(root.join("templates/changelog.md"), "{{ changelog }}").unwrap();
    fs::write(root.join("CHANGELOG.md"), "## 0.1.0\n").unwrap();
    fs::write(
        root.join("defs/host.yaml"),
        "name: Host\nattributes:\n  - model_name: name\n    type: String\n",
    )
    .unwrap();
    dir
}

fn regen(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("regen").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("regen")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag() {
    Command::cargo_bin("regen")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn generate_writes_and_preserves_hand_edits() {
    let dir = project();

    regen(dir.path()).arg("generate").assert().success();

    let model = dir.path().join("out/model_host.go");
    let first = fs::read_to_string(&model).unwrap();
    assert!(first.starts_with("package provider\n"));
    assert!(first.contains("type Host struct {\n\tName string\n}"));
    assert_eq!(
        fs::read_to_string(dir.path().join("out/provider.go")).unwrap(),
        "Host\n"
    );

    fs::write(&model, format!("{first}\n// keep me\n")).unwrap();
    fs::write(
        dir.path().join("defs/host.yaml"),
        "name: Host\nattributes:\n  - model_name: name\n    type: String\n  - model_name: ipAddress\n    type: String\n",
    )
    .unwrap();

    regen(dir.path()).arg("generate").assert().success();

    let second = fs::read_to_string(&model).unwrap();
    assert!(second.contains("\tIpAddress string\n"));
    assert!(second.ends_with("\n// keep me\n"));
}

#[test]
fn verbose_reports_each_entity() {
    let dir = project();

    regen(dir.path())
        .arg("generate")
        .assert()
        .success()
        .stderr(predicate::str::contains("Generating").not());

    regen(dir.path())
        .args(["-v", "generate"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Generating"))
        .stderr(predicate::str::contains("Host"));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = project();

    regen(dir.path())
        .args(["generate", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("out/model_host.go"))
        .stdout(predicate::str::contains("docs/changelog.md"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn corrupt_prior_file_fails_with_user_error() {
    let dir = project();
    fs::create_dir_all(dir.path().join("out")).unwrap();
    let prior = "//template:begin model\nno end\n";
    fs::write(dir.path().join("out/model_host.go"), prior).unwrap();

    regen(dir.path())
        .arg("generate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Cannot merge"))
        .stderr(predicate::str::contains("left untouched"));

    assert_eq!(
        fs::read_to_string(dir.path().join("out/model_host.go")).unwrap(),
        prior
    );
}

#[test]
fn missing_template_is_not_found() {
    let dir = project();
    fs::remove_file(dir.path().join("templates/model.go")).unwrap();

    regen(dir.path())
        .arg("generate")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to load template"));
}

#[test]
fn invalid_schema_is_user_error() {
    let dir = project();
    fs::write(dir.path().join("defs/rule.yaml"), "rest_endpoint: /x\n").unwrap();

    regen(dir.path())
        .arg("generate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("rule.yaml"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn list_json_is_parseable() {
    let dir = project();

    let output = regen(dir.path())
        .args(["list", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["name"], "Host");
    assert_eq!(rows[0]["attributes"], 1);
    assert_eq!(rows[0]["files"][0], "out/model_host.go");
}

#[test]
fn init_writes_default_config_once() {
    let dir = tempfile::tempdir().unwrap();

    regen(dir.path()).arg("init").assert().success();
    let written = fs::read_to_string(dir.path().join("regen.toml")).unwrap();
    assert!(written.contains("definitions_dir = \"gen/definitions\""));

    regen(dir.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    regen(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn missing_explicit_config_is_config_error() {
    let dir = tempfile::tempdir().unwrap();

    regen(dir.path())
        .args(["-c", "absent.toml", "generate"])
        .assert()
        .code(4);
}

#[test]
fn config_get_reads_file_and_env() {
    let dir = project();

    regen(dir.path())
        .args(["config", "get", "generator.definitions_dir"])
        .assert()
        .success()
        .stdout(predicate::str::contains("defs"));

    regen(dir.path())
        .args(["config", "get", "generator.templates_dir"])
        .env("REGEN__GENERATOR__TEMPLATES_DIR", "other")
        .assert()
        .success()
        .stdout(predicate::str::contains("other"));

    regen(dir.path())
        .args(["config", "get", "generator.nope"])
        .assert()
        .code(3);
}

#[test]
fn completions_are_generated() {
    Command::cargo_bin("regen")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("regen"));
}
