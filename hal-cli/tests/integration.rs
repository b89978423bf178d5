use assert_cmd::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn hal_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("hal");
    cmd.env("NO_COLOR", "1");
    cmd
}

fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const SETTINGS: &str = r#"
[curies]
default = "acme"
namespaces = [{ name = "acme", template = "http://localhost:8080/rels/{rel}" }]

[render]
overrides = [{ pattern = "acme:item*", mode = "array" }]

[messages]
"_links.acme:orders.title" = "All orders"
"#;

// ============================================================================
// Happy path tests
// ============================================================================

#[test]
fn version_flag() {
    hal_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hal"));
}

#[test]
fn help_flag() {
    hal_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Render and parse HAL documents"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("relation"));
}

#[test]
fn render_from_stdin() {
    hal_cmd()
        .arg("render")
        .write_stdin(r#"{"links":[{"rel":"self","href":"localhost"},{"rel":"self","href":"localhost2"}]}"#)
        .assert()
        .success()
        .stdout(concat!(
            r#"{"_links":{"self":[{"href":"localhost"},{"href":"localhost2"}]}}"#,
            "\n"
        ));
}

#[test]
fn render_with_curies_from_settings() {
    let settings = temp_file(".toml", SETTINGS);
    let input = temp_file(
        ".json",
        r#"{"links":[{"rel":"self","href":"/"},{"rel":"orders","href":"/orders"}]}"#,
    );
    hal_cmd()
        .arg("--config")
        .arg(settings.path())
        .arg("render")
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#""acme:orders":{"href":"/orders","title":"All orders"}"#,
        ))
        .stdout(predicate::str::contains(
            r#""curies":[{"href":"http://localhost:8080/rels/{rel}","name":"acme","templated":true}]"#,
        ));
}

#[test]
fn render_plain_json() {
    hal_cmd()
        .args(["render", "--media-type", "text/plain"])
        .write_stdin(r#"{"content":{"a":1},"links":[{"rel":"self","href":"/a"}]}"#)
        .assert()
        .success()
        .stdout(concat!(r#"{"a":1,"links":[{"rel":"self","href":"/a"}]}"#, "\n"));
}

#[test]
fn parse_document() {
    hal_cmd()
        .arg("parse")
        .write_stdin(r#"{"_links":{"self":{"href":"/"}},"_embedded":{"content":["a","b"]}}"#)
        .assert()
        .success()
        .stdout(concat!(
            r#"{"links":[{"rel":"self","href":"/"}],"embedded":[{"rel":"content","value":"a"},{"rel":"content","value":"b"}],"content":null}"#,
            "\n"
        ));
}

#[test]
fn relation_command() {
    let settings = temp_file(".toml", SETTINGS);
    hal_cmd()
        .arg("--config")
        .arg(settings.path())
        .args(["relation", "items"])
        .assert()
        .success()
        .stdout(predicate::str::contains("relation: acme:items"))
        .stdout(predicate::str::contains("array"));
}

// ============================================================================
// Error tests
// ============================================================================

#[test]
fn verbose_quiet_conflict() {
    hal_cmd()
        .args(["--verbose", "--quiet", "relation", "self"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn parse_malformed_links() {
    hal_cmd()
        .arg("parse")
        .write_stdin(r#"{"_links":{"self":"localhost"}}"#)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("Malformed link block"));
}

#[test]
fn render_invalid_json() {
    hal_cmd()
        .arg("render")
        .write_stdin("{not json")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn missing_config_file() {
    hal_cmd()
        .args(["--config", "/nonexistent/hal.toml", "relation", "self"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn blank_relation_is_usage_error() {
    hal_cmd()
        .args(["relation", " "])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("relation must not be blank"));
}
