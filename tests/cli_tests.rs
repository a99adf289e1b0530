use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const SAMPLE_STRING: &str = "1, ООО Ромашка, ООО, г. Москва, 8 (123) 456-78-90";

fn client_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("client"))
}

/// Only `assert_cmd::Command` can feed stdin
fn stdin_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("client"))
}

/// A config dir path that does not exist yet, so defaults apply
fn fresh_config() -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("client-config");
    (temp_dir, config_path)
}

fn write_settings(config_path: &std::path::Path, settings: &str) {
    fs::create_dir_all(config_path).unwrap();
    fs::write(config_path.join("config.toml"), settings).unwrap();
}

#[test]
fn test_help() {
    client_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validated client records"));
}

#[test]
fn test_version() {
    client_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("client"));
}

#[test]
fn test_init_creates_config() {
    let (_temp_dir, config_path) = fresh_config();

    client_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized client config"));

    assert!(config_path.join("config.toml").exists());
}

#[test]
fn test_init_fails_if_exists() {
    let (_temp_dir, config_path) = fresh_config();

    client_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    client_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_sample_display() {
    let (_temp_dir, config_path) = fresh_config();

    client_cmd()
        .args(["-C", config_path.to_str().unwrap(), "sample"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Client ООО Ромашка, ID: 1, Ownership Type: ООО, Address: г. Москва, ул. Ленина, д.10, Phone: 8 (123) 456-78-90",
        ))
        .stdout(predicate::str::contains(
            "Client ООО Ромашка, ID: 1, Phone: 8 (123) 456-78-90",
        ));
}

#[test]
fn test_sample_json_is_unescaped() {
    let (_temp_dir, config_path) = fresh_config();

    client_cmd()
        .args(["-C", config_path.to_str().unwrap(), "sample", "--to", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"client_id\": 1"))
        .stdout(predicate::str::contains("\"ownership_type\": \"ООО\""))
        .stdout(predicate::str::contains("\\u").not());
}

#[test]
fn test_sample_string_rejects_comma_in_address() {
    let (_temp_dir, config_path) = fresh_config();

    client_cmd()
        .args(["-C", config_path.to_str().unwrap(), "sample", "--to", "string"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be written"));
}

#[test]
fn test_parse_string_to_display() {
    let (_temp_dir, config_path) = fresh_config();

    client_cmd()
        .args(["-C", config_path.to_str().unwrap(), "parse", SAMPLE_STRING])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Client ООО Ромашка, ID: 1, Ownership Type: ООО, Address: г. Москва, Phone: 8 (123) 456-78-90",
        ));
}

#[test]
fn test_parse_string_to_table() {
    let (_temp_dir, config_path) = fresh_config();

    client_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "parse",
            SAMPLE_STRING,
            "--to",
            "table",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("FIELD"))
        .stdout(predicate::str::contains("ownership_type"))
        .stdout(predicate::str::contains("г. Москва"));
}

#[test]
fn test_parse_wrong_segment_count() {
    let (_temp_dir, config_path) = fresh_config();

    client_cmd()
        .args(["-C", config_path.to_str().unwrap(), "parse", "1, A, B"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The string must contain 5 comma-separated elements.",
        ));
}

#[test]
fn test_parse_invalid_phone() {
    let (_temp_dir, config_path) = fresh_config();

    client_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "parse",
            "1, Acme, LLC, Street, +7 123 456 78 90",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid phone number."));
}

#[test]
fn test_parse_json_from_stdin_to_string() {
    let (_temp_dir, config_path) = fresh_config();
    let json = r#"{
    "client_id": 5,
    "name": "Acme",
    "ownership_type": "LLC",
    "address": "Springfield",
    "phone": "8 (999) 000-11-22"
}"#;

    stdin_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "parse",
            "-",
            "--from",
            "json",
            "--to",
            "string",
        ])
        .write_stdin(json)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "5, Acme, LLC, Springfield, 8 (999) 000-11-22",
        ));
}

#[test]
fn test_parse_json_missing_key() {
    let (_temp_dir, config_path) = fresh_config();

    client_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "parse",
            r#"{"client_id": 5, "name": "Acme"}"#,
            "--from",
            "json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required key 'ownership_type'"));
}

#[test]
fn test_parse_legacy() {
    let (_temp_dir, config_path) = fresh_config();

    client_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "parse",
            "3, Acme, 8 (999) 000-11-22",
            "--from",
            "legacy",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Client Acme, ID: 3, Phone: 8 (999) 000-11-22",
        ));
}

#[test]
fn test_parse_legacy_to_table_and_string() {
    let (_temp_dir, config_path) = fresh_config();

    client_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "parse",
            "3, Acme, 8 (999) 000-11-22",
            "--from",
            "legacy",
            "--to",
            "table",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("FIELD"))
        .stdout(predicate::str::contains("client_id"))
        .stdout(predicate::str::contains("Acme"))
        .stdout(predicate::str::contains("ownership_type").not());

    client_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "parse",
            "3 ,Acme,  8 (999) 000-11-22",
            "--from",
            "legacy",
            "--to",
            "string",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("3, Acme, 8 (999) 000-11-22"));
}

#[test]
fn test_sample_table_renders_both_forms() {
    let (_temp_dir, config_path) = fresh_config();

    let output = client_cmd()
        .args(["-C", config_path.to_str().unwrap(), "sample", "--to", "table"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("FIELD").count(), 2);
    assert!(!stdout.contains("Client ООО Ромашка, ID: 1, Phone"));
}

#[test]
fn test_settings_select_json_and_indent() {
    let (_temp_dir, config_path) = fresh_config();
    write_settings(
        &config_path,
        r#"[output]
format = "json"
indent = 2
"#,
    );

    client_cmd()
        .args(["-C", config_path.to_str().unwrap(), "parse", SAMPLE_STRING])
        .assert()
        .success()
        .stdout(predicate::str::contains("{\n  \"client_id\": 1,"));
}

#[test]
fn test_malformed_settings() {
    let (_temp_dir, config_path) = fresh_config();
    write_settings(&config_path, "[output]\nformat = \"yaml\"\n");

    client_cmd()
        .args(["-C", config_path.to_str().unwrap(), "parse", SAMPLE_STRING])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_check_valid_and_invalid() {
    client_cmd()
        .args(["check", "name", "ООО Ромашка"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));

    client_cmd()
        .args(["check", "phone", "8 (123) 456-78-9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid phone number."));

    client_cmd()
        .args(["check", "ownershipType", "LLC 2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid ownership type."));

    client_cmd()
        .args(["check", "email", "a@b.c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field 'email'"));
}
