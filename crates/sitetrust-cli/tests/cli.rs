use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::Path;

fn sitetrust(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sitetrust").unwrap();
    cmd.env_remove("SITETRUST_PAGERANK_KEY")
        .env_remove("RUST_LOG")
        .arg("--no-color")
        .arg("--config")
        .arg(config);
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    sitetrust(&dir.path().join("config.toml"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn malformed_address_scores_zero_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = sitetrust(&dir.path().join("config.toml"))
        .args(["check", "not-a-url", "--output", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["score"], 0.0);
    assert_eq!(report["verdict"], "suspicious");
    assert_eq!(report["probes"].as_array().map(Vec::len), Some(0));
}

#[test]
fn malformed_address_pretty_report() {
    let dir = tempfile::tempdir().unwrap();
    sitetrust(&dir.path().join("config.toml"))
        .args(["check", "ftp://example.com/file"])
        .assert()
        .success()
        .stdout(predicate::str::contains("invalid URL"))
        .stdout(predicate::str::contains(
            "[!] Final trust score: 0.00 - the site may be malicious",
        ));
}

#[test]
fn config_path_echoes_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    sitetrust(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn config_show_reads_file_and_masks_key() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "listen = \"0.0.0.0:9000\"").unwrap();
    writeln!(file, "pagerank_api_key = \"abcdefghijkl\"").unwrap();
    writeln!(file, "max_redirects = 2").unwrap();

    let output = sitetrust(file.path())
        .args(["config", "show", "-o", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["listen"], "0.0.0.0:9000");
    assert_eq!(shown["max_redirects"], 2);
    assert_eq!(shown["timeout_secs"], 15);
    assert_eq!(shown["pagerank_api_key"], "abcd...ijkl");
    assert_eq!(shown["pagerank_source"], "config");
}

#[test]
fn env_key_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    sitetrust(&dir.path().join("config.toml"))
        .env("SITETRUST_PAGERANK_KEY", "zyxwvutsrqpo")
        .args(["config", "show", "-o", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zyxw...rqpo"))
        .stdout(predicate::str::contains("flag/env"));
}

#[test]
fn broken_config_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "timeout_secs = \"soon\"").unwrap();

    sitetrust(file.path())
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}
