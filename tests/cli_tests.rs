//! E2E tests for the oddsgrab CLI

#![allow(deprecated)] // cargo_bin deprecation - will update when assert_cmd stabilizes replacement

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn oddsgrab() -> Command {
    Command::cargo_bin("oddsgrab").unwrap()
}

const LISTING_FIXTURE: &str = r#"<html><body>
<div class="eventRow">
  <div data-testid="game-row">
    <a href="/football/spain/laliga/real-madrid-barcelona/abc123/">link</a>
    <p class="participant-name">Real Madrid</p>
    <p class="participant-name">Barcelona</p>
  </div>
</div>
<div class="eventRow">
  <div data-testid="game-row">
    <p class="participant-name">Girona</p>
    <p class="participant-name">Osasuna</p>
  </div>
</div>
<div class="eventRow">
  <div data-testid="game-row">
    <p class="participant-name">Real Madrid</p>
    <p class="participant-name">Barcelona</p>
  </div>
</div>
</body></html>"#;

#[test]
fn test_help() {
    oddsgrab()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scrape"))
        .stdout(predicate::str::contains("count"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_version() {
    oddsgrab()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("oddsgrab"));
}

#[test]
fn test_scrape_help() {
    oddsgrab()
        .args(["scrape", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--timeout"))
        .stdout(predicate::str::contains("--delay"))
        .stdout(predicate::str::contains("--headed"));
}

#[test]
fn test_count_help() {
    oddsgrab()
        .args(["count", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--base-url"));
}

#[test]
fn test_count_no_args() {
    oddsgrab()
        .arg("count")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_count_file_not_found() {
    oddsgrab()
        .args(["count", "nonexistent.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_count_reports_unique_matches() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("listing.html");
    fs::write(&file_path, LISTING_FIXTURE).unwrap();

    oddsgrab()
        .args(["count", file_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total unique matches: 2"))
        .stdout(predicate::str::contains("Real Madrid vs Barcelona"))
        .stdout(predicate::str::contains("Girona vs Osasuna"));
}

#[test]
fn test_init_creates_config() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("oddsgrab.yaml");

    oddsgrab()
        .args(["init", "--output", file_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let yaml = fs::read_to_string(&file_path).unwrap();
    assert!(yaml.contains("leagues:"));
    assert!(yaml.contains("Premier League"));
    assert!(yaml.contains("bookmakers:"));
}

#[test]
fn test_init_refuses_overwrite() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("oddsgrab.yaml");
    fs::write(&file_path, "leagues: []\n").unwrap();

    oddsgrab()
        .args(["init", "--output", file_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    oddsgrab()
        .args(["init", "--output", file_path.to_str().unwrap(), "--force"])
        .assert()
        .success();
}

#[test]
fn test_scrape_missing_config_file() {
    oddsgrab()
        .args(["scrape", "--config", "nonexistent.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}

#[test]
fn test_scrape_with_empty_league_list() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("empty.yaml");
    fs::write(&config_path, "leagues: []\n").unwrap();

    // This test requires Chrome, so we just check it starts
    // Full E2E would need Chrome installed
    oddsgrab()
        .args(["scrape", "--config", config_path.to_str().unwrap()])
        .current_dir(dir.path())
        .timeout(std::time::Duration::from_secs(30))
        .assert();
    // Don't assert success/failure as it depends on Chrome being installed
}
