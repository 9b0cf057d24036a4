use std::fs;

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with settings discovery pointed at an empty directory.
fn reelctl(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("reelctl");
    cmd.current_dir(dir.path())
        .env_remove("REEL_CONFIG_PATH")
        .env_remove("REEL_CONFIG_JSON")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn simulate_help_mentions_options() {
    let mut cmd = cargo_bin_cmd!("reelctl");
    let output = cmd
        .arg("simulate")
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&output);
    for flag in ["--kind", "--script", "--realtime", "--json", "--frame-ms"] {
        assert!(text.contains(flag), "simulate help missing {flag}");
    }
}

#[test]
fn geometry_reports_desktop_layout() {
    let dir = TempDir::new().unwrap();
    reelctl(&dir)
        .args(["geometry", "--width", "1280"])
        .assert()
        .success()
        .stdout(predicate::str::contains("device:          desktop"))
        .stdout(predicate::str::contains("items per view:  3"))
        .stdout(predicate::str::contains("step:            424.0 px"));
}

#[test]
fn geometry_for_partners_on_mobile() {
    let dir = TempDir::new().unwrap();
    reelctl(&dir)
        .args(["geometry", "--width", "375", "--kind", "partners"])
        .assert()
        .success()
        .stdout(predicate::str::contains("device:          mobile"));
}

#[test]
fn geometry_warns_below_the_narrowest_layout() {
    let dir = TempDir::new().unwrap();
    reelctl(&dir)
        .args(["geometry", "--width", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("items per view:  1"))
        .stderr(predicate::str::contains("narrower than the smallest"));
}

#[test]
fn simulate_survives_an_enormous_page_number() {
    let dir = TempDir::new().unwrap();
    reelctl(&dir)
        .args([
            "simulate",
            "--duration-ms",
            "2000",
            "--script",
            "0:pause,100:page=18446744073709551615",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("item 0 -> 3"));
}

#[test]
fn simulate_prints_each_index_change() {
    let dir = TempDir::new().unwrap();
    reelctl(&dir)
        .args(["simulate", "--duration-ms", "11000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("item 0 -> 1"))
        .stdout(predicate::str::contains("item 1 -> 2"))
        .stdout(predicate::str::contains("2 index change(s)"));
}

#[test]
fn simulate_json_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    let output = reelctl(&dir)
        .args([
            "simulate",
            "--json",
            "--duration-ms",
            "3000",
            "--script",
            "0:pause,500:page=1",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["summary"]["final_item"], 3);
    assert_eq!(report["summary"]["kind"], "testimonials");
    assert_eq!(report["changes"].as_array().map(Vec::len), Some(1));
}

#[test]
fn simulate_rejects_a_bad_script() {
    let dir = TempDir::new().unwrap();
    reelctl(&dir)
        .args(["simulate", "--script", "100:teleport"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown command"));
}

#[test]
fn check_without_settings_uses_defaults() {
    let dir = TempDir::new().unwrap();
    reelctl(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("source: Default"))
        .stdout(predicate::str::contains("no warnings"));
}

#[test]
fn check_rejects_a_zero_interval() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reel.toml");
    fs::write(&path, "[testimonials]\ninterval_ms = 0\n").unwrap();
    reelctl(&dir)
        .args(["check", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("interval_ms"));
}

#[test]
fn check_reports_slow_progress_polls() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reel.toml");
    fs::write(
        &path,
        "[testimonials]\ninterval_ms = 2000\nprogress_tick_ms = 3000\n",
    )
    .unwrap();
    reelctl(&dir)
        .args(["check", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("warning(s):"));
}
