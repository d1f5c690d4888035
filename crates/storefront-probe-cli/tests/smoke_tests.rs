//! Smoke tests for the storefront-probe binary
//!
//! Run commands use the simulated storefront, so no browser is needed.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn probe() -> Command {
    let mut cmd = Command::cargo_bin("storefront-probe").unwrap();
    for var in [
        "HEADLESS",
        "CHROME_PATH",
        "STOREFRONT_BASE_URL",
        "STOREFRONT_WAIT_TIMEOUT_MS",
        "STOREFRONT_POLL_MS",
        "STOREFRONT_HIGHLIGHT",
        "STOREFRONT_SEED",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

mod cli_tests {
    use super::*;

    #[test]
    fn test_version() {
        probe()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("0.4.0"));
    }

    #[test]
    fn test_help() {
        probe()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("run"))
            .stdout(predicate::str::contains("locators"));
    }

    #[test]
    fn test_no_subcommand_fails() {
        probe().assert().failure();
    }

    #[test]
    fn test_run_help_lists_flags() {
        probe()
            .args(["run", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--simulate"))
            .stdout(predicate::str::contains("--fail-fast"));
    }
}

mod list_tests {
    use super::*;

    #[test]
    fn test_list_all() {
        probe()
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("login::valid_login"))
            .stdout(predicate::str::contains("order::back_from_order"));
    }

    #[test]
    fn test_list_suite() {
        probe()
            .args(["list", "--suite", "cart"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cart::open_cart"))
            .stdout(predicate::str::contains("login::").not());
    }

    #[test]
    fn test_list_unknown_suite() {
        probe()
            .args(["list", "--suite", "nope"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown suite"));
    }

    #[test]
    fn test_list_json() {
        let out = probe()
            .args(["list", "--suite", "order", "--format", "json"])
            .output()
            .unwrap();
        assert!(out.status.success());
        let rows: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 2);
        assert_eq!(rows[0]["id"], "order::open_order");
    }
}

mod locators_tests {
    use super::*;

    #[test]
    fn test_locators_group() {
        probe()
            .args(["locators", "--group", "cart"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cart]"))
            .stdout(predicate::str::contains("[login]").not());
    }

    #[test]
    fn test_locators_json() {
        let out = probe()
            .args(["locators", "--group", "login", "--format", "json"])
            .output()
            .unwrap();
        assert!(out.status.success());
        let groups: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
        assert_eq!(groups["login"][0]["name"], "login.username");
        assert_eq!(groups["login"][0]["strategy"], "xpath");
    }

    #[test]
    fn test_unknown_group() {
        probe()
            .args(["locators", "--group", "basket"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown page group"));
    }
}

mod run_tests {
    use super::*;

    #[test]
    fn test_run_simulated_suite() {
        probe()
            .args(["run", "--simulate", "--filter", "order", "--no-log-file"])
            .assert()
            .success()
            .stderr(predicate::str::contains("order::open_order"))
            .stderr(predicate::str::contains("PASSED 2 scenarios"));
    }

    #[test]
    fn test_run_writes_log_file() {
        let dir = TempDir::new().unwrap();
        probe()
            .args(["run", "--simulate", "--filter", "login::logout", "--color", "never"])
            .arg("--log-dir")
            .arg(dir.path())
            .assert()
            .success();
        let logs: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].starts_with("test_run_"), "{logs:?}");
        assert!(logs[0].ends_with(".log"));
    }

    #[test]
    fn test_run_json_summary() {
        let out = probe()
            .args([
                "run",
                "--simulate",
                "--filter",
                "cart",
                "--no-log-file",
                "--format",
                "json",
            ])
            .output()
            .unwrap();
        assert!(out.status.success());
        let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
        assert_eq!(summary["outcomes"].as_array().unwrap().len(), 3);
        assert_eq!(summary["skipped"], 0);
    }

    #[test]
    fn test_run_unmatched_filter_fails() {
        probe()
            .args(["run", "--simulate", "--filter", "no_such_scenario", "--no-log-file"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no scenario matches"));
    }

    #[test]
    fn test_run_rejects_zero_poll() {
        probe()
            .args(["run", "--simulate", "--poll-ms", "0", "--no-log-file"])
            .assert()
            .failure();
    }
}
