//! Integration tests for the findash CLI

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use serial_test::serial;
    use tempfile::TempDir;

    /// Binary with its state and config homes redirected into a temp dir
    fn findash(home: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("findash");
        cmd.env("HOME", home.path())
            .env("XDG_CONFIG_HOME", home.path().join(".config"))
            .env("XDG_STATE_HOME", home.path().join(".local/state"))
            .env("XDG_DATA_HOME", home.path().join(".local/share"));
        cmd
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("findash")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Financial dashboard client"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("findash")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("findash"));
    }

    #[test]
    #[serial]
    fn config_path() {
        let home = TempDir::new().unwrap();
        findash(&home)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    #[serial]
    fn config_show_defaults() {
        let home = TempDir::new().unwrap();
        findash(&home)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[api]"))
            .stdout(predicate::str::contains("http://localhost:8080/api"));
    }

    #[test]
    #[serial]
    fn config_set_and_show_roundtrip() {
        let home = TempDir::new().unwrap();
        findash(&home)
            .args(["config", "set", "api.timeout_secs", "5"])
            .assert()
            .success();

        findash(&home)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("timeout_secs = 5"));
    }

    #[test]
    #[serial]
    fn config_set_rejects_unknown_key() {
        let home = TempDir::new().unwrap();
        findash(&home)
            .args(["config", "set", "api.nope", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Unknown config key"));
    }

    #[test]
    #[serial]
    fn status_when_logged_out() {
        let home = TempDir::new().unwrap();
        findash(&home)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("logged out"));
    }

    #[test]
    #[serial]
    fn logout_without_session() {
        let home = TempDir::new().unwrap();
        findash(&home)
            .arg("logout")
            .assert()
            .success()
            .stdout(predicate::str::contains("No active session"));
    }

    #[test]
    #[serial]
    fn unreachable_backend_reports_network_error() {
        let home = TempDir::new().unwrap();
        let config_path = home.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[api]\nbase_url = \"http://127.0.0.1:9\"\ntimeout_secs = 2\n",
        )
        .unwrap();

        findash(&home)
            .args(["market", "summary"])
            .arg("--config")
            .arg(&config_path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Network error"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    #[serial]
    fn dashboard_reports_network_error_when_backend_is_down() {
        let home = TempDir::new().unwrap();
        let config_path = home.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[api]\nbase_url = \"http://127.0.0.1:9\"\ntimeout_secs = 2\n",
        )
        .unwrap();

        findash(&home)
            .arg("dashboard")
            .arg("--config")
            .arg(&config_path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Network error"));
    }

    #[test]
    fn login_requires_provider() {
        cargo_bin_cmd!("findash").arg("login").assert().failure();
    }

    #[test]
    fn portfolio_record_requires_price() {
        cargo_bin_cmd!("findash")
            .args(["portfolio", "record", "1", "VTI", "buy", "--quantity", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--price"));
    }
}
