//! A scriptable stand-in for the sqitch executable
//!
//! The fake records each invocation's arguments, one line per call, and answers
//! `status`, `deploy` and `revert` from environment variables:
//! - `FAKE_SQITCH_STATUS_STDOUT` / `FAKE_SQITCH_STATUS_STDERR` / `FAKE_SQITCH_STATUS_EXIT`
//! - `FAKE_SQITCH_EXIT` for deploy and revert

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCRIPT: &str = r#"#!/bin/sh
echo "$*" >> "$FAKE_SQITCH_LOG"
for arg in "$@"; do
  case "$arg" in
    status)
      printf '%s' "$FAKE_SQITCH_STATUS_STDOUT"
      printf '%s' "$FAKE_SQITCH_STATUS_STDERR" >&2
      exit "${FAKE_SQITCH_STATUS_EXIT:-0}"
      ;;
    deploy|revert)
      echo "$arg finished"
      exit "${FAKE_SQITCH_EXIT:-0}"
      ;;
  esac
done
exit 0
"#;

/// Temporary home for the fake executable, its invocation log and config files.
/// The TempDir must outlive the test.
pub struct FakeSqitch {
    pub temp_dir: TempDir,
    bin_dir: PathBuf,
    log_path: PathBuf,
}

impl FakeSqitch {
    pub fn install() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let bin_dir = temp_dir.path().join("bin");
        fs::create_dir_all(&bin_dir)?;

        let script_path = bin_dir.join("sqitch");
        fs::write(&script_path, SCRIPT)?;
        let mut perms = fs::metadata(&script_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script_path, perms)?;

        let log_path = temp_dir.path().join("invocations.log");
        Ok(Self {
            temp_dir,
            bin_dir,
            log_path,
        })
    }

    /// The sqitch-runner binary with the fake first on PATH and an isolated config dir
    pub fn command(&self) -> anyhow::Result<Command> {
        let path = match std::env::var_os("PATH") {
            Some(existing) => {
                let mut paths = vec![self.bin_dir.clone()];
                paths.extend(std::env::split_paths(&existing));
                std::env::join_paths(paths)?
            }
            None => self.bin_dir.clone().into_os_string(),
        };

        let mut cmd = Command::cargo_bin("sqitch-runner")?;
        cmd.env("PATH", path)
            .env("XDG_CONFIG_HOME", self.temp_dir.path().join("config"))
            .env("FAKE_SQITCH_LOG", &self.log_path)
            .env_remove("RUST_LOG");
        Ok(cmd)
    }

    /// Arguments of every sqitch call so far, without the program name
    pub fn invocations(&self) -> Vec<String> {
        fs::read_to_string(&self.log_path)
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Write a config file inside the temp dir and return its path
    pub fn write_config(&self, content: &str) -> anyhow::Result<PathBuf> {
        let path = self.temp_dir.path().join("sqitch.json");
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

/// Typical status output with two pending changes
pub const PENDING_STATUS: &str = "# On database app_test
# Project:  app
# Change:   842b0858d77d016dd08bcc4452af3c2152e4c1ca
# Name:     debug_view
# Tag:      @1.1.6
#
Undeployed changes:
  * users_table @1.2.0 @1.2.1
  * widgets
";

pub const UP_TO_DATE_STATUS: &str = "# On database app_test
# Project:  app
#
Nothing to deploy (up-to-date)
";

pub const UNINITIALIZED_STDERR: &str =
    "psql:<stdin>:1: ERROR:  relation \"changes\" does not exist\n";
