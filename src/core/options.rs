//! Typed sqitch resource attributes.
//!
//! This module defines the attribute set a sqitch resource can carry, plus the two
//! closed enumerations that drive a run: the database [`Engine`] and the
//! [`ActionKind`] to perform.
//!
//! # Public API
//! - [`Engine`]: Database engines sqitch can talk to
//! - [`ActionKind`]: The mutating actions supported by the runner
//! - [`SqitchOptions`]: Every optional attribute that maps onto a sqitch CLI flag

use crate::core::error::{Result, SqitchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Database engine used by sqitch. Also decides which driver module the host needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all(serialize = "lowercase"), try_from = "String")]
pub enum Engine {
    Pg,
    Sqlite,
    Oracle,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Pg => "pg",
            Engine::Sqlite => "sqlite",
            Engine::Oracle => "oracle",
        }
    }

    /// Whether sqitch needs an explicit database name for this engine.
    /// SQLite creates its database file on demand.
    pub fn requires_db_name(&self) -> bool {
        matches!(self, Engine::Pg | Engine::Oracle)
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = SqitchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pg" => Ok(Engine::Pg),
            "sqlite" => Ok(Engine::Sqlite),
            "oracle" => Ok(Engine::Oracle),
            _ => Err(SqitchError::unknown_engine(s)),
        }
    }
}

impl TryFrom<String> for Engine {
    type Error = SqitchError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Action to converge a database with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all(serialize = "lowercase"), try_from = "String")]
pub enum ActionKind {
    #[default]
    Deploy,
    Revert,
}

impl ActionKind {
    /// The sqitch subcommand for this action
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Deploy => "deploy",
            ActionKind::Revert => "revert",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = SqitchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deploy" => Ok(ActionKind::Deploy),
            "revert" => Ok(ActionKind::Revert),
            _ => Err(SqitchError::unknown_action(s)),
        }
    }
}

impl TryFrom<String> for ActionKind {
    type Error = SqitchError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Attributes of a sqitch resource.
///
/// Every field is optional. Fields that are `None` never produce a CLI flag, so
/// sqitch falls back to its own defaults (or its config files) for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SqitchOptions {
    /// Database engine, e.g. `pg`
    pub engine: Option<Engine>,
    /// File extension of deploy, revert and verify scripts (sqitch default: `sql`)
    pub extension: Option<String>,
    /// Location of the plan file (sqitch default: `sqitch.plan` in `top_dir`)
    pub plan_file: Option<String>,

    /// Absolute path to the database client, e.g. `/usr/bin/psql`
    pub db_client: Option<String>,
    /// Database to connect to. Required for `pg` and `oracle`.
    pub db_name: Option<String>,
    pub db_user: Option<String>,
    pub db_host: Option<String>,
    pub db_port: Option<u16>,

    /// Directory holding the change scripts and the plan file
    pub top_dir: Option<String>,
    pub deploy_dir: Option<String>,
    pub revert_dir: Option<String>,
    pub verify_dir: Option<String>,

    /// Tag to deploy or revert to, without the leading `@`
    pub to_target: Option<String>,

    /// System user that runs the sqitch process
    pub user: Option<String>,
}

impl SqitchOptions {
    /// Overlay `overrides` on top of `self`: every field set in `overrides` wins.
    pub fn merge(self, overrides: SqitchOptions) -> SqitchOptions {
        SqitchOptions {
            engine: overrides.engine.or(self.engine),
            extension: overrides.extension.or(self.extension),
            plan_file: overrides.plan_file.or(self.plan_file),
            db_client: overrides.db_client.or(self.db_client),
            db_name: overrides.db_name.or(self.db_name),
            db_user: overrides.db_user.or(self.db_user),
            db_host: overrides.db_host.or(self.db_host),
            db_port: overrides.db_port.or(self.db_port),
            top_dir: overrides.top_dir.or(self.top_dir),
            deploy_dir: overrides.deploy_dir.or(self.deploy_dir),
            revert_dir: overrides.revert_dir.or(self.revert_dir),
            verify_dir: overrides.verify_dir.or(self.verify_dir),
            to_target: overrides.to_target.or(self.to_target),
            user: overrides.user.or(self.user),
        }
    }

    /// Global sqitch options in the order they are emitted on the command line:
    /// general options, then connection info, then directories.
    ///
    /// Each entry is the attribute name paired with its value, if set.
    pub fn global_options(&self) -> [(&'static str, Option<String>); 12] {
        [
            // general
            ("engine", self.engine.map(|e| e.as_str().to_string())),
            ("extension", self.extension.clone()),
            ("plan_file", self.plan_file.clone()),
            // connection
            ("db_client", self.db_client.clone()),
            ("db_name", self.db_name.clone()),
            ("db_user", self.db_user.clone()),
            ("db_host", self.db_host.clone()),
            ("db_port", self.db_port.map(|p| p.to_string())),
            // directories
            ("top_dir", self.top_dir.clone()),
            ("deploy_dir", self.deploy_dir.clone()),
            ("revert_dir", self.revert_dir.clone()),
            ("verify_dir", self.verify_dir.clone()),
        ]
    }
}
