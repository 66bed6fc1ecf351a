//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`SqitchError`] which covers every failure mode of a
//! sqitch-runner invocation. It uses `thiserror` for ergonomic error definitions
//! and includes constructor helpers for the common failure scenarios.
//!
//! # Public API
//! - [`SqitchError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, SqitchError>`
//!
//! # Error Categories
//! - **Request validation**: Unknown actions or engines, missing target or database name
//! - **Process execution**: Missing sqitch executable, failing exit codes, I/O errors
//! - **Configuration**: Missing or malformed resource files

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for sqitch-runner
#[derive(Error, Debug)]
pub enum SqitchError {
    // Request errors
    #[error("Unrecognized action for sqitch resource: '{action}' (expected 'deploy' or 'revert')")]
    UnknownAction { action: String },

    #[error("Unsupported engine '{engine}' (expected one of: pg, sqlite, oracle)")]
    UnknownEngine { engine: String },

    #[error("The revert action requires a value for 'to_target' (reverting an entire schema is not supported)")]
    MissingTarget,

    #[error("A value for 'db_name' is required for engine '{engine}'")]
    MissingDbName { engine: String },

    // Process errors
    #[error("Could not find the '{program}' executable on PATH")]
    SqitchNotFound { program: String },

    #[error("Command '{command}' failed with {}: {stderr}", describe_exit(.code))]
    CommandFailed {
        code: Option<i32>,
        command: String,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Config file does not exist: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Convenience type alias for Results using SqitchError
pub type Result<T> = std::result::Result<T, SqitchError>;

impl SqitchError {
    /// Create an unknown action error
    pub fn unknown_action(action: impl Into<String>) -> Self {
        Self::UnknownAction {
            action: action.into(),
        }
    }

    /// Create an unknown engine error
    pub fn unknown_engine(engine: impl Into<String>) -> Self {
        Self::UnknownEngine {
            engine: engine.into(),
        }
    }

    /// Create a missing database name error for the given engine
    pub fn missing_db_name(engine: impl Into<String>) -> Self {
        Self::MissingDbName {
            engine: engine.into(),
        }
    }

    /// Create a missing executable error
    pub fn sqitch_not_found(program: impl Into<String>) -> Self {
        Self::SqitchNotFound {
            program: program.into(),
        }
    }

    /// Create a command failure error from a process result
    pub fn command_failed(
        code: Option<i32>,
        command: impl Into<String>,
        stderr: impl AsRef<str>,
    ) -> Self {
        Self::CommandFailed {
            code,
            command: command.into(),
            stderr: stderr.as_ref().trim().to_string(),
        }
    }

    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn config_parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }
}
