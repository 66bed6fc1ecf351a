//! Core functionality for sqitch-runner.
//!
//! This module provides the building blocks for driving sqitch: typed resource
//! options, command construction, status interpretation, process execution and the
//! deploy/revert state machine.

pub mod command;
pub mod config;
pub mod dirs;
pub mod error;
pub mod options;
pub mod orchestrator;
pub mod output;
pub mod preview;
pub mod runner;
pub mod sqitch_status;
pub mod validation;

// === Error handling ===
// Core error type and result alias used throughout the application
pub use error::{Result, SqitchError};

// === Resource attributes ===
// Closed enumerations for engines and actions, plus the optional attribute set
pub use options::{ActionKind, Engine, SqitchOptions};
pub use validation::ActionRequest;

// === Command construction ===
// Attribute set -> `sqitch ...` token list
pub use command::SqitchCommand;

// === Status interpretation ===
// `sqitch status` stdout/stderr -> structured report
pub use sqitch_status::{StatusHeader, StatusReport, ALL_CHANGES_SENTINEL};

// === Execution ===
// Process runner seam and the deploy/revert state machine
pub use orchestrator::{ActionOutcome, ActionState, Orchestrator};
pub use runner::{CommandRunner, ExecResult, SystemRunner};

// === Configuration ===
pub use config::SqitchConfig;

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{print_error, print_info, print_preview, print_section_header, print_success};
