//! sqitch-runner - idempotent `sqitch deploy` and `sqitch revert` for configuration-management runs.
//!
//! The library turns a set of sqitch resource attributes into command lines, reads
//! `sqitch status` to work out what a deploy would change, and runs the action with
//! sqitch's exit-code conventions (0 and 1 both mean success).
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - Resource attributes and request validation
//! - Command construction
//! - Status output interpretation
//! - The deploy/revert orchestrator and its process runner
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    ActionKind,
    ActionOutcome,
    ActionRequest,
    ActionState,
    CommandRunner,
    Engine,
    ExecResult,
    Orchestrator,
    Result,
    SqitchCommand,
    SqitchConfig,
    SqitchError,
    SqitchOptions,
    StatusHeader,
    StatusReport,
    SystemRunner,
    ALL_CHANGES_SENTINEL,
};
