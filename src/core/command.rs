//! Construction of sqitch command lines.
//!
//! A [`SqitchCommand`] is an immutable list of tokens: the `sqitch` program, the
//! global options that are set, the subcommand, then subcommand-specific flags.
//! Flags are derived from attribute names, so `top_dir` becomes `--top-dir`.
//!
//! ```
//! use sqitch_runner::core::{command::SqitchCommand, options::SqitchOptions};
//!
//! let options = SqitchOptions {
//!     to_target: Some("1.2.3".to_string()),
//!     ..Default::default()
//! };
//! let command = SqitchCommand::deploy(&options);
//! assert_eq!(command.to_command_line(), "sqitch deploy --to-target @1.2.3 --verify");
//! ```

use crate::core::options::{ActionKind, SqitchOptions};
use std::fmt;

/// The sqitch executable, expected on `$PATH`
pub const SQITCH_PROGRAM: &str = "sqitch";

/// Tag reference sigil required by sqitch
pub const TAG_SIGIL: char = '@';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqitchCommand {
    tokens: Vec<String>,
}

impl SqitchCommand {
    /// `sqitch deploy`, always verifying each change after it is deployed
    pub fn deploy(options: &SqitchOptions) -> Self {
        let mut tokens = base_tokens(options, "deploy");
        push_target(&mut tokens, options);
        tokens.push("--verify".to_string());
        Self { tokens }
    }

    /// `sqitch revert`, confirming non-interactively
    pub fn revert(options: &SqitchOptions) -> Self {
        let mut tokens = base_tokens(options, "revert");
        push_target(&mut tokens, options);
        tokens.push("-y".to_string());
        Self { tokens }
    }

    /// Plain `sqitch status`. The status parser relies on its default output, so no
    /// status-specific flags are added.
    pub fn status(options: &SqitchOptions) -> Self {
        Self {
            tokens: base_tokens(options, "status"),
        }
    }

    pub fn for_action(kind: ActionKind, options: &SqitchOptions) -> Self {
        match kind {
            ActionKind::Deploy => Self::deploy(options),
            ActionKind::Revert => Self::revert(options),
        }
    }

    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Everything after the program
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Single invocation string, tokens joined by spaces
    pub fn to_command_line(&self) -> String {
        self.tokens.join(" ")
    }
}

impl fmt::Display for SqitchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_command_line())
    }
}

/// Turn an attribute name into its CLI flag: `plan_file` -> `--plan-file`
pub fn flag_for(option_name: &str) -> String {
    format!("--{}", option_name.replace('_', "-"))
}

fn base_tokens(options: &SqitchOptions, subcommand: &str) -> Vec<String> {
    let mut tokens = vec![SQITCH_PROGRAM.to_string()];

    for (name, value) in options.global_options() {
        if let Some(value) = value {
            tokens.push(flag_for(name));
            tokens.push(value);
        }
    }

    tokens.push(subcommand.to_string());
    tokens
}

// The sigil is always added; a target that already carries one ends up with two.
fn push_target(tokens: &mut Vec<String>, options: &SqitchOptions) {
    if let Some(target) = &options.to_target {
        tokens.push(flag_for("to_target"));
        tokens.push(format!("{TAG_SIGIL}{target}"));
    }
}
