//! Checked action requests.
//!
//! An [`ActionRequest`] can only be built through [`ActionRequest::new`], which
//! rejects combinations sqitch would either refuse or handle destructively:
//! - a revert without a target tag (that would remove every change)
//! - a `pg` or `oracle` engine without a database name

use crate::core::{
    error::{Result, SqitchError},
    options::{ActionKind, SqitchOptions},
};

/// A validated request to deploy or revert, scoped to one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    kind: ActionKind,
    options: SqitchOptions,
}

impl ActionRequest {
    pub fn new(kind: ActionKind, options: SqitchOptions) -> Result<Self> {
        if kind == ActionKind::Revert && options.to_target.is_none() {
            log::error!("Refusing to revert without a target tag");
            return Err(SqitchError::MissingTarget);
        }

        // TODO: skip this check once sqitch config files are honoured, since they can name the database
        if let Some(engine) = options.engine {
            if engine.requires_db_name() && options.db_name.is_none() {
                log::error!("Engine '{engine}' requires a database name");
                return Err(SqitchError::missing_db_name(engine.as_str()));
            }
        }

        Ok(Self { kind, options })
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn options(&self) -> &SqitchOptions {
        &self.options
    }

    /// Target tag without the sigil, if any
    pub fn target(&self) -> Option<&str> {
        self.options.to_target.as_deref()
    }

    /// System user the sqitch process should run as, if any
    pub fn run_as(&self) -> Option<&str> {
        self.options.user.as_deref()
    }
}
