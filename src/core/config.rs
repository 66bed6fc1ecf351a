//! Resource configuration loaded from JSON.
//!
//! A config file describes one sqitch resource: the action to take and its
//! attributes. Command-line flags are merged on top of it.
//!
//! ```json
//! {
//!   "action": "deploy",
//!   "options": {
//!     "engine": "pg",
//!     "db_name": "bifrost",
//!     "top_dir": "/srv/bifrost/sql",
//!     "to_target": "1.2.0"
//!   }
//! }
//! ```

use crate::core::{
    dirs::default_config_file,
    error::{Result, SqitchError},
    options::{ActionKind, Engine, SqitchOptions},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SqitchConfig {
    /// Action used when the caller does not name one
    pub action: Option<ActionKind>,
    pub options: SqitchOptions,
}

impl SqitchConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SqitchError::config_not_found(path));
        }

        log::debug!("Loading sqitch config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let value: Value =
            serde_json::from_str(&content).map_err(|e| SqitchError::config_parse(path, e))?;
        check_enum_fields(&value)?;
        serde_json::from_value(value).map_err(|e| SqitchError::config_parse(path, e))
    }

    /// Load `explicit` if given (it must exist), otherwise the per-user default file if
    /// present, otherwise an empty config.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match default_config_file() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                log::debug!("No sqitch config file found, using command-line options only");
                Ok(Self::default())
            }
        }
    }

    /// Options from the file with `overrides` applied on top
    pub fn options_with(&self, overrides: SqitchOptions) -> SqitchOptions {
        self.options.clone().merge(overrides)
    }
}

// Action and engine strings report the same errors as they do on the command line.
fn check_enum_fields(value: &Value) -> Result<()> {
    if let Some(action) = value.get("action").and_then(Value::as_str) {
        action.parse::<ActionKind>()?;
    }
    if let Some(engine) = value.pointer("/options/engine").and_then(Value::as_str) {
        engine.parse::<Engine>()?;
    }
    Ok(())
}
