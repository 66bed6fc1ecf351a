use std::path::PathBuf;

const APP_DIR: &str = "sqitch-runner";

/// Per-user configuration directory, honouring `XDG_CONFIG_HOME` on every platform
pub fn get_config_directory() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)?;

    Some(base.join(APP_DIR))
}

pub fn default_config_file() -> Option<PathBuf> {
    get_config_directory().map(|dir| dir.join("config.json"))
}
