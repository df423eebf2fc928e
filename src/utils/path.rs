use std::path::PathBuf;

/// Overrides the config directory (used by tests)
pub const CONFIG_DIR_ENV: &str = "COURTSIDE_CONFIG_DIR";

/// Get the home directory, with fallback to "/"
pub fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Get the config directory path
///
/// `$COURTSIDE_CONFIG_DIR` when set, otherwise `~/.config/courtside`
/// regardless of OS.
pub fn get_config_dir() -> PathBuf {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => get_home_dir().join(".config").join("courtside"),
    }
}

/// Get the config file path
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Get the local session file path
pub fn get_session_path() -> PathBuf {
    get_config_dir().join("session.json")
}

/// Directory for the log file
pub fn get_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("courtside")
}
