use std::{env, path::PathBuf};

pub const PROGRAM_NAME: &str = "shelf";
pub const PROGRAM_LOG_LEVEL: &str = "SHELF_LOG_LEVEL";

/// Overrides the directory whose files make up the shelf.
pub const SHELF_DIR_ENV: &str = "SHELF_DIR";
/// Overrides the directory backing the key-value store.
pub const STATE_DIR_ENV: &str = "SHELF_STATE_DIR";
/// Set to `0` or `false` to stop recording file accesses.
pub const HISTORY_DISABLED_ENV: &str = "SHELF_HISTORY";

/// Storage key of the access history log
pub const HISTORY_KEY: &str = "file_access_history";
/// Storage key of the user preferences document
pub const PREFERENCES_KEY: &str = "userPreferences";

/// Upper bound on the persisted access log.
pub const MAX_HISTORY_ENTRIES: usize = 50;
/// Upper bound on the derived recent-files view.
pub const MAX_RECENT_FILES: usize = 10;

pub fn xdg_or_home(xdg_var: &str, home_suffix: &str) -> PathBuf {
    match env::var_os(xdg_var) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(home_suffix),
    }
}

fn non_empty_env(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Directory holding the files shown on the shelf
pub fn default_shelf_dir() -> PathBuf {
    if let Some(dir) = non_empty_env(SHELF_DIR_ENV) {
        return dir;
    }

    xdg_or_home("XDG_DATA_HOME", ".local/share")
        .join(PROGRAM_NAME)
        .join("files")
}

/// Directory holding persisted state (history, preferences).
pub fn state_dir() -> Option<PathBuf> {
    if let Some(dir) = non_empty_env(STATE_DIR_ENV) {
        return Some(dir);
    }

    // Check XDG_STATE_HOME first (Linux)
    if let Some(xdg_state) = non_empty_env("XDG_STATE_HOME") {
        return Some(xdg_state.join(PROGRAM_NAME));
    }

    // Fall back to dirs crate
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|p| p.join(PROGRAM_NAME))
}

pub fn history_disabled() -> bool {
    match env::var(HISTORY_DISABLED_ENV) {
        Ok(val) => val == "0" || val.eq_ignore_ascii_case("false"),
        Err(_) => false,
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
