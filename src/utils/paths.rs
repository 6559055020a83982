use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".laundry_core";
const DATA_DIR: &str = "data";
const CONFIG_FILE: &str = "config.json";
const EXPORT_DIR: &str = "exports";

/// Application data directory: `$LAUNDRY_CORE_HOME`, else `~/.laundry_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("LAUNDRY_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the stored record blobs.
pub fn data_dir_in(base: &Path) -> PathBuf {
    base.join(DATA_DIR)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn export_dir_in(base: &Path) -> PathBuf {
    base.join(EXPORT_DIR)
}
