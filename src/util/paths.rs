//! Locations of the Jules data directory and the files inside it.
//!
//! The client keeps no local state of its own. The data directory only holds
//! `config.toml` (API key and an optional base URL) and the `logs/` directory
//! the binary writes to. Everything lives under `~/.jules` unless
//! `--data-dir` points elsewhere.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Directory chosen at startup; unset means the default.
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Fix the data directory for the rest of the process.
///
/// Call once from `main`, before the config is loaded or logging starts.
/// `None` keeps `~/.jules`. Later calls are ignored.
pub fn init_data_dir(custom_path: Option<PathBuf>) {
    let path = custom_path.unwrap_or_else(default_data_dir);
    if let Err(rejected) = DATA_DIR.set(path) {
        tracing::debug!(
            rejected = %rejected.display(),
            current = %data_dir().display(),
            "Data directory was already set"
        );
    }
}

/// `~/.jules`, or `./.jules` when there is no home directory.
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".jules"))
        .unwrap_or_else(|| PathBuf::from(".jules"))
}

pub fn data_dir() -> PathBuf {
    DATA_DIR.get().cloned().unwrap_or_else(default_data_dir)
}

/// Directory for the binary's log file. Created by `main`, not here.
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

pub fn log_file_path() -> PathBuf {
    logs_dir().join("jules.log")
}

/// Optional TOML file read by [`crate::config::Config::load`].
pub fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}
