//! Cross-platform paths.

use std::path::PathBuf;

/// Get the configuration directory.
///
/// - Linux: `~/.config/lobby`
/// - Windows: `%APPDATA%\lobby`
/// - macOS: `~/Library/Application Support/lobby`
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lobby")
}

/// Get the path to the main config file.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.json")
}
