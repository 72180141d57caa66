//! Locating the converter executable and the default output directory

use crate::config::Config;
use std::path::{Path, PathBuf};

/// File name of the FBX2glTF executable on this platform
pub const CONVERTER_EXE_NAME: &str = if cfg!(windows) {
    "FBX2glTF-windows-x64.exe"
} else {
    "FBX2glTF"
};

/// Directory containing the running executable
///
/// This is the install directory for a packaged build, where the converter is
/// bundled next to the host binary.
pub fn install_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()?
        .parent()
        .map(Path::to_path_buf)
}

/// Resolve the converter executable
///
/// Order: explicit `converter_path`, a bundled copy in the install directory,
/// PATH (when `search_path` is enabled). If all of those miss, the bundled
/// location is returned anyway and the launch failure is reported per file.
pub fn resolve_converter(config: &Config) -> PathBuf {
    resolve_converter_in(config, install_dir().as_deref())
}

pub(crate) fn resolve_converter_in(config: &Config, install_dir: Option<&Path>) -> PathBuf {
    if let Some(path) = &config.converter_path {
        return path.clone();
    }

    let bundled = install_dir.map(|dir| dir.join(CONVERTER_EXE_NAME));
    if let Some(path) = bundled.as_ref().filter(|path| path.is_file()) {
        return path.clone();
    }

    if config.search_path {
        if let Ok(path) = which::which(CONVERTER_EXE_NAME) {
            return path;
        }
    }

    bundled.unwrap_or_else(|| PathBuf::from(CONVERTER_EXE_NAME))
}

/// Directory used for batches submitted without an output directory
///
/// Falls back from the configured directory to the install directory, then to
/// the current working directory.
pub fn default_output_dir(config: &Config) -> PathBuf {
    config
        .default_output_dir
        .clone()
        .or_else(install_dir)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
