//! Input file discovery
//!
//! Expands the paths a user hands to the host into the ordered list of files for a
//! [`BatchRequest`](crate::BatchRequest):
//! - A file path is taken as given, whatever its extension (the converter decides
//!   whether it can read it)
//! - A directory contributes the `.fbx` files inside it (case-insensitive), sorted
//!   by path, optionally recursing into subdirectories
//! - Files reached twice are kept once, at their first position

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extension of convertible input files
pub const FBX_EXTENSION: &str = "fbx";

/// Whether `path` has the `.fbx` extension (case-insensitive)
pub fn is_fbx_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(FBX_EXTENSION))
        .unwrap_or(false)
}

/// Expand `paths` into the list of input files for one batch
///
/// # Errors
///
/// Returns [`Error::InputNotFound`] for a path that does not exist and
/// [`Error::Discovery`] if a directory cannot be traversed.
pub fn collect_input_files<P: AsRef<Path>>(paths: &[P], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            let found = scan_directory(path, recursive)?;
            debug!(dir = ?path, count = found.len(), "scanned input directory");
            for file in found {
                if seen.insert(file.clone()) {
                    files.push(file);
                }
            }
        } else if path.exists() {
            if !is_fbx_file(path) {
                warn!(file = ?path, "input does not have an .fbx extension");
            }
            if seen.insert(path.to_path_buf()) {
                files.push(path.to_path_buf());
            }
        } else {
            return Err(Error::InputNotFound(path.to_path_buf()));
        }
    }

    Ok(files)
}

fn scan_directory(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut walker = WalkDir::new(dir).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut found = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| Error::Discovery {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        let path = entry.path();
        if path.is_file() && is_fbx_file(path) {
            found.push(path.to_path_buf());
        }
    }

    found.sort();
    Ok(found)
}
