//! Locate data files below one or more roots.
//!
//! Directories are walked depth-first in file-name order, so two runs over
//! the same tree always produce the same list.  Merge order (and therefore
//! which file wins a (type, id) collision) follows this list.
//!
//! Symlinked directories are not descended into; symlinked files are
//! returned under the link's own path.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::LoadError;

/// Default data file extension (without the dot).
pub const DATA_FILE_EXTENSION: &str = "ndat";

/// Returns `true` when `path` ends in `.{extension}`.  Case-sensitive.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension() == Some(OsStr::new(extension))
}

/// Collect absolute paths of all files with `extension` under `roots`.
///
/// A root that is itself a matching file is returned as-is; a non-matching
/// file root contributes nothing.  A root that does not exist is an error.
pub fn find_data_files<P: AsRef<Path>>(roots: &[P], extension: &str) -> Result<Vec<PathBuf>, LoadError> {
    let mut found = Vec::new();
    for root in roots {
        let root = root.as_ref();
        let path = std::path::absolute(root)
            .map_err(|source| LoadError::Path { path: root.to_path_buf(), source })?;
        let meta = fs::metadata(&path)
            .map_err(|source| LoadError::Path { path: path.clone(), source })?;

        if meta.is_dir() {
            let before = found.len();
            for entry in WalkDir::new(&path).sort_by_file_name() {
                let entry = entry.map_err(|source| LoadError::Walk { path: path.clone(), source })?;
                // Symlinks are not followed into directories, but a link to a
                // data file still counts as that file.
                let is_file = entry.file_type().is_file()
                    || (entry.path_is_symlink() && entry.path().is_file());
                if is_file && has_extension(entry.path(), extension) {
                    trace!(path = %entry.path().display(), "found data file");
                    found.push(entry.into_path());
                }
            }
            debug!(root = %path.display(), files = found.len() - before, "walked directory");
        } else if has_extension(&path, extension) {
            found.push(path);
        } else {
            debug!(root = %path.display(), "skipping root without .{extension} extension");
        }
    }
    Ok(found)
}
