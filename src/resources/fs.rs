//! File-system helpers: recursive removal and directory listing.
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::ResourceError;

/// Remove `path` and, if it is a real directory, everything beneath it.
///
/// Removal is depth-first: directory contents go before the directory so
/// that no "directory not empty" error can occur. Symlinks are never
/// followed; a link to a directory is removed as a link.
///
/// An absent path counts as success. A directory that cannot be listed is
/// still removed if possible, and a failing child does not stop its
/// siblings from being removed. The first error encountered is returned.
///
/// # Errors
///
/// Returns the first [`ResourceError`] hit while listing or removing.
pub fn remove_recursive(path: &Path) -> Result<(), ResourceError> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(ResourceError::Remove {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if !meta.is_dir() {
        return remove_entry(path, false);
    }

    let mut first_error = None;
    match fs::read_dir(path) {
        Ok(entries) => {
            for entry in entries {
                let result = entry
                    .map_err(|source| ResourceError::ListDir {
                        path: path.to_path_buf(),
                        source,
                    })
                    .and_then(|entry| remove_recursive(&entry.path()));
                if let Err(e) = result {
                    first_error.get_or_insert(e);
                }
            }
        }
        Err(source) => {
            first_error.get_or_insert(ResourceError::ListDir {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    let removed = remove_entry(path, true);
    match first_error {
        Some(e) => Err(e),
        None => removed,
    }
}

/// Remove a single entry, treating an already-absent target as success.
fn remove_entry(path: &Path, is_dir: bool) -> Result<(), ResourceError> {
    let result = if is_dir {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    };
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ResourceError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Ensure `dir` exists, creating it (and any ancestors) if necessary.
///
/// # Errors
///
/// Returns [`ResourceError::CreateDir`] if the directory cannot be created.
pub fn ensure_dir(dir: &Path) -> Result<(), ResourceError> {
    fs::create_dir_all(dir).map_err(|source| ResourceError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// List the names of the entries in `dir`, sorted for a stable link order.
///
/// `.` and `..` never appear. Names are returned exactly as stored, so
/// names that are not valid UTF-8 survive.
///
/// # Errors
///
/// Returns [`ResourceError::ListDir`] if the directory cannot be read.
pub fn list_dir_names(dir: &Path) -> Result<Vec<OsString>, ResourceError> {
    let list_err = |source| ResourceError::ListDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut names = fs::read_dir(dir)
        .map_err(list_err)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(list_err)?;
    names.sort();
    Ok(names)
}

/// Return `true` if anything (including a dangling symlink) exists at `path`.
#[must_use]
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
