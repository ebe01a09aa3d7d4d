//! Bounded path construction.
use std::path::{Path, PathBuf};

use crate::error::ResourceError;

/// Longest path, in bytes, that econf will construct.
pub const MAX_PATH_LEN: usize = 1024;

/// Join `parts` into a single path, rejecting results longer than
/// [`MAX_PATH_LEN`].
///
/// Parts are pushed in order, so an absolute part replaces everything before
/// it, exactly as [`Path::join`] does.
///
/// # Errors
///
/// Returns [`ResourceError::PathTooLong`] if the joined path exceeds the limit.
pub fn join_bounded<P: AsRef<Path>>(parts: &[P]) -> Result<PathBuf, ResourceError> {
    let mut path = PathBuf::new();
    for part in parts {
        path.push(part);
    }
    if path.as_os_str().len() > MAX_PATH_LEN {
        return Err(ResourceError::PathTooLong {
            path,
            max: MAX_PATH_LEN,
        });
    }
    Ok(path)
}
