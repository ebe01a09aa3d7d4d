//! Symlink resource.
use std::path::{Path, PathBuf};

use super::fs::{entry_exists, remove_recursive};
use super::{Resource, ResourceState};
use crate::error::ResourceError;

/// A symlink at `target` pointing at `source`.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// The source file/directory (what the symlink points to).
    pub source: PathBuf,
    /// The target path (where the symlink will be created).
    pub target: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }

    /// Whether `target`, resolved through its parent, is `source` or one of
    /// its ancestors.
    ///
    /// The target itself is not resolved, so an existing link at `target`
    /// that points at `source` does not count.
    fn target_holds_source(&self) -> bool {
        let (Some(parent), Some(name)) = (self.target.parent(), self.target.file_name()) else {
            return false;
        };
        let parent = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        match (
            dunce::canonicalize(parent),
            dunce::canonicalize(&self.source),
        ) {
            (Ok(parent), Ok(source)) => source.starts_with(parent.join(name)),
            _ => false,
        }
    }
}

impl Resource for SymlinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    fn current_state(&self) -> ResourceState {
        if !self.source.exists() {
            return ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.source.display()),
            };
        }
        if self.target_holds_source() {
            return ResourceState::Invalid {
                reason: format!("target holds the source: {}", self.target.display()),
            };
        }

        match std::fs::read_link(&self.target) {
            Ok(existing) if existing == self.source => ResourceState::Correct,
            Ok(existing) => ResourceState::Incorrect {
                current: format!("points to {}", existing.display()),
            },
            Err(_) if entry_exists(&self.target) => ResourceState::Incorrect {
                current: "target is not a symlink".to_string(),
            },
            Err(_) => ResourceState::Missing,
        }
    }

    /// Replace whatever lives at `target` with a fresh symlink.
    ///
    /// The previous entry is removed unconditionally, even when it already
    /// points at `source`, so every run leaves exactly the configured link.
    /// A target that is or contains the source is left alone.
    fn apply(&self) -> Result<(), ResourceError> {
        if self.target_holds_source() {
            return Err(ResourceError::TargetHoldsSource {
                link: self.target.clone(),
                target: self.source.clone(),
            });
        }
        remove_recursive(&self.target)?;
        create_symlink(&self.source, &self.target)
    }
}

/// Create a symlink at `link` pointing to `target`.
fn create_symlink(target: &Path, link: &Path) -> Result<(), ResourceError> {
    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(target, link);

    #[cfg(windows)]
    let result = if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    };

    result.map_err(|source| ResourceError::Symlink {
        link: link.to_path_buf(),
        target: target.to_path_buf(),
        source,
    })
}
