//! Filesystem primitives the directives are built from.
pub mod fs;
pub mod path;
pub mod symlink;

use crate::error::ResourceError;

/// State of a resource relative to what the config asks for.
///
/// # Examples
///
/// ```
/// use econf::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let wrong = ResourceState::Incorrect { current: "/other/path".into() };
///
/// assert_ne!(missing, ResourceState::Correct);
/// assert_ne!(wrong, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Resource exists but does not match the desired state.
    Incorrect {
        /// What is there instead.
        current: String,
    },
    /// Resource cannot be applied (e.g., its source is missing).
    Invalid {
        /// Reason why the resource cannot be applied.
        reason: String,
    },
}

/// A filesystem entry that can be inspected and (re)applied.
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Inspect the filesystem and report the resource's current state.
    fn current_state(&self) -> ResourceState;

    /// Bring the filesystem into the desired state.
    ///
    /// # Errors
    ///
    /// Returns an error if the previous entry cannot be removed or the new
    /// one cannot be created.
    fn apply(&self) -> Result<(), ResourceError>;
}
