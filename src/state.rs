//! Per-run flags and counters.

/// Mutable state of one deployment run.
///
/// Created fresh for every run and threaded through the directive handlers
/// by the [`Context`](crate::directives::Context).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    /// Answer every confirmation prompt with yes.
    pub force: bool,
    /// Allow `install` directives to run scripts.
    pub install_enabled: bool,
    /// The symlinking banner has been shown.
    pub symlink_started: bool,
    /// The installer banner has been shown.
    pub install_started: bool,
    /// Symlinks created.
    pub links_succeeded: u32,
    /// Symlinks that could not be created.
    pub links_failed: u32,
    /// Install scripts started.
    pub scripts_run: u32,
}

impl RunState {
    /// State for a run started with the given flags.
    #[must_use]
    pub fn new(force: bool, install_enabled: bool) -> Self {
        Self {
            force,
            install_enabled,
            ..Self::default()
        }
    }

    /// Mark the symlinking banner as shown; `true` only the first time.
    pub fn begin_symlinking(&mut self) -> bool {
        !std::mem::replace(&mut self.symlink_started, true)
    }

    /// Mark the installer banner as shown; `true` only the first time.
    pub fn begin_installing(&mut self) -> bool {
        !std::mem::replace(&mut self.install_started, true)
    }

    /// The three summary lines printed at the end of a run.
    #[must_use]
    pub fn summary_lines(&self) -> [String; 3] {
        [
            format!("{} symlinks created", self.links_succeeded),
            format!("{} install scripts run", self.scripts_run),
            format!("{} symlinks failed", self.links_failed),
        ]
    }
}
