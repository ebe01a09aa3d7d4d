//! Shared helpers for integration tests.
//
// Provides a temporary-directory-backed dotfiles repository with a separate
// fake home directory, plus a fluent builder, so each integration test can
// deploy a config without touching the real home directory.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use econf::commands::deploy::{DeployOptions, deploy};
use econf::error::EconfError;
use econf::exec::{Executor, SystemExecutor};
use econf::logging::{Log, Logger};
use econf::platform::Host;
use econf::prompt::{Prompter, ScriptedPrompter};
use econf::state::RunState;

/// Hostname reported to the expander in every integration test.
pub const HOSTNAME: &str = "testhost";

/// An isolated repository and home directory backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory holding the repository and `home/`.
    pub dir: tempfile::TempDir,
    root_name: String,
}

impl IntegrationTestContext {
    /// Create empty `repo/` and `home/` directories.
    pub fn new() -> Self {
        Self::with_root_name("repo")
    }

    /// Create an empty repository directory called `name` next to `home/`.
    pub fn with_root_name(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(dir.path().join(name)).expect("create repo dir");
        std::fs::create_dir_all(dir.path().join("home")).expect("create home dir");
        Self {
            dir,
            root_name: name.to_string(),
        }
    }

    /// Path to the repository root.
    pub fn root(&self) -> PathBuf {
        self.dir.path().join(&self.root_name)
    }

    /// Path to the fake home directory `~` expands to.
    pub fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    /// Host facts pointing `~` at [`Self::home`].
    pub fn host(&self) -> Host {
        Host::new(self.home().to_string_lossy(), HOSTNAME)
    }

    /// Default options: `econf` in the repository root, no flags.
    pub fn options(&self) -> DeployOptions {
        DeployOptions {
            root: self.root(),
            config: PathBuf::from("econf"),
            force: false,
            install: false,
            dry_run: false,
        }
    }

    /// Deploy with `opts`, answering prompts with `answers`.
    pub fn deploy(&self, opts: &DeployOptions, answers: &[&str]) -> Outcome {
        let prompter = SharedPrompter::new(answers);
        let executor = RecordingExecutor::default();
        let log: Arc<dyn Log> = Arc::new(Logger::with_log_file(None));
        let result = deploy(
            opts,
            self.host(),
            Box::new(executor.clone()),
            Box::new(prompter.clone()),
            log,
        );
        Outcome {
            result,
            prompts: prompter.prompts(),
            commands: executor.commands(),
        }
    }

    /// Whether `path` is a symlink pointing at `target`.
    pub fn links_to(path: &Path, target: &Path) -> bool {
        std::fs::read_link(path).is_ok_and(|t| t == target)
    }
}

/// Result of one deployment plus what it asked and ran.
pub struct Outcome {
    /// Final state, or the error that stopped the run.
    pub result: Result<RunState, EconfError>,
    /// Prompts shown, in order.
    pub prompts: Vec<String>,
    /// Command lines handed to the shell, in order.
    pub commands: Vec<String>,
}

impl Outcome {
    /// The final state of a run that must have completed.
    pub fn state(&self) -> &RunState {
        self.result.as_ref().expect("run should complete")
    }
}

/// [`Prompter`] over a shared [`ScriptedPrompter`] so prompts stay
/// inspectable after the deploy call consumed the box.
#[derive(Debug, Clone)]
pub struct SharedPrompter(Arc<Mutex<ScriptedPrompter>>);

impl SharedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self(Arc::new(Mutex::new(ScriptedPrompter::new(
            answers.iter().copied(),
        ))))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.0.lock().expect("prompter lock").prompts().to_vec()
    }
}

impl Prompter for SharedPrompter {
    fn ask(&mut self, prompt: &str) -> std::io::Result<String> {
        self.0.lock().expect("prompter lock").ask(prompt)
    }
}

/// [`Executor`] that records each command line and runs it for real.
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor(Arc<Mutex<Vec<String>>>);

impl RecordingExecutor {
    pub fn commands(&self) -> Vec<String> {
        self.0.lock().expect("executor lock").clone()
    }
}

impl Executor for RecordingExecutor {
    fn shell(&self, command_line: &str, dir: &Path) -> anyhow::Result<econf::exec::ExecResult> {
        self.0
            .lock()
            .expect("executor lock")
            .push(command_line.to_string());
        SystemExecutor.shell(command_line, dir)
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context with empty repository and home.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Begin building a context whose repository directory is called `name`.
    pub fn with_root_name(name: &str) -> Self {
        Self {
            ctx: IntegrationTestContext::with_root_name(name),
        }
    }

    /// Write the `econf` config file.
    pub fn with_config(self, content: &str) -> Self {
        self.with_config_bytes(content.as_bytes())
    }

    /// Write the `econf` config file from raw bytes.
    pub fn with_config_bytes(self, content: &[u8]) -> Self {
        std::fs::write(self.ctx.root().join("econf"), content).expect("write config");
        self
    }

    /// Create `relative` (and its parents) inside the repository.
    pub fn with_source_file(self, relative: &str, content: &str) -> Self {
        let path = self.ctx.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create source parent");
        }
        std::fs::write(&path, content).expect("write source file");
        self
    }

    /// Create `relative` inside the fake home directory.
    pub fn with_home_file(self, relative: &str, content: &str) -> Self {
        let path = self.ctx.home().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create home parent");
        }
        std::fs::write(&path, content).expect("write home file");
        self
    }

    /// Create an executable `install/<name>` script with `body`.
    #[cfg(unix)]
    pub fn with_install_script(self, name: &str, body: &str) -> Self {
        use std::os::unix::fs::PermissionsExt as _;
        let dir = self.ctx.root().join("install");
        std::fs::create_dir_all(&dir).expect("create install dir");
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write install script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod install script");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
