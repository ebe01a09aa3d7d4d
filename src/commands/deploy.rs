//! The deploy command: read the config and execute it line by line.
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::Cli;
use crate::config::{self, expand::Expander, lexer::Lexer};
use crate::directives::{self, Context};
use crate::error::{EconfError, RunError};
use crate::exec::{Executor, SystemExecutor};
use crate::logging::{Log, Logger};
use crate::platform::Host;
use crate::prompt::{Prompter, StdinPrompter};
use crate::state::RunState;

/// Options for one deployment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    /// Root directory; sources, installers and commands are resolved here.
    pub root: PathBuf,
    /// Config file, relative to `root` unless absolute.
    pub config: PathBuf,
    /// Start in force mode.
    pub force: bool,
    /// Run `install` directives.
    pub install: bool,
    /// Log actions instead of performing them.
    pub dry_run: bool,
}

impl DeployOptions {
    /// Build options from parsed command-line arguments.
    ///
    /// `-C` is canonicalised; without it the current directory is the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory does not exist or the current
    /// directory cannot be determined.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = match &cli.directory {
            Some(dir) => dunce::canonicalize(dir)
                .with_context(|| format!("cannot change to directory {}", dir.display()))?,
            None => std::env::current_dir().context("cannot determine current directory")?,
        };
        Ok(Self {
            root,
            config: cli.config.clone(),
            force: cli.force,
            install: cli.install,
            dry_run: cli.dry_run,
        })
    }
}

/// Feed every line of `lines` to the dispatcher, in order.
///
/// # Errors
///
/// Returns [`RunError::Aborted`] when the user stops the run after a bad
/// line, or [`RunError::Lex`] if the config cannot be read.
pub fn execute<R: BufRead>(ctx: &mut Context, lines: Lexer<R>) -> Result<(), RunError> {
    for line in lines {
        match line {
            Ok(line) => directives::dispatch(ctx, &line)?,
            Err(e) => directives::reject_malformed(ctx, e)?,
        }
    }
    Ok(())
}

/// Locate and execute the config described by `opts`.
///
/// Returns the final run state for the summary.
///
/// # Errors
///
/// Returns an error if the config cannot be found or opened, or the run is
/// stopped early.
pub fn deploy(
    opts: &DeployOptions,
    host: Host,
    executor: Box<dyn Executor>,
    prompter: Box<dyn Prompter>,
    log: Arc<dyn Log>,
) -> Result<RunState, EconfError> {
    let path = config::locate(&opts.root, &opts.config)?;
    log.debug(&format!("config: {}", path.display()));
    log.debug(&format!("host: {} (home {})", host.hostname, host.home));

    let lines = config::open(&path, Expander::new(host))?;
    let mut ctx = Context {
        state: RunState::new(opts.force, opts.install),
        cwd: opts.root.clone(),
        dry_run: opts.dry_run,
        log,
        executor,
        prompter,
    };
    execute(&mut ctx, lines)?;
    Ok(ctx.state)
}

/// Run the deploy command against the real system and print the summary.
///
/// # Errors
///
/// Returns an error if the root directory or config cannot be resolved, or
/// the run is stopped early.
pub fn run(cli: &Cli, log: &Arc<Logger>) -> Result<RunState> {
    let opts = DeployOptions::from_cli(cli)?;
    log.debug(&format!("econf {}", crate::cli::VERSION));
    log.debug(&format!("root: {}", opts.root.display()));

    let state = deploy(
        &opts,
        Host::detect(),
        Box::new(SystemExecutor),
        Box::new(StdinPrompter),
        Arc::clone(log) as Arc<dyn Log>,
    )?;
    log.print_summary(&state);
    Ok(state)
}
