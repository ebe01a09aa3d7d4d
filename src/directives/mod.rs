//! Config directives and the context they run in.
pub mod dispatch;
pub mod install;
pub mod link;
pub mod shell;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::expand::Token;
use crate::error::ParseError;
use crate::exec::Executor;
use crate::logging::Log;
use crate::prompt::{self, Prompter};
use crate::state::RunState;

pub use dispatch::{dispatch, reject_malformed};

/// One recognised config line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `noconfirm`: answer every later prompt with yes.
    NoConfirm,
    /// `confirm`: ask again.
    Confirm,
    /// `dir src dest`: link the directory `src` into `dest`.
    Dir {
        /// Source, relative to the root directory.
        src: Token,
        /// Directory the link is placed in.
        dest: Token,
    },
    /// `files src dest`: link every entry of `src` into `dest` as a dotfile.
    Files {
        /// Source directory, relative to the root directory.
        src: Token,
        /// Directory (or prefix) the links are placed in.
        dest: Token,
    },
    /// `run cmd…` (or the deprecated `sh cmd…`).
    Run {
        /// Command line handed to the shell.
        command: String,
        /// Written with the deprecated `sh` keyword.
        legacy: bool,
    },
    /// `install script args…`.
    Install {
        /// Script name under `<root>/install/`.
        script: String,
        /// Arguments passed to the script.
        args: Vec<String>,
    },
}

impl Directive {
    /// Recognise the directive formed by `tokens`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Unrecognized`] if the tokens match no directive.
    pub fn parse(tokens: &[Token]) -> Result<Self, ParseError> {
        match tokens {
            [only] if only.as_str() == "noconfirm" => Ok(Self::NoConfirm),
            [only] if only.as_str() == "confirm" => Ok(Self::Confirm),
            [kw, src, dest] if kw.as_str() == "dir" => Ok(Self::Dir {
                src: src.clone(),
                dest: dest.clone(),
            }),
            [kw, src, dest] if kw.as_str() == "files" => Ok(Self::Files {
                src: src.clone(),
                dest: dest.clone(),
            }),
            [kw, rest @ ..] if !rest.is_empty() && matches!(kw.as_str(), "run" | "sh") => {
                Ok(Self::Run {
                    command: join_tokens(rest),
                    legacy: kw.as_str() == "sh",
                })
            }
            [kw, script, args @ ..] if kw.as_str() == "install" => Ok(Self::Install {
                script: script.to_string(),
                args: args.iter().map(ToString::to_string).collect(),
            }),
            _ => Err(ParseError::Unrecognized {
                tokens: tokens.iter().map(ToString::to_string).collect(),
            }),
        }
    }
}

fn join_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Everything a directive handler may read or change.
pub struct Context {
    /// Flags and counters of the current run.
    pub state: RunState,
    /// Root directory: sources, installers and commands are resolved here.
    pub cwd: PathBuf,
    /// Log actions instead of performing them.
    pub dry_run: bool,
    /// Logger for output.
    pub log: Arc<dyn Log>,
    /// Runs shell command lines.
    pub executor: Box<dyn Executor>,
    /// Answers confirmation prompts.
    pub prompter: Box<dyn Prompter>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("state", &self.state)
            .field("cwd", &self.cwd)
            .field("dry_run", &self.dry_run)
            .field("log", &self.log)
            .field("executor", &"<dyn Executor>")
            .field("prompter", &self.prompter)
            .finish()
    }
}

impl Context {
    /// Ask the user to confirm, honouring the current force flag.
    pub fn confirm(&mut self, message: &str, item: Option<&str>) -> bool {
        prompt::confirm(self.state.force, self.prompter.as_mut(), message, item)
    }
}
