//! Dotfile deployment from a line-oriented config file.
//!
//! An `econf` file lists directives, one per line: link a directory
//! (`dir`), link every file of a directory as a dotfile (`files`), run a
//! shell command (`run`), run an install script (`install`), and toggle
//! confirmation prompts (`noconfirm`, `confirm`). Tokens may use `~` for the
//! home directory and `:host` for the machine's hostname.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: locate the config file and tokenize its lines
//! - **[`resources`]**: filesystem primitives (bounded paths, recursive removal, symlinks)
//! - **[`directives`]**: parse lines into directives and execute them
//! - **[`commands`]**: the deploy command that ties the layers together
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod directives;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod prompt;
pub mod resources;
pub mod state;
