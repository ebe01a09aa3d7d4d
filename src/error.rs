//! Domain-specific error types for the econf engine.
//!
//! Internal modules return typed errors (e.g., [`LexError`],
//! [`ResourceError`]) while the command handler at the CLI boundary converts
//! them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! EconfError
//! ├── Config(ConfigError) - locating and opening the config file
//! └── Run(RunError)       - user aborts and unreadable config lines
//!     └── Lex(LexError)
//! ```
//!
//! [`ParseError`] and [`ResourceError`] never end a run: directive handlers
//! log them and carry on.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the econf engine.
#[derive(Error, Debug)]
pub enum EconfError {
    /// Config file could not be located or opened.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The run was stopped.
    #[error("Run error: {0}")]
    Run(#[from] RunError),
}

/// Errors that arise from locating and opening the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No config file exists at the resolved path.
    #[error("config file not found: {}", path.display())]
    NotFound {
        /// Resolved path that was checked.
        path: PathBuf,
    },

    /// The config file exists but could not be opened.
    #[error("IO error opening config file {}: {source}", path.display())]
    Io {
        /// Path to the file that could not be opened.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors produced while turning config lines into tokens.
#[derive(Error, Debug)]
pub enum LexError {
    /// Reading the next line failed.
    #[error("IO error reading line {line}: {source}")]
    Io {
        /// 1-based number of the line being read.
        line: usize,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The line holds more tokens than a config line may carry.
    #[error("line {line}: {count} tokens exceeds the limit of {max}")]
    TooManyTokens {
        /// 1-based line number.
        line: usize,
        /// Number of tokens found.
        count: usize,
        /// Maximum accepted.
        max: usize,
        /// Raw tokens of the line.
        tokens: Vec<String>,
    },

    /// A single token is longer than a config token may be.
    #[error("line {line}: token of {len} bytes exceeds the limit of {max}")]
    TokenTooLong {
        /// 1-based line number.
        line: usize,
        /// Length of the offending token in bytes.
        len: usize,
        /// Maximum accepted.
        max: usize,
        /// Raw tokens of the line.
        tokens: Vec<String>,
    },
}

impl LexError {
    /// Return `(line, tokens)` for malformed-line errors, or `None` for I/O
    /// failures.
    #[must_use]
    pub fn malformed_line(&self) -> Option<(usize, &[String])> {
        match self {
            Self::Io { .. } => None,
            Self::TooManyTokens { line, tokens, .. } | Self::TokenTooLong { line, tokens, .. } => {
                Some((*line, tokens.as_slice()))
            }
        }
    }
}

/// Errors that arise when a token list does not form a directive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The tokens match no directive form.
    #[error("unrecognized directive: {}", tokens.join(" "))]
    Unrecognized {
        /// Tokens of the rejected line.
        tokens: Vec<String>,
    },
}

/// Errors that arise from filesystem operations.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A constructed path is longer than the supported maximum.
    #[error("path exceeds {max} bytes: {}", path.display())]
    PathTooLong {
        /// The overlong path.
        path: PathBuf,
        /// Maximum accepted.
        max: usize,
    },

    /// A directory could not be listed.
    #[error("cannot list directory {}: {source}", path.display())]
    ListDir {
        /// Directory that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A file, symlink, or directory could not be removed.
    #[error("cannot remove {}: {source}", path.display())]
    Remove {
        /// Path that could not be removed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A symlink could not be created.
    #[error("symlink failed: {} -> {}: {source}", link.display(), target.display())]
    Symlink {
        /// Path of the link to create.
        link: PathBuf,
        /// Path the link should point at.
        target: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Replacing the link target would delete the link source.
    #[error("refusing to replace {}: it holds the link source {}", link.display(), target.display())]
    TargetHoldsSource {
        /// Path of the link to create.
        link: PathBuf,
        /// Path the link should point at.
        target: PathBuf,
    },

    /// A destination directory could not be created.
    #[error("cannot create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Conditions that end a run before the config is exhausted.
#[derive(Error, Debug)]
pub enum RunError {
    /// The user declined to continue after a parse error.
    #[error("aborted by user at line {line}")]
    Aborted {
        /// Line on which the run stopped.
        line: usize,
    },

    /// The config file could not be read to the end.
    #[error(transparent)]
    Lex(#[from] LexError),
}
