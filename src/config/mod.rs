//! Config file location, opening, and tokenization.
pub mod expand;
pub mod lexer;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use expand::Expander;
use lexer::Lexer;

/// Config file name used when `-c` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "econf";

/// Resolve `config` against `root` and check that a file exists there.
///
/// An absolute `config` is used as-is.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if nothing exists at the resolved path.
pub fn locate(root: &Path, config: &Path) -> Result<PathBuf, ConfigError> {
    let path = root.join(config);
    if path.is_file() {
        Ok(path)
    } else {
        Err(ConfigError::NotFound { path })
    }
}

/// Open the config file at `path` and return a lexer over its lines.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if the file does not exist, or
/// [`ConfigError::Io`] if it cannot be opened.
pub fn open(path: &Path, expander: Expander) -> Result<Lexer<BufReader<File>>, ConfigError> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    Ok(Lexer::new(BufReader::new(file), expander))
}
