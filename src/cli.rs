//! Command-line interface.
use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_CONFIG_NAME;

/// Version reported by `--version` and written to the log file header.
pub const VERSION: &str = match option_env!("ECONF_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Deploy dotfiles from a repository described by an econf config file.
#[derive(Parser, Debug)]
#[command(
    name = "econf",
    about = "Symlink dotfiles and run installers from an econf config file",
    version = VERSION,
    disable_version_flag = true
)]
pub struct Cli {
    /// Root directory of the dotfiles repository (default: current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Config file, relative to the root directory
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_NAME)]
    pub config: PathBuf,

    /// Answer yes to every confirmation prompt
    #[arg(short, long)]
    pub force: bool,

    /// Run `install` directives
    #[arg(short, long)]
    pub install: bool,

    /// Preview changes without applying
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Show debug output
    #[arg(long)]
    pub verbose: bool,

    /// Print version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    pub version: Option<bool>,
}
