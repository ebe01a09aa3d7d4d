//! `econf` binary entry point.
use std::process::ExitCode;
use std::sync::Arc;

use clap::{CommandFactory as _, Parser as _};

use econf::cli::Cli;
use econf::commands::deploy;
use econf::error::{ConfigError, EconfError};
use econf::logging::{self, Logger};

const COMMAND: &str = "econf";

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let cli = Cli::parse();
    logging::init_subscriber(cli.verbose, COMMAND);
    let log = Arc::new(Logger::new(COMMAND));

    match deploy::run(&cli, &log) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            if matches!(
                e.downcast_ref::<EconfError>(),
                Some(EconfError::Config(ConfigError::NotFound { .. }))
            ) {
                let _ = Cli::command().print_help();
            }
            ExitCode::FAILURE
        }
    }
}
