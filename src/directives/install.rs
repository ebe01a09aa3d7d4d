//! `install` directive.
use std::borrow::Cow;
use std::path::Path;

use super::Context;
use crate::resources::path::join_bounded;

/// Directory under the root that holds install scripts.
pub const INSTALL_DIR: &str = "install";

/// Run `<root>/install/<script> args…` after confirmation.
///
/// Does nothing unless installers were enabled with `-i`.
pub fn install(ctx: &mut Context, script: &str, args: &[String]) {
    if !ctx.state.install_enabled {
        ctx.log
            .debug(&format!("installers disabled, skipping {script}"));
        return;
    }

    let path = match join_bounded(&[ctx.cwd.as_path(), Path::new(INSTALL_DIR), Path::new(script)])
    {
        Ok(path) => path,
        Err(e) => {
            ctx.log.warn(&e.to_string());
            return;
        }
    };
    let command = std::iter::once(shell_quote(&path.to_string_lossy()).into_owned())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ");

    if ctx.state.begin_installing() {
        ctx.log.stage("starting installers");
    }

    if !ctx.confirm("continue with installation?", Some(script)) {
        ctx.log.info("installation aborted");
        return;
    }

    if ctx.dry_run {
        ctx.log.dry_run(&format!("would install: {command}"));
        return;
    }

    match ctx.executor.shell(&command, &ctx.cwd) {
        Ok(result) => {
            ctx.state.scripts_run += 1;
            if !result.success {
                ctx.log.warn(&format!(
                    "installer {script} exited with status {}",
                    result
                        .code
                        .map_or_else(|| "unknown".to_string(), |c| c.to_string())
                ));
            }
        }
        Err(e) => ctx.log.warn(&format!("{e:#}")),
    }
}

/// Quote `word` for `sh` so it stays one argument.
///
/// Words made only of characters the shell never interprets are returned
/// unchanged; anything else is wrapped in single quotes.
fn shell_quote(word: &str) -> Cow<'_, str> {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+,:@%=".contains(c));
    if plain {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(format!("'{}'", word.replace('\'', r"'\''")))
    }
}
