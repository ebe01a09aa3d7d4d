//! `run` directive.
use super::Context;

/// Run `command` through the platform shell in the root directory.
///
/// Failures are logged as warnings and never stop the run.
pub fn run_shell(ctx: &mut Context, command: &str, legacy: bool) {
    if legacy {
        ctx.log
            .warn("the 'sh' directive is deprecated, use 'run' instead");
    }

    if ctx.dry_run {
        ctx.log.dry_run(&format!("would run: {command}"));
        return;
    }

    ctx.log.debug(&format!("run: {command}"));
    match ctx.executor.shell(command, &ctx.cwd) {
        Ok(result) if result.success => {}
        Ok(result) => ctx.log.warn(&format!(
            "command exited with status {}: {command}",
            result.code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
        )),
        Err(e) => ctx.log.warn(&format!("{e:#}")),
    }
}
