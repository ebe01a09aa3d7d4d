//! Route config lines to their handlers.
use super::{Context, Directive, install, link, shell};
use crate::config::lexer::Line;
use crate::error::{LexError, RunError};

/// Execute one config line.
///
/// An unrecognised line is logged and, unless in force mode, the user is
/// asked whether to go on.
///
/// # Errors
///
/// Returns [`RunError::Aborted`] if the user declines to continue after an
/// unrecognised line.
pub fn dispatch(ctx: &mut Context, line: &Line) -> Result<(), RunError> {
    ctx.log
        .debug(&format!("line {}: {}", line.number, line.texts().join(" ")));
    if line.legacy_host_marker {
        ctx.log.warn(&format!(
            "line {}: the trailing '@' host marker is deprecated, use ':host' instead",
            line.number
        ));
    }

    match Directive::parse(&line.tokens) {
        Ok(directive) => {
            apply(ctx, directive);
            Ok(())
        }
        Err(e) => {
            ctx.log
                .error(&format!("parse error on line {}: {e}", line.number));
            continue_after_error(ctx, line.number)
        }
    }
}

/// Handle a line the lexer could not tokenize.
///
/// Malformed lines are treated like unrecognised ones.
///
/// # Errors
///
/// Returns [`RunError::Aborted`] if the user declines to continue, or
/// [`RunError::Lex`] if the config could not be read.
pub fn reject_malformed(ctx: &mut Context, err: LexError) -> Result<(), RunError> {
    let Some((line, tokens)) = err.malformed_line().map(|(l, t)| (l, t.join(" "))) else {
        return Err(err.into());
    };
    ctx.log.error(&format!("parse error: {err}"));
    ctx.log.debug(&format!("rejected tokens: {tokens}"));
    continue_after_error(ctx, line)
}

fn continue_after_error(ctx: &mut Context, line: usize) -> Result<(), RunError> {
    if ctx.confirm("continue with error?", None) {
        Ok(())
    } else {
        Err(RunError::Aborted { line })
    }
}

fn apply(ctx: &mut Context, directive: Directive) {
    match directive {
        Directive::NoConfirm => {
            ctx.state.force = true;
            ctx.log.debug("confirmation prompts disabled");
        }
        Directive::Confirm => {
            ctx.state.force = false;
            ctx.log.debug("confirmation prompts enabled");
        }
        Directive::Dir { src, dest } => link::link_dir(ctx, &src, &dest),
        Directive::Files { src, dest } => link::link_files(ctx, &src, &dest),
        Directive::Run { command, legacy } => shell::run_shell(ctx, &command, legacy),
        Directive::Install { script, args } => install::install(ctx, &script, &args),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::expand::Token;
    use crate::directives::test_helpers::context;
    use crate::exec::MockExecutor;

    fn line(number: usize, text: &str) -> Line {
        Line {
            number,
            tokens: text.split_whitespace().map(Token::plain).collect(),
            legacy_host_marker: false,
        }
    }

    #[test]
    fn noconfirm_and_confirm_toggle_force() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, _log) = context(dir.path(), MockExecutor::new(), &[]);

        dispatch(&mut ctx, &line(1, "noconfirm")).unwrap();
        assert!(ctx.state.force);
        dispatch(&mut ctx, &line(2, "confirm")).unwrap();
        assert!(!ctx.state.force);
    }

    #[test]
    fn declined_parse_error_aborts_at_line() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, log) = context(dir.path(), MockExecutor::new(), &["n"]);

        let err = dispatch(&mut ctx, &line(4, "bogus token list")).unwrap_err();

        assert!(matches!(err, RunError::Aborted { line: 4 }));
        assert_eq!(
            log.messages("error"),
            ["parse error on line 4: unrecognized directive: bogus token list"]
        );
    }

    #[test]
    fn accepted_parse_error_continues() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, _log) = context(dir.path(), MockExecutor::new(), &["y"]);

        assert!(dispatch(&mut ctx, &line(1, "bogus")).is_ok());
    }

    #[test]
    fn force_continues_without_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, log) = context(dir.path(), MockExecutor::new(), &["n"]);
        ctx.state.force = true;

        assert!(dispatch(&mut ctx, &line(1, "bogus")).is_ok());
        assert_eq!(log.messages("error").len(), 1);
    }

    #[test]
    fn legacy_host_marker_warns() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, log) = context(dir.path(), MockExecutor::new(), &[]);
        let mut l = line(9, "noconfirm");
        l.legacy_host_marker = true;

        dispatch(&mut ctx, &l).unwrap();

        assert!(log.messages("warn")[0].starts_with("line 9:"));
    }

    #[test]
    fn run_reaches_executor() {
        let dir = tempfile::tempdir().unwrap();
        let mut executor = MockExecutor::new();
        executor
            .expect_shell()
            .withf(|cmd, _| cmd == "echo hello")
            .times(1)
            .returning(|_, _| {
                Ok(crate::exec::ExecResult {
                    stdout: String::new(),
                    stderr: String::new(),
                    success: true,
                    code: Some(0),
                })
            });
        let (mut ctx, _log) = context(dir.path(), executor, &[]);

        dispatch(&mut ctx, &line(1, "run echo hello")).unwrap();
    }

    #[test]
    fn malformed_line_declined_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, _log) = context(dir.path(), MockExecutor::new(), &["n"]);
        let err = LexError::TokenTooLong {
            line: 6,
            len: 300,
            max: 256,
            tokens: vec!["run".to_string()],
        };

        let result = reject_malformed(&mut ctx, err);

        assert!(matches!(result, Err(RunError::Aborted { line: 6 })));
    }

    #[test]
    fn read_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, _log) = context(dir.path(), MockExecutor::new(), &[]);
        let err = LexError::Io {
            line: 2,
            source: std::io::Error::other("disk gone"),
        };

        assert!(matches!(
            reject_malformed(&mut ctx, err),
            Err(RunError::Lex(LexError::Io { line: 2, .. }))
        ));
    }
}
