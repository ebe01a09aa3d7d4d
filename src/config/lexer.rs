//! Config line tokenizer.
use std::io::BufRead;

use super::expand::{Expander, Token};
use crate::error::LexError;

/// Maximum number of tokens on one config line.
pub const MAX_TOKENS: usize = 128;

/// Maximum length, in bytes, of one raw token.
pub const MAX_TOKEN_LEN: usize = 256;

/// One non-blank, non-comment config line after expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based physical line number.
    pub number: usize,
    /// Expanded tokens, in order.
    pub tokens: Vec<Token>,
    /// Set when a token used the deprecated trailing `@` host marker.
    pub legacy_host_marker: bool,
}

impl Line {
    /// Token texts, for diagnostics.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.tokens.iter().map(ToString::to_string).collect()
    }
}

/// Reads config lines and turns each into a [`Line`].
///
/// Blank lines and lines whose first non-whitespace character is `#` are
/// skipped. A token starting with `#` ends the line. Tokens are split on runs
/// of whitespace. Bytes that are not valid UTF-8 are replaced with U+FFFD.
#[derive(Debug)]
pub struct Lexer<R> {
    reader: R,
    expander: Expander,
    line_number: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> Lexer<R> {
    /// Create a lexer over `reader`.
    pub const fn new(reader: R, expander: Expander) -> Self {
        Self {
            reader,
            expander,
            line_number: 0,
            buf: Vec::new(),
        }
    }

    /// Split and expand the current buffer, or `None` if the line is skipped.
    fn tokenize(&self) -> Option<Result<Line, LexError>> {
        let text = String::from_utf8_lossy(&self.buf);
        let raw: Vec<&str> = text
            .split_whitespace()
            .take_while(|t| !t.starts_with('#'))
            .collect();
        if raw.is_empty() {
            return None;
        }

        let line = self.line_number;
        let owned = || raw.iter().map(ToString::to_string).collect::<Vec<_>>();

        if raw.len() > MAX_TOKENS {
            return Some(Err(LexError::TooManyTokens {
                line,
                count: raw.len(),
                max: MAX_TOKENS,
                tokens: owned(),
            }));
        }
        if let Some(long) = raw.iter().find(|t| t.len() > MAX_TOKEN_LEN) {
            return Some(Err(LexError::TokenTooLong {
                line,
                len: long.len(),
                max: MAX_TOKEN_LEN,
                tokens: owned(),
            }));
        }

        // The legacy `@` marker only ever applied to a `dir`/`files` source.
        let source_position = (raw.len() == 3).then_some(1);
        let mut legacy_host_marker = false;
        let tokens = raw
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let expansion = self.expander.expand(t, source_position == Some(i));
                legacy_host_marker |= expansion.used_legacy_marker;
                expansion.token
            })
            .collect();

        Some(Ok(Line {
            number: line,
            tokens,
            legacy_host_marker,
        }))
    }
}

impl<R: BufRead> Iterator for Lexer<R> {
    type Item = Result<Line, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            self.line_number += 1;
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    if let Some(item) = self.tokenize() {
                        return Some(item);
                    }
                }
                Err(source) => {
                    return Some(Err(LexError::Io {
                        line: self.line_number,
                        source,
                    }));
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::platform::Host;
    use std::io::Cursor;

    fn lex(input: &str) -> Vec<Result<Line, LexError>> {
        let expander = Expander::new(Host::new("/home/user", "box1"));
        Lexer::new(Cursor::new(input.to_string()), expander).collect()
    }

    fn lines(input: &str) -> Vec<(usize, Vec<String>)> {
        lex(input)
            .into_iter()
            .map(|r| {
                let line = r.unwrap();
                (line.number, line.texts())
            })
            .collect()
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let input = "# header\n\n   \ndir zsh /home/user/.config\n  # indented comment\n";
        assert_eq!(
            lines(input),
            vec![(
                4,
                vec![
                    "dir".to_string(),
                    "zsh".to_string(),
                    "/home/user/.config".to_string()
                ]
            )]
        );
    }

    #[test]
    fn numbers_are_physical_lines() {
        let input = "noconfirm\n# skip\n\nconfirm\n";
        let numbers: Vec<usize> = lines(input).into_iter().map(|(n, _)| n).collect();
        assert_eq!(numbers, [1, 4]);
    }

    #[test]
    fn collapses_whitespace_runs() {
        let input = "files   bash \t /home/user  \n";
        assert_eq!(
            lines(input)[0].1,
            ["files".to_string(), "bash".into(), "/home/user".into()]
        );
    }

    #[test]
    fn inline_comment_ends_line() {
        let input = "run echo hello # greet\n";
        assert_eq!(
            lines(input)[0].1,
            ["run".to_string(), "echo".into(), "hello".into()]
        );
    }

    #[test]
    fn handles_crlf_and_missing_trailing_newline() {
        let input = "noconfirm\r\nconfirm";
        let parsed = lines(input);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].1, ["noconfirm".to_string()]);
        assert_eq!(parsed[1].1, ["confirm".to_string()]);
    }

    #[test]
    fn expands_tilde_in_every_position() {
        let input = "files bash ~\n";
        assert_eq!(lines(input)[0].1[2], "/home/user");
    }

    #[test]
    fn expands_host_marker() {
        let line = lex("dir zsh:host ~/.config\n").remove(0).unwrap();
        assert_eq!(line.tokens[1].as_str(), "zsh:box1");
        assert_eq!(line.tokens[1].unqualified(), "zsh");
        assert!(!line.legacy_host_marker);
    }

    #[test]
    fn legacy_marker_only_on_source_of_three_token_line() {
        let line = lex("dir zsh@ ~/.config\n").remove(0).unwrap();
        assert_eq!(line.tokens[1].as_str(), "zsh-box1");
        assert!(line.legacy_host_marker);

        let line = lex("run ssh user@\n").remove(0).unwrap();
        assert_eq!(line.tokens[2].as_str(), "user@");
        assert!(!line.legacy_host_marker);
    }

    #[test]
    fn rejects_too_many_tokens() {
        let input = format!("run {}\n", vec!["x"; MAX_TOKENS].join(" "));
        let err = lex(&input).remove(0).unwrap_err();
        assert!(matches!(
            err,
            LexError::TooManyTokens { line: 1, count, .. } if count == MAX_TOKENS + 1
        ));
    }

    #[test]
    fn rejects_overlong_token() {
        let input = format!("run {}\n", "y".repeat(MAX_TOKEN_LEN + 1));
        let err = lex(&input).remove(0).unwrap_err();
        assert!(matches!(err, LexError::TokenTooLong { line: 1, .. }));
    }

    #[test]
    fn accepts_tokens_at_the_limits() {
        let input = format!(
            "run {} {}\n",
            "y".repeat(MAX_TOKEN_LEN),
            vec!["x"; MAX_TOKENS - 2].join(" ")
        );
        let line = lex(&input).remove(0).unwrap();
        assert_eq!(line.tokens.len(), MAX_TOKENS);
    }

    #[test]
    fn continues_after_malformed_line() {
        let input = format!("run {}\nconfirm\n", "y".repeat(MAX_TOKEN_LEN + 1));
        let results = lex(&input);
        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        assert_eq!(results[1].as_ref().unwrap().number, 2);
    }

    fn lex_bytes(input: &[u8]) -> Vec<Result<Line, LexError>> {
        let expander = Expander::new(Host::new("/home/user", "box1"));
        Lexer::new(input, expander).collect()
    }

    #[test]
    fn invalid_utf8_in_comment_is_ignored() {
        let results = lex_bytes(b"run true # caf\xe9\nconfirm\n");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().texts(), ["run", "true"]);
        assert_eq!(results[1].as_ref().unwrap().number, 2);
    }

    #[test]
    fn invalid_utf8_in_token_is_replaced() {
        let results = lex_bytes(b"confirm\nrun echo \xff\xfe\n");
        let line = results[1].as_ref().unwrap();
        assert_eq!(line.number, 2);
        assert_eq!(line.tokens[2].as_str(), "\u{fffd}\u{fffd}");
    }

    #[test]
    fn read_failure_is_reported_with_line_number() {
        struct Failing;
        impl std::io::Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk gone"))
            }
        }
        let expander = Expander::new(Host::new("/home/user", "box1"));
        let mut lexer = Lexer::new(std::io::BufReader::new(Failing), expander);
        assert!(matches!(lexer.next(), Some(Err(LexError::Io { line: 1, .. }))));
    }
}
