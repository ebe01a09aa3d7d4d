//! Interactive yes/no confirmation.
use std::collections::VecDeque;
use std::io::{self, BufRead as _, Write as _};

/// Source of answers to confirmation prompts.
pub trait Prompter: std::fmt::Debug {
    /// Show `prompt` and return one line of the user's answer.
    ///
    /// End of input is reported as an empty answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be shown or the answer read.
    fn ask(&mut self, prompt: &str) -> io::Result<String>;
}

/// [`Prompter`] that writes to stdout and reads a line from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    #[allow(clippy::print_stdout)]
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer)
    }
}

/// [`Prompter`] that replays canned answers, then answers with end of input.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedPrompter {
    /// Create a prompter that gives `answers` in order.
    #[must_use]
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Every prompt shown so far, in order.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}

/// Format the prompt text for `message` and optional `item`.
#[must_use]
pub fn format_prompt(message: &str, item: Option<&str>) -> String {
    match item {
        Some(item) => format!("{message} {item} [Y/n] "),
        None => format!("{message} [Y/n] "),
    }
}

/// Ask the user to confirm; `force` answers yes without asking.
///
/// Only an answer starting with `n` or `N` declines. Empty input, end of
/// input, and read errors all count as yes.
pub fn confirm(force: bool, prompter: &mut dyn Prompter, message: &str, item: Option<&str>) -> bool {
    if force {
        return true;
    }
    let answer = prompter
        .ask(&format_prompt(message, item))
        .unwrap_or_default();
    !matches!(answer.chars().next(), Some('n' | 'N'))
}
