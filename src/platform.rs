//! Facts about the machine econf is running on.

use crate::exec;

/// Longest hostname, in bytes, substituted into config tokens.
pub const MAX_HOSTNAME_LEN: usize = 48;

/// Host information used when expanding config tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// Home directory; empty when it cannot be determined.
    pub home: String,
    /// Machine hostname, truncated to [`MAX_HOSTNAME_LEN`] bytes.
    pub hostname: String,
}

impl Host {
    /// Detect the home directory and hostname of the current system.
    #[must_use]
    pub fn detect() -> Self {
        Self::new(detect_home(), detect_hostname())
    }

    /// Create host information with explicit values.
    ///
    /// The hostname is truncated to [`MAX_HOSTNAME_LEN`] bytes.
    #[must_use]
    pub fn new(home: impl Into<String>, hostname: impl Into<String>) -> Self {
        let mut hostname = hostname.into();
        truncate_at_char_boundary(&mut hostname, MAX_HOSTNAME_LEN);
        Self {
            home: home.into(),
            hostname,
        }
    }
}

/// Truncate `s` to at most `max` bytes without splitting a character.
fn truncate_at_char_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}

fn detect_home() -> String {
    let var = if cfg!(target_os = "windows") {
        std::env::var("USERPROFILE").or_else(|_| std::env::var("HOME"))
    } else {
        std::env::var("HOME")
    };
    var.unwrap_or_default()
}

/// Hostname from `/etc/hostname`, then `$HOSTNAME`, then the `hostname`
/// command. Empty when none of them answers.
fn detect_hostname() -> String {
    if let Ok(contents) = std::fs::read_to_string("/etc/hostname") {
        let name = contents.trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }

    if let Ok(name) = std::env::var("HOSTNAME") {
        let name = name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }

    exec::run("hostname", &[])
        .map(|result| result.stdout.trim().to_string())
        .unwrap_or_default()
}
