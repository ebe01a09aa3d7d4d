//! Token expansion: home-directory shorthand and hostname qualifiers.
use crate::platform::Host;

/// Marker replaced by `:<hostname>`.
pub const HOST_MARKER: &str = ":host";

/// Legacy trailing marker replaced by `-<hostname>`.
pub const LEGACY_HOST_MARKER: char = '@';

/// A config token after expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
    qualifier: Option<usize>,
}

impl Token {
    /// A token with no host qualifier.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            qualifier: None,
        }
    }

    /// The fully expanded token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The token with any host qualifier cut off.
    ///
    /// `zsh:box1` (expanded from `zsh:host`) yields `zsh`.
    #[must_use]
    pub fn unqualified(&self) -> &str {
        self.qualifier
            .and_then(|at| self.text.get(..at))
            .unwrap_or(&self.text)
    }

    /// Whether the token carries a host qualifier.
    #[must_use]
    pub const fn is_qualified(&self) -> bool {
        self.qualifier.is_some()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Outcome of expanding one raw token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// The expanded token.
    pub token: Token,
    /// Set when the deprecated trailing `@` marker was used.
    pub used_legacy_marker: bool,
}

/// Expands `~` and hostname markers using facts about the current host.
#[derive(Debug, Clone)]
pub struct Expander {
    host: Host,
}

impl Expander {
    /// Create an expander for `host`.
    #[must_use]
    pub const fn new(host: Host) -> Self {
        Self { host }
    }

    /// Expand a raw token.
    ///
    /// A leading `~` becomes the home directory. The first `:host` becomes
    /// `:<hostname>`. When `legacy_at` is set, a trailing `@` becomes
    /// `-<hostname>`.
    #[must_use]
    pub fn expand(&self, raw: &str, legacy_at: bool) -> Expansion {
        let mut text = raw
            .strip_prefix('~')
            .map_or_else(|| raw.to_string(), |rest| format!("{}{rest}", self.host.home));

        let mut qualifier = None;
        let mut used_legacy_marker = false;

        if let Some(at) = text.find(HOST_MARKER) {
            let (head, tail) = text.split_at(at);
            let rest = tail.strip_prefix(HOST_MARKER).unwrap_or(tail);
            text = format!("{head}:{}{rest}", self.host.hostname);
            qualifier = Some(at);
        } else if legacy_at && let Some(stem) = text.strip_suffix(LEGACY_HOST_MARKER) {
            qualifier = Some(stem.len());
            text = format!("{stem}-{}", self.host.hostname);
            used_legacy_marker = true;
        }

        Expansion {
            token: Token { text, qualifier },
            used_legacy_marker,
        }
    }
}
