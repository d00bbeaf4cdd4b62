//! Rule forbidding sensitive keywords in log messages.
//!
//! # Detection order
//!
//! The message is lower-cased, then the first match wins:
//!
//! 1. Substring match against [`SENSITIVE_KEYWORDS`] and
//!    `custom_sensitive_keywords`.
//! 2. The phrase `credit card`.
//! 3. Any word (split on characters other than letters, digits and `_`)
//!    starting with `password`, `secret` or `token`.
//! 4. Configured regex patterns, plus the built-in email and card-number
//!    patterns in `sensitive.strict_mode`. Patterns see the original text.

use loglint_core::{Config, Diagnostic, LogCall, Rule, RuleId, Severity, Suggestion};
use tracing::trace;

/// Rule code for sensitive message.
pub const CODE: &str = "LL004";

/// Rule name for sensitive message.
pub const NAME: &str = "sensitive";

/// Keywords matched as substrings of the lower-cased message.
pub const SENSITIVE_KEYWORDS: &[&str] = &[
    "password",
    "pwd",
    "token",
    "secret",
    "api_key",
    "apikey",
    "ssn",
    "credentials",
];

const SENSITIVE_PHRASE: &str = "credit card";

const WORD_PREFIXES: &[&str] = &["password", "secret", "token"];

/// Which check produced a sensitive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Built-in or custom keyword substring.
    Keyword,
    /// The `credit card` phrase.
    Phrase,
    /// A word with a sensitive prefix.
    WordPrefix,
    /// A regex pattern.
    Pattern,
}

/// A sensitive term found in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveMatch {
    /// Check that matched.
    pub kind: MatchKind,
    /// Keyword, phrase, prefix or pattern name that matched.
    pub term: String,
}

impl SensitiveMatch {
    fn new(kind: MatchKind, term: impl Into<String>) -> Self {
        Self {
            kind,
            term: term.into(),
        }
    }
}

/// Returns the first sensitive term in `message`, following the detection order.
#[must_use]
pub fn find_sensitive(message: &str, config: &Config) -> Option<SensitiveMatch> {
    let lowered = message.to_lowercase();

    let builtin = SENSITIVE_KEYWORDS
        .iter()
        .find(|kw| lowered.contains(*kw))
        .map(|kw| SensitiveMatch::new(MatchKind::Keyword, *kw));
    if builtin.is_some() {
        return builtin;
    }

    let custom = config
        .custom_sensitive_keywords
        .iter()
        .map(|kw| kw.to_lowercase())
        .find(|kw| !kw.is_empty() && lowered.contains(kw.as_str()))
        .map(|kw| SensitiveMatch::new(MatchKind::Keyword, kw));
    if custom.is_some() {
        return custom;
    }

    if lowered.contains(SENSITIVE_PHRASE) {
        return Some(SensitiveMatch::new(MatchKind::Phrase, SENSITIVE_PHRASE));
    }

    let prefixed = lowered
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|word| !word.is_empty())
        .find_map(|word| WORD_PREFIXES.iter().find(|p| word.starts_with(*p)))
        .map(|prefix| SensitiveMatch::new(MatchKind::WordPrefix, *prefix));
    if prefixed.is_some() {
        return prefixed;
    }

    config
        .sensitive_patterns()
        .find(|pattern| pattern.is_match(message))
        .map(|pattern| SensitiveMatch::new(MatchKind::Pattern, pattern.name()))
}

/// Forbids sensitive data in log messages.
#[derive(Debug, Clone)]
pub struct SensitiveMessage {
    /// Severity level.
    pub severity: Severity,
}

impl Default for SensitiveMessage {
    fn default() -> Self {
        Self::new()
    }
}

impl SensitiveMessage {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for SensitiveMessage {
    fn id(&self) -> RuleId {
        RuleId::Sensitive
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Log messages must not mention passwords, tokens or other secrets"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, call: &LogCall, config: &Config) -> Option<Diagnostic> {
        let found = find_sensitive(call.message(), config)?;
        trace!(kind = ?found.kind, "sensitive term matched");

        Some(
            Diagnostic::new(
                CODE,
                NAME,
                self.severity,
                call.position().clone(),
                format!("log message may contain sensitive data (\"{}\")", found.term),
            )
            .with_suggestion(Suggestion::new(
                "describe the event without naming or embedding the secret",
            )),
        )
    }
}
