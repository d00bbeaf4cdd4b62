//! Rule requiring log messages to use Latin letters only.
//!
//! Scans the message left to right, skipping whitespace, digits and common
//! ASCII punctuation. The first letter outside `A-Z`/`a-z` is reported along
//! with its character index, unless it belongs to a script listed in
//! `english.allowed_non_latin`.

use crate::charset::{is_allowed_punctuation, is_latin_letter, is_letter};
use loglint_core::{Config, Diagnostic, LogCall, Rule, RuleId, Severity};

/// Rule code for English-only.
pub const CODE: &str = "LL002";

/// Rule name for English-only.
pub const NAME: &str = "english";

/// Requires log messages to be written in English (Latin letters).
#[derive(Debug, Clone)]
pub struct EnglishOnly {
    /// Severity level.
    pub severity: Severity,
}

impl Default for EnglishOnly {
    fn default() -> Self {
        Self::new()
    }
}

impl EnglishOnly {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for EnglishOnly {
    fn id(&self) -> RuleId {
        RuleId::English
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Log messages must be written in English"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, call: &LogCall, config: &Config) -> Option<Diagnostic> {
        let allowed = &config.english.allowed_non_latin;

        let (index, found) = call.message().chars().enumerate().find(|&(_, c)| {
            if c.is_whitespace() || c.is_numeric() || is_allowed_punctuation(c) {
                return false;
            }
            is_letter(c)
                && !is_latin_letter(c)
                && !allowed.iter().any(|script| script.contains(c))
        })?;

        Some(Diagnostic::new(
            CODE,
            NAME,
            self.severity,
            call.position().clone(),
            format!(
                "log message should be in English (non-Latin character detected: '{found}' at {index})"
            ),
        ))
    }
}
