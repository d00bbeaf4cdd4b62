//! Rule forbidding emoji, decorative punctuation and trailing punctuation runs.
//!
//! Two checks run in order and the first hit wins:
//!
//! 1. Any emoji or decorative punctuation (`‼ ⁉ ‽ …`) anywhere in the message.
//! 2. The message ends in `!` or `.`, or ends in `?` right after `?`, `!` or `.`.
//!
//! `special_chars.allow_emojis` and `special_chars.allow_special` exempt the
//! two character classes of the first check.

use crate::charset::{is_emoji, is_forbidden_punctuation};
use loglint_core::{Config, Diagnostic, LogCall, Rule, RuleId, Severity, Suggestion};

/// Rule code for special characters.
pub const CODE: &str = "LL003";

/// Rule name for special characters.
pub const NAME: &str = "special_chars";

/// Forbids emoji and noisy punctuation in log messages.
#[derive(Debug, Clone)]
pub struct NoSpecialChars {
    /// Severity level.
    pub severity: Severity,
}

impl Default for NoSpecialChars {
    fn default() -> Self {
        Self::new()
    }
}

impl NoSpecialChars {
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

    fn diagnostic(&self, call: &LogCall, message: String) -> Diagnostic {
        Diagnostic::new(CODE, NAME, self.severity, call.position().clone(), message)
    }
}

fn ends_with_punctuation_run(chars: &[char]) -> bool {
    matches!(chars, [.., '!' | '.'] | [.., '?' | '!' | '.', '?'])
}

impl Rule for NoSpecialChars {
    fn id(&self) -> RuleId {
        RuleId::SpecialChars
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Log messages must not contain emoji or repeated punctuation"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, call: &LogCall, config: &Config) -> Option<Diagnostic> {
        let options = &config.special_chars;
        let chars: Vec<char> = call.message().chars().collect();

        let forbidden = chars.iter().find(|&&c| {
            (is_emoji(c) && !options.allow_emojis)
                || (is_forbidden_punctuation(c) && !options.allow_special)
        });
        if let Some(found) = forbidden {
            return Some(self.diagnostic(
                call,
                format!("log message contains special characters or emojis (found '{found}')"),
            ));
        }

        ends_with_punctuation_run(&chars).then(|| {
            self.diagnostic(
                call,
                "log message ends with multiple punctuation marks".to_string(),
            )
            .with_suggestion(Suggestion::new("drop the trailing punctuation"))
        })
    }
}
