//! Rule requiring log messages to start with a lowercase letter.
//!
//! # Rationale
//!
//! Log lines are usually read as fragments inside a larger record
//! (`ts level target: message`). A capitalized first word reads as the start
//! of a sentence and makes grepping case-sensitive.
//!
//! Only the first character is inspected. Digits, symbols and whitespace
//! never fire; letters from any script do.
//!
//! # Examples
//!
//! ```ignore
//! tracing::info!("Server started");   // fires
//! tracing::info!("server started");   // ok
//! tracing::info!("123 items loaded"); // ok
//! ```

use crate::charset::{is_letter, is_lowercase_letter};
use loglint_core::{Config, Diagnostic, LogCall, Rule, RuleId, Severity, Suggestion};

/// Rule code for lowercase.
pub const CODE: &str = "LL001";

/// Rule name for lowercase.
pub const NAME: &str = "lowercase";

/// Requires log messages to start with a lowercase letter.
#[derive(Debug, Clone)]
pub struct LowercaseStart {
    /// Severity level.
    pub severity: Severity,
}

impl Default for LowercaseStart {
    fn default() -> Self {
        Self::new()
    }
}

impl LowercaseStart {
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

impl Rule for LowercaseStart {
    fn id(&self) -> RuleId {
        RuleId::Lowercase
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Log messages must start with a lowercase letter"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, call: &LogCall, _config: &Config) -> Option<Diagnostic> {
        let first = call.message().chars().next()?;
        if !is_letter(first) || is_lowercase_letter(first) {
            return None;
        }

        let lowered: String = first.to_lowercase().collect();
        Some(
            Diagnostic::new(
                CODE,
                NAME,
                self.severity,
                call.position().clone(),
                format!("log message should start with a lowercase letter (found '{first}')"),
            )
            .with_suggestion(Suggestion::new(format!(
                "start the message with '{lowered}'"
            ))),
        )
    }
}
