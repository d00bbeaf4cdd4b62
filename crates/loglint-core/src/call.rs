//! Data model for recognized logging call-sites.

use crate::types::Location;
use serde::{Deserialize, Serialize};

/// Shape of the logger behind a call-site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggerKind {
    /// Leveled logger taking only a message (e.g. `log::info!`).
    Standard,
    /// Logger taking ordered key/value fields alongside the message (e.g. `tracing::info!`).
    Structured,
}

/// Severity level of the logging call itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// `debug`
    Debug,
    /// `info`
    Info,
    /// `warn`
    Warn,
    /// `error`
    Error,
}

impl Level {
    /// All levels, in ascending order.
    pub const ALL: [Self; 4] = [Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// Returns the lowercase name used by logging macros.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the value of a structured field is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldValue {
    /// A typed key/value field helper (`key = value`, `key = %value`, `%value`, `name`).
    Constructor,
    /// Anything else, such as a format argument after the message; skipped
    /// by field checks.
    Opaque,
}

/// One key/value entry of a structured call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Key as resolved by the literal resolver; `None` when unresolvable.
    pub key: Option<String>,
    /// Kind of the value expression.
    pub value: FieldValue,
}

impl Field {
    /// Creates a field built with a typed field helper.
    #[must_use]
    pub fn constructor(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: FieldValue::Constructor,
        }
    }

    /// Creates a field entry from its parts.
    #[must_use]
    pub fn new(key: Option<String>, value: FieldValue) -> Self {
        Self { key, value }
    }
}

/// A recognized logging invocation with a resolved message.
///
/// A `LogCall` only exists when the message resolved to a string, so
/// `message` is never absent (though it may be empty). Standard calls never
/// carry fields; the constructors make that impossible to violate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogCall {
    kind: LoggerKind,
    level: Level,
    message: String,
    fields: Vec<Field>,
    position: Location,
}

impl LogCall {
    /// Creates a call-site for a message-only logger.
    #[must_use]
    pub fn standard(level: Level, message: impl Into<String>, position: Location) -> Self {
        Self {
            kind: LoggerKind::Standard,
            level,
            message: message.into(),
            fields: Vec::new(),
            position,
        }
    }

    /// Creates a call-site for a structured logger.
    #[must_use]
    pub fn structured(
        level: Level,
        message: impl Into<String>,
        fields: Vec<Field>,
        position: Location,
    ) -> Self {
        Self {
            kind: LoggerKind::Structured,
            level,
            message: message.into(),
            fields,
            position,
        }
    }

    /// Returns the logger kind.
    #[must_use]
    pub fn kind(&self) -> LoggerKind {
        self.kind
    }

    /// Returns the call level.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns the resolved message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the structured fields, in source order. Always empty for standard calls.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the call position.
    #[must_use]
    pub fn position(&self) -> &Location {
        &self.position
    }

    /// Returns true for structured calls.
    #[must_use]
    pub fn is_structured(&self) -> bool {
        self.kind == LoggerKind::Structured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_call_has_no_fields() {
        let call = LogCall::standard(Level::Info, "server started", Location::default());
        assert_eq!(call.kind(), LoggerKind::Standard);
        assert!(call.fields().is_empty());
        assert!(!call.is_structured());
    }

    #[test]
    fn structured_call_keeps_field_order() {
        let call = LogCall::structured(
            Level::Warn,
            "user login",
            vec![Field::constructor("username"), Field::new(None, FieldValue::Opaque)],
            Location::default(),
        );
        assert!(call.is_structured());
        assert_eq!(call.fields()[0].key.as_deref(), Some("username"));
        assert_eq!(call.fields()[1].value, FieldValue::Opaque);
    }

    #[test]
    fn level_names_match_macro_names() {
        let names: Vec<&str> = Level::ALL.iter().map(|l| l.as_str()).collect();
        assert_eq!(names, vec!["debug", "info", "warn", "error"]);
    }
}
