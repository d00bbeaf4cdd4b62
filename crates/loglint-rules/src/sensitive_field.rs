//! Rule forbidding sensitive keys in structured log fields.
//!
//! Applies only to structured calls. Fields built with a typed field helper
//! (`key = value`, `%value`) are checked in order; the first key containing
//! a sensitive term is reported. Fields with opaque values or unresolved
//! keys are skipped.

use loglint_core::{Config, Diagnostic, FieldValue, LogCall, Rule, RuleId, Severity, Suggestion};

/// Rule code for sensitive fields.
pub const CODE: &str = "LL005";

/// Rule name for sensitive fields.
pub const NAME: &str = "sensitive_fields";

/// Terms matched as substrings of the lower-cased field key.
pub const SENSITIVE_FIELD_KEYS: &[&str] = &[
    "password",
    "pwd",
    "pass",
    "token",
    "secret",
    "api_key",
    "apikey",
    "credentials",
];

/// Forbids structured fields whose key names a secret.
#[derive(Debug, Clone)]
pub struct SensitiveField {
    /// Severity level.
    pub severity: Severity,
}

impl Default for SensitiveField {
    fn default() -> Self {
        Self::new()
    }
}

impl SensitiveField {
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

fn is_sensitive_key(key: &str, config: &Config) -> bool {
    let key = key.to_lowercase();
    SENSITIVE_FIELD_KEYS.iter().any(|term| key.contains(term))
        || config
            .custom_sensitive_field_keys
            .iter()
            .map(|term| term.to_lowercase())
            .any(|term| !term.is_empty() && key.contains(term.as_str()))
}

impl Rule for SensitiveField {
    fn id(&self) -> RuleId {
        RuleId::SensitiveFields
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Structured log fields must not carry secrets"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, call: &LogCall, config: &Config) -> Option<Diagnostic> {
        if !call.is_structured() {
            return None;
        }

        let key = call
            .fields()
            .iter()
            .filter(|field| field.value == FieldValue::Constructor)
            .filter_map(|field| field.key.as_deref())
            .find(|key| is_sensitive_key(key, config))?;

        Some(
            Diagnostic::new(
                CODE,
                NAME,
                self.severity,
                call.position().clone(),
                format!("sensitive data in structured field \"{key}\""),
            )
            .with_suggestion(Suggestion::new("remove the field or log a redacted value")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loglint_core::{Field, Level, Location};

    fn structured(fields: Vec<Field>) -> LogCall {
        LogCall::structured(Level::Info, "user login", fields, Location::default())
    }

    fn check_with(call: &LogCall, config: &Config) -> Option<Diagnostic> {
        SensitiveField::new().check(call, config)
    }

    fn check(call: &LogCall) -> Option<Diagnostic> {
        check_with(call, &Config::default())
    }

    #[test]
    fn test_detects_password_field() {
        let call = structured(vec![Field::constructor("username"), Field::constructor("password")]);
        let diagnostic = check(&call).expect("should fire");
        assert_eq!(diagnostic.code, CODE);
        insta::assert_snapshot!(
            diagnostic.message,
            @r#"sensitive data in structured field "password""#
        );
    }

    #[test]
    fn test_allows_plain_fields() {
        let call = structured(vec![Field::constructor("username"), Field::constructor("request_id")]);
        assert!(check(&call).is_none());
    }

    #[test]
    fn test_keys_match_by_substring_case_insensitively() {
        let call = structured(vec![Field::constructor("User_Passphrase")]);
        assert!(check(&call).is_some());
        let call = structured(vec![Field::constructor("auth.refresh_token")]);
        assert!(check(&call).is_some());
    }

    #[test]
    fn test_reports_first_sensitive_field_only() {
        let call = structured(vec![
            Field::constructor("api_key"),
            Field::constructor("secret"),
        ]);
        let diagnostic = check(&call).unwrap();
        assert!(diagnostic.message.contains("\"api_key\""));
    }

    #[test]
    fn test_skips_opaque_and_unresolved_fields() {
        let call = structured(vec![
            Field::new(Some("password".to_string()), FieldValue::Opaque),
            Field::new(None, FieldValue::Constructor),
        ]);
        assert!(check(&call).is_none());
    }

    #[test]
    fn test_standard_calls_are_never_checked() {
        let call = LogCall::standard(Level::Info, "password reset", Location::default());
        assert!(check(&call).is_none());
    }

    #[test]
    fn test_custom_field_keys() {
        let config = Config::parse("custom_zap_sensitive_keys = [\"Cookie\"]").unwrap();
        let call = structured(vec![Field::constructor("session_cookie")]);
        assert!(check_with(&call, &config).is_some());
        assert!(check(&call).is_none());
    }
}
