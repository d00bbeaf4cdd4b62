//! Rule trait for defining log message rules.

use crate::call::LogCall;
use crate::config::{Config, RuleId};
use crate::types::{Diagnostic, Severity};

/// A check over one logging call-site.
///
/// Rules are pure: the same `(LogCall, Config)` pair always produces the same
/// result, and a rule never sees other call-sites. A rule reports at most one
/// diagnostic per call (the first violation it finds).
///
/// # Example
///
/// ```ignore
/// use loglint_core::{Config, Diagnostic, LogCall, Rule, RuleId};
///
/// pub struct NoTodo;
///
/// impl Rule for NoTodo {
///     fn id(&self) -> RuleId { RuleId::SpecialChars }
///     fn code(&self) -> &'static str { "LL900" }
///
///     fn check(&self, call: &LogCall, _config: &Config) -> Option<Diagnostic> {
///         call.message().contains("TODO").then(|| {
///             Diagnostic::new(self.code(), self.name(), self.default_severity(),
///                 call.position().clone(), "log message contains TODO")
///         })
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the rule ID used in configuration.
    fn id(&self) -> RuleId;

    /// Returns the rule name (e.g., "lowercase").
    fn name(&self) -> &'static str {
        self.id().as_str()
    }

    /// Returns the rule code (e.g., "LL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for diagnostics from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Checks one call-site and returns the first violation found, if any.
    fn check(&self, call: &LogCall, config: &Config) -> Option<Diagnostic>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::Level;
    use crate::types::Location;

    struct TestRule;

    impl Rule for TestRule {
        fn id(&self) -> RuleId {
            RuleId::Lowercase
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, call: &LogCall, _config: &Config) -> Option<Diagnostic> {
            Some(Diagnostic::new(
                self.code(),
                self.name(),
                self.default_severity(),
                call.position().clone(),
                "Test violation",
            ))
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "lowercase");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Warning);

        let call = LogCall::standard(Level::Info, "x", Location::default());
        let diagnostic = rule.check(&call, &Config::default()).unwrap();
        assert_eq!(diagnostic.rule, "lowercase");
    }
}
