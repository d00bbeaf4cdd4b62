//! Ordered rule pipeline over call-sites.

use crate::call::LogCall;
use crate::config::Config;
use crate::rule::{Rule, RuleBox};
use crate::types::{Diagnostic, DiagnosticSink};
use tracing::trace;

/// Runs a fixed, ordered list of rules against call-sites.
///
/// The engine holds no mutable state, so one instance can evaluate
/// independent call-sites from several threads. Rule order is part of the
/// output contract: diagnostics for a call appear in rule order.
#[derive(Default)]
pub struct RuleEngine {
    rules: Vec<RuleBox>,
}

impl RuleEngine {
    /// Creates an engine over `rules`, evaluated in the given order.
    #[must_use]
    pub fn new(rules: Vec<RuleBox>) -> Self {
        Self { rules }
    }

    /// Appends a rule at the end of the pipeline.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Consumes the engine and returns its rules.
    #[must_use]
    pub fn into_rules(self) -> Vec<RuleBox> {
        self.rules
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Evaluates every enabled rule against one call-site.
    #[must_use]
    pub fn evaluate(&self, call: &LogCall, config: &Config) -> Vec<Diagnostic> {
        self.rules
            .iter()
            .filter(|rule| config.is_rule_enabled(rule.id()))
            .filter_map(|rule| {
                let mut diagnostic = rule.check(call, config)?;
                trace!(rule = rule.name(), "rule fired");
                if let Some(severity) = config.rule_severity(rule.id()) {
                    diagnostic.severity = severity;
                }
                Some(diagnostic)
            })
            .collect()
    }

    /// Evaluates a sequence of call-sites into a sink.
    ///
    /// Accepts plain `LogCall`s or `Option<LogCall>`s; `None` entries stand
    /// for unresolvable call-sites and are skipped without being counted.
    pub fn run<I>(&self, calls: I, config: &Config) -> DiagnosticSink
    where
        I: IntoIterator,
        I::Item: Into<Option<LogCall>>,
    {
        let mut sink = DiagnosticSink::new();
        for call in calls.into_iter().filter_map(Into::into) {
            sink.record(self.evaluate(&call, config));
        }
        sink
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::Level;
    use crate::config::RuleId;
    use crate::types::{Location, Severity};

    struct Contains {
        id: RuleId,
        needle: &'static str,
    }

    impl Rule for Contains {
        fn id(&self) -> RuleId {
            self.id
        }
        fn code(&self) -> &'static str {
            "T000"
        }
        fn check(&self, call: &LogCall, _config: &Config) -> Option<Diagnostic> {
            call.message().contains(self.needle).then(|| {
                Diagnostic::new(
                    self.code(),
                    self.name(),
                    self.default_severity(),
                    call.position().clone(),
                    format!("found {}", self.needle),
                )
            })
        }
    }

    fn engine() -> RuleEngine {
        RuleEngine::default()
            .rule(Contains {
                id: RuleId::Lowercase,
                needle: "a",
            })
            .rule(Contains {
                id: RuleId::Sensitive,
                needle: "b",
            })
    }

    fn call(message: &str) -> LogCall {
        LogCall::standard(Level::Info, message, Location::new("src/x.rs".into(), 3, 5))
    }

    #[test]
    fn diagnostics_follow_rule_order() {
        let diagnostics = engine().evaluate(&call("ab"), &Config::default());
        let rules: Vec<&str> = diagnostics.iter().map(|d| d.rule.as_str()).collect();
        assert_eq!(rules, vec!["lowercase", "sensitive"]);
        assert!(diagnostics
            .iter()
            .all(|d| d.location == Location::new("src/x.rs".into(), 3, 5)));
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let config = Config::parse("enable_rules = [\"sensitive\"]").unwrap();
        let diagnostics = engine().evaluate(&call("ab"), &config);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "sensitive");
    }

    #[test]
    fn severity_override_applies() {
        let config = Config::parse("[lowercase]\nseverity = \"error\"\n").unwrap();
        let diagnostics = engine().evaluate(&call("a"), &config);
        assert_eq!(diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn run_skips_unresolved_call_sites() {
        let calls = vec![Some(call("a")), None, Some(call("zzz"))];
        let sink = engine().run(calls, &Config::default());
        assert_eq!(sink.calls_checked, 2);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn run_is_deterministic() {
        let config = Config::default();
        let calls = vec![call("ab"), call("b"), call("")];
        let first = engine().run(calls.clone(), &config);
        let second = engine().run(calls, &config);
        assert_eq!(first.diagnostics, second.diagnostics);
    }
}
