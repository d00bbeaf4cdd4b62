//! Rule sets and lookup by ID or code.

use crate::{EnglishOnly, LowercaseStart, NoSpecialChars, SensitiveField, SensitiveMessage};
use loglint_core::{RuleBox, RuleEngine};

/// Returns all built-in rules in evaluation order.
///
/// Order: `lowercase` (LL001), `english` (LL002), `special_chars` (LL003),
/// `sensitive` (LL004), `sensitive_fields` (LL005).
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(LowercaseStart::new()),
        Box::new(EnglishOnly::new()),
        Box::new(NoSpecialChars::new()),
        Box::new(SensitiveMessage::new()),
        Box::new(SensitiveField::new()),
    ]
}

/// Returns an engine running every built-in rule.
///
/// Which rules actually run is still decided by the configuration.
#[must_use]
pub fn default_engine() -> RuleEngine {
    RuleEngine::new(all_rules())
}

/// Selects built-in rules by ID (`sensitive`) or code (`LL004`).
///
/// The result keeps evaluation order regardless of the order of `names`.
///
/// # Errors
///
/// Returns the first name that matches no rule.
pub fn rules_by_names<S: AsRef<str>>(names: &[S]) -> Result<Vec<RuleBox>, String> {
    let all = all_rules();
    if let Some(unknown) = names
        .iter()
        .map(AsRef::as_ref)
        .find(|name| !all.iter().any(|r| r.name() == *name || r.code() == *name))
    {
        return Err(unknown.to_string());
    }

    Ok(all
        .into_iter()
        .filter(|rule| {
            names
                .iter()
                .any(|name| rule.name() == name.as_ref() || rule.code() == name.as_ref())
        })
        .collect())
}
