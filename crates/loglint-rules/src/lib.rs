//! # loglint-rules
//!
//! Built-in log message rules for loglint.
//!
//! Every rule inspects one [`LogCall`](loglint_core::LogCall) at a time and
//! reports at most one diagnostic for it.
//!
//! ## Available Rules
//!
//! | Code | ID | Description | Default severity |
//! |------|----|-------------|------------------|
//! | LL001 | `lowercase` | Message starts with a lowercase letter | warning |
//! | LL002 | `english` | Message uses Latin letters only | warning |
//! | LL003 | `special_chars` | No emoji, decorative punctuation, or trailing `!`/`.`/`?!` | warning |
//! | LL004 | `sensitive` | No passwords, tokens, keys or card numbers in the message | error |
//! | LL005 | `sensitive_fields` | No sensitive keys in structured fields | error |
//!
//! ## Usage
//!
//! ```ignore
//! use loglint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .engine(loglint_rules::default_engine())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod charset;
mod english_only;
mod lowercase;
mod presets;
mod sensitive_field;
mod sensitive_message;
mod special_chars;

pub use english_only::EnglishOnly;
pub use lowercase::LowercaseStart;
pub use presets::{all_rules, default_engine, rules_by_names};
pub use sensitive_field::{SensitiveField, SENSITIVE_FIELD_KEYS};
pub use sensitive_message::{
    find_sensitive, MatchKind, SensitiveMatch, SensitiveMessage, SENSITIVE_KEYWORDS,
};
pub use special_chars::NoSpecialChars;

/// Re-export core types for convenience.
pub use loglint_core::{Diagnostic, Rule, RuleEngine, Severity};
