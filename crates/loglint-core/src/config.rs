//! Configuration types for loglint.
//!
//! The configuration is loaded once per analysis run and passed by reference
//! to every rule invocation; nothing mutates it afterwards.

use crate::call::LoggerKind;
use crate::resolve::DEFAULT_FORMATTERS;
use crate::script::Script;
use crate::types::Severity;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Current configuration schema version.
pub const CONFIG_VERSION: u32 = 1;

/// Built-in patterns checked in `sensitive.strict_mode`.
const STRICT_PATTERNS: &[(&str, &str)] = &[
    (
        "email address",
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
    ),
    ("credit card number", r"\b(?:\d[ -]*?){13,16}\b"),
];

/// Identifier of a built-in rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    /// Message must start with a lowercase letter.
    Lowercase,
    /// Message must use Latin letters only.
    English,
    /// No emoji, decorative punctuation, or trailing punctuation runs.
    SpecialChars,
    /// No sensitive keywords in the message.
    Sensitive,
    /// No sensitive keys in structured fields.
    SensitiveFields,
}

impl RuleId {
    /// All rule IDs in evaluation order.
    pub const ALL: [Self; 5] = [
        Self::Lowercase,
        Self::English,
        Self::SpecialChars,
        Self::Sensitive,
        Self::SensitiveFields,
    ];

    /// Returns the configuration name of this rule.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lowercase => "lowercase",
            Self::English => "english",
            Self::SpecialChars => "special_chars",
            Self::Sensitive => "sensitive",
            Self::SensitiveFields => "sensitive_fields",
        }
    }

    /// Parses a rule ID from its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == name)
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level configuration for loglint.
///
/// Deserializing a `Config` always validates it, so patterns are compiled
/// whichever way the document is read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, remote = "Self")]
pub struct Config {
    /// Schema version (must be 1).
    #[serde(default = "default_version")]
    pub version: u32,

    /// Rules to run. A rule also needs its group's `enabled` flag.
    #[serde(default = "default_enabled_rules")]
    pub enable_rules: BTreeSet<RuleId>,

    /// Severity threshold for a failing run (default: "warning").
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Options for the lowercase rule.
    #[serde(default)]
    pub lowercase: LowercaseConfig,

    /// Options for the English-only rule.
    #[serde(default)]
    pub english: EnglishConfig,

    /// Options for the special characters rule.
    #[serde(default)]
    pub special_chars: SpecialCharsConfig,

    /// Options shared by both sensitive-data rules.
    #[serde(default)]
    pub sensitive: SensitiveConfig,

    /// Extra message keywords treated as sensitive.
    #[serde(default)]
    pub custom_sensitive_keywords: Vec<String>,

    /// Extra regex patterns treated as sensitive in messages.
    #[serde(default)]
    pub custom_sensitive_patterns: Vec<String>,

    /// Extra structured field keys treated as sensitive.
    #[serde(default, alias = "custom_zap_sensitive_keys")]
    pub custom_sensitive_field_keys: Vec<String>,

    /// Extra logger aliases recognized by the call extractor.
    #[serde(default)]
    pub loggers: Vec<LoggerAlias>,

    #[serde(skip)]
    patterns: PatternSet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            enable_rules: default_enabled_rules(),
            fail_on: None,
            analyzer: AnalyzerConfig::default(),
            lowercase: LowercaseConfig::default(),
            english: EnglishConfig::default(),
            special_chars: SpecialCharsConfig::default(),
            sensitive: SensitiveConfig::default(),
            custom_sensitive_keywords: Vec::new(),
            custom_sensitive_patterns: Vec::new(),
            custom_sensitive_field_keys: Vec::new(),
            loggers: Vec::new(),
            patterns: PatternSet::default(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid, the version is unsupported,
    /// or a sensitive pattern is not a valid regex.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config =
            Self::deserialize(toml::Deserializer::new(content)).map_err(|e| {
                ConfigError::Parse {
                    message: e.to_string(),
                }
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the version and compiles configured patterns.
    ///
    /// Call this after editing pattern lists on a constructed config.
    ///
    /// # Errors
    ///
    /// Returns an error on an unsupported version or an invalid pattern.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
            });
        }
        let custom = self
            .custom_sensitive_patterns
            .iter()
            .chain(&self.sensitive.extra_patterns)
            .map(|p| SensitivePattern::new(p, p))
            .collect::<Result<Vec<_>, _>>()?;
        self.patterns.custom = custom;
        Ok(())
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, id: RuleId) -> bool {
        if !self.enable_rules.contains(&id) {
            return false;
        }
        match id {
            RuleId::Lowercase => self.lowercase.enabled,
            RuleId::English => self.english.enabled,
            RuleId::SpecialChars => self.special_chars.enabled,
            RuleId::Sensitive | RuleId::SensitiveFields => self.sensitive.enabled,
        }
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, id: RuleId) -> Option<Severity> {
        match id {
            RuleId::Lowercase => self.lowercase.severity,
            RuleId::English => self.english.severity,
            RuleId::SpecialChars => self.special_chars.severity,
            RuleId::Sensitive | RuleId::SensitiveFields => self.sensitive.severity,
        }
    }

    /// Severity at or above which a run fails.
    #[must_use]
    pub fn fail_on_severity(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Warning)
    }

    /// Patterns the sensitive-message rule checks, in order.
    ///
    /// Custom patterns always apply; built-in ones only in strict mode.
    pub fn sensitive_patterns(&self) -> impl Iterator<Item = &SensitivePattern> {
        let strict: &[SensitivePattern] = if self.sensitive.strict_mode {
            &self.patterns.strict
        } else {
            &[]
        };
        self.patterns.custom.iter().chain(strict)
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mut config = Self::deserialize(deserializer)?;
        config.validate().map_err(serde::de::Error::custom)?;
        Ok(config)
    }
}

impl Serialize for Config {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Self::serialize(self, serializer)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Formatting callees whose literal template counts as the message.
    #[serde(default = "default_formatters")]
    pub formatters: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_excludes(),
            respect_gitignore: true,
            formatters: default_formatters(),
        }
    }
}

/// Options for the lowercase rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LowercaseConfig {
    /// Whether the rule runs.
    pub enabled: bool,
    /// Reserved: messages may start with a digit.
    pub allow_numbers: bool,
    /// Reserved: messages may start with a symbol.
    pub allow_symbols: bool,
    /// Severity override.
    pub severity: Option<Severity>,
}

impl Default for LowercaseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_numbers: true,
            allow_symbols: true,
            severity: None,
        }
    }
}

/// Options for the English-only rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnglishConfig {
    /// Whether the rule runs.
    pub enabled: bool,
    /// Scripts whose letters are accepted in messages.
    pub allowed_non_latin: Vec<Script>,
    /// Severity override.
    pub severity: Option<Severity>,
}

impl Default for EnglishConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_non_latin: Vec::new(),
            severity: None,
        }
    }
}

/// Options for the special characters rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecialCharsConfig {
    /// Whether the rule runs.
    pub enabled: bool,
    /// Accept codepoints from the emoji ranges.
    pub allow_emojis: bool,
    /// Accept decorative punctuation (`‼ ⁉ ‽ …`).
    pub allow_special: bool,
    /// Severity override.
    pub severity: Option<Severity>,
}

impl Default for SpecialCharsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_emojis: false,
            allow_special: false,
            severity: None,
        }
    }
}

/// Options for the sensitive-data rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SensitiveConfig {
    /// Whether the message and field rules run.
    pub enabled: bool,
    /// Extra regex patterns checked against messages.
    pub extra_patterns: Vec<String>,
    /// Also check the built-in email and card-number patterns.
    pub strict_mode: bool,
    /// Severity override.
    pub severity: Option<Severity>,
}

impl Default for SensitiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            extra_patterns: Vec::new(),
            strict_mode: false,
            severity: None,
        }
    }
}

/// Maps an extra macro path prefix to a logger kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerAlias {
    /// Macro path prefix (e.g. `slog`, `my_crate::log`).
    pub alias: String,
    /// Kind of logger behind the alias.
    pub kind: LoggerKind,
}

/// A compiled sensitive-data pattern.
#[derive(Debug, Clone)]
pub struct SensitivePattern {
    name: String,
    regex: Regex,
}

impl SensitivePattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regex.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            name: name.into(),
            regex,
        })
    }

    /// Display name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the pattern matches anywhere in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

#[derive(Debug, Clone)]
struct PatternSet {
    custom: Vec<SensitivePattern>,
    strict: Vec<SensitivePattern>,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self {
            custom: Vec::new(),
            strict: STRICT_PATTERNS
                .iter()
                .filter_map(|(name, pattern)| SensitivePattern::new(*name, pattern).ok())
                .collect(),
        }
    }
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_enabled_rules() -> BTreeSet<RuleId> {
    RuleId::ALL.into_iter().collect()
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_excludes() -> Vec<String> {
    vec!["**/target/**".to_string(), "**/vendor/**".to_string()]
}

fn default_formatters() -> Vec<String> {
    DEFAULT_FORMATTERS.iter().map(|s| (*s).to_string()).collect()
}

fn default_true() -> bool {
    true
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// The document declares a schema version this build does not know.
    #[error("Unsupported config version {found} (expected {})", CONFIG_VERSION)]
    UnsupportedVersion {
        /// Version found in the document.
        found: u32,
    },

    /// A sensitive pattern is not a valid regex.
    #[error("Invalid sensitive pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Regex compiler message.
        reason: String,
    },
}
