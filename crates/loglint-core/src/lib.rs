//! # loglint-core
//!
//! Core framework for linting log messages at their call-sites.
//!
//! This crate provides the call-site model, the literal resolver, the rule
//! trait and engine, and the analyzer that walks a source tree. It includes:
//!
//! - [`LogCall`] for one recognized logging invocation
//! - [`Resolver`] for deciding whether a message is a compile-time string
//! - [`Rule`] trait and [`RuleEngine`] for evaluating call-sites
//! - [`CallExtractor`] for finding `log`/`tracing` macro calls with `syn`
//! - [`Analyzer`] for orchestrating a whole run
//! - [`Diagnostic`] and [`DiagnosticSink`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use loglint_core::{Analyzer, Config};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .config(Config::load("loglint.toml".as_ref())?)
//!     .engine(loglint_rules::default_engine())
//!     .build()?;
//!
//! let sink = analyzer.analyze()?;
//! for diagnostic in &sink.diagnostics {
//!     println!("{diagnostic}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod call;
mod config;
mod context;
mod engine;
mod extract;
mod resolve;
mod rule;
mod script;
mod types;

/// Utility modules for the analyzer and extractor.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use call::{Field, FieldValue, Level, LogCall, LoggerKind};
pub use config::{
    AnalyzerConfig, Config, ConfigError, EnglishConfig, LoggerAlias, LowercaseConfig, RuleId,
    SensitiveConfig, SensitivePattern, SpecialCharsConfig, CONFIG_VERSION,
};
pub use context::FileContext;
pub use engine::RuleEngine;
pub use extract::{CallExtractor, CallTable};
pub use resolve::{ArgExpr, ConstLookup, ConstTable, Resolver, Strategy, DEFAULT_FORMATTERS};
pub use rule::{Rule, RuleBox};
pub use script::Script;
pub use types::{Diagnostic, DiagnosticReport, DiagnosticSink, Location, Severity, Suggestion};
pub use utils::allowance::AllowCheck;
