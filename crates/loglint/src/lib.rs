//! # loglint
//!
//! Linter for log messages passed to `log` and `tracing` macros.
//!
//! This is the facade crate that re-exports the core engine and the
//! built-in rules.
//!
//! ## Quick Start with `cargo test`
//!
//! ```toml
//! [dev-dependencies]
//! loglint = "0.2"
//! ```
//!
//! ```rust,ignore
//! // tests/log_messages.rs
//! loglint::check!();
//! ```
//!
//! This runs loglint as part of `cargo test`. Configure via `loglint.toml`,
//! or pass options to the macro:
//!
//! ```rust,ignore
//! loglint::check!(root = "src", config = "ci/loglint.toml", fail_on = "error");
//! ```
//!
//! ## Suppression Comments
//!
//! ```rust,ignore
//! // loglint: allow(sensitive) reason="the word is part of a product name"
//! info!("password manager synced");
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use loglint::Analyzer;
//! use loglint::rules::default_engine;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .engine(default_engine())
//!     .build()?;
//!
//! let sink = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]

pub use loglint_core::*;

/// Built-in rules and rule sets.
pub mod rules {
    pub use loglint_rules::*;
}

mod runner;

#[doc(hidden)]
pub mod __internal {
    pub use crate::runner::{run_check, CheckOptions};
}

/// Generates a `#[test]` that lints the project's log call-sites.
///
/// Accepted options, each optional and in any order:
///
/// - `root = "path"`: directory to scan, relative to the workspace root
/// - `config = "path"`: config file, relative to the workspace root
/// - `fail_on = "error" | "warning" | "info"`: failure threshold
///
/// Without a `config`, `loglint.toml` or `.loglint.toml` at the workspace
/// root is used when present.
#[macro_export]
macro_rules! check {
    ($($key:ident = $value:expr),* $(,)?) => {
        #[test]
        fn loglint_check() {
            #[allow(unused_mut, clippy::field_reassign_with_default)]
            let mut options = $crate::__internal::CheckOptions::default();
            $( options.$key = ::core::option::Option::Some($value); )*
            $crate::__internal::run_check(&options);
        }
    };
}
