//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::FileContext;
use crate::engine::RuleEngine;
use crate::extract::CallExtractor;
use crate::rule::{Rule, RuleBox};
use crate::types::{Diagnostic, DiagnosticSink};
use crate::utils::allowance::check_allow_with_reason;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing Rust source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Directory walk error.
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    engine: RuleEngine,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Replaces the rule pipeline.
    #[must_use]
    pub fn engine(mut self, engine: RuleEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Appends rules to the pipeline, keeping their order.
    #[must_use]
    pub fn rules(mut self, rules: Vec<RuleBox>) -> Self {
        let mut all: Vec<RuleBox> = std::mem::take(&mut self.engine).into_rules();
        all.extend(rules);
        self.engine = RuleEngine::new(all);
        self
    }

    /// Appends a single rule to the pipeline.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.engine = std::mem::take(&mut self.engine).rule(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved or an
    /// exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        let excludes = exclude_patterns
            .into_iter()
            .map(|raw| Ok(ExcludePattern { glob: glob::Pattern::new(&raw)?, raw }))
            .collect::<Result<Vec<_>, glob::PatternError>>()?;

        Ok(Analyzer {
            root,
            extractor: CallExtractor::from_config(&config),
            engine: self.engine,
            excludes,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

struct ExcludePattern {
    raw: String,
    glob: glob::Pattern,
}

impl ExcludePattern {
    fn matches(&self, path: &str) -> bool {
        if self.glob.matches(path) {
            return true;
        }
        // Also check as substring for patterns like "**/target/**"
        let normalized = self.raw.replace("**", "");
        !normalized.is_empty() && path.contains(&normalized)
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    extractor: CallExtractor,
    engine: RuleEngine,
    excludes: Vec<ExcludePattern>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.engine.rule_count()
    }

    /// Analyzes all files and returns the results, sorted by location.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, a file cannot be read, or a
    /// file fails to parse while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<DiagnosticSink, AnalyzerError> {
        info!("starting analysis at {}", self.root.display());

        let mut sink = DiagnosticSink::new();
        let files = self.discover_files()?;

        info!("found {} files to analyze", files.len());

        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            match self.analyze_source(file_path, &content) {
                Ok(file_sink) => sink.extend(file_sink),
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        sink.sort_by_location();

        info!(
            "analysis complete: {} diagnostics from {} calls in {} files",
            sink.len(),
            sink.calls_checked,
            sink.files_checked
        );

        Ok(sink)
    }

    /// Analyzes one source text as if it were the file at `path`.
    ///
    /// Diagnostics stay in call order, then rule order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] if `content` is not valid Rust.
    pub fn analyze_source(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<DiagnosticSink, AnalyzerError> {
        debug!("analyzing {}", path.display());

        let ast = syn::parse_file(content).map_err(|e| AnalyzerError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let ctx = FileContext::new(path, content, &self.root);
        let mut sink = DiagnosticSink::new();
        sink.files_checked = 1;

        for call in self.extractor.extract(&ctx, &ast) {
            let diagnostics = self.engine.evaluate(&call, &self.config);
            sink.record(
                diagnostics
                    .into_iter()
                    .filter(|d| !Self::is_allowed(content, d)),
            );
        }

        Ok(sink)
    }

    fn is_allowed(content: &str, diagnostic: &Diagnostic) -> bool {
        let check = check_allow_with_reason(
            content,
            diagnostic.location.line,
            &diagnostic.rule,
            &diagnostic.code,
        );
        if check.is_allowed() {
            debug!(
                rule = %diagnostic.rule,
                line = diagnostic.location.line,
                reason = check.reason().unwrap_or("none"),
                "diagnostic allowed by directive"
            );
        }
        check.is_allowed()
    }

    /// Discovers all Rust source files to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let respect_gitignore = self.config.analyzer.respect_gitignore;
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .git_ignore(respect_gitignore)
            .git_exclude(respect_gitignore)
            .git_global(respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("rs") {
                continue;
            }

            if self.should_exclude(path) {
                debug!("excluding {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    ///
    /// Patterns match the path relative to the root, anchored at `/`.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let anchored = Path::new("/").join(relative);
        let path_str = anchored.to_string_lossy();
        self.excludes.iter().any(|pattern| pattern.matches(&path_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::LogCall;
    use crate::config::RuleId;
    use crate::types::Severity;

    struct UppercaseStart;

    impl Rule for UppercaseStart {
        fn id(&self) -> RuleId {
            RuleId::Lowercase
        }
        fn code(&self) -> &'static str {
            "LL001"
        }
        fn check(&self, call: &LogCall, _config: &Config) -> Option<Diagnostic> {
            call.message()
                .chars()
                .next()
                .filter(|c| c.is_uppercase())
                .map(|_| {
                    Diagnostic::new(
                        self.code(),
                        self.name(),
                        Severity::Warning,
                        call.position().clone(),
                        "uppercase start",
                    )
                })
        }
    }

    fn analyzer() -> Analyzer {
        Analyzer::builder()
            .root(".")
            .rule(UppercaseStart)
            .build()
            .expect("Failed to build analyzer")
    }

    #[test]
    fn test_builder() {
        let analyzer = analyzer();
        assert!(analyzer.root().exists());
        assert_eq!(analyzer.rule_count(), 1);
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/generated/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/foo/target/debug/main.rs")));
        assert!(analyzer.should_exclude(Path::new("/foo/vendor/lib.rs")));
        assert!(analyzer.should_exclude(Path::new("/foo/generated/api.rs")));
        assert!(!analyzer.should_exclude(Path::new("/foo/src/lib.rs")));
    }

    #[test]
    fn invalid_exclude_is_an_error() {
        let result = Analyzer::builder().root(".").exclude("[").build();
        assert!(matches!(result, Err(AnalyzerError::Glob(_))));
    }

    #[test]
    fn analyze_source_evaluates_calls() {
        let source = "fn f() {\n    log::info!(\"Started\");\n    log::info!(\"started\");\n}\n";
        let sink = analyzer()
            .analyze_source(Path::new("src/lib.rs"), source)
            .unwrap();
        assert_eq!(sink.files_checked, 1);
        assert_eq!(sink.calls_checked, 2);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.diagnostics[0].location.line, 2);
    }

    #[test]
    fn allow_directive_suppresses_diagnostic() {
        let source = "fn f() {\n    // loglint: allow(lowercase) reason=\"product name\"\n    log::info!(\"Started\");\n    log::info!(\"Stopped\"); // loglint: allow(LL001)\n}\n";
        let sink = analyzer()
            .analyze_source(Path::new("src/lib.rs"), source)
            .unwrap();
        assert_eq!(sink.calls_checked, 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn parse_error_is_reported() {
        let result = analyzer().analyze_source(Path::new("src/bad.rs"), "fn (");
        assert!(matches!(result, Err(AnalyzerError::Parse { .. })));
    }
}
