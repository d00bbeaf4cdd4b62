//! Analyzer behavior over a real directory tree.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use loglint_core::{
    Analyzer, AnalyzerError, Config, Diagnostic, LogCall, Rule, RuleId, Severity,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Fires on every message so tests can observe which call-sites were seen.
struct EveryCall;

impl Rule for EveryCall {
    fn id(&self) -> RuleId {
        RuleId::SpecialChars
    }

    fn code(&self) -> &'static str {
        "LL003"
    }

    fn check(&self, call: &LogCall, _config: &Config) -> Option<Diagnostic> {
        Some(Diagnostic::new(
            self.code(),
            self.name(),
            Severity::Warning,
            call.position().clone(),
            call.message(),
        ))
    }
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn analyze(root: &Path, config: Config) -> Result<loglint_core::DiagnosticSink, AnalyzerError> {
    Analyzer::builder()
        .root(root)
        .config(config)
        .rule(EveryCall)
        .build()?
        .analyze()
}

#[test]
fn walks_sources_and_sorts_by_location() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "src/b.rs",
        "fn b() {\n    log::info!(\"b second\");\n    log::info!(\"b first\");\n}\n",
    );
    write(dir.path(), "src/a.rs", "fn a() { tracing::warn!(\"a only\"); }\n");
    write(dir.path(), "README.md", "log::info!(\"not rust\")");

    let sink = analyze(dir.path(), Config::default()).unwrap();

    assert_eq!(sink.files_checked, 2);
    assert_eq!(sink.calls_checked, 3);
    let messages: Vec<&str> = sink.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, vec!["a only", "b second", "b first"]);
    assert_eq!(sink.diagnostics[0].location.file, PathBuf::from("src/a.rs"));
}

#[test]
fn honors_excludes_and_gitignore() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/lib.rs", "fn f() { info!(\"kept\"); }\n");
    write(dir.path(), "target/gen.rs", "fn f() { info!(\"built\"); }\n");
    write(dir.path(), "generated/api.rs", "fn f() { info!(\"generated\"); }\n");
    write(dir.path(), "scratch/tmp.rs", "fn f() { info!(\"scratch\"); }\n");
    write(dir.path(), ".gitignore", "scratch/\n");

    let config = Config::parse("[analyzer]\nexclude = [\"**/target/**\", \"**/generated/**\"]\n")
        .unwrap();
    let sink = analyze(dir.path(), config).unwrap();

    let messages: Vec<&str> = sink.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, vec!["kept"]);
}

#[test]
fn gitignore_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "scratch/tmp.rs", "fn f() { info!(\"scratch\"); }\n");
    write(dir.path(), ".gitignore", "scratch/\n");

    let config = Config::parse("[analyzer]\nrespect_gitignore = false\n").unwrap();
    let sink = analyze(dir.path(), config).unwrap();
    assert_eq!(sink.len(), 1);
}

#[test]
fn unparseable_files_are_skipped_unless_strict() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/ok.rs", "fn f() { info!(\"fine\"); }\n");
    write(dir.path(), "src/broken.rs", "fn (\n");

    let sink = analyze(dir.path(), Config::default()).unwrap();
    assert_eq!(sink.files_checked, 1);
    assert_eq!(sink.len(), 1);

    let strict = Analyzer::builder()
        .root(dir.path())
        .rule(EveryCall)
        .fail_on_parse_error(true)
        .build()
        .unwrap()
        .analyze();
    assert!(matches!(strict, Err(AnalyzerError::Parse { .. })));
}

#[test]
fn disabled_rule_produces_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/lib.rs", "fn f() { info!(\"quiet\"); }\n");

    let config = Config::parse("[special_chars]\nenabled = false\n").unwrap();
    let sink = analyze(dir.path(), config).unwrap();
    assert_eq!(sink.calls_checked, 1);
    assert!(sink.is_empty());
}
