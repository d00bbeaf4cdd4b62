//! Check command implementation.

use anyhow::{anyhow, Context, Result};
use loglint_core::{Analyzer, RuleEngine};
use loglint_rules::{default_engine, rules_by_names};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
///
/// Returns `true` when diagnostics reach the configured `fail_on` threshold.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<&str>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<bool> {
    let config = source.load()?;
    let fail_on = config.fail_on_severity();

    let engine = match rules_filter {
        Some(filter) => {
            let names: Vec<&str> = filter
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            let rules = rules_by_names(&names)
                .map_err(|unknown| anyhow!("unknown rule `{unknown}` (see `loglint list-rules`)"))?;
            RuleEngine::new(rules)
        }
        None => default_engine(),
    };

    let analyzer = Analyzer::builder()
        .root(path)
        .config(config)
        .engine(engine)
        .excludes(exclude)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "analyzing {} with {} rules",
        analyzer.root().display(),
        analyzer.rule_count()
    );

    let sink = analyzer.analyze().context("Analysis failed")?;
    super::output::print(&sink, format, analyzer.root())?;

    Ok(sink.has_violations_at(fail_on))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project(source: &str, config: Option<&str>) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/lib.rs"), source).unwrap();
        if let Some(config) = config {
            fs::write(dir.path().join("loglint.toml"), config).unwrap();
        }
        dir
    }

    fn check(dir: &TempDir, rules: Option<&str>) -> Result<bool> {
        let source = crate::config_resolver::resolve(dir.path(), None);
        run(dir.path(), OutputFormat::Compact, rules, Vec::new(), &source)
    }

    #[test]
    fn clean_project_passes() {
        let dir = project("fn f() { log::info!(\"server started\"); }", None);
        assert!(!check(&dir, None).unwrap());
    }

    #[test]
    fn warnings_fail_by_default() {
        let dir = project("fn f() { log::info!(\"Server started\"); }", None);
        assert!(check(&dir, None).unwrap());
    }

    #[test]
    fn fail_on_threshold_comes_from_config() {
        let dir = project(
            "fn f() { log::info!(\"Server started\"); }",
            Some("fail_on = \"error\"\n"),
        );
        assert!(!check(&dir, None).unwrap());
    }

    #[test]
    fn rules_filter_limits_the_run() {
        let dir = project("fn f() { log::info!(\"Server started\"); }", None);
        assert!(!check(&dir, Some("sensitive, LL005")).unwrap());
        assert!(check(&dir, Some("LL001")).unwrap());
    }

    #[test]
    fn unknown_rule_is_an_error() {
        let dir = project("", None);
        let err = check(&dir, Some("shouting")).unwrap_err();
        assert!(err.to_string().contains("shouting"));
    }
}
