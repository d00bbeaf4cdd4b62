//! Internal runner for `check!()` macro integration.
//!
//! This module is `#[doc(hidden)]` and not part of the public API.

use loglint_core::{Analyzer, Config, Severity};
use loglint_rules::default_engine;
use std::path::{Path, PathBuf};

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["loglint.toml", ".loglint.toml"];

/// Options collected by the `check!()` macro.
#[derive(Debug, Default, Clone, Copy)]
pub struct CheckOptions {
    /// Directory to scan, relative to the workspace root.
    pub root: Option<&'static str>,
    /// Config file, relative to the workspace root.
    pub config: Option<&'static str>,
    /// Failure threshold overriding the config's `fail_on`.
    pub fail_on: Option<&'static str>,
}

/// Runs loglint as part of `cargo test`.
///
/// # Panics
///
/// Panics with a formatted report if diagnostics at or above the `fail_on`
/// severity are found, or if the config or a source file cannot be read.
pub fn run_check(options: &CheckOptions) {
    let project = find_project_root();
    run_in(&project, options);
}

fn run_in(project: &Path, options: &CheckOptions) {
    let config = load_config(project, options.config);
    let fail_on = resolve_fail_on(options.fail_on, &config);

    let root = match options.root {
        Some(root) => project.join(root),
        None => project.join(&config.analyzer.root),
    };

    let analyzer = Analyzer::builder()
        .root(root)
        .config(config)
        .engine(default_engine())
        .build()
        .unwrap_or_else(|e| panic!("loglint: failed to build analyzer: {e}"));

    let sink = analyzer
        .analyze()
        .unwrap_or_else(|e| panic!("loglint: analysis failed: {e}"));

    if sink.has_violations_at(fail_on) {
        panic!("{}", sink.format_test_report(fail_on));
    }
}

/// Loads the explicit config, else the first candidate found, else defaults.
fn load_config(project: &Path, explicit: Option<&str>) -> Config {
    let path = match explicit {
        Some(path) => {
            let path = project.join(path);
            if !path.is_file() {
                panic!(
                    "loglint: failed to load config from {}: file does not exist",
                    path.display()
                );
            }
            Some(path)
        }
        None => CONFIG_CANDIDATES
            .iter()
            .map(|name| project.join(name))
            .find(|path| path.is_file()),
    };

    match path {
        Some(path) => Config::load(&path).unwrap_or_else(|e| {
            panic!("loglint: failed to load config from {}: {e}", path.display())
        }),
        None => Config::default(),
    }
}

/// Macro arg wins over the config file.
fn resolve_fail_on(macro_arg: Option<&str>, config: &Config) -> Severity {
    match macro_arg {
        Some(name) => name
            .parse()
            .unwrap_or_else(|e: String| panic!("loglint: {e}")),
        None => config.fail_on_severity(),
    }
}

/// Checks whether a `Cargo.toml` defines a `[workspace]` table.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}

/// Finds the workspace root above `CARGO_MANIFEST_DIR`.
fn find_project_root() -> PathBuf {
    let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") else {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    };
    let manifest_dir = PathBuf::from(manifest_dir);

    manifest_dir
        .ancestors()
        .find(|dir| has_workspace_section(&dir.join("Cargo.toml")))
        .map_or_else(|| manifest_dir.clone(), Path::to_path_buf)
}
