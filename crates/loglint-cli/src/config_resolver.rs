//! Configuration file resolution with global fallback.
//!
//! Priority order:
//!
//! 1. `--config` flag (explicit path, must exist)
//! 2. `{project}/loglint.toml`, then `{project}/.loglint.toml`
//! 3. `$LOGLINT_CONFIG_DIR/config.toml` or `~/.loglint/config.toml`
//! 4. Built-in defaults

use anyhow::{bail, Context, Result};
use loglint_core::Config;
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["loglint.toml", ".loglint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the analyzed directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; built-in defaults apply.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Fails when an explicit file is missing, or any file cannot be read,
    /// parsed, or validated.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("no config file found, using defaults");
            return Ok(Config::default());
        };

        if matches!(self, Self::Explicit(_)) && !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        if matches!(self, Self::Global(_)) {
            tracing::info!("using global config {}", path.display());
        }

        Config::load(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Resolves the configuration source for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(project_dir, explicit, global_config_dir())
}

/// Resolution with the global directory passed in, so tests avoid env vars.
fn resolve_in(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("found project config {}", found.display());
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

/// Returns the global config directory: `$LOGLINT_CONFIG_DIR` or `~/.loglint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("LOGLINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".loglint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loglint_core::RuleId;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn explicit_wins_without_existence_check() {
        let project = TempDir::new().unwrap();
        touch(project.path(), "loglint.toml", "");

        let result = resolve_in(project.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(result, ConfigSource::Explicit(PathBuf::from("/nonexistent.toml")));
    }

    #[test]
    fn project_names_are_checked_in_order() {
        let project = TempDir::new().unwrap();
        let dotted = touch(project.path(), ".loglint.toml", "");
        assert_eq!(
            resolve_in(project.path(), None, None),
            ConfigSource::Project(dotted)
        );

        let plain = touch(project.path(), "loglint.toml", "");
        assert_eq!(
            resolve_in(project.path(), None, None),
            ConfigSource::Project(plain)
        );
    }

    #[test]
    fn global_is_a_fallback_only() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let global_file = touch(global.path(), "config.toml", "");

        assert_eq!(
            resolve_in(project.path(), None, Some(global.path().to_path_buf())),
            ConfigSource::Global(global_file)
        );

        touch(project.path(), "loglint.toml", "");
        assert!(matches!(
            resolve_in(project.path(), None, Some(global.path().to_path_buf())),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn defaults_when_nothing_found() {
        let project = TempDir::new().unwrap();
        let empty_global = TempDir::new().unwrap();
        assert_eq!(
            resolve_in(project.path(), None, Some(empty_global.path().to_path_buf())),
            ConfigSource::Default
        );
        assert!(ConfigSource::Default.path().is_none());
    }

    #[test]
    fn load_reads_resolved_file() {
        let project = TempDir::new().unwrap();
        let path = touch(project.path(), "loglint.toml", "enable_rules = [\"sensitive\"]\n");

        let config = ConfigSource::Project(path).load().unwrap();
        assert!(config.is_rule_enabled(RuleId::Sensitive));
        assert!(!config.is_rule_enabled(RuleId::Lowercase));
    }

    #[test]
    fn load_rejects_missing_explicit_file() {
        let err = ConfigSource::Explicit(PathBuf::from("/nonexistent/loglint.toml"))
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn load_reports_malformed_file() {
        let project = TempDir::new().unwrap();
        let path = touch(project.path(), "loglint.toml", "enable_rules = 3\n");
        assert!(ConfigSource::Project(path).load().is_err());
    }
}
