//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_NAME: &str = "loglint.toml";

const DEFAULT_CONFIG: &str = r#"# loglint configuration
version = 1

# Rules to run: lowercase, english, special_chars, sensitive, sensitive_fields
enable_rules = ["lowercase", "english", "special_chars", "sensitive", "sensitive_fields"]

# Exit with status 1 when a diagnostic reaches this severity
fail_on = "warning"

# Extra keywords, regex patterns and structured field keys treated as sensitive
custom_sensitive_keywords = []
custom_sensitive_patterns = []
custom_zap_sensitive_keys = []

[analyzer]
# root = "./src"
exclude = ["**/target/**", "**/vendor/**"]
respect_gitignore = true

[lowercase]
enabled = true

[english]
enabled = true
# Scripts accepted besides ASCII letters, e.g. ["cyrillic", "han"]
allowed_non_latin = []

[special_chars]
enabled = true
allow_emojis = false
allow_special = false

[sensitive]
enabled = true
# Also flag email addresses and card numbers
strict_mode = false
extra_patterns = []
# severity = "error"

# Extra logging macro prefixes
# [[loggers]]
# alias = "my_app::log"
# kind = "structured"
"#;

/// Runs the init command, writing `loglint.toml` into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to tune rules");
    println!("  2. Run: loglint check");

    Ok(())
}
