//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const CONFIG_FILE: &str = "a11ylint.toml";

const DEFAULT_CONFIG: &str = r#"# a11ylint configuration

[audit]
# Formats handed to the document converter.
input_format = "json"
output_format = "json"
# Apply fixes; false reports only.
fix = true
# Regenerate alt text for images that already have it.
overwrite = false
# Run document analytics and the composite score.
analytics = false

# Disable individual checks:
# [checks.color-contrast]
# enabled = false

# Disable individual analyzers:
# [analyzers.readability]
# enabled = false
"#;

/// Writes a default configuration file into the working directory.
pub fn run(force: bool) -> Result<()> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() && !force {
        bail!("{CONFIG_FILE} already exists (use --force to overwrite)");
    }

    std::fs::write(path, DEFAULT_CONFIG)?;
    println!("Created {CONFIG_FILE}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use a11ylint::Config;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(super::DEFAULT_CONFIG).unwrap();
        assert!(config.audit.fix);
        assert!(!config.audit.analytics);
        assert_eq!(config.audit.input_format, "json");
    }
}
