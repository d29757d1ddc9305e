//! CLI configuration (env-driven).
//!
//! Handles:
//! - Log level and log format
//! - An optional replacement election type rule table

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use uk_election_ids::RuleTable;

use crate::error::CliError;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub log_json: bool,

    /// Rule data package to use instead of the built-in one.
    pub rules_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_level = lookup("EID_LOG_LEVEL").unwrap_or_else(|| "warn".to_string());

        let log_json = lookup("EID_LOG_JSON")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let rules_file = lookup("EID_RULES_FILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            log_level,
            log_json,
            rules_file,
        }
    }

    /// Installs the configured rule table, if any, before any identifier is
    /// handled.
    pub fn install_rules(&self) -> Result<()> {
        let Some(path) = &self.rules_file else {
            return Ok(());
        };

        let table = load_rules(path)?;
        table.install().map_err(CliError::from)?;
        tracing::info!(path = %path.display(), "Using election type rules from file");
        Ok(())
    }
}

/// Reads and parses a rule data package.
fn load_rules(path: &Path) -> Result<RuleTable> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read election type rules from {:?}", path))?;

    let table = RuleTable::from_json(&contents).map_err(CliError::from)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]);
        assert_eq!(config.log_level, "warn");
        assert!(!config.log_json);
        assert_eq!(config.rules_file, None);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("EID_LOG_LEVEL", "debug"),
            ("EID_LOG_JSON", "TRUE"),
            ("EID_RULES_FILE", "/etc/eid/rules.json"),
        ]);
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
        assert_eq!(config.rules_file, Some(PathBuf::from("/etc/eid/rules.json")));
    }

    #[test]
    fn empty_rules_file_is_ignored() {
        let config = config_from(&[("EID_RULES_FILE", "")]);
        assert_eq!(config.rules_file, None);
        assert!(config.install_rules().is_ok());
    }

    #[test]
    fn missing_rules_file_is_an_error() {
        let err = load_rules(Path::new("/nonexistent/eid-rules.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read election type rules"));
    }
}
