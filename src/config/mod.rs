//! Configuration module for sheetnum
//!
//! Manages application configuration including database paths and
//! renumbering defaults. Configuration is stored in the user's config directory.

mod setup;

pub use setup::first_time_setup;

use crate::renumber::DEFAULT_REPORT_LIMIT;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Attribute whose values form the filter buckets
pub const DEFAULT_GROUP_ATTRIBUTE: &str = "Discipline";

/// Label of the store transaction opened by a run
pub const DEFAULT_TRANSACTION_LABEL: &str = "Renumber sheets";

/// Keys accepted by `config get` / `config set`
pub const CONFIG_KEYS: &[&str] = &["quiet", "group_attribute", "report_limit", "transaction_label"];

fn default_group_attribute() -> String {
    DEFAULT_GROUP_ATTRIBUTE.to_string()
}

const fn default_report_limit() -> usize {
    DEFAULT_REPORT_LIMIT
}

fn default_transaction_label() -> String {
    DEFAULT_TRANSACTION_LABEL.to_string()
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SheetnumConfig {
    /// Map of database names to their filesystem paths
    #[serde(default)]
    pub databases: HashMap<String, PathBuf>,

    /// The default database to use when none is specified
    #[serde(default)]
    pub default_database: Option<String>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Attribute used to group sheets into filters
    #[serde(default = "default_group_attribute")]
    pub group_attribute: String,

    /// Maximum number of `old -> new` lines in a report
    #[serde(default = "default_report_limit")]
    pub report_limit: usize,

    /// Label given to the renumbering transaction
    #[serde(default = "default_transaction_label")]
    pub transaction_label: String,
}

impl Default for SheetnumConfig {
    fn default() -> Self {
        Self {
            databases: HashMap::new(),
            default_database: None,
            quiet: false,
            group_attribute: default_group_attribute(),
            report_limit: default_report_limit(),
            transaction_label: default_transaction_label(),
        }
    }
}

impl SheetnumConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("sheetnum").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Add a database to the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if saving the configuration fails.
    pub fn add_database(&mut self, name: String, path: PathBuf) -> Result<(), ConfigError> {
        self.databases.insert(name, path);
        self.save()
    }

    /// Remove a database from the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if saving the configuration fails.
    pub fn remove_database(&mut self, name: &str) -> Result<Option<PathBuf>, ConfigError> {
        let removed = self.databases.remove(name);
        self.save()?;
        Ok(removed)
    }

    /// Get a database path by name
    #[must_use]
    pub fn get_database(&self, name: &str) -> Option<&PathBuf> {
        self.databases.get(name)
    }

    /// List all database names, sorted
    #[must_use]
    pub fn list_databases(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.databases.keys().collect();
        names.sort();
        names
    }

    /// Set the default database
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the database name doesn't exist in the configuration
    /// or if saving the configuration fails.
    pub fn set_default_database(&mut self, name: String) -> Result<(), ConfigError> {
        if !self.databases.contains_key(&name) {
            return Err(ConfigError::Message(format!(
                "Database '{name}' does not exist in configuration"
            )));
        }
        self.default_database = Some(name);
        self.save()
    }

    /// Get the default database name
    #[must_use]
    pub const fn get_default_database(&self) -> Option<&String> {
        self.default_database.as_ref()
    }

    /// Read a setting as text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for an unknown key.
    pub fn get_value(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "quiet" => Ok(self.quiet.to_string()),
            "group_attribute" => Ok(self.group_attribute.clone()),
            "report_limit" => Ok(self.report_limit.to_string()),
            "transaction_label" => Ok(self.transaction_label.clone()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Update a setting from text without saving
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown key or a value of the wrong type.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "quiet" => {
                self.quiet = value.parse::<bool>().map_err(|_| {
                    ConfigError::Message(format!(
                        "Invalid value for quiet: '{value}'. Use 'true' or 'false'"
                    ))
                })?;
            }
            "group_attribute" => {
                if value.is_empty() {
                    return Err(ConfigError::Message("group_attribute cannot be empty".into()));
                }
                self.group_attribute = value.to_string();
            }
            "report_limit" => {
                self.report_limit = value.parse::<usize>().map_err(|_| {
                    ConfigError::Message(format!(
                        "Invalid value for report_limit: '{value}'. Use a non-negative integer"
                    ))
                })?;
            }
            "transaction_label" => {
                if value.is_empty() {
                    return Err(ConfigError::Message("transaction_label cannot be empty".into()));
                }
                self.transaction_label = value.to_string();
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            first_time_setup()
        }
    }
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::NotFound(format!(
        "Unknown configuration key: '{key}'. Available keys: {}",
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SheetnumConfig::default();
        assert!(config.databases.is_empty());
        assert!(config.default_database.is_none());
        assert_eq!(config.group_attribute, "Discipline");
        assert_eq!(config.report_limit, 50);
        assert_eq!(config.transaction_label, "Renumber sheets");
    }

    #[test]
    fn test_list_databases_sorted() {
        let mut config = SheetnumConfig::default();
        for name in ["gamma", "alpha", "beta"] {
            config
                .databases
                .insert(name.to_string(), PathBuf::from(format!("/tmp/{name}")));
        }
        let names: Vec<&str> = config.list_databases().into_iter().map(String::as_str).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
        assert_eq!(config.get_database("beta"), Some(&PathBuf::from("/tmp/beta")));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = SheetnumConfig::default();
        config.databases.insert("main".into(), PathBuf::from("/tmp/main"));
        config.default_database = Some("main".into());
        config.report_limit = 10;
        config.save_to(&path).unwrap();

        assert_eq!(SheetnumConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n").unwrap();

        let config = SheetnumConfig::load_from(&path).unwrap();
        assert!(config.quiet);
        assert_eq!(config.group_attribute, DEFAULT_GROUP_ATTRIBUTE);
        assert_eq!(config.report_limit, DEFAULT_REPORT_LIMIT);
    }

    #[test]
    fn test_get_and_set_values() {
        let mut config = SheetnumConfig::default();
        config.set_value("group_attribute", "Sheet Group").unwrap();
        config.set_value("report_limit", "5").unwrap();
        config.set_value("quiet", "true").unwrap();

        assert_eq!(config.get_value("group_attribute").unwrap(), "Sheet Group");
        assert_eq!(config.get_value("report_limit").unwrap(), "5");
        assert_eq!(config.get_value("quiet").unwrap(), "true");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = SheetnumConfig::default();
        assert!(config.set_value("report_limit", "-1").is_err());
        assert!(config.set_value("quiet", "maybe").is_err());
        assert!(config.set_value("group_attribute", "").is_err());
        assert!(config.set_value("colour", "red").is_err());
        assert!(config.get_value("colour").is_err());
        assert_eq!(config, SheetnumConfig::default());
    }
}
