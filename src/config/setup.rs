//! Interactive setup wizard for first-time configuration
//!
//! This module handles the interactive prompts for creating an initial
//! configuration when sheetnum is run for the first time.

use super::{DEFAULT_GROUP_ATTRIBUTE, SheetnumConfig};
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};
use std::path::PathBuf;

fn read_input(prompt: &str, default: String) -> Result<String, ConfigError> {
    Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))
}

/// Interactive first-time setup
///
/// Prompts for the first sheet database (name and location) and for the
/// attribute used to group sheets, then saves the configuration.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - The system data directory cannot be determined
/// - User input cannot be read
/// - The configuration cannot be saved
pub fn first_time_setup() -> Result<SheetnumConfig, ConfigError> {
    println!("Welcome to sheetnum! Let's set up your first sheet database.\n");

    let default_data_dir = dirs::data_local_dir()
        .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?
        .join("sheetnum");

    let db_name = read_input("Database name", "default".to_string())?;
    let default_path = default_data_dir.join(&db_name);
    let db_path = read_input(
        "Database location",
        default_path.to_string_lossy().to_string(),
    )?;
    let group_attribute = read_input(
        "Attribute to group sheets by",
        DEFAULT_GROUP_ATTRIBUTE.to_string(),
    )?;

    let mut config = SheetnumConfig::default();
    config.databases.insert(db_name.clone(), PathBuf::from(db_path));
    config.default_database = Some(db_name);
    config.group_attribute = group_attribute;

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}
