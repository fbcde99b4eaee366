//! Sheetnum CLI application entry point
//!
//! This is the main executable for the sheetnum renumbering tool. It provides a
//! command-line interface for picking drawing sheets and renumbering them in
//! natural order of their current numbers.
//!
//! # Features
//!
//! - **Interactive picker**: Checkbox list with filter tabs, mouse and keyboard range toggles
//! - **Scripted runs**: `--all` or `--sheet` select without a terminal UI
//! - **Dry runs**: Show the plan without writing anything
//! - **Import**: Load sheets from JSON or CSV files
//! - **Database Management**: Configure and manage multiple sheet databases
//! - **Quiet Mode**: Suppress informational output for scripting
//!
//! # Usage
//!
//! ```bash
//! # Pick sheets interactively (default command)
//! sheetnum
//! sheetnum renumber --group Architectural --prefix A- --start 101
//!
//! # Renumber without the picker
//! sheetnum renumber --all --group Structural --prefix S --yes
//! sheetnum renumber --sheet A10 --sheet A2 --dry-run
//!
//! # Inspect the store
//! sheetnum list --blank
//! sheetnum groups
//!
//! # Load sheets
//! sheetnum import sheets.csv --replace
//!
//! # Manage databases and settings
//! sheetnum db add project ~/projects/tower/sheets
//! sheetnum config set group_attribute=Volume
//! ```

use sheetnum::{
    SheetnumError,
    cli::{Cli, Commands, ConfigCommands, DbCommands},
    commands::{self, renumber::RenumberArgs},
    config::{CONFIG_KEYS, SheetnumConfig},
    db::Database,
    logging,
};
use std::process::ExitCode;

type Result<T> = std::result::Result<T, SheetnumError>;

/// Handle the db command - manage multiple databases
///
/// # Errors
///
/// Returns `SheetnumError` if the database operation is invalid (e.g., duplicate name,
/// non-existent database), configuration save fails, or filesystem operations fail.
fn handle_db_command(mut config: SheetnumConfig, command: &DbCommands, quiet: bool) -> Result<()> {
    match command {
        DbCommands::Add { name, path } => {
            if config.get_database(name).is_some() {
                return Err(SheetnumError::InvalidInput(format!(
                    "Database '{name}' already exists"
                )));
            }

            let resolved_path = if path.components().count() == 1 {
                let data_dir = dirs::data_local_dir().ok_or_else(|| {
                    SheetnumError::InvalidInput("Could not determine data directory".into())
                })?;
                data_dir.join("sheetnum").join(path)
            } else {
                path.clone()
            };

            config.add_database(name.clone(), resolved_path.clone())?;

            if !resolved_path.exists() {
                std::fs::create_dir_all(&resolved_path)?;
            }

            if !quiet {
                println!("Database '{name}' added at {}", resolved_path.display());
            }

            if config.databases.len() == 1 {
                config.set_default_database(name.clone())?;
                if !quiet {
                    println!("Set '{name}' as default database");
                }
            }
        }
        DbCommands::List => {
            if config.databases.is_empty() {
                if !quiet {
                    println!("No databases configured.");
                    println!("Add one with: sheetnum db add <name> <path>");
                }
                return Ok(());
            }

            if !quiet {
                println!("Configured databases:");
            }

            let default_db = config.get_default_database();
            for name in config.list_databases() {
                if let Some(path) = config.get_database(name) {
                    let marker = if default_db == Some(name) { " (default)" } else { "" };
                    if quiet {
                        println!("{name}");
                    } else {
                        println!("  {} -> {}{}", name, path.display(), marker);
                    }
                }
            }
        }
        DbCommands::Remove { name, delete_files } => {
            if config.get_database(name).is_none() {
                return Err(SheetnumError::InvalidInput(format!(
                    "Database '{name}' does not exist"
                )));
            }

            let is_default = config.get_default_database() == Some(name);
            if is_default && !quiet {
                println!("Warning: Removing the default database. You'll need to set a new default.");
            }

            if let Some(path) = config.remove_database(name)? {
                if !quiet {
                    println!("Database '{name}' removed from configuration");
                }

                if *delete_files {
                    if path.exists() {
                        match std::fs::remove_dir_all(&path) {
                            Ok(()) => {
                                if !quiet {
                                    println!("Database files deleted from {}", path.display());
                                }
                            }
                            Err(e) => eprintln!("Warning: Failed to delete database files: {e}"),
                        }
                    } else if !quiet {
                        println!(
                            "Database files at {} do not exist (already deleted)",
                            path.display()
                        );
                    }
                } else if !quiet {
                    println!("Note: Database files at {} were NOT deleted", path.display());
                }
            }

            if is_default {
                config.default_database = None;
                config.save()?;
            }
        }
        DbCommands::SetDefault { name } => {
            if config.get_database(name).is_none() {
                return Err(SheetnumError::InvalidInput(format!(
                    "Database '{name}' does not exist"
                )));
            }

            config.set_default_database(name.clone())?;

            if !quiet {
                println!("Set '{name}' as default database");
            }
        }
    }
    Ok(())
}

/// Handle the config command - manage application settings
///
/// # Errors
///
/// Returns `SheetnumError` if the configuration key is invalid, value parsing fails,
/// or configuration save fails.
fn handle_config_command(
    mut config: SheetnumConfig,
    command: &ConfigCommands,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let Some((key, value)) = setting.split_once('=') else {
                return Err(SheetnumError::InvalidInput(format!(
                    "Invalid format. Use: sheetnum config set key=value (keys: {})",
                    CONFIG_KEYS.join(", ")
                )));
            };
            let key = key.trim();
            config.set_value(key, value.trim())?;
            config.save()?;
            if !quiet {
                println!("Set {key} = {}", config.get_value(key)?);
            }
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get_value(key)?);
        }
    }
    Ok(())
}

/// Resolve the database for a command: `--db NAME` or the configured default
fn open_database(config: &SheetnumConfig, command: &Commands) -> Result<Database> {
    let db_name = command
        .get_db()
        .or_else(|| config.get_default_database().cloned())
        .ok_or_else(|| {
            SheetnumError::InvalidInput(
                "No default database set. Use 'sheetnum db add <name> <path>' to create one, or specify --db <name>.".into(),
            )
        })?;

    let db_path = config.get_database(&db_name).ok_or_else(|| {
        SheetnumError::InvalidInput(format!("Database '{db_name}' not found in configuration"))
    })?;

    Ok(Database::open(db_path)?)
}

/// Main entry point for the sheetnum application
///
/// Loads configuration, parses command-line arguments, and dispatches to the
/// appropriate command handler. A renumbering run that ends in an error
/// report exits with status 1.
///
/// # Errors
///
/// Returns `SheetnumError` if configuration loading fails, database initialization fails,
/// or any command handler returns an error.
fn main() -> Result<ExitCode> {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    let command = cli.get_command();

    if let Commands::Completions { shell } = &command {
        Cli::write_completions(*shell, &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let config = SheetnumConfig::load_or_setup()?;
    let quiet = cli.quiet || config.quiet;

    match command {
        Commands::Db { command } => handle_db_command(config, &command, quiet)?,
        Commands::Config { command } => handle_config_command(config, &command, quiet)?,
        Commands::Renumber {
            ref group_args,
            all,
            ref sheets,
            ref start,
            ref prefix,
            dry_run,
            yes,
            ..
        } => {
            let db = open_database(&config, &command)?;
            let args = RenumberArgs {
                filter: group_args.selector(),
                all,
                sheets: sheets.clone(),
                start: start.clone(),
                prefix: prefix.clone(),
                dry_run,
                yes,
            };
            let report = commands::renumber(&db, &args, &config, quiet)?;
            if report.is_error() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::List { ref group_args, .. } => {
            let db = open_database(&config, &command)?;
            commands::list(&db, &config.group_attribute, &group_args.selector(), quiet)?;
        }
        Commands::Groups { .. } => {
            let db = open_database(&config, &command)?;
            commands::groups(&db, &config.group_attribute, quiet)?;
        }
        Commands::Import {
            ref file,
            format,
            replace,
            ..
        } => {
            let db = open_database(&config, &command)?;
            let summary = commands::import(&db, file, format, replace, quiet)?;
            if !summary.errors.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Completions { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}
