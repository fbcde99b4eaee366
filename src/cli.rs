//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for sheetnum using the `clap` crate.
//!
//! # Commands
//!
//! - **renumber**: Pick sheets and renumber them (default)
//! - **list**: Show sheets in natural order
//! - **groups**: Show the filter buckets with their sizes
//! - **import**: Load sheets from a JSON or CSV file
//! - **db**: Manage multiple databases (add, remove, list, set-default)
//! - **config**: Read and change settings
//! - **completions**: Print a shell completion script
//!
//! # Examples
//!
//! ```
//! use sheetnum::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["sheetnum", "renumber", "--all", "--prefix", "A"]);
//! assert!(matches!(cli.get_command(), Commands::Renumber { all: true, .. }));
//! ```

use crate::catalog::BucketSelector;
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::io::Write;
use std::path::PathBuf;

/// Input format for the import command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Csv,
}

impl ImportFormat {
    /// Guess the format from a file extension
    #[must_use]
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Main CLI structure
#[derive(Parser, Debug)]
#[command(name = "sheetnum")]
#[command(version, about = "Renumber drawing sheets in natural order", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Shared arguments for commands that work with a database
#[derive(Parser, Debug, Clone, Default)]
pub struct DbArgs {
    /// Database name to use (overrides default)
    #[arg(long = "db", value_name = "NAME")]
    pub db: Option<String>,
}

/// Shared arguments selecting a filter bucket
#[derive(Parser, Debug, Clone, Default)]
pub struct GroupArgs {
    /// Only show sheets whose grouping attribute equals VALUE
    #[arg(short = 'g', long = "group", value_name = "VALUE", conflicts_with = "blank")]
    pub group: Option<String>,

    /// Only show sheets without a grouping value
    #[arg(long = "blank")]
    pub blank: bool,
}

impl GroupArgs {
    #[must_use]
    pub fn selector(&self) -> BucketSelector {
        BucketSelector::from_flags(self.group.clone(), self.blank)
    }
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., report_limit=100)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., group_attribute)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

/// Database management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum DbCommands {
    /// Add a new database
    Add {
        /// Name of the database
        name: String,

        /// Path to the database directory
        path: PathBuf,
    },

    /// List all databases
    List,

    /// Remove a database from configuration
    #[command(visible_alias = "rm")]
    Remove {
        /// Name of the database to remove
        name: String,

        /// Also delete database files from disk
        #[arg(short = 'd', long = "delete-files")]
        delete_files: bool,
    },

    /// Set the default database
    #[command(name = "set-default")]
    SetDefault {
        /// Name of the database to set as default
        name: String,
    },
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Pick sheets and renumber them (default)
    #[command(visible_alias = "r")]
    Renumber {
        #[command(flatten)]
        group_args: GroupArgs,

        /// Select every sheet of the filter without opening the picker
        #[arg(short = 'a', long = "all", conflicts_with = "sheets")]
        all: bool,

        /// Select this sheet number without opening the picker (repeatable)
        #[arg(short = 's', long = "sheet", value_name = "NUMBER")]
        sheets: Vec<String>,

        /// First number to assign (non-positive or invalid values become 1)
        #[arg(long = "start", value_name = "N", allow_hyphen_values = true)]
        start: Option<String>,

        /// Text placed before every new number
        #[arg(short = 'p', long = "prefix", value_name = "PREFIX")]
        prefix: Option<String>,

        /// Show the plan without writing anything
        #[arg(short = 'n', long = "dry-run")]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,

        #[command(flatten)]
        db_args: DbArgs,
    },

    /// List sheets in natural order
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        group_args: GroupArgs,

        #[command(flatten)]
        db_args: DbArgs,
    },

    /// List filter groups with their sheet counts
    Groups {
        #[command(flatten)]
        db_args: DbArgs,
    },

    /// Import sheets from a JSON or CSV file
    Import {
        /// File to read
        file: PathBuf,

        /// Input format (guessed from the extension when omitted)
        #[arg(short = 'f', long = "format", value_enum)]
        format: Option<ImportFormat>,

        /// Remove all existing sheets first
        #[arg(long = "replace")]
        replace: bool,

        #[command(flatten)]
        db_args: DbArgs,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Manage databases
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },

    /// Print a shell completion script
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Helper method to get the database name override from commands
    #[must_use]
    pub fn get_db(&self) -> Option<String> {
        match self {
            Self::Renumber { db_args, .. }
            | Self::List { db_args, .. }
            | Self::Groups { db_args }
            | Self::Import { db_args, .. } => db_args.db.clone(),
            Self::Config { .. } | Self::Db { .. } | Self::Completions { .. } => None,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to an interactive renumber if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Renumber {
            group_args: GroupArgs::default(),
            all: false,
            sheets: Vec::new(),
            start: None,
            prefix: None,
            dry_run: false,
            yes: false,
            db_args: DbArgs::default(),
        })
    }

    /// Write the completion script for `shell`
    pub fn write_completions<W: Write>(shell: Shell, buf: &mut W) {
        let mut cmd = Self::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_renumber() {
        let cli = Cli::parse_from(["sheetnum"]);
        assert!(matches!(
            cli.get_command(),
            Commands::Renumber { all: false, ref sheets, .. } if sheets.is_empty()
        ));
    }

    #[test]
    fn test_renumber_flags() {
        let cli = Cli::parse_from([
            "sheetnum", "-vv", "renumber", "--group", "Arch", "--sheet", "A1", "--sheet", "A2",
            "--start", "-4", "--prefix", "S", "--dry-run", "--db", "work",
        ]);
        assert_eq!(cli.verbose, 2);
        let command = cli.get_command();
        assert_eq!(command.get_db(), Some("work".into()));
        let Commands::Renumber {
            group_args,
            sheets,
            start,
            prefix,
            dry_run,
            ..
        } = command
        else {
            panic!("expected renumber");
        };
        assert_eq!(group_args.selector(), BucketSelector::Value("Arch".into()));
        assert_eq!(sheets, vec!["A1", "A2"]);
        assert_eq!(start.as_deref(), Some("-4"));
        assert_eq!(prefix.as_deref(), Some("S"));
        assert!(dry_run);
    }

    #[test]
    fn test_group_and_blank_conflict() {
        assert!(Cli::try_parse_from(["sheetnum", "list", "--group", "X", "--blank"]).is_err());
        assert!(Cli::try_parse_from(["sheetnum", "renumber", "--all", "--sheet", "A1"]).is_err());
    }

    #[test]
    fn test_import_format_from_path() {
        assert_eq!(
            ImportFormat::from_path(std::path::Path::new("sheets.JSON")),
            Some(ImportFormat::Json)
        );
        assert_eq!(
            ImportFormat::from_path(std::path::Path::new("a/b.csv")),
            Some(ImportFormat::Csv)
        );
        assert_eq!(ImportFormat::from_path(std::path::Path::new("notes.txt")), None);
    }

    #[test]
    fn test_completions_are_generated() {
        let mut buf = Vec::new();
        Cli::write_completions(Shell::Bash, &mut buf);
        assert!(String::from_utf8(buf).unwrap().contains("sheetnum"));
    }
}
