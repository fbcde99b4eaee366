//! UI error types

use thiserror::Error;

/// Errors that can occur in UI operations
#[derive(Debug, Error)]
pub enum UiError {
    /// The terminal could not be set up or restored
    #[error("Terminal error: {0}")]
    TerminalError(String),

    /// Invalid picker configuration
    #[error("Invalid UI configuration: {0}")]
    InvalidConfig(String),

    /// A sheet named on the command line is not in the displayed list
    #[error("Sheet '{number}' is not listed under filter '{filter}'")]
    UnknownSheet { number: String, filter: String },

    /// IO error during UI operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
