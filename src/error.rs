// src/error.rs

//! Unified error handling for the bot.
//!
//! `AppError` is anything that may end a run. `DocumentError` describes why a
//! single practice file was skipped and never leaves the ingestor.

use std::fmt;

use thiserror::Error;

/// Result type alias for bot operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing failed
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// CSV reading or writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The post listing API answered with a non-success status
    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// The post listing API handed out a cursor that does not advance
    #[error("Pagination error: {0}")]
    Pagination(String),

    /// A git command against the practice repository failed
    #[error("Repository error running `{command}`: {message}")]
    Repo { command: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a pagination error.
    pub fn pagination(message: impl Into<String>) -> Self {
        Self::Pagination(message.into())
    }

    /// Create a repository error for a git invocation.
    pub fn repo(command: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Repo {
            command: command.into(),
            message: message.to_string(),
        }
    }
}

/// Why a practice file could not be turned into a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to read \"{file}\": {source}")]
    Read {
        file: String,
        source: std::io::Error,
    },

    #[error("unicode error when parsing \"{file}\"")]
    Encoding { file: String },

    #[error("no front matter found in \"{file}\"")]
    Empty { file: String },

    #[error("malformed front matter in \"{file}\": {source}")]
    Malformed {
        file: String,
        source: serde_yaml::Error,
    },

    #[error("\"{file}\" is missing required field `{field}`")]
    MissingField { file: String, field: &'static str },
}

impl DocumentError {
    /// Name of the file the error refers to.
    pub fn file(&self) -> &str {
        match self {
            Self::Read { file, .. }
            | Self::Encoding { file }
            | Self::Empty { file }
            | Self::Malformed { file, .. }
            | Self::MissingField { file, .. } => file,
        }
    }
}
