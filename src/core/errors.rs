//! Shared error types for the application

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Main error type for entitymap operations
#[derive(Debug, Error)]
pub enum Error {
    /// No registered backend recognised the project
    #[error("No supported backend found for project at {}", path.display())]
    NoSupportedBackend { path: PathBuf },

    /// A backend was requested by a name nobody registered
    #[error("Unknown backend '{0}' (expected one of: typeorm, sequelize, mongoose, prisma)")]
    UnknownBackend(String),

    /// The project root does not exist or is not a directory
    #[error("Project directory not found: {}", path.display())]
    ProjectNotFound { path: PathBuf },

    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The external parser script could not be located
    #[error("AST parser script not found at {}", path.display())]
    DelegateScriptMissing { path: PathBuf },

    /// The external parser ran but exited unsuccessfully
    #[error("Failed to execute interface parser ({status}): {stderr}")]
    DelegateFailed { status: ExitStatus, stderr: String },

    /// The external parser printed something that is not a metadata document
    #[error("Failed to parse AST output: {0}")]
    DelegateOutput(#[source] serde_json::Error),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    /// Create a file system error wrapping the underlying io error
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        Self::FileSystem {
            message: format!("{}: {}", path.display(), source),
            path: Some(path),
            source: Some(source),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
