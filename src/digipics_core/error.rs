use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigipicsError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to transfer {from} -> {to}: {source}")]
    Transfer {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    // Filesystem errors
    #[error("Directory walker error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Collection not found at {0}")]
    CollectionNotFound(PathBuf),

    // Configuration errors
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("No collection given: pass --collection or set `collection` in {0}")]
    MissingCollection(PathBuf),

    // Metadata errors
    #[error("Exiftool error: {0}")]
    Exiftool(String),

    #[error("Date formatting error: {0}")]
    Format(#[from] time::error::Format),
}

/// Result type for digipics operations.
pub type Result<T> = std::result::Result<T, DigipicsError>;
