//! Core error types for timetable-core.
//!
//! This module defines a comprehensive error hierarchy using thiserror
//! for better error handling and reporting across the library.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timetable-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read a named blob from the backing store
    #[error("Failed to read store '{name}': {source}")]
    ReadFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a named blob to the backing store
    #[error("Failed to write store '{name}': {source}")]
    WriteFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored blob is not valid JSON for the expected shape
    #[error("Failed to decode store '{name}': {source}")]
    DecodeFailed {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize state for writing
    #[error("Failed to encode store '{name}': {source}")]
    EncodeFailed {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Blob was written by a newer release of this library
    #[error("Store '{name}' has schema version {found}, newest supported is {supported}")]
    UnsupportedVersion {
        name: String,
        found: u32,
        supported: u32,
    },

    /// Data directory could not be created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors raised at the work-registry boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty or only whitespace
    #[error("Work item name must not be empty")]
    EmptyName,

    /// Start time is not a 24-hour HH:mm string
    #[error("Invalid start time '{0}': expected 24-hour HH:mm")]
    InvalidStartTime(String),

    /// Duration of zero minutes
    #[error("Duration must be at least one minute")]
    ZeroDuration,

    /// Numeric field outside its documented range
    #[error("Invalid value for '{field}': {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
