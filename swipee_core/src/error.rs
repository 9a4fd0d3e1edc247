use std::path::PathBuf;

use thiserror::Error;

use crate::source::InputSource;

/// Rejected command lines. Both kinds are reported together with the usage text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Error: Invalid arguments for command: {command} ({reason})")]
    InvalidArguments { command: String, reason: String },

    #[error("Error: Unknown command: {0}")]
    UnknownCommand(String),
}

/// Failure reported by the injection collaborator. Fatal for the whole gesture.
#[derive(Error, Debug)]
pub enum InjectionError {
    #[error("Failed to open input device {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to input device {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source {0} cannot carry motion events on this device")]
    UnsupportedSource(InputSource),

    #[error("Failed to encode sample: {0}")]
    Encode(String),

    #[error("Injection rejected: {0}")]
    Rejected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration invalid: {reason}")]
    Invalid { reason: String },
}
