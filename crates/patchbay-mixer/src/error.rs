//! Error types for channel sends and mixer configuration.

use std::path::PathBuf;

use patchbay_core::{PortIdentity, RoutingError};
use thiserror::Error;

use crate::signal::SignalType;

/// Errors raised by channel-send operations.
#[derive(Debug, Error)]
pub enum SendError {
    /// The compatibility check refused the target
    #[error("cannot connect {src} to {dest}")]
    ConnectionRejected {
        /// Send output port.
        src: PortIdentity,
        /// Rejected target port.
        dest: PortIdentity,
    },

    /// Target signal kind does not match the send
    #[error("send carries {expected} signal, target is {found}")]
    SignalMismatch {
        /// Signal kind of the send.
        expected: SignalType,
        /// Signal kind of the target.
        found: SignalType,
    },

    /// Routing lookup failed
    #[error(transparent)]
    Routing(#[from] RoutingError),
}

impl SendError {
    /// Create a rejected-connection error.
    pub fn rejected(src: &PortIdentity, dest: &PortIdentity) -> Self {
        SendError::ConnectionRejected {
            src: src.clone(),
            dest: dest.clone(),
        }
    }
}

/// Errors that can occur while loading mixer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A value is out of range
    #[error("invalid mixer config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid-value error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        ConfigError::Invalid(reason.into())
    }
}
