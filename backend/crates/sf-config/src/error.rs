use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ConfigError {
    /// A setting failed validation; `section` is the TOML table it lives in.
    #[error("Invalid [{section}] setting: {message} {location}")]
    Invalid {
        section: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Cannot determine current working directory: {source} {location}")]
    WorkingDirectory {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::invalid("database", message.into())
    }

    #[track_caller]
    pub fn identity_provider<S: Into<String>>(message: S) -> Self {
        Self::invalid("identity_provider", message.into())
    }

    #[track_caller]
    pub fn retry<S: Into<String>>(message: S) -> Self {
        Self::invalid("retry", message.into())
    }

    #[track_caller]
    pub fn working_directory(source: std::io::Error) -> Self {
        ConfigError::WorkingDirectory {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Section name of an `Invalid` error, for tests and log context.
    pub fn section(&self) -> Option<&'static str> {
        match self {
            ConfigError::Invalid { section, .. } => Some(section),
            _ => None,
        }
    }

    #[track_caller]
    fn invalid(section: &'static str, message: String) -> Self {
        ConfigError::Invalid {
            section,
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
