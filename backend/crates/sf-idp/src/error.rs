use error_location::ErrorLocation;
use std::panic::Location;
use thiserror::Error;

/// Errors from talking to the identity provider
#[derive(Error, Debug)]
pub enum IdpError {
    #[error("Identity provider request failed: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Identity provider rejected credentials (HTTP {status}): {message} {location}")]
    Unauthorized {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity provider error (HTTP {status}): {message} {location}")]
    Api {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity provider returned malformed JSON: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Identity provider client misconfigured: {message} {location}")]
    Configuration {
        message: String,
        location: ErrorLocation,
    },
}

impl IdpError {
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        IdpError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        IdpError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Maps a non-success status to `Unauthorized` (401/403) or `Api`.
    #[track_caller]
    pub fn from_status(status: u16, message: String) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match status {
            401 | 403 => IdpError::Unauthorized {
                status,
                message,
                location,
            },
            _ => IdpError::Api {
                status,
                message,
                location,
            },
        }
    }

    #[track_caller]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        IdpError::Configuration {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for IdpError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        IdpError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for IdpError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        IdpError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, IdpError>;
