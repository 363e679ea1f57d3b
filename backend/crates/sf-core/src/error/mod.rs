use crate::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid email address '{value}': {reason} {location}")]
    InvalidEmail {
        value: String,
        reason: &'static str,
        location: ErrorLocation,
    },

    #[error("Invalid dependent relation {table}.{column}: {reason} {location}")]
    InvalidRelation {
        table: String,
        column: String,
        reason: &'static str,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
