use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] sf_config::ConfigError),

    #[error("{0}")]
    InvalidEmail(#[from] sf_core::CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sf_db::DbError),

    #[error("{0}")]
    Provider(#[from] sf_idp::IdpError),

    #[error("Reconciliation failed: {0}")]
    Reconcile(#[from] sf_reconcile::ReconcileError),

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, CliError>;
