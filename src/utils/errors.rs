use thiserror::Error;

/// Main error type for the SchemesConnect client
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Service error: {0}")]
    ServiceError(#[from] crate::service::ServiceError),

    #[error("Store error: {0}")]
    StoreError(String),
}
