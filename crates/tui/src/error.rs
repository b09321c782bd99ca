use crate::app::runtime::GatewayError;

/// Failures that stop the application before or while the UI runs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to start backend: {0}")]
    Backend(#[from] GatewayError),
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
