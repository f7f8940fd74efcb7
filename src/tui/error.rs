use crate::backend::BackendError;
use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Errors that can stop the kiosk.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, runtime start-up).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The configured backend origin could not be used.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}
