use hyper::StatusCode;

/// Everything that can go wrong delivering a submission.
///
/// These are logged and collapsed to `false` at the [`Backend`](super::Backend) boundary.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The configured origin is not an absolute `http`/`https` URL with a host.
    #[error("invalid backend origin: {0}")]
    InvalidOrigin(String),

    /// Connecting or talking to the backend failed at the socket level.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The origin host is not a valid TLS server name.
    #[error("invalid TLS server name: {0}")]
    ServerName(String),

    /// The HTTP exchange failed.
    #[error("HTTP error: {0}")]
    Hyper(#[from] hyper::Error),

    /// The request could not be built.
    #[error("HTTP request error: {0}")]
    Request(#[from] hyper::http::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {0}")]
    Status(StatusCode),

    /// The body was not the expected JSON, or the record failed to serialize.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend answered `success: false`.
    #[error("backend rejected submission: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
}
