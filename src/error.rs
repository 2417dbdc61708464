// ThemeDeck Errors

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors raised by the native backend
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl From<std::io::Error> for BackendError {
    fn from(error: std::io::Error) -> Self {
        BackendError::Io(error.to_string())
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(error: reqwest::Error) -> Self {
        BackendError::Network(error.to_string())
    }
}

/// Errors surfaced by the settings store and game catalog
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Load failed: {0}")]
    Load(BackendError),

    #[error("Save failed: {0}")]
    Save(BackendError),
}
