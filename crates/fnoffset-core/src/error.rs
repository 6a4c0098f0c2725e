use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load module image: {0}")]
    LoadFailed(String),

    #[error("Failed to read {len} bytes at offset {offset:#x}: {message}")]
    ReadFailed {
        offset: u64,
        len: usize,
        message: String,
    },

    #[error("Invalid signature pattern: {0}")]
    InvalidPattern(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a genuine "no export entry / no scan match".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
