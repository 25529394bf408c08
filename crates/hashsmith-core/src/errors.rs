use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while building patterns or persisting candidates.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A composite node was configured in a way that cannot produce output.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open wordlist {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing stopped part way; `written` lines reached the destination.
    #[error("write failed after {written} lines: {source}")]
    Write {
        written: u64,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for results returned by the pattern engine.
pub type Result<T> = std::result::Result<T, GenerationError>;
