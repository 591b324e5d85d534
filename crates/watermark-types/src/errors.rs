use thiserror::Error;

pub type Result<T, E = WatermarkError> = std::result::Result<T, E>;

/// Unified error type covering common failure scenarios across crates.
#[derive(Debug, Error)]
pub enum WatermarkError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("buffer error: {0}")]
    Buffer(String),
    #[error("export error: {0}")]
    Export(String),
    #[error("operational error: {0}")]
    Ops(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
